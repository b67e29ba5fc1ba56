//! Lint configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (minimum year, log level)
//! - Validate vocabularies (method names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LintConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is used for a lint run

use thiserror::Error;

use crate::config::schema::LintConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a lint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("subroutes.allowed_methods must not be empty")]
    NoAllowedMethods,

    #[error("subroutes.allowed_methods entry '{0}' must be an upper-case method name")]
    InvalidMethod(String),

    #[error("subroutes.legacy_versions entry '{0}' must not be empty")]
    EmptyLegacyVersion(String),

    #[error("versions.minimum_year {0} must be at least 1000")]
    MinimumYearTooSmall(u32),

    #[error("logging.level '{0}' must be one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a lint configuration, collecting every problem.
pub fn validate_config(config: &LintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.subroutes.allowed_methods.is_empty() {
        errors.push(ValidationError::NoAllowedMethods);
    }
    for method in &config.subroutes.allowed_methods {
        let well_formed = !method.is_empty() && method.chars().all(|c| c.is_ascii_uppercase());
        if !well_formed {
            errors.push(ValidationError::InvalidMethod(method.clone()));
        }
    }
    for tag in &config.subroutes.legacy_versions {
        if tag.trim().is_empty() {
            errors.push(ValidationError::EmptyLegacyVersion(tag.clone()));
        }
    }

    if config.versions.minimum_year < 1000 {
        errors.push(ValidationError::MinimumYearTooSmall(config.versions.minimum_year));
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LintConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = LintConfig::default();
        config.subroutes.allowed_methods = vec!["get".into(), "POST".into()];
        config.versions.minimum_year = 24;
        config.logging.level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidMethod("get".into()),
                ValidationError::MinimumYearTooSmall(24),
                ValidationError::InvalidLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_empty_method_list() {
        let mut config = LintConfig::default();
        config.subroutes.allowed_methods.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::NoAllowedMethods]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::MinimumYearTooSmall(24);
        assert_eq!(err.to_string(), "versions.minimum_year 24 must be at least 1000");
    }
}
