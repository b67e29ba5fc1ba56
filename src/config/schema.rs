//! Lint configuration schema.
//!
//! Every section has defaults, so an empty file (or no file at all) yields
//! the standard rule set.

use serde::{Deserialize, Serialize};

/// Root configuration for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LintConfig {
    /// Which rules run.
    pub rules: RuleToggles,

    /// Options for subroute validation.
    pub subroutes: SubrouteOptions,

    /// Options for version field validation.
    pub versions: VersionOptions,

    pub logging: LoggingConfig,
}

/// Enable flags, one per rule.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleToggles {
    pub path_order: bool,
    pub subroutes: bool,
    pub version_start: bool,
    pub version_end: bool,
    pub latest_version_override: bool,
    /// Off by default: it conflicts with the versioned-first path order.
    pub version_start_order: bool,
    pub unique_id: bool,
    pub rate_limit: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            path_order: true,
            subroutes: true,
            version_start: true,
            version_end: true,
            latest_version_override: true,
            version_start_order: false,
            unique_id: true,
            rate_limit: true,
        }
    }
}

/// Subroute validation options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SubrouteOptions {
    /// Methods a subroute may restrict to.
    pub allowed_methods: Vec<String>,

    /// Version tags that predate year-based versions.
    pub legacy_versions: Vec<String>,
}

impl Default for SubrouteOptions {
    fn default() -> Self {
        Self {
            allowed_methods: ["GET", "POST", "PUT", "PATCH"]
                .into_iter()
                .map(String::from)
                .collect(),
            legacy_versions: vec!["beta".to_string(), "v3".to_string()],
        }
    }
}

/// Version field options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VersionOptions {
    /// Smallest year a non-zero version may name.
    pub minimum_year: u32,
}

impl Default for VersionOptions {
    fn default() -> Self {
        Self { minimum_year: 2024 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
