//! Loading lint configuration and route documents from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::LintConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Default lint configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "route-lint.toml";

/// Error reading or parsing a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported document format for {0} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Error loading a lint configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialization format of a route document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Parse document text in the given format into a JSON value.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<Value, LoadError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(path, e)),
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(path, e)),
    }
}

/// Load a route document (JSON, YAML or TOML) as a JSON value.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = read(path)?;
    let document = parse_document(&content, format, path)?;
    tracing::debug!(path = %path.display(), ?format, "Document loaded");
    Ok(document)
}

/// Load and validate a lint configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LintConfig, ConfigError> {
    let content = read(path)?;
    let config: LintConfig = toml::from_str(&content).map_err(|e| parse_error(path, e))?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the configuration at `explicit`, else `route-lint.toml` if it
/// exists, else the defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<LintConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        return load_config(default_path);
    }
    Ok(LintConfig::default())
}
