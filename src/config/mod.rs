//! Configuration and document loading.
//!
//! # Data Flow
//! ```text
//! route-lint.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LintConfig (validated, immutable)
//!     → owned by the Linter for the whole run
//!
//! route document (JSON/YAML/TOML)
//!     → loader.rs (parse to serde_json::Value)
//!     → lint::document (normalize to RouteTable)
//!
//! In watch mode:
//!     watcher.rs detects change
//!     → loader.rs loads the document again
//!     → fresh lint session, new report over a channel
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::LintConfig;
pub use schema::RuleToggles;
pub use schema::SubrouteOptions;
pub use schema::VersionOptions;
