//! Route table linter for API gateways.
//!
//! Validates that a gateway's declarative route table is arranged in a
//! conflict-free matching order and that its versioned subroutes, rate
//! limits and rights are consistent.

pub mod config;
pub mod lifecycle;
pub mod lint;
pub mod observability;
pub mod routing;
pub mod rules;

pub use config::schema::LintConfig;
pub use lint::{LintReport, LintSession, Linter, RouteTable};
pub use routing::model::Route;
pub use rules::{Diagnostic, DocPath, RuleId};
