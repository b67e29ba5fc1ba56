//! Route table rules and their diagnostics.
//!
//! # Data Flow
//! ```text
//! Route table (normalized at the document edge)
//!     → routing::order      (canonical ordering)
//!     → subroutes.rs        (methods, versions, access, rate limits)
//!     → version.rs          (version field domains, declaration order)
//!     → unique_id.rs        (ids across the run)
//!     → rate_limit.rs       (route-level rate limit pairing)
//!     → Vec<Diagnostic>
//! ```
//!
//! # Design Decisions
//! - Rules are plain functions: (value, options) → Vec<Diagnostic>
//! - Malformed input is a diagnostic, never a panic or an Err
//! - Paths are relative to the route table; the driver prefixes them

pub mod rate_limit;
pub mod subroutes;
pub mod unique_id;
pub mod version;

use std::fmt;

use serde::Serialize;

/// Identifies the rule that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Document shape (table is not an array, route unreadable).
    RouteTable,
    CheckPathOrder,
    CheckSubroutes,
    CheckVersionStart,
    CheckVersionEnd,
    CheckLatestVersionOverride,
    CheckVersionStartOrder,
    CheckUniqueId,
    CheckRateLimit,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::RouteTable => "route-table",
            RuleId::CheckPathOrder => "check-path-order",
            RuleId::CheckSubroutes => "check-subroutes",
            RuleId::CheckVersionStart => "check-version-start",
            RuleId::CheckVersionEnd => "check-version-end",
            RuleId::CheckLatestVersionOverride => "check-latest-version-override",
            RuleId::CheckVersionStartOrder => "check-version-start-order",
            RuleId::CheckUniqueId => "check-unique-id",
            RuleId::CheckRateLimit => "check-rate-limit",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step in a document path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocPath(Vec<PathSegment>);

impl DocPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to the route at `index` in the table.
    pub fn route(index: usize) -> Self {
        Self(vec![PathSegment::Index(index)])
    }

    /// Extend the path by one segment.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Prepend `prefix` to this path.
    pub fn prefixed(&self, prefix: &DocPath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub message: String,
    #[serde(skip_serializing_if = "DocPath::is_empty")]
    pub path: DocPath,
}

impl Diagnostic {
    pub fn new(rule: RuleId, message: impl Into<String>, path: DocPath) -> Self {
        Self {
            rule,
            message: message.into(),
            path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] {}", self.rule, self.message)
        } else {
            write!(f, "{}: [{}] {}", self.path, self.rule, self.message)
        }
    }
}
