//! Version field validators.
//!
//! # Responsibilities
//! - `versionStart` / `versionEnd`: integer, and 0 or a calendar year
//! - `latestVersionOverride`: same domain, bounded by `versionEnd`
//! - Declaration order: no unversioned sentinel after a year-based route
//!
//! # Design Decisions
//! - The integer and domain checks are independent; both may fire
//! - Order state lives in a tracker owned by the lint session, never in
//!   globals

use crate::config::schema::VersionOptions;
use crate::routing::model::{Route, VersionValue};
use crate::rules::{Diagnostic, DocPath, RuleId};

/// Check one version field against the version domain.
pub fn check_version_value(
    rule: RuleId,
    field: &str,
    value: &VersionValue,
    options: &VersionOptions,
    path: &DocPath,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if value.as_integer().is_none() {
        diagnostics.push(Diagnostic::new(
            rule,
            format!("{} must be a number, got {}", field, value),
            path.clone(),
        ));
    }
    if !in_domain(value, options) {
        diagnostics.push(Diagnostic::new(
            rule,
            format!(
                "{} must be 0 or higher than {}, got {}",
                field, options.minimum_year, value
            ),
            path.clone(),
        ));
    }

    diagnostics
}

/// 0, or at least the minimum year.
fn in_domain(value: &VersionValue, options: &VersionOptions) -> bool {
    value
        .as_number()
        .is_some_and(|n| n == 0.0 || n >= options.minimum_year as f64)
}

fn is_valid(value: &VersionValue, options: &VersionOptions) -> bool {
    value.as_integer().is_some() && in_domain(value, options)
}

/// Check `versionStart` of each route.
pub fn check_version_start(routes: &[Route], options: &VersionOptions) -> Vec<Diagnostic> {
    routes
        .iter()
        .enumerate()
        .filter_map(|(index, route)| route.version_start.as_ref().map(|v| (index, v)))
        .flat_map(|(index, value)| {
            check_version_value(
                RuleId::CheckVersionStart,
                "versionStart",
                value,
                options,
                &DocPath::route(index).join("versionStart"),
            )
        })
        .collect()
}

/// Check `versionEnd` of each route.
pub fn check_version_end(routes: &[Route], options: &VersionOptions) -> Vec<Diagnostic> {
    routes
        .iter()
        .enumerate()
        .filter_map(|(index, route)| route.version_end.as_ref().map(|v| (index, v)))
        .flat_map(|(index, value)| {
            check_version_value(
                RuleId::CheckVersionEnd,
                "versionEnd",
                value,
                options,
                &DocPath::route(index).join("versionEnd"),
            )
        })
        .collect()
}

/// Check `latestVersionOverride` of one route.
pub fn check_latest_version_override(
    route: &Route,
    options: &VersionOptions,
    path: &DocPath,
) -> Vec<Diagnostic> {
    let Some(value) = route.latest_version_override.as_ref() else {
        return Vec::new();
    };
    let path = path.join("latestVersionOverride");

    let mut diagnostics = check_version_value(
        RuleId::CheckLatestVersionOverride,
        "latestVersionOverride",
        value,
        options,
        &path,
    );

    let end = route
        .version_end
        .as_ref()
        .filter(|end| is_valid(end, options))
        .and_then(VersionValue::as_integer)
        .filter(|&end| end != 0);
    if let (Some(end), Some(latest)) = (end, value.as_number()) {
        if latest > end as f64 {
            diagnostics.push(Diagnostic::new(
                RuleId::CheckLatestVersionOverride,
                format!(
                    "latestVersionOverride {} must not be greater than versionEnd {}",
                    value, end
                ),
                path,
            ));
        }
    }

    diagnostics
}

/// Tracks whether a year-based `versionStart` has been declared yet.
///
/// Routes without a version (absent or a single-digit sentinel) must all be
/// declared before the first year-based one.
#[derive(Debug, Clone, Default)]
pub struct VersionOrderTracker {
    year_seen: Option<usize>,
}

impl VersionOrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the `versionStart` of the route at `index`.
    pub fn observe(&mut self, value: Option<&VersionValue>, index: usize) -> Vec<Diagnostic> {
        let number = match value {
            None => Some(0),
            Some(v) => v.as_integer(),
        };
        let Some(number) = number else {
            return Vec::new();
        };

        if number >= 1000 {
            self.year_seen.get_or_insert(index);
            return Vec::new();
        }

        match self.year_seen {
            Some(first) if (0..=9).contains(&number) => vec![Diagnostic::new(
                RuleId::CheckVersionStartOrder,
                format!(
                    "versionStart {} is declared after the year-based versionStart at position {}; declare unversioned routes first",
                    number, first
                ),
                DocPath::route(index).join("versionStart"),
            )],
            _ => Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.year_seen = None;
    }
}
