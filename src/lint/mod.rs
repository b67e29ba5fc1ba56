//! Lint driver.
//!
//! # Data Flow
//! ```text
//! serde_json::Value (from config::loader)
//!     → document.rs (normalize to RouteTable; unreadable fields become
//!                    route-table diagnostics, the route itself is kept)
//!     → Linter (run enabled rules in document order)
//!         - per table:  path order, subroutes, version fields, rate limits
//!         - per route:  unique id, version start order (session state)
//!     → LintReport (diagnostics located in the document)
//! ```
//!
//! # Design Decisions
//! - Cross-route state lives in a caller-owned LintSession, never globals
//! - A session is reset explicitly at the start of each run
//! - The linter itself is immutable and can be shared

pub mod document;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::config::schema::LintConfig;
use crate::routing::model::Route;
use crate::routing::order::check_path_order;
use crate::rules::rate_limit::check_route_rate_limit;
use crate::rules::subroutes::check_subroutes;
use crate::rules::unique_id::IdRegistry;
use crate::rules::version::{
    check_latest_version_override, check_version_end, check_version_start, VersionOrderTracker,
};
use crate::rules::{Diagnostic, DocPath};

pub use document::RouteTable;

/// Accumulated state for one validation run.
///
/// Rules that look across routes (duplicate ids, version declaration order)
/// record what they have seen here. Reuse a session across documents only
/// when they form one logical table.
#[derive(Debug, Clone, Default)]
pub struct LintSession {
    ids: IdRegistry,
    version_order: VersionOrderTracker,
}

impl LintSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self) {
        self.ids.reset();
        self.version_order.reset();
    }

    pub fn ids(&mut self) -> &mut IdRegistry {
        &mut self.ids
    }

    pub fn version_order(&mut self) -> &mut VersionOrderTracker {
        &mut self.version_order
    }
}

/// Result of linting one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub routes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn with_source(mut self, source: &Path) -> Self {
        self.source = Some(source.to_path_buf());
        self
    }
}

/// Runs the enabled rules over route tables.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Lint a parsed document.
    pub fn lint_document(&self, session: &mut LintSession, document: &Value) -> LintReport {
        match RouteTable::from_document(document) {
            Ok(table) => self.lint_table(session, &table),
            Err(diagnostics) => {
                tracing::debug!(count = diagnostics.len(), "route table rejected");
                LintReport {
                    diagnostics,
                    ..LintReport::default()
                }
            }
        }
    }

    /// Lint a normalized route table. Fields that could not be read are
    /// reported first; every rule still runs over the routes.
    pub fn lint_table(&self, session: &mut LintSession, table: &RouteTable) -> LintReport {
        let mut diagnostics = table.problems.clone();
        diagnostics.extend(self.lint_routes(session, &table.routes));
        LintReport {
            source: None,
            routes: table.routes.len(),
            diagnostics: table.locate(diagnostics),
        }
    }

    /// Lint routes, with diagnostic paths relative to the table.
    pub fn lint_routes(&self, session: &mut LintSession, routes: &[Route]) -> Vec<Diagnostic> {
        let rules = &self.config.rules;
        let mut diagnostics = Vec::new();

        if rules.path_order {
            let found = check_path_order(routes);
            tracing::debug!(rule = "check-path-order", count = found.len(), "rule finished");
            diagnostics.extend(found);
        }
        if rules.subroutes {
            let found = check_subroutes(routes, &self.config.subroutes);
            tracing::debug!(rule = "check-subroutes", count = found.len(), "rule finished");
            diagnostics.extend(found);
        }
        if rules.version_start {
            diagnostics.extend(check_version_start(routes, &self.config.versions));
        }
        if rules.version_end {
            diagnostics.extend(check_version_end(routes, &self.config.versions));
        }
        if rules.rate_limit {
            diagnostics.extend(check_route_rate_limit(routes));
        }

        for (index, route) in routes.iter().enumerate() {
            if rules.latest_version_override {
                diagnostics.extend(check_latest_version_override(
                    route,
                    &self.config.versions,
                    &DocPath::route(index),
                ));
            }
            if rules.unique_id {
                diagnostics.extend(session.ids().check(route, index));
            }
            if rules.version_start_order {
                diagnostics.extend(
                    session
                        .version_order()
                        .observe(route.version_start.as_ref(), index),
                );
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleId;
    use serde_json::json;

    #[test]
    fn test_clean_document() {
        let linter = Linter::default();
        let mut session = LintSession::new();
        let report = linter.lint_document(
            &mut session,
            &json!({
                "routes": [
                    { "id": "dated", "path": "/v/{id}", "versionStart": 2024 },
                    { "id": "users", "path": "/users/me" },
                    { "id": "user", "path": "/users/{id}" }
                ]
            }),
        );
        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert_eq!(report.routes, 3);
    }

    #[test]
    fn test_diagnostics_are_located() {
        let linter = Linter::default();
        let mut session = LintSession::new();
        let report = linter.lint_document(
            &mut session,
            &json!({ "routes": [{ "id": "a", "path": "/a", "versionStart": 2023 }] }),
        );
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].rule, RuleId::CheckVersionStart);
        assert_eq!(report.diagnostics[0].path.to_string(), "routes[0].versionStart");
    }

    #[test]
    fn test_rejected_table() {
        let report = Linter::default().lint_document(&mut LintSession::new(), &json!("routes"));
        assert_eq!(report.routes, 0);
        assert_eq!(report.diagnostics[0].rule, RuleId::RouteTable);
    }

    #[test]
    fn test_repeated_subroute_key_does_not_hide_entries() {
        let report = Linter::default().lint_document(
            &mut LintSession::new(),
            &json!([{
                "id": "s",
                "path": "/s",
                "subroutes": [
                    { "key": "s", "value": { "methods": ["DELETE"], "rights": ["x"] } },
                    { "key": "s", "value": { "rights": ["x"] } }
                ]
            }]),
        );

        let found: Vec<(RuleId, String)> = report
            .diagnostics
            .iter()
            .map(|d| (d.rule, d.path.to_string()))
            .collect();
        assert_eq!(
            found,
            vec![
                (RuleId::RouteTable, "[0].subroutes[1].key".to_string()),
                (RuleId::CheckSubroutes, "[0].subroutes.s.methods[0]".to_string()),
            ]
        );
    }

    #[test]
    fn test_session_carries_ids_until_reset() {
        let linter = Linter::default();
        let mut session = LintSession::new();
        let routes = vec![Route::new("/a").with_id("a")];

        assert!(linter.lint_routes(&mut session, &routes).is_empty());
        let again = linter.lint_routes(&mut session, &routes);
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].rule, RuleId::CheckUniqueId);

        session.reset();
        assert!(linter.lint_routes(&mut session, &routes).is_empty());
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let mut config = LintConfig::default();
        config.rules.path_order = false;
        config.rules.unique_id = false;
        let linter = Linter::new(config);

        let routes = vec![Route::new("/{a}"), Route::new("/a/b")];
        assert!(linter.lint_routes(&mut LintSession::new(), &routes).is_empty());
    }

    #[test]
    fn test_version_start_order_opt_in() {
        let mut config = LintConfig::default();
        config.rules.version_start_order = true;
        let linter = Linter::new(config);

        let routes = vec![
            Route::new("/b/{id}").with_id("dated").with_version_start(2024),
            Route::new("/a").with_id("plain"),
        ];
        let diags = linter.lint_routes(&mut LintSession::new(), &routes);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleId::CheckVersionStartOrder);
    }
}
