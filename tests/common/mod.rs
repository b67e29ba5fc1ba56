//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use route_lint::config::loader::load_document;
use route_lint::{LintConfig, LintReport, LintSession, Linter, Route};

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture and lint it with the default configuration.
pub fn lint_fixture(name: &str) -> LintReport {
    lint_fixture_with(name, LintConfig::default())
}

pub fn lint_fixture_with(name: &str, config: LintConfig) -> LintReport {
    let path = fixture(name);
    let document = load_document(&path).expect("fixture should load");
    Linter::new(config)
        .lint_document(&mut LintSession::new(), &document)
        .with_source(&path)
}

/// Routes with ids `r1..` and the given paths, all unversioned.
pub fn routes(paths: &[&str]) -> Vec<Route> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| Route::new(*path).with_id(format!("r{}", i + 1)))
        .collect()
}
