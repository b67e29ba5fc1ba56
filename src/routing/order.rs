//! Canonical route order and its validator.
//!
//! # Responsibilities
//! - Reject tables with routes lacking a path
//! - Compute the canonical order: versioned routes, then unversioned, each
//!   sorted by the priority comparator
//! - Report where the declared order first diverges
//!
//! # Design Decisions
//! - Only the first divergence is reported; later mismatches cascade from it
//! - Sorting is stable, so routes with identical paths keep declared order
//! - The input table is never mutated

use crate::routing::comparator::compare_routes;
use crate::routing::model::Route;
use crate::rules::{Diagnostic, DocPath, RuleId};

/// Indices of `routes` in canonical order.
pub fn canonical_order(routes: &[Route]) -> Vec<usize> {
    let (mut versioned, mut unversioned): (Vec<usize>, Vec<usize>) =
        (0..routes.len()).partition(|&i| routes[i].is_versioned());

    versioned.sort_by(|&a, &b| compare_routes(&routes[a], &routes[b]));
    unversioned.sort_by(|&a, &b| compare_routes(&routes[a], &routes[b]));

    versioned.extend(unversioned);
    versioned
}

/// Check that routes are declared in canonical order.
pub fn check_path_order(routes: &[Route]) -> Vec<Diagnostic> {
    let missing: Vec<Diagnostic> = routes
        .iter()
        .enumerate()
        .filter(|(_, route)| route.path.is_empty())
        .map(|(index, route)| {
            Diagnostic::new(
                RuleId::CheckPathOrder,
                format!("route {} ({}) must have a non-empty path", index, route.label()),
                DocPath::route(index).join("path"),
            )
        })
        .collect();
    if !missing.is_empty() {
        return missing;
    }

    let canonical = canonical_order(routes);
    let Some(position) = canonical.iter().enumerate().position(|(i, &c)| i != c) else {
        return Vec::new();
    };

    let offending = &routes[position];
    let expected = &routes[canonical[position]];
    let target = canonical
        .iter()
        .position(|&c| c == position)
        .unwrap_or(position);

    tracing::debug!(
        path = %offending.path,
        current = position,
        expected = target,
        "route out of canonical order"
    );

    vec![Diagnostic::new(
        RuleId::CheckPathOrder,
        format!(
            "route '{}' ({}) is at position {} but should be at position {}; expected '{}' ({}) at position {}",
            offending.path,
            offending.label(),
            position,
            target,
            expected.path,
            expected.label(),
            position
        ),
        DocPath::route(position),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(paths: &[&str]) -> Vec<Route> {
        paths
            .iter()
            .enumerate()
            .map(|(i, p)| Route::new(*p).with_id(format!("r{}", i + 1)))
            .collect()
    }

    #[test]
    fn test_specific_before_general() {
        let routes = vec![
            Route::new("/a/{id}").with_id("r1").with_version_start(0),
            Route::new("/a/b").with_id("r2").with_version_start(0),
        ];

        let diags = check_path_order(&routes);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, DocPath::route(0));
        assert!(diags[0].message.contains("'/a/{id}' (r1)"));
        assert!(diags[0].message.contains("at position 0 but should be at position 1"));
        assert!(diags[0].message.contains("expected '/a/b' (r2)"));
    }

    #[test]
    fn test_sorted_table_is_clean() {
        let routes = table(&["/a/b/c", "/a/{b}/c", "/a/b", "/a/{b}", "/aaa", "/aa", "/ab", "/{a}"]);
        assert!(check_path_order(&routes).is_empty());
    }

    #[test]
    fn test_adjacent_swap_reports_once() {
        let sorted = table(&["/a/b/c", "/a/{b}/c", "/a/b", "/a/{b}", "/aaa", "/aa", "/{a}"]);
        for i in 0..sorted.len() - 1 {
            let mut routes = sorted.clone();
            routes.swap(i, i + 1);
            let diags = check_path_order(&routes);
            assert_eq!(diags.len(), 1, "swap at {}", i);
            assert_eq!(diags[0].path, DocPath::route(i));
        }
    }

    #[test]
    fn test_versioned_partition_first() {
        let routes = vec![
            Route::new("/a/b/c").with_id("plain"),
            Route::new("/{x}").with_id("dated").with_version_start(2024),
        ];
        assert_eq!(canonical_order(&routes), vec![1, 0]);

        let diags = check_path_order(&routes);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("(plain)"));
    }

    #[test]
    fn test_missing_paths_short_circuit() {
        let routes = vec![
            Route::new("/{a}").with_id("r1"),
            Route::new("").with_id("r2"),
            Route::new("/a/b").with_id("r3"),
            Route::default(),
        ];
        let diags = check_path_order(&routes);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].path, DocPath::route(1).join("path"));
        assert!(diags[1].message.contains("<no id>"));
    }

    #[test]
    fn test_duplicate_paths_keep_declared_order() {
        let routes = table(&["/a", "/a"]);
        assert_eq!(canonical_order(&routes), vec![0, 1]);
        assert!(check_path_order(&routes).is_empty());
    }

    #[test]
    fn test_empty_table() {
        assert!(check_path_order(&[]).is_empty());
    }
}
