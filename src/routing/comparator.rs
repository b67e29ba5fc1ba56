//! Route priority comparator.
//!
//! Orders routes so that a gateway checking them first-match-wins never lets
//! a general pattern shadow a more specific one.
//!
//! # Ordering Keys
//! 1. Segment count, descending
//! 2. Static segment count, descending
//! 3. Segment by segment: static before variable; two literals by length
//!    descending, then lexicographically; two variables tie
//! 4. Full path, lexicographically
//!
//! The last key makes this a total order over distinct path strings.
//! Literal lengths count Unicode scalar values and comparison is by code
//! point, so literals outside the Basic Multilingual Plane may sort
//! differently than under UTF-16 code unit rules.

use std::cmp::Ordering;

use crate::routing::model::Route;
use crate::routing::segment::{PathShape, Segment, SegmentKind};

/// Compare two path templates by matching priority.
/// `Less` means `a` must be checked before `b`.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let shape_a = PathShape::parse(a);
    let shape_b = PathShape::parse(b);

    shape_b
        .segment_count()
        .cmp(&shape_a.segment_count())
        .then_with(|| shape_b.static_count().cmp(&shape_a.static_count()))
        .then_with(|| compare_segments(shape_a.segments(), shape_b.segments()))
        .then_with(|| a.cmp(b))
}

/// Compare two routes by their paths.
pub fn compare_routes(a: &Route, b: &Route) -> Ordering {
    compare_paths(&a.path, &b.path)
}

fn compare_segments(a: &[Segment<'_>], b: &[Segment<'_>]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ordering = match (x.kind, y.kind) {
            (SegmentKind::Static, SegmentKind::Variable) => Ordering::Less,
            (SegmentKind::Variable, SegmentKind::Static) => Ordering::Greater,
            (SegmentKind::Static, SegmentKind::Static) => {
                y.len().cmp(&x.len()).then_with(|| x.text.cmp(y.text))
            }
            (SegmentKind::Variable, SegmentKind::Variable) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(paths: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        out.sort_by(|a, b| compare_paths(a, b));
        out
    }

    #[test]
    fn test_segment_count_first() {
        assert_eq!(compare_paths("/a/b/c", "/a/b"), Ordering::Less);
        assert_eq!(compare_paths("/{x}/{y}/{z}", "/a/b"), Ordering::Less);
    }

    #[test]
    fn test_static_count_second() {
        assert_eq!(compare_paths("/a/b", "/a/{b}"), Ordering::Less);
        assert_eq!(compare_paths("/a/{b}", "/{a}/{b}"), Ordering::Less);
        assert_eq!(
            sorted(&["/{a}/{b}/{c}", "/a/{b}/{c}", "/a/b/c"]),
            vec!["/a/b/c", "/a/{b}/{c}", "/{a}/{b}/{c}"]
        );
    }

    #[test]
    fn test_static_position_breaks_tie() {
        // Same counts; the literal in the first position wins.
        assert_eq!(compare_paths("/a/{b}", "/{a}/b"), Ordering::Less);
        assert_eq!(compare_paths("/{a}/b", "/a/{b}"), Ordering::Greater);
    }

    #[test]
    fn test_longer_literal_first() {
        assert_eq!(compare_paths("/aaa", "/aa"), Ordering::Less);
        assert_eq!(compare_paths("/aa", "/ab"), Ordering::Less);
        assert_eq!(compare_paths("/ab", "/aa"), Ordering::Greater);
    }

    #[test]
    fn test_lexicographic_is_case_sensitive() {
        assert_eq!(compare_paths("/B", "/a"), Ordering::Less);
    }

    #[test]
    fn test_astral_literal_counts_as_one_char() {
        // One scalar value, two UTF-16 code units.
        assert_eq!(compare_paths("/ab", "/\u{1F600}"), Ordering::Less);
        assert_eq!(compare_paths("/\u{1F600}", "/\u{FFFF}"), Ordering::Greater);
    }

    #[test]
    fn test_variables_fall_back_to_full_path() {
        assert_eq!(compare_paths("/{a}", "/{b}"), Ordering::Less);
        assert_eq!(compare_paths("/{b}", "/{a}"), Ordering::Greater);
        assert_eq!(compare_paths("/:id", "/{id}"), Ordering::Less);
        assert_eq!(compare_paths("/{a}", "/{a}"), Ordering::Equal);
    }

    #[test]
    fn test_compare_routes_uses_path() {
        let specific = Route::new("/a/b").with_id("r2");
        let general = Route::new("/a/{id}").with_id("r1");
        assert_eq!(compare_routes(&specific, &general), Ordering::Less);
    }
}
