//! Path segment classification.
//!
//! # Responsibilities
//! - Split a path template into non-empty segments
//! - Classify each segment as static (literal) or variable (placeholder)
//!
//! # Design Decisions
//! - `:name` and `{name}` are variables; anything else is a literal
//! - An unbalanced `{name` is a literal

/// Kind of a single path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Static,
    Variable,
}

/// Classify one path segment.
pub fn classify(segment: &str) -> SegmentKind {
    if segment.starts_with(':') || (segment.starts_with('{') && segment.ends_with('}')) {
        SegmentKind::Variable
    } else {
        SegmentKind::Static
    }
}

/// Non-empty segments of a path, in order.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A classified path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

impl<'a> Segment<'a> {
    pub fn is_static(&self) -> bool {
        self.kind == SegmentKind::Static
    }

    /// Length in Unicode scalar values. Gateways that count UTF-16 code
    /// units (and compare by them) can order non-BMP literals differently.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The classified segments of one path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathShape<'a> {
    segments: Vec<Segment<'a>>,
    static_count: usize,
}

impl<'a> PathShape<'a> {
    pub fn parse(path: &'a str) -> Self {
        let segments: Vec<Segment<'a>> = segments(path)
            .map(|text| Segment {
                text,
                kind: classify(text),
            })
            .collect();
        let static_count = segments.iter().filter(|s| s.is_static()).count();
        Self {
            segments,
            static_count,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn static_count(&self) -> usize {
        self.static_count
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("users"), SegmentKind::Static);
        assert_eq!(classify(":id"), SegmentKind::Variable);
        assert_eq!(classify("{id}"), SegmentKind::Variable);
        assert_eq!(classify("{}"), SegmentKind::Variable);
        assert_eq!(classify("{a"), SegmentKind::Static);
        assert_eq!(classify("a}"), SegmentKind::Static);
        assert_eq!(classify("v1:batch"), SegmentKind::Static);
    }

    #[test]
    fn test_empty_segments_discarded() {
        let parts: Vec<&str> = segments("//a///{b}/").collect();
        assert_eq!(parts, vec!["a", "{b}"]);
        assert_eq!(segments("/").count(), 0);
    }

    #[test]
    fn test_path_shape_counts() {
        let shape = PathShape::parse("/orgs/{org}/repos/:repo/issues");
        assert_eq!(shape.segment_count(), 5);
        assert_eq!(shape.static_count(), 3);
        assert!(shape.segments()[0].is_static());
        assert!(!shape.segments()[1].is_static());
    }

    #[test]
    fn test_segment_length_counts_chars() {
        let shape = PathShape::parse("/caf\u{e9}");
        assert_eq!(shape.segments()[0].len(), 4);
    }
}
