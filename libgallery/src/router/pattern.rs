//! Route path patterns
//!
//! A pattern is a `/`-separated path whose segments are either literals or
//! `:name` parameters. Empty segments are ignored on both sides, so `/a//b/`
//! and `/a/b` have the same segments.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Path parameters captured by a match, in pattern order
pub type Params = Vec<(String, String)>;

impl RoutePattern {
    pub fn parse(path: &str) -> Self {
        let segments = split_segments(path)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Exact string equality with the registered path
    pub fn matches_exact(&self, path: &str) -> bool {
        self.raw == path
    }

    /// Segment-wise match; literals compare case-sensitively
    ///
    /// Returns the captured parameters, or `None` when the segment counts
    /// differ or any literal disagrees.
    pub fn match_segments(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.push((name.clone(), part.to_string())),
            }
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_capture() {
        let pattern = RoutePattern::parse("/item/:id");
        assert_eq!(
            pattern.match_segments("/item/42"),
            Some(vec![("id".to_string(), "42".to_string())])
        );
    }

    #[test]
    fn test_segment_count_must_match() {
        let pattern = RoutePattern::parse("/item/:id");
        assert_eq!(pattern.match_segments("/item/42/extra"), None);
        assert_eq!(pattern.match_segments("/item"), None);
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let pattern = RoutePattern::parse("/item/:id");
        assert_eq!(pattern.match_segments("/Item/42"), None);
    }

    #[test]
    fn test_empty_segments_ignored() {
        let pattern = RoutePattern::parse("/a/:b");
        assert!(pattern.match_segments("//a/x/").is_some());
    }

    #[test]
    fn test_root_has_no_segments() {
        let pattern = RoutePattern::parse("/");
        assert_eq!(pattern.match_segments("/"), Some(Vec::new()));
        assert!(pattern.matches_exact("/"));
        assert!(!pattern.matches_exact(""));
    }
}
