//! Route template compilation and path matching.
//!
//! # Responsibilities
//! - Tokenize a route template (`/foo/:bar`) into literal and variable segments
//! - Match a request path against a compiled template
//! - Return captured variable values in template order
//!
//! # Design Decisions
//! - Splitting is plain `str::split('/')`: a leading slash yields a leading
//!   empty segment, `//` yields an empty segment in between
//! - A template without variables matches by exact string equality only
//! - Matching is a pure function; captures live in the returned value, never
//!   in the pattern, so a compiled pattern can be shared between requests

/// One component of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact text equality.
    Literal(String),
    /// Matched by any non-empty component, which is captured.
    Variable(String),
}

impl Segment {
    fn parse(component: &str) -> Self {
        match component.strip_prefix(':') {
            Some(name) => Segment::Variable(name.to_string()),
            None => Segment::Literal(component.to_string()),
        }
    }

    /// Returns true if this is a variable segment.
    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable(_))
    }
}

/// Values captured by a successful match, in the order their variable
/// segments appear in the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(Vec<String>);

impl Captures {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for Captures {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A compiled route template. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
    simple: bool,
}

impl PathPattern {
    /// Compile a route template.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let segments: Vec<Segment> = template.split('/').map(Segment::parse).collect();
        let simple = !segments.iter().any(Segment::is_variable);

        Self {
            template,
            segments,
            simple,
        }
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the template has no variable segments.
    pub fn is_simple(&self) -> bool {
        self.simple
    }

    /// Names of the variable segments, in template order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path` against this pattern.
    ///
    /// Returns the captured values on success and `None` otherwise.
    pub fn match_path(&self, path: &str) -> Option<Captures> {
        if self.simple {
            return (self.template == path).then(Captures::default);
        }

        let components: Vec<&str> = path.split('/').collect();
        if components.len() != self.segments.len() {
            return None;
        }

        let mut captures = Vec::new();
        for (segment, component) in self.segments.iter().zip(components) {
            match segment {
                Segment::Literal(text) if text != component => return None,
                Segment::Literal(_) => {}
                Segment::Variable(_) if component.is_empty() => return None,
                Segment::Variable(_) => captures.push(component.to_string()),
            }
        }

        Some(Captures(captures))
    }

    /// Returns true if `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_literals_and_variables() {
        let pattern = PathPattern::new("/foo/:bar/qux");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal(String::new()),
                Segment::Literal("foo".into()),
                Segment::Variable("bar".into()),
                Segment::Literal("qux".into()),
            ]
        );
        assert!(!pattern.is_simple());
        assert_eq!(pattern.variable_names().collect::<Vec<_>>(), vec!["bar"]);
    }

    #[test]
    fn simple_pattern_is_exact() {
        let pattern = PathPattern::new("/test");
        assert!(pattern.is_simple());
        assert_eq!(pattern.match_path("/test"), Some(Captures::default()));
        assert!(!pattern.is_match("/test/"));
        assert!(!pattern.is_match("test"));
        assert!(!pattern.is_match("/Test"));
    }

    #[test]
    fn simple_pattern_keeps_trailing_slash() {
        let pattern = PathPattern::new("/docs/");
        assert!(pattern.is_match("/docs/"));
        assert!(!pattern.is_match("/docs"));
    }

    #[test]
    fn colon_inside_component_is_literal() {
        let pattern = PathPattern::new("/time/12:30");
        assert!(pattern.is_simple());
        assert!(pattern.is_match("/time/12:30"));
        assert!(!pattern.is_match("/time/12:31"));
    }

    #[test]
    fn single_variable_match() {
        let pattern = PathPattern::new("/foo/:bar");
        let captures = pattern.match_path("/foo/baz").unwrap();
        assert_eq!(captures.as_slice(), ["baz"]);
    }

    #[test]
    fn extra_component_does_not_match() {
        let pattern = PathPattern::new("/foo/:bar");
        assert_eq!(pattern.match_path("/foo/baz/qux"), None);
    }

    #[test]
    fn captures_follow_template_order() {
        let pattern = PathPattern::new("/foo/:bar/qux/:zoo/xen");
        let captures = pattern.match_path("/foo/baz/qux/zap/xen").unwrap();
        assert_eq!(captures.into_vec(), vec!["baz", "zap"]);
    }

    #[test]
    fn trailing_component_does_not_match() {
        let pattern = PathPattern::new("/foo/:bar/qux/:zoo/xen");
        assert!(!pattern.is_match("/foo/baz/qux/zap/xen/foo"));
    }

    #[test]
    fn literal_mismatch_does_not_match() {
        let pattern = PathPattern::new("/foo/:bar/qux");
        assert!(!pattern.is_match("/foo/baz/quux"));
        assert!(!pattern.is_match("foo/baz/qux/"));
    }

    #[test]
    fn empty_variable_does_not_match() {
        let pattern = PathPattern::new("/foo/:bar/qux");
        assert_eq!(pattern.match_path("/foo//qux"), None);

        let pattern = PathPattern::new("/foo/:bar");
        assert_eq!(pattern.match_path("/foo/"), None);
    }

    #[test]
    fn empty_literal_only_matches_empty_component() {
        let pattern = PathPattern::new("/:name/");
        assert_eq!(pattern.match_path("/alice/").unwrap().as_slice(), ["alice"]);
        assert!(!pattern.is_match("/alice/x"));
        assert!(!pattern.is_match("/alice"));
    }

    #[test]
    fn repeated_matches_are_independent() {
        let pattern = PathPattern::new("/foo/:bar");
        let first = pattern.match_path("/foo/one").unwrap();
        assert_eq!(pattern.match_path("/foo/"), None);
        let second = pattern.match_path("/foo/two").unwrap();

        assert_eq!(first.get(0), Some("one"));
        assert_eq!(second.get(0), Some("two"));
    }
}
