//! Allowed-method sets for routes.

use std::collections::HashSet;

use axum::http::Method;
use axum::http::method::InvalidMethod;

/// The HTTP methods a route accepts.
///
/// Membership is exact: method tokens are case-sensitive, so `get` is an
/// extension method distinct from `GET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet(HashSet<Method>);

impl MethodSet {
    /// Build a set from method tokens such as `"GET"`.
    pub fn parse<I, S>(methods: I) -> Result<Self, InvalidMethod>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        methods
            .into_iter()
            .map(|m| Method::from_bytes(m.as_ref().as_bytes()))
            .collect()
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.0.contains(method)
    }
}

impl FromIterator<Method> for MethodSet {
    fn from_iter<T: IntoIterator<Item = Method>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Method> for MethodSet {
    fn from(method: Method) -> Self {
        std::iter::once(method).collect()
    }
}

impl<const N: usize> From<[Method; N]> for MethodSet {
    fn from(methods: [Method; N]) -> Self {
        methods.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        let set = MethodSet::from([Method::GET, Method::PUT]);
        assert!(set.contains(&Method::GET));
        assert!(set.contains(&Method::PUT));
        assert!(!set.contains(&Method::POST));
    }

    #[test]
    fn parse_is_case_sensitive() {
        let set = MethodSet::parse(["GET"]).unwrap();
        assert!(set.contains(&Method::GET));

        let lower = MethodSet::parse(["get"]).unwrap();
        assert!(!lower.contains(&Method::GET));
        assert!(lower.contains(&Method::from_bytes(b"get").unwrap()));
    }

    #[test]
    fn parse_rejects_invalid_tokens() {
        assert!(MethodSet::parse(["GE T"]).is_err());
    }

    #[test]
    fn no_substring_matches() {
        let set = MethodSet::parse(["PATCH"]).unwrap();
        let patc = Method::from_bytes(b"PATC").unwrap();
        assert!(!set.contains(&patc));
    }
}
