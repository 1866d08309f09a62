//! Path matching module
//!
//! Path matchers are pure predicate + capture functions. Each one answers a
//! single question: does this path have my shape, and if so, what did it bind?

use std::fmt::Debug;

/// Named values captured from a matched path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(&'static str, String)>,
}

impl PathParams {
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Capability shared by every path shape in the route table
pub trait PathMatcher: Debug + Send + Sync {
    /// Returns the captured parameters when `path` has this shape
    fn match_path(&self, path: &str) -> Option<PathParams>;
}

/// Collection path: the base path with at most one trailing `/`
///
/// `/users` and `/users/` match `CollectionPath::new("/users")`; `/users//` does not.
#[derive(Debug, Clone)]
pub struct CollectionPath {
    base: &'static str,
}

impl CollectionPath {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }
}

impl PathMatcher for CollectionPath {
    fn match_path(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix(self.base)?;
        matches!(rest, "" | "/").then(PathParams::default)
    }
}

/// Member path: `<base>/<digits>` with nothing after the digits
#[derive(Debug, Clone)]
pub struct NumericMemberPath {
    base: &'static str,
    param: &'static str,
}

impl NumericMemberPath {
    pub const fn new(base: &'static str, param: &'static str) -> Self {
        Self { base, param }
    }
}

impl PathMatcher for NumericMemberPath {
    fn match_path(&self, path: &str) -> Option<PathParams> {
        let segment = path.strip_prefix(self.base)?.strip_prefix('/')?;
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(PathParams::default().with(self.param, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path_optional_trailing_slash() {
        let matcher = CollectionPath::new("/users");
        assert!(matcher.match_path("/users").is_some());
        assert!(matcher.match_path("/users/").is_some());
    }

    #[test]
    fn test_collection_path_rejects_other_shapes() {
        let matcher = CollectionPath::new("/users");
        assert!(matcher.match_path("/user").is_none());
        assert!(matcher.match_path("/usersx").is_none());
        assert!(matcher.match_path("/users/1").is_none());
        assert!(matcher.match_path("/users//").is_none());
        assert!(matcher.match_path("/users///").is_none());
        assert!(matcher.match_path("/api/users").is_none());
        assert!(matcher.match_path("").is_none());
    }

    #[test]
    fn test_member_path_captures_digits() {
        let matcher = NumericMemberPath::new("/users", "id");
        let params = matcher.match_path("/users/1001").unwrap();
        assert_eq!(params.get("id"), Some("1001"));
        assert_eq!(params.get("name"), None);

        // Leading zeros are part of the key
        let params = matcher.match_path("/users/007").unwrap();
        assert_eq!(params.get("id"), Some("007"));
    }

    #[test]
    fn test_member_path_rejects_non_numeric() {
        let matcher = NumericMemberPath::new("/users", "id");
        assert!(matcher.match_path("/users/").is_none());
        assert!(matcher.match_path("/users/abc").is_none());
        assert!(matcher.match_path("/users/12a").is_none());
        assert!(matcher.match_path("/users/-1").is_none());
        assert!(matcher.match_path("/users/1/").is_none());
        assert!(matcher.match_path("/users/1/posts").is_none());
        assert!(matcher.match_path("/users1").is_none());
        // Only ASCII digits count
        assert!(matcher.match_path("/users/١٢").is_none());
    }
}
