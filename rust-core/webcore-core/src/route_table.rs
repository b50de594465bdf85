//! # Declared Routes
//!
//! The route declaration file lists one route signature per line:
//!
//! ```text
//! controllername
//! controllername/actionname
//! controllername/actionname/[param]/
//! controllername/actionname/[param]/[param]
//! ```
//!
//! The root `/` is always implied. The table is exposed for display and
//! validation only; the router matches purely by segment position and never
//! consults it.
//!
//! Declarations are compiled into a `matchit` radix trie so a produced
//! `Route` can be checked against them with `is_declared`.

use crate::error::{Error, Result};
use crate::route::{Route, RouteShape};
use matchit::Router as MatchitRouter;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Placeholder for a positional param in a declaration
const PARAM: &str = "[param]";

/// Parsed route declaration file
#[derive(Clone)]
pub struct RouteTable {
    /// Declared signatures, in file order, blank lines dropped
    signatures: Vec<String>,
    /// Trie built from the usable declarations
    matcher: MatchitRouter<usize>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create an empty table (only the root is declared)
    #[must_use]
    pub fn new() -> Self {
        Self {
            signatures: Vec::new(),
            matcher: MatchitRouter::new(),
        }
    }

    /// Load declarations from a route file
    ///
    /// # Errors
    ///
    /// Returns `Error::RouteFileUnreadable` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| Error::RouteFileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Self::parse(&contents);
        info!(
            path = %path.display(),
            routes = table.signatures.len(),
            "Loaded route declarations"
        );
        Ok(table)
    }

    /// Parse declarations from text, one signature per line
    ///
    /// Lines that are not one of the positional shapes, or that repeat an
    /// earlier declaration, are kept in `signatures()` but skipped for
    /// validation.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let mut table = Self::new();
        let mut seen = HashSet::new();

        for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let index = table.signatures.len();
            table.signatures.push(line.to_string());

            let Some(pattern) = match_pattern(line) else {
                warn!(route = line, "Route declaration is not a positional shape, ignoring");
                continue;
            };
            if !seen.insert(pattern.clone()) {
                warn!(route = line, "Duplicate route declaration");
                continue;
            }
            if let Err(e) = table.matcher.insert(pattern, index) {
                warn!(route = line, error = %e, "Conflicting route declaration, ignoring");
            }
        }

        table
    }

    /// Declared signatures in file order
    #[must_use]
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// Number of declared signatures
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Check if nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Declared signature matching a concrete path, if any
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&str> {
        let matched = self.matcher.at(path).ok()?;
        self.signatures.get(*matched.value).map(String::as_str)
    }

    /// Whether a produced route corresponds to a declaration
    ///
    /// The root is always declared; overflowing paths never are.
    #[must_use]
    pub fn is_declared(&self, route: &Route) -> bool {
        match route.shape() {
            RouteShape::Root => true,
            RouteShape::Overflow => false,
            _ => self.find(route.uri()).is_some(),
        }
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("signatures", &self.signatures)
            .finish_non_exhaustive()
    }
}

/// Convert a declaration into a matchit pattern
///
/// `users/show/[param]/[param]` becomes `/users/show/{p1}/{p2}`. Returns
/// `None` for lines that do not fit one of the positional shapes.
fn match_pattern(line: &str) -> Option<String> {
    let segments: Vec<&str> = line.split('/').filter(|s| !s.is_empty()).collect();
    let (fixed, params) = match segments.as_slice() {
        [c] => (vec![*c], 0),
        [c, a] => (vec![*c, *a], 0),
        [c, a, p] if *p == PARAM => (vec![*c, *a], 1),
        [c, a, p, q] if *p == PARAM && *q == PARAM => (vec![*c, *a], 2),
        _ => return None,
    };

    if fixed
        .iter()
        .any(|s| *s == PARAM || s.contains(['{', '}', '*']))
    {
        return None;
    }

    let mut pattern = format!("/{}", fixed.join("/"));
    for i in 1..=params {
        pattern.push_str(&format!("/{{p{i}}}"));
    }
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = "articles\narticles/list\r\n\narticles/show/[param]/\nusers/edit/[param]/[param]\n";

    #[test]
    fn test_parse_drops_blank_lines() {
        let table = RouteTable::parse(ROUTES);
        assert_eq!(
            table.signatures(),
            &[
                "articles",
                "articles/list",
                "articles/show/[param]/",
                "users/edit/[param]/[param]",
            ]
        );
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_match_pattern() {
        assert_eq!(match_pattern("users").as_deref(), Some("/users"));
        assert_eq!(match_pattern("users/list").as_deref(), Some("/users/list"));
        assert_eq!(
            match_pattern("users/show/[param]/").as_deref(),
            Some("/users/show/{p1}")
        );
        assert_eq!(
            match_pattern("users/show/[param]/[param]").as_deref(),
            Some("/users/show/{p1}/{p2}")
        );
        assert_eq!(match_pattern("a/b/c"), None);
        assert_eq!(match_pattern("[param]"), None);
        assert_eq!(match_pattern("a/b/[param]/c"), None);
        assert_eq!(match_pattern("{x}"), None);
    }

    #[test]
    fn test_find() {
        let table = RouteTable::parse(ROUTES);
        assert_eq!(table.find("/articles"), Some("articles"));
        assert_eq!(table.find("/articles/show/12"), Some("articles/show/[param]/"));
        assert_eq!(table.find("/users/edit/3/name"), Some("users/edit/[param]/[param]"));
        assert_eq!(table.find("/articles/show"), None);
        assert_eq!(table.find("/pages"), None);
    }

    #[test]
    fn test_unusable_lines_are_kept_but_ignored() {
        let table = RouteTable::parse("users\nusers\nfoo/bar/baz\n");
        assert_eq!(table.signatures(), &["users", "users", "foo/bar/baz"]);
        assert_eq!(table.find("/users"), Some("users"));
        assert_eq!(table.find("/foo/bar/baz"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RouteTable::load("/nonexistent/webcore/routes.txt").unwrap_err();
        assert!(matches!(err, Error::RouteFileUnreadable { .. }));
    }
}
