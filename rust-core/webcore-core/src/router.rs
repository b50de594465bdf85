//! # Positional Router
//!
//! Maps a request path to a controller, an action and up to two params
//! purely by segment position. There is no pattern language:
//!
//! | segments | controller | action | params |
//! |---|---|---|---|
//! | 0 | default | default | - |
//! | 1 | seg0 | default | - |
//! | 2 | seg0 | seg1 | - |
//! | 3 | seg0 | seg1 | seg2 |
//! | 4 | seg0 | seg1 | seg2, seg3 |
//! | 5+ | default | default | - |
//!
//! Routing never fails. Whether the controller actually exists is reported
//! by `Route::controller_exists`, so the application can answer with a 404.

use crate::config::RouterConfig;
use crate::error::Result;
use crate::request::RequestSource;
use crate::resolver::{ControllerResolver, NoControllers};
use crate::route::{Route, RouteShape};
use crate::route_table::RouteTable;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// HTTP request method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
    /// HTTP PATCH
    Patch,
    /// HTTP HEAD
    Head,
    /// HTTP OPTIONS
    Options,
    /// Any other verb, kept verbatim
    Other(String),
}

impl From<&str> for Method {
    fn from(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Other(verb.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
            Self::Patch => write!(f, "PATCH"),
            Self::Head => write!(f, "HEAD"),
            Self::Options => write!(f, "OPTIONS"),
            Self::Other(verb) => write!(f, "{verb}"),
        }
    }
}

/// Split a request path into its non-empty segments
///
/// Anything after `?` is ignored, so `/foo//bar/?x=1` gives `["foo", "bar"]`.
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Uppercase the first character
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Positional request router
#[derive(Clone)]
pub struct Router {
    config: RouterConfig,
    table: RouteTable,
    resolver: Arc<dyn ControllerResolver>,
}

impl Router {
    /// Create a router, loading declared routes from `route_file`
    ///
    /// # Errors
    ///
    /// Returns `Error::RouteFileUnreadable` if the route file cannot be read.
    pub fn new(config: RouterConfig, route_file: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_table(config, RouteTable::load(route_file)?))
    }

    /// Create a router from an already parsed route table
    #[must_use]
    pub fn with_table(config: RouterConfig, table: RouteTable) -> Self {
        Self {
            config: config.normalized(),
            table,
            resolver: Arc::new(NoControllers),
        }
    }

    /// Use `resolver` to answer `Route::controller_exists`
    #[must_use]
    pub fn with_resolver(self, resolver: impl ControllerResolver + 'static) -> Self {
        self.with_shared_resolver(Arc::new(resolver))
    }

    /// Use a shared resolver to answer `Route::controller_exists`
    #[must_use]
    pub fn with_shared_resolver(mut self, resolver: Arc<dyn ControllerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Router configuration
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Declared route signatures, in file order
    #[must_use]
    pub fn routes(&self) -> &[String] {
        self.table.signatures()
    }

    /// Declared route table
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route an incoming request
    pub fn route<R: RequestSource + ?Sized>(&self, request: &R) -> Route {
        self.route_path(request.method(), request.path())
    }

    /// Route a method and path
    pub fn route_path(&self, method: impl Into<Method>, path: &str) -> Route {
        let segments = split_path(path);
        let shape = RouteShape::from_segment_count(segments.len());
        let defaults = || {
            (
                self.config.default_controller.clone(),
                self.config.default_action.clone(),
            )
        };

        let ((controller, action), params) = match (shape, segments.as_slice()) {
            (RouteShape::Controller, [c]) => {
                let controller = if self.config.capitalize_single_segment {
                    capitalize(c)
                } else {
                    c.clone()
                };
                ((controller, self.config.default_action.clone()), Vec::new())
            }
            (RouteShape::ControllerAction, [c, a]) => ((c.clone(), a.clone()), Vec::new()),
            (RouteShape::OneParam, [c, a, p]) => ((c.clone(), a.clone()), vec![p.clone()]),
            (RouteShape::TwoParams, [c, a, p, q]) => {
                ((c.clone(), a.clone()), vec![p.clone(), q.clone()])
            }
            _ => (defaults(), Vec::new()),
        };

        let controller_type = match &self.config.controller_suffix {
            Some(suffix) => format!("{controller}{suffix}"),
            None => controller.clone(),
        };

        let route = Route {
            shape,
            signature: shape.signature(&segments),
            uri: format!("/{}", segments.join("/")),
            method: method.into(),
            controller,
            action,
            params,
            controller_type,
            resolver: Arc::clone(&self.resolver),
        };

        debug!(
            method = %route.method(),
            uri = route.uri(),
            signature = route.signature(),
            controller = route.controller_type(),
            action = route.action(),
            "Resolved route"
        );

        route
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestLine;
    use crate::resolver::ControllerRegistry;
    use std::io::Write;

    fn router() -> Router {
        Router::with_table(RouterConfig::default(), RouteTable::new())
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/foo//bar/"), vec!["foo", "bar"]);
        assert_eq!(split_path("/a/b?x=1/2"), vec!["a", "b"]);
        assert!(split_path("").is_empty());
        assert!(split_path("///").is_empty());
    }

    #[test]
    fn test_root_uses_defaults() {
        let route = router().route_path("GET", "/");
        assert_eq!(route.shape(), RouteShape::Root);
        assert_eq!(route.signature(), "/");
        assert_eq!(route.uri(), "/");
        assert_eq!(route.controller(), "Home");
        assert_eq!(route.action(), "index");
        assert!(route.params().is_empty());
    }

    #[test]
    fn test_empty_path_uses_defaults() {
        let route = router().route_path("GET", "");
        assert_eq!(route.controller(), "Home");
        assert_eq!(route.action(), "index");
    }

    #[test]
    fn test_single_segment() {
        let route = router().route_path("GET", "/articles");
        assert_eq!(route.shape(), RouteShape::Controller);
        assert_eq!(route.signature(), "articles");
        assert_eq!(route.controller(), "articles");
        assert_eq!(route.action(), "index");
        assert!(route.params().is_empty());
    }

    #[test]
    fn test_single_segment_capitalized() {
        let config = RouterConfig {
            capitalize_single_segment: true,
            ..RouterConfig::default()
        };
        let router = Router::with_table(config, RouteTable::new());
        assert_eq!(router.route_path("GET", "/articles").controller(), "Articles");
        // only the single-segment shape is capitalized
        assert_eq!(router.route_path("GET", "/articles/list").controller(), "articles");
    }

    #[test]
    fn test_two_segments() {
        let route = router().route_path("GET", "/articles/list");
        assert_eq!(route.signature(), "articles/list");
        assert_eq!(route.controller(), "articles");
        assert_eq!(route.action(), "list");
        assert!(route.params().is_empty());
    }

    #[test]
    fn test_three_segments() {
        let route = router().route_path("GET", "/articles/show/42");
        assert_eq!(route.shape(), RouteShape::OneParam);
        assert_eq!(route.signature(), "articles/show/[param]/");
        assert_eq!(route.action(), "show");
        assert_eq!(route.params(), &["42"]);
        assert_eq!(route.param(0), Some("42"));
        assert_eq!(route.param(1), None);
    }

    #[test]
    fn test_four_segments() {
        let route = router().route_path("PUT", "/users/edit/7/email/");
        assert_eq!(route.signature(), "users/edit/[param]/[param]");
        assert_eq!(route.controller(), "users");
        assert_eq!(route.action(), "edit");
        assert_eq!(route.params(), &["7", "email"]);
        assert_eq!(route.method(), &Method::Put);
    }

    #[test]
    fn test_overflow_falls_back_to_defaults() {
        let route = router().route_path("GET", "/a/b/c/d/e");
        assert_eq!(route.shape(), RouteShape::Overflow);
        assert_eq!(route.controller(), "Home");
        assert_eq!(route.action(), "index");
        assert!(route.params().is_empty());
        assert_eq!(route.uri(), "/a/b/c/d/e");
    }

    #[test]
    fn test_controller_and_action_never_empty() {
        let router = router();
        for path in ["", "/", "//", "?", "/?a=b", "/x", "/x/y/z/w/v/u", "\u{0}", " "] {
            let route = router.route_path("GET", path);
            assert!(!route.controller().is_empty(), "path {path:?}");
            assert!(!route.action().is_empty(), "path {path:?}");
        }
    }

    #[test]
    fn test_controller_suffix_and_resolution_at_check_time() {
        let registry = Arc::new(ControllerRegistry::new());
        let config = RouterConfig {
            controller_suffix: Some("Controller".to_string()),
            ..RouterConfig::default()
        };
        let router = Router::with_table(config, RouteTable::new())
            .with_shared_resolver(registry.clone());

        let route = router.route_path("GET", "/Articles/list");
        assert_eq!(route.controller(), "Articles");
        assert_eq!(route.controller_type(), "ArticlesController");
        assert!(!route.controller_exists());

        registry.register("ArticlesController");
        assert!(route.controller_exists());
    }

    #[test]
    fn test_default_resolver_knows_nothing() {
        assert!(!router().route_path("GET", "/").controller_exists());
    }

    #[test]
    fn test_route_request_source() {
        let router = router().with_resolver(|name: &str| name == "pages");
        let route = router.route(&RequestLine::new("post", "/pages/save/3?draft=1"));
        assert_eq!(route.method(), &Method::Post);
        assert_eq!(route.uri(), "/pages/save/3");
        assert_eq!(route.params(), &["3"]);
        assert!(route.controller_exists());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from("get"), Method::Get);
        assert_eq!(Method::from("PROPFIND"), Method::Other("PROPFIND".to_string()));
        assert_eq!(Method::from("PROPFIND").to_string(), "PROPFIND");
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn test_new_loads_route_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "articles/list").unwrap();
        writeln!(file, "articles/show/[param]/").unwrap();

        let router = Router::new(RouterConfig::default(), file.path()).unwrap();
        assert_eq!(router.routes(), &["articles/list", "articles/show/[param]/"]);

        // declarations do not influence matching
        let undeclared = router.route_path("GET", "/pages/about");
        assert_eq!(undeclared.controller(), "pages");
        assert!(!router.table().is_declared(&undeclared));
        assert!(router.table().is_declared(&router.route_path("GET", "/articles/show/9")));
    }

    #[test]
    fn test_new_missing_route_file() {
        let result = Router::new(RouterConfig::default(), "/nonexistent/routes.txt");
        assert!(result.is_err());
    }
}
