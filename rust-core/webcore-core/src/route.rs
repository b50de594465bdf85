//! # Route
//!
//! The immutable result of routing one request: which positional shape the
//! path matched, the controller and action names, the extracted params and
//! the request method.
//!
//! A `Route` never loads a controller. It only answers whether its
//! (suffixed) controller name is known to the configured resolver.

use crate::resolver::ControllerResolver;
use crate::router::Method;
use std::fmt;
use std::sync::Arc;

/// Positional shape of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteShape {
    /// `/`
    Root,
    /// `controller`
    Controller,
    /// `controller/action`
    ControllerAction,
    /// `controller/action/[param]/`
    OneParam,
    /// `controller/action/[param]/[param]`
    TwoParams,
    /// Five or more segments; routed to the defaults
    Overflow,
}

impl RouteShape {
    /// Shape for a given number of path segments
    #[must_use]
    pub fn from_segment_count(count: usize) -> Self {
        match count {
            0 => Self::Root,
            1 => Self::Controller,
            2 => Self::ControllerAction,
            3 => Self::OneParam,
            4 => Self::TwoParams,
            _ => Self::Overflow,
        }
    }

    /// Signature string for the given segments, e.g. `users/show/[param]/`
    ///
    /// `Overflow` shares the root signature since it routes to the defaults.
    #[must_use]
    pub fn signature(self, segments: &[String]) -> String {
        match (self, segments) {
            (Self::Controller, [c, ..]) => c.clone(),
            (Self::ControllerAction, [c, a, ..]) => format!("{c}/{a}"),
            (Self::OneParam, [c, a, ..]) => format!("{c}/{a}/[param]/"),
            (Self::TwoParams, [c, a, ..]) => format!("{c}/{a}/[param]/[param]"),
            _ => "/".to_string(),
        }
    }
}

/// Route produced by the router for a single request
#[derive(Clone)]
pub struct Route {
    pub(crate) shape: RouteShape,
    pub(crate) signature: String,
    pub(crate) uri: String,
    pub(crate) method: Method,
    pub(crate) controller: String,
    pub(crate) action: String,
    pub(crate) params: Vec<String>,
    pub(crate) controller_type: String,
    pub(crate) resolver: Arc<dyn ControllerResolver>,
}

impl Route {
    /// Which positional shape the path matched
    #[must_use]
    pub fn shape(&self) -> RouteShape {
        self.shape
    }

    /// Route signature, e.g. `articles/show/[param]/`
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Normalized request URI (`/` plus the non-empty segments)
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// HTTP method of the originating request
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Controller name; never empty
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action name; never empty
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Positional params (0, 1 or 2)
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Get a param by position
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Controller name with the configured suffix appended
    #[must_use]
    pub fn controller_type(&self) -> &str {
        &self.controller_type
    }

    /// Whether the resolver knows `controller_type()` right now
    #[must_use]
    pub fn controller_exists(&self) -> bool {
        self.resolver.resolves(&self.controller_type)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("shape", &self.shape)
            .field("signature", &self.signature)
            .field("uri", &self.uri)
            .field("method", &self.method)
            .field("controller", &self.controller)
            .field("action", &self.action)
            .field("params", &self.params)
            .field("controller_type", &self.controller_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}::{}",
            self.method, self.uri, self.controller_type, self.action
        )
    }
}
