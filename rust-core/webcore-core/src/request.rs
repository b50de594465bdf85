//! # Request Source
//!
//! The narrow view of an HTTP request the router needs: its method and
//! its path. Anything that can supply both implements `RequestSource`.
//!
//! Implemented for `RequestLine` (a method plus a raw request target) and
//! for `hyper::Request<B>`.

use crate::router::Method;

/// Supplies the method and path of an incoming request
pub trait RequestSource {
    /// HTTP method of the request
    fn method(&self) -> Method;

    /// Request path; a trailing `?query` is tolerated and ignored by the router
    fn path(&self) -> &str;
}

/// Method and request target of an incoming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    path: String,
    query_string: Option<String>,
}

impl RequestLine {
    /// Create a request line from a method and a raw request target
    /// (e.g. `/articles/show/3?ref=home`). The query string is split off.
    pub fn new(method: impl Into<Method>, target: &str) -> Self {
        let (path, query_string) = match target.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (target.to_string(), None),
        };

        Self {
            method: method.into(),
            path,
            query_string,
        }
    }

    /// Build from a hyper request
    pub fn from_hyper<B>(req: &hyper::Request<B>) -> Self {
        let uri = req.uri();
        Self {
            method: Method::from(req.method().as_str()),
            path: uri.path().to_string(),
            query_string: uri.query().map(String::from),
        }
    }

    /// Get raw query string
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }
}

impl RequestSource for RequestLine {
    fn method(&self) -> Method {
        self.method.clone()
    }

    fn path(&self) -> &str {
        &self.path
    }
}

impl<B> RequestSource for hyper::Request<B> {
    fn method(&self) -> Method {
        Method::from(hyper::Request::method(self).as_str())
    }

    fn path(&self) -> &str {
        self.uri().path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_splits_query() {
        let req = RequestLine::new("GET", "/articles/show/3?ref=home&x=1");
        assert_eq!(req.path(), "/articles/show/3");
        assert_eq!(req.query_string(), Some("ref=home&x=1"));
        assert_eq!(req.method(), Method::Get);
    }

    #[test]
    fn test_request_line_without_query() {
        let req = RequestLine::new(Method::Post, "/login");
        assert_eq!(req.path(), "/login");
        assert_eq!(req.query_string(), None);
    }

    #[test]
    fn test_hyper_request_source() {
        let req = hyper::Request::builder()
            .method("DELETE")
            .uri("http://example.com/users/remove/9?confirm=1")
            .body(())
            .unwrap();

        assert_eq!(RequestSource::method(&req), Method::Delete);
        assert_eq!(RequestSource::path(&req), "/users/remove/9");

        let line = RequestLine::from_hyper(&req);
        assert_eq!(line.path(), "/users/remove/9");
        assert_eq!(line.query_string(), Some("confirm=1"));
    }
}
