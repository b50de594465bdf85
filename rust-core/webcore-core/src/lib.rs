//! # Webcore Core
//!
//! Small building blocks for hand-rolled front-controller web applications.
//!
//! ## Architecture
//!
//! The router turns a request path into a controller, an action and
//! positional params without ever loading a controller; the application
//! dispatches the resulting `Route` itself. The record store is a JSON
//! flat-file pseudo-database rewritten on every mutation.
//!
//! ## Modules
//!
//! - `router` - Positional router and HTTP methods
//! - `route` - Immutable routing result and route shapes
//! - `route_table` - Declared route signatures (validation only)
//! - `resolver` - Controller existence checks
//! - `request` - The request view consumed by the router
//! - `store` - JSON flat-file record store
//! - `query` - Predicate and operator language
//! - `value` - Record values and comparison rules
//! - `json` - Document decoding (simd-json) and encoding (serde_json)
//! - `state` - Shared store handle and application state
//! - `config` - Configuration and environment loading
//! - `logging` - Tracing subscriber setup
//! - `error` - Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod json;
pub mod logging;
pub mod query;
pub mod request;
pub mod resolver;
pub mod route;
pub mod route_table;
pub mod router;
pub mod state;
pub mod store;
pub mod value;

pub use config::{Config, RouterConfig, StoreConfig};
pub use error::{Error, Result};
pub use logging::init_tracing;
pub use query::{Operator, Predicate};
pub use request::{RequestLine, RequestSource};
pub use resolver::{ControllerRegistry, ControllerResolver, NoControllers};
pub use route::{Route, RouteShape};
pub use route_table::RouteTable;
pub use router::{Method, Router};
pub use state::{AppState, SharedStore};
pub use store::JsonFileStore;
pub use value::{Document, Record, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
