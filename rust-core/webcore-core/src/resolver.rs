//! # Controller Resolution
//!
//! The router never instantiates controllers. It asks a `ControllerResolver`
//! whether a (suffixed) controller name denotes a known handler and leaves
//! loading and dispatch to the application.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Answers whether a controller name denotes a loadable handler
pub trait ControllerResolver: Send + Sync {
    /// True if `name` resolves to a known controller
    fn resolves(&self, name: &str) -> bool;
}

/// Resolver that knows no controllers (the router default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoControllers;

impl ControllerResolver for NoControllers {
    fn resolves(&self, _name: &str) -> bool {
        false
    }
}

impl<F> ControllerResolver for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn resolves(&self, name: &str) -> bool {
        self(name)
    }
}

/// Thread-safe set of known controller names
///
/// Names can be registered at any time; routes ask the registry when
/// `Route::controller_exists` is called, not when they are built.
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    names: RwLock<HashSet<String>>,
}

impl ControllerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller name
    ///
    /// Returns `false` if it was already registered.
    pub fn register(&self, name: impl Into<String>) -> bool {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into())
    }

    /// Remove a controller name
    pub fn unregister(&self, name: &str) -> bool {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Number of registered controllers
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if no controller is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Into<String>> FromIterator<S> for ControllerRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

impl ControllerResolver for ControllerRegistry {
    fn resolves(&self, name: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_controllers() {
        assert!(!NoControllers.resolves("HomeController"));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str| name.ends_with("Controller");
        assert!(resolver.resolves("UsersController"));
        assert!(!resolver.resolves("Users"));
    }

    #[test]
    fn test_registry() {
        let registry: ControllerRegistry = ["Home", "Articles"].into_iter().collect();
        assert_eq!(registry.len(), 2);
        assert!(registry.resolves("Home"));
        assert!(!registry.resolves("home"));

        assert!(registry.register("Pages"));
        assert!(!registry.register("Pages"));
        assert!(registry.resolves("Pages"));

        assert!(registry.unregister("Home"));
        assert!(!registry.resolves("Home"));
        assert!(!registry.is_empty());
    }
}
