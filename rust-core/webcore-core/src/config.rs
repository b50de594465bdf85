//! # Configuration
//!
//! Plain configuration structs with sensible defaults. `Config::from_env`
//! reads `WEBCORE_*` variables, falling back to the defaults for anything
//! unset or empty.

use std::path::PathBuf;

/// Controller used when the path names none
pub const DEFAULT_CONTROLLER: &str = "Home";

/// Action used when the path names none
pub const DEFAULT_ACTION: &str = "index";

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Controller for `/` and for unmatched shapes
    pub default_controller: String,
    /// Action for paths with fewer than two segments
    pub default_action: String,
    /// Appended to the controller name before resolution (e.g. `Controller`)
    pub controller_suffix: Option<String>,
    /// Uppercase the first letter of a lone controller segment
    pub capitalize_single_segment: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_controller: DEFAULT_CONTROLLER.to_string(),
            default_action: DEFAULT_ACTION.to_string(),
            controller_suffix: None,
            capitalize_single_segment: false,
        }
    }
}

impl RouterConfig {
    /// Create a config with the given defaults
    ///
    /// Empty names fall back to `Home` / `index`.
    #[must_use]
    pub fn new(default_controller: &str, default_action: &str) -> Self {
        Self {
            default_controller: non_empty(default_controller).unwrap_or(DEFAULT_CONTROLLER).to_string(),
            default_action: non_empty(default_action).unwrap_or(DEFAULT_ACTION).to_string(),
            ..Self::default()
        }
    }

    /// Replace empty default names with `Home` / `index`
    #[must_use]
    pub fn normalized(self) -> Self {
        let default_controller = non_empty(&self.default_controller)
            .map_or_else(|| DEFAULT_CONTROLLER.to_string(), str::to_string);
        let default_action = non_empty(&self.default_action)
            .map_or_else(|| DEFAULT_ACTION.to_string(), str::to_string);
        Self {
            default_controller,
            default_action,
            ..self
        }
    }

    /// Set the controller suffix
    #[must_use]
    pub fn with_controller_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.controller_suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing JSON document
    pub data_file: PathBuf,
    /// Pretty-print the document on save
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            pretty: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Route declaration file
    pub route_file: PathBuf,
    /// Router settings
    pub router: RouterConfig,
    /// Record store settings
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_file: PathBuf::from("routes.txt"),
            router: RouterConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from `WEBCORE_*` environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let router = RouterConfig {
            default_controller: get("WEBCORE_DEFAULT_CONTROLLER")
                .unwrap_or(defaults.router.default_controller),
            default_action: get("WEBCORE_DEFAULT_ACTION").unwrap_or(defaults.router.default_action),
            controller_suffix: get("WEBCORE_CONTROLLER_SUFFIX"),
            capitalize_single_segment: get("WEBCORE_CAPITALIZE_CONTROLLER")
                .map_or(defaults.router.capitalize_single_segment, |v| parse_flag(&v)),
        };

        let store = StoreConfig {
            data_file: get("WEBCORE_DATA_FILE").map_or(defaults.store.data_file, PathBuf::from),
            pretty: get("WEBCORE_PRETTY_JSON").map_or(defaults.store.pretty, |v| parse_flag(&v)),
        };

        Self {
            route_file: get("WEBCORE_ROUTE_FILE").map_or(defaults.route_file, PathBuf::from),
            router,
            store,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
