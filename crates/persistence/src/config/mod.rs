//! Configuration sources for connection-string templates.
//!
//! Keys are hierarchical, separated by `:`.
//! Connection-string templates live under the `ConnectionStrings` section:
//!
//! ```json
//! {
//!   "ConnectionStrings": {
//!     "DefaultConnection": "Data Source=|DataDirectory|/meridian.db"
//!   }
//! }
//! ```
//!
//! Composition roots pick exactly one way of acquiring configuration through
//! [`ConfigurationStrategy`].

mod layered;
mod strategy;

pub use layered::{LayeredConfiguration, LayeredConfigurationBuilder};
pub use strategy::ConfigurationStrategy;

use std::collections::HashMap;

use parking_lot::RwLock;

/// Section holding connection-string templates.
pub const CONNECTION_STRINGS_SECTION: &str = "ConnectionStrings";

/// Read access to configuration values.
pub trait ConfigurationSource: Send + Sync {
    /// Returns the value for a `:`-separated key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the connection-string template registered under `name`.
    fn connection_string(&self, name: &str) -> Option<String> {
        self.get(&format!("{}:{}", CONNECTION_STRINGS_SECTION, name))
    }
}

pub(crate) fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// A mutable in-memory configuration. Keys are case-insensitive.
///
/// Values can be changed after the source is shared, so new units of work
/// pick up new templates without a restart.
///
/// # Examples
///
/// ```
/// use meridian_persistence::config::{ConfigurationSource, InMemoryConfiguration};
///
/// let config = InMemoryConfiguration::new()
///     .with_connection_string("Acme", "Data Source=|DataDirectory|/acme.db");
///
/// assert_eq!(
///     config.connection_string("acme").as_deref(),
///     Some("Data Source=|DataDirectory|/acme.db")
/// );
/// assert!(config.connection_string("Globex").is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryConfiguration {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value.
    pub fn with_value(self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds a connection-string template.
    pub fn with_connection_string(self, name: &str, template: impl Into<String>) -> Self {
        self.with_value(&format!("{}:{}", CONNECTION_STRINGS_SECTION, name), template)
    }

    /// Sets or replaces a value.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.values.write().insert(normalize_key(key), value.into());
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(&normalize_key(key))
    }
}

impl ConfigurationSource for InMemoryConfiguration {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(&normalize_key(key)).cloned()
    }
}
