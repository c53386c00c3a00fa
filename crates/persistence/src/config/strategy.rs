//! Configuration acquisition strategy.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::{ConfigurationSource, LayeredConfiguration};
use crate::error::ConfigurationError;

/// How a composition root acquires configuration.
///
/// Exactly one strategy is chosen at startup; every unit-of-work context then
/// shares the acquired source.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use meridian_persistence::config::{ConfigurationStrategy, InMemoryConfiguration};
///
/// let strategy = ConfigurationStrategy::Injected(Arc::new(
///     InMemoryConfiguration::new().with_connection_string("Acme", "Data Source=acme.db"),
/// ));
/// let source = strategy.acquire().unwrap();
/// assert!(source.connection_string("Acme").is_some());
/// ```
#[derive(Clone)]
pub enum ConfigurationStrategy {
    /// Use a source the host already built.
    Injected(Arc<dyn ConfigurationSource>),

    /// Build a [`LayeredConfiguration`] from files in a content root.
    ContentRoot {
        /// Directory containing `appsettings.json`.
        content_root: PathBuf,
        /// Environment name selecting `appsettings.{environment}.json`.
        environment: String,
    },
}

impl ConfigurationStrategy {
    /// Acquires the configuration source.
    pub fn acquire(&self) -> Result<Arc<dyn ConfigurationSource>, ConfigurationError> {
        match self {
            ConfigurationStrategy::Injected(source) => Ok(Arc::clone(source)),
            ConfigurationStrategy::ContentRoot {
                content_root,
                environment,
            } => Ok(Arc::new(LayeredConfiguration::from_content_root(
                content_root,
                environment,
            )?)),
        }
    }
}

impl fmt::Debug for ConfigurationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationStrategy::Injected(_) => write!(f, "Injected"),
            ConfigurationStrategy::ContentRoot {
                content_root,
                environment,
            } => f
                .debug_struct("ContentRoot")
                .field("content_root", content_root)
                .field("environment", environment)
                .finish(),
        }
    }
}
