//! Layered appsettings-style configuration.
//!
//! Layers are applied in order, later layers overriding earlier ones:
//!
//! 1. `appsettings.json` in the content root (required)
//! 2. `appsettings.{environment}.json` (optional)
//! 3. Environment variables, with `__` standing for the section separator
//!    (`ConnectionStrings__Acme` overrides `ConnectionStrings:Acme`)
//!
//! Keys use `:` between sections, as in `ConnectionStrings:Acme`.

use std::fmt;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use tracing::debug;

use super::ConfigurationSource;
use crate::error::ConfigurationError;

const ENVIRONMENT_SEPARATOR: &str = "__";

/// A configuration snapshot built from JSON files and environment variables.
///
/// # Examples
///
/// ```
/// use meridian_persistence::config::{ConfigurationSource, LayeredConfiguration};
///
/// let config = LayeredConfiguration::builder()
///     .json_str(r#"{ "ConnectionStrings": { "Acme": "from-file" } }"#)
///     .environment_from([("ConnectionStrings__Acme", "from-env")])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.connection_string("Acme").as_deref(), Some("from-env"));
/// ```
#[derive(Debug, Clone)]
pub struct LayeredConfiguration {
    config: Config,
}

impl LayeredConfiguration {
    /// Starts an empty set of layers.
    pub fn builder() -> LayeredConfigurationBuilder {
        LayeredConfigurationBuilder::new()
    }

    /// Loads `appsettings.json` and `appsettings.{environment}.json` from
    /// `content_root`, then applies the process environment.
    pub fn from_content_root(
        content_root: impl AsRef<Path>,
        environment: &str,
    ) -> Result<Self, ConfigurationError> {
        let root = content_root.as_ref();
        Self::builder()
            .json_file(root.join("appsettings.json"), true)?
            .json_file(root.join(format!("appsettings.{}.json", environment)), false)?
            .environment()
            .build()
    }
}

impl ConfigurationSource for LayeredConfiguration {
    fn get(&self, key: &str) -> Option<String> {
        let path = key.replace(':', ".");
        // Environment keys arrive lower-cased.
        self.config
            .get_string(&path.to_lowercase())
            .or_else(|_| self.config.get_string(&path))
            .ok()
    }
}

/// Collects the layers of a [`LayeredConfiguration`].
pub struct LayeredConfigurationBuilder {
    builder: ConfigBuilder<DefaultState>,
}

impl LayeredConfigurationBuilder {
    fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Adds a JSON file layer. Missing optional files are skipped.
    pub fn json_file(
        self,
        path: impl AsRef<Path>,
        required: bool,
    ) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        if !path.exists() {
            if required {
                return Err(ConfigurationError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "Optional configuration file not found");
            return Ok(self);
        }

        debug!(path = %path.display(), "Adding configuration file");
        Ok(Self {
            builder: self
                .builder
                .add_source(File::from(path).format(FileFormat::Json).required(required)),
        })
    }

    /// Adds an inline JSON layer.
    pub fn json_str(self, json: &str) -> Self {
        Self {
            builder: self.builder.add_source(File::from_str(json, FileFormat::Json)),
        }
    }

    /// Adds the process environment as a layer.
    pub fn environment(self) -> Self {
        Self {
            builder: self
                .builder
                .add_source(Environment::default().separator(ENVIRONMENT_SEPARATOR)),
        }
    }

    /// Adds the given variables as an environment layer.
    pub fn environment_from<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            builder: self.builder.add_source(
                Environment::default()
                    .separator(ENVIRONMENT_SEPARATOR)
                    .source(Some(vars)),
            ),
        }
    }

    /// Merges the layers.
    pub fn build(self) -> Result<LayeredConfiguration, ConfigurationError> {
        Ok(LayeredConfiguration {
            config: self.builder.build()?,
        })
    }
}

impl fmt::Debug for LayeredConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredConfigurationBuilder").finish_non_exhaustive()
    }
}
