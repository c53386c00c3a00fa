//! Host configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MERIDIAN_CONTENT_ROOT` | . | Directory holding `appsettings.json` |
//! | `MERIDIAN_ENVIRONMENT` | Production | Selects `appsettings.{environment}.json` |
//! | `MERIDIAN_DATA_DIR` | ./data | Replaces `\|DataDirectory\|` in connection strings |
//! | `MERIDIAN_LOG_LEVEL` | info | Log level |
//! | `MERIDIAN_TENANTS` | | JSON file listing tenant records |
//! | `MERIDIAN_TENANT` | | Active tenant ID |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meridian_persistence::config::ConfigurationStrategy;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Host configuration, from the command line or environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "meridian")]
#[command(about = "Inspect tenant datastore bindings and authorization policies")]
pub struct HostConfig {
    /// Directory holding `appsettings.json`.
    #[arg(long, env = "MERIDIAN_CONTENT_ROOT", default_value = ".")]
    pub content_root: PathBuf,

    /// Environment name.
    #[arg(long, env = "MERIDIAN_ENVIRONMENT", default_value = "Production")]
    pub environment: String,

    /// Runtime data directory.
    #[arg(long, env = "MERIDIAN_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MERIDIAN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// JSON file listing tenant records.
    #[arg(long, env = "MERIDIAN_TENANTS")]
    pub tenants: Option<PathBuf>,

    /// Active tenant ID.
    #[arg(long, env = "MERIDIAN_TENANT")]
    pub tenant: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Host commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Configure a context for the active tenant and print its binding.
    Binding,

    /// Synthesize the named policies and print their requirements.
    Policy {
        /// Policy names, legacy or structured.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("."),
            environment: "Production".to_string(),
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            tenants: None,
            tenant: None,
            command: Command::Binding,
        }
    }
}

impl HostConfig {
    /// Returns the configuration strategy for this host.
    pub fn configuration_strategy(&self) -> ConfigurationStrategy {
        ConfigurationStrategy::ContentRoot {
            content_root: self.content_root.clone(),
            environment: self.environment.clone(),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if self.environment.trim().is_empty() {
            errors.push("Environment cannot be empty".to_string());
        }

        if self.tenant.is_some() && self.tenants.is_none() {
            errors.push("--tenant requires --tenants".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
