//! Error types for the persistence layer.
//!
//! Configuration gaps (no tenant, no connection template, unknown storage
//! engine) are not errors at configuration time: they leave the context
//! binding unconfigured. They surface here only when an unconfigured binding
//! is actually used, as [`BindingError::Unconfigured`].

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for persistence operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Context binding errors
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// Configuration acquisition errors
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Errors raised while committing pending changes
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// How far a context binding progressed before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStage {
    /// No tenant, or the tenant has no connection-string template.
    Unconfigured,
    /// A connection string was resolved but no storage engine was bound.
    ConnectionResolved,
}

impl fmt::Display for BindingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingStage::Unconfigured => write!(f, "unconfigured"),
            BindingStage::ConnectionResolved => write!(f, "connection-resolved"),
        }
    }
}

/// Errors raised when a context binding is used.
#[derive(Error, Debug)]
pub enum BindingError {
    /// The binding never reached the bound state.
    #[error("context binding is not configured (stopped at {stage})")]
    Unconfigured { stage: BindingStage },
}

/// Errors raised while acquiring configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A required configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A configuration file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration layers could not be loaded or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A configuration file is not valid JSON.
    #[error("failed to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while committing pending changes.
#[derive(Error, Debug)]
pub enum SaveError {
    /// The underlying store rejected the commit.
    #[error("commit rejected by {engine}: {message}")]
    Rejected { engine: String, message: String },

    /// Internal store error.
    #[error("internal error in {engine}: {message}")]
    Internal {
        engine: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
