//! Per-unit-of-work datastore binding.
//!
//! A [`ContextBinding`] moves through three states:
//!
//! ```text
//! Unconfigured --(tenant + template)--> ConnectionResolved --(engine)--> Bound
//! ```
//!
//! A missing tenant, a missing or empty template, or an unknown engine
//! identifier stops the machine where it is without raising. From
//! `ConnectionResolved`, a later run only retries the engine lookup. Once
//! `Bound`, every run is a no-op that re-applies the same engine and
//! connection string.

use std::fmt;

use tracing::{debug, warn};

use super::ContextDependencies;
use super::options::ContextOptions;
use crate::connection::resolve_connection_string;
use crate::engines::StorageEngine;
use crate::error::{BindingError, BindingStage};

/// Observable progress of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStatus {
    /// Nothing resolved yet.
    Unconfigured,
    /// Connection string resolved, no engine bound.
    ConnectionResolved,
    /// Engine and connection string bound.
    Bound,
}

impl fmt::Display for BindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingStatus::Unconfigured => write!(f, "unconfigured"),
            BindingStatus::ConnectionResolved => write!(f, "connection-resolved"),
            BindingStatus::Bound => write!(f, "bound"),
        }
    }
}

enum BindingState {
    Unconfigured,
    ConnectionResolved {
        connection_string: String,
        storage_engine: String,
    },
    Bound {
        connection_string: String,
        engine: Box<dyn StorageEngine>,
    },
}

/// The resolved `(connection string, storage engine)` pair of one unit of work.
///
/// Bindings are never shared between units of work and need no locking.
pub struct ContextBinding {
    state: BindingState,
}

impl Default for ContextBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextBinding {
    /// Creates an unconfigured binding.
    pub fn new() -> Self {
        Self {
            state: BindingState::Unconfigured,
        }
    }

    /// Advances the binding as far as the collaborators allow and applies a
    /// completed binding to `options`.
    pub fn configure(
        &mut self,
        deps: &ContextDependencies,
        options: &mut ContextOptions,
    ) -> BindingStatus {
        if let BindingState::Unconfigured = self.state {
            let Some(tenant) = deps.tenants.current() else {
                debug!("No tenant for unit of work; binding left unconfigured");
                return BindingStatus::Unconfigured;
            };

            let data_dir = deps.data_directory.current_data_dir();
            let Some(connection_string) =
                resolve_connection_string(&tenant, deps.configuration.as_ref(), &data_dir)
            else {
                warn!(
                    tenant = %tenant.id(),
                    key = tenant.connection_string_key(),
                    "Tenant connection string is not configured"
                );
                return BindingStatus::Unconfigured;
            };
            if connection_string.is_empty() {
                warn!(
                    tenant = %tenant.id(),
                    key = tenant.connection_string_key(),
                    "Tenant connection string is empty; binding left unconfigured"
                );
                return BindingStatus::Unconfigured;
            }

            self.state = BindingState::ConnectionResolved {
                connection_string,
                storage_engine: tenant.storage_engine().to_string(),
            };
        }

        if let BindingState::ConnectionResolved {
            connection_string,
            storage_engine,
        } = &mut self.state
        {
            let Some(engine) = deps.engines.create(storage_engine) else {
                warn!(
                    storage_engine = %storage_engine,
                    "Unknown storage engine; binding left unconfigured"
                );
                return BindingStatus::ConnectionResolved;
            };

            debug!(storage_engine = engine.name(), "Context binding complete");
            self.state = BindingState::Bound {
                connection_string: std::mem::take(connection_string),
                engine,
            };
        }

        if let BindingState::Bound {
            connection_string,
            engine,
        } = &self.state
        {
            options.use_storage_engine(
                engine.name(),
                engine.shape_connection_string(connection_string),
            );
        }

        self.status()
    }

    /// Returns the current progress.
    pub fn status(&self) -> BindingStatus {
        match self.state {
            BindingState::Unconfigured => BindingStatus::Unconfigured,
            BindingState::ConnectionResolved { .. } => BindingStatus::ConnectionResolved,
            BindingState::Bound { .. } => BindingStatus::Bound,
        }
    }

    /// Returns `true` once an engine is bound.
    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindingState::Bound { .. })
    }

    /// Returns the resolved connection string, before engine shaping.
    pub fn connection_string(&self) -> Option<&str> {
        match &self.state {
            BindingState::Unconfigured => None,
            BindingState::ConnectionResolved {
                connection_string, ..
            }
            | BindingState::Bound {
                connection_string, ..
            } => Some(connection_string),
        }
    }

    /// Returns the bound storage engine.
    pub fn engine(&self) -> Option<&dyn StorageEngine> {
        match &self.state {
            BindingState::Bound { engine, .. } => Some(engine.as_ref()),
            _ => None,
        }
    }

    /// Returns the bound engine and connection string, or the stage at which
    /// the binding stopped.
    pub fn require_bound(&self) -> Result<(&dyn StorageEngine, &str), BindingError> {
        match &self.state {
            BindingState::Bound {
                connection_string,
                engine,
            } => Ok((engine.as_ref(), connection_string)),
            BindingState::ConnectionResolved { .. } => Err(BindingError::Unconfigured {
                stage: BindingStage::ConnectionResolved,
            }),
            BindingState::Unconfigured => Err(BindingError::Unconfigured {
                stage: BindingStage::Unconfigured,
            }),
        }
    }
}

impl fmt::Debug for ContextBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBinding")
            .field("status", &self.status())
            .field("engine", &self.engine().map(|e| e.name()))
            .finish()
    }
}
