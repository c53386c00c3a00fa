//! Unit-of-work contexts bound to the active tenant's datastore.
//!
//! # Core Types
//!
//! - [`ContextDependencies`] - Collaborators shared by every context
//! - [`ContextBinding`] - The lazily resolved engine and connection string
//! - [`ContextOptions`] - What a completed binding is applied to
//! - [`TenantDbContext`] - A unit of work: configure, name schema, save
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use meridian_persistence::config::InMemoryConfiguration;
//! use meridian_persistence::connection::FixedDataDirectory;
//! use meridian_persistence::context::{BindingStatus, ContextDependencies, TenantDbContext};
//! use meridian_persistence::engines::StorageEngineRegistry;
//! use meridian_persistence::tenant::{FixedTenantResolver, Tenant};
//!
//! let deps = ContextDependencies::new(
//!     Arc::new(FixedTenantResolver::new(Tenant::new("acme", "Acme", "postgresql"))),
//!     Arc::new(
//!         InMemoryConfiguration::new().with_connection_string("Acme", "Host=db;Database=acme"),
//!     ),
//!     Arc::new(StorageEngineRegistry::with_builtin()),
//!     Arc::new(FixedDataDirectory::new("/data")),
//! );
//!
//! let mut context = TenantDbContext::new(deps);
//! assert_eq!(context.configure(), BindingStatus::Bound);
//! assert_eq!(context.active_engine().unwrap().name(), "postgresql");
//! ```

mod binding;
mod db_context;
mod options;

pub use binding::{BindingStatus, ContextBinding};
pub use db_context::{ChangeSink, CommitTarget, TenantDbContext};
pub use options::ContextOptions;

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigurationSource;
use crate::connection::DataDirectory;
use crate::engines::StorageEngineRegistry;
use crate::interceptor::{NoopInterceptor, SaveInterceptor};
use crate::tenant::TenantResolver;

/// Collaborators a unit-of-work context resolves its binding from.
///
/// Cloning is cheap; hosts typically keep one value and swap in a
/// per-request tenant resolver with [`ContextDependencies::with_tenants`].
#[derive(Clone)]
pub struct ContextDependencies {
    /// Supplies the active tenant.
    pub tenants: Arc<dyn TenantResolver>,
    /// Supplies connection-string templates.
    pub configuration: Arc<dyn ConfigurationSource>,
    /// Maps storage-engine identifiers to adapters.
    pub engines: Arc<StorageEngineRegistry>,
    /// Supplies the runtime data directory.
    pub data_directory: Arc<dyn DataDirectory>,
    /// Runs before every commit.
    pub interceptor: Arc<dyn SaveInterceptor>,
}

impl ContextDependencies {
    /// Creates dependencies with a no-op save interceptor.
    pub fn new(
        tenants: Arc<dyn TenantResolver>,
        configuration: Arc<dyn ConfigurationSource>,
        engines: Arc<StorageEngineRegistry>,
        data_directory: Arc<dyn DataDirectory>,
    ) -> Self {
        Self {
            tenants,
            configuration,
            engines,
            data_directory,
            interceptor: Arc::new(NoopInterceptor),
        }
    }

    /// Replaces the save interceptor.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn SaveInterceptor>) -> Self {
        self.interceptor = interceptor;
        self
    }

    /// Replaces the tenant resolver.
    pub fn with_tenants(mut self, tenants: Arc<dyn TenantResolver>) -> Self {
        self.tenants = tenants;
        self
    }
}

impl fmt::Debug for ContextDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextDependencies")
            .field("engines", &self.engines)
            .finish_non_exhaustive()
    }
}
