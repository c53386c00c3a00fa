//! Meridian Persistence Layer
//!
//! This crate binds each unit of work to the active tenant's datastore. A
//! tenant names a connection-string template and a storage engine; the
//! context configurator resolves both lazily, once per unit of work.
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant records and the resolver supplying the active tenant
//! - [`config`] - Configuration sources and the acquisition strategy
//! - [`connection`] - Connection-string resolution and `|DataDirectory|` expansion
//! - [`engines`] - Storage-engine adapters and their explicit registry
//! - [`schema`] - Identity table naming, adjusted per engine
//! - [`interceptor`] - Pre-save hooks run before every commit
//! - [`context`] - The unit-of-work context and its binding state machine
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use meridian_persistence::config::InMemoryConfiguration;
//! use meridian_persistence::connection::FixedDataDirectory;
//! use meridian_persistence::context::{ContextDependencies, TenantDbContext};
//! use meridian_persistence::engines::StorageEngineRegistry;
//! use meridian_persistence::tenant::{FixedTenantResolver, Tenant};
//!
//! let config = InMemoryConfiguration::new()
//!     .with_connection_string("Acme", "Data Source=|DataDirectory|/acme.db");
//!
//! let deps = ContextDependencies::new(
//!     Arc::new(FixedTenantResolver::new(Tenant::new("acme", "Acme", "sqlite"))),
//!     Arc::new(config),
//!     Arc::new(StorageEngineRegistry::with_builtin()),
//!     Arc::new(FixedDataDirectory::new("/srv/meridian/data")),
//! );
//!
//! let mut context = TenantDbContext::new(deps);
//! context.configure();
//! assert_eq!(
//!     context.options().connection_string(),
//!     Some("Data Source=/srv/meridian/data/acme.db")
//! );
//! ```
//!
//! # Unconfigured Contexts
//!
//! A missing tenant, template or engine never fails configuration. The
//! context stays unconfigured and the failure surfaces at first use:
//!
//! ```
//! use std::sync::Arc;
//! use meridian_persistence::config::InMemoryConfiguration;
//! use meridian_persistence::connection::FixedDataDirectory;
//! use meridian_persistence::context::{BindingStatus, ContextDependencies, TenantDbContext};
//! use meridian_persistence::engines::StorageEngineRegistry;
//! use meridian_persistence::tenant::FixedTenantResolver;
//!
//! let deps = ContextDependencies::new(
//!     Arc::new(FixedTenantResolver::none()),
//!     Arc::new(InMemoryConfiguration::new()),
//!     Arc::new(StorageEngineRegistry::with_builtin()),
//!     Arc::new(FixedDataDirectory::new("/data")),
//! );
//!
//! let mut context = TenantDbContext::new(deps);
//! assert_eq!(context.configure(), BindingStatus::Unconfigured);
//! assert!(context.build_identity_schema().is_err());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod connection;
pub mod context;
pub mod engines;
pub mod error;
pub mod interceptor;
pub mod schema;
pub mod tenant;

// Re-export commonly used types at crate root
pub use error::{BindingError, ConfigurationError, PersistenceError, PersistenceResult, SaveError};
pub use tenant::{Tenant, TenantId, TenantResolver};

pub use config::{ConfigurationSource, ConfigurationStrategy};
pub use context::{BindingStatus, ChangeSink, ContextDependencies, TenantDbContext};
pub use engines::{StorageEngine, StorageEngineRegistry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
