//! Tenant types consumed by context configuration.
//!
//! # Core Types
//!
//! - [`TenantId`] - Opaque tenant identifier
//! - [`Tenant`] - The tenant record carrying binding attributes
//! - [`TenantResolver`] - Supplies the tenant for the current unit of work
//! - [`TenantCatalog`] - An immutable tenant table for composition roots
//!
//! # Examples
//!
//! ```
//! use meridian_persistence::tenant::{FixedTenantResolver, Tenant, TenantResolver};
//!
//! let resolver = FixedTenantResolver::new(Tenant::new("acme", "Acme", "sqlite"));
//! let tenant = resolver.current().unwrap();
//! assert_eq!(tenant.connection_string_key(), "Acme");
//! ```

mod id;
mod record;
mod resolver;

pub use id::TenantId;
pub use record::Tenant;
pub use resolver::{FixedTenantResolver, TenantCatalog, TenantResolver};
