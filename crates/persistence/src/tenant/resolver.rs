//! Tenant resolution for a unit of work.
//!
//! The persistence layer never decides which tenant is active. It asks a
//! [`TenantResolver`] supplied by the host (typically built per request from
//! a header, host name, or URL prefix).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConfigurationError;

use super::id::TenantId;
use super::record::Tenant;

/// Supplies the tenant for the current unit of work.
pub trait TenantResolver: Send + Sync {
    /// Returns the active tenant, or `None` when no tenant applies.
    fn current(&self) -> Option<Tenant>;
}

impl<T: TenantResolver + ?Sized> TenantResolver for Arc<T> {
    fn current(&self) -> Option<Tenant> {
        (**self).current()
    }
}

/// A resolver that always returns the same tenant (or none).
#[derive(Debug, Clone, Default)]
pub struct FixedTenantResolver {
    tenant: Option<Tenant>,
}

impl FixedTenantResolver {
    /// Creates a resolver for the given tenant.
    pub fn new(tenant: Tenant) -> Self {
        Self {
            tenant: Some(tenant),
        }
    }

    /// Creates a resolver that never yields a tenant.
    pub fn none() -> Self {
        Self { tenant: None }
    }
}

impl TenantResolver for FixedTenantResolver {
    fn current(&self) -> Option<Tenant> {
        self.tenant.clone()
    }
}

/// An immutable table of known tenants.
///
/// The catalog is loaded once and shared; per-request resolvers are cut from
/// it with [`TenantCatalog::resolver_for`].
///
/// # Examples
///
/// ```
/// use meridian_persistence::tenant::{Tenant, TenantCatalog, TenantId, TenantResolver};
///
/// let catalog = TenantCatalog::from_tenants(vec![
///     Tenant::new("acme", "Acme", "sqlite"),
///     Tenant::new("globex", "Globex", "postgresql"),
/// ]);
///
/// let resolver = catalog.resolver_for(&TenantId::new("globex"));
/// assert_eq!(resolver.current().unwrap().storage_engine(), "postgresql");
///
/// let missing = catalog.resolver_for(&TenantId::new("initech"));
/// assert!(missing.current().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TenantCatalog {
    tenants: HashMap<TenantId, Tenant>,
}

impl TenantCatalog {
    /// Creates a catalog from a list of tenants. Later duplicates win.
    pub fn from_tenants(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        Self {
            tenants: tenants
                .into_iter()
                .map(|tenant| (tenant.id().clone(), tenant))
                .collect(),
        }
    }

    /// Loads a catalog from a JSON array of tenant records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tenants: Vec<Tenant> =
            serde_json::from_str(&raw).map_err(|source| ConfigurationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_tenants(tenants))
    }

    /// Returns the tenant with the given ID.
    pub fn get(&self, id: &TenantId) -> Option<&Tenant> {
        self.tenants.get(id)
    }

    /// Returns a resolver yielding the given tenant, or none if unknown.
    pub fn resolver_for(&self, id: &TenantId) -> FixedTenantResolver {
        match self.tenants.get(id) {
            Some(tenant) => FixedTenantResolver::new(tenant.clone()),
            None => FixedTenantResolver::none(),
        }
    }

    /// Returns the number of tenants.
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Returns `true` if the catalog has no tenants.
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_fixed_resolver() {
        let resolver = FixedTenantResolver::new(Tenant::new("acme", "Acme", "sqlite"));
        assert_eq!(resolver.current().unwrap().id().as_str(), "acme");
        assert!(FixedTenantResolver::none().current().is_none());
    }

    #[test]
    fn test_catalog_duplicates_last_wins() {
        let catalog = TenantCatalog::from_tenants(vec![
            Tenant::new("acme", "Acme", "sqlite"),
            Tenant::new("acme", "Acme", "mysql"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(&TenantId::new("acme")).unwrap().storage_engine(),
            "mysql"
        );
    }

    #[test]
    fn test_catalog_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"acme","connectionStringKey":"Acme","storageEngine":"sqlite"}}]"#
        )
        .unwrap();

        let catalog = TenantCatalog::from_json_file(file.path()).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.get(&TenantId::new("acme")).is_some());
    }

    #[test]
    fn test_catalog_missing_file() {
        let result = TenantCatalog::from_json_file("/nonexistent/tenants.json");
        assert!(matches!(result, Err(ConfigurationError::FileNotFound { .. })));
    }

    #[test]
    fn test_catalog_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = TenantCatalog::from_json_file(file.path());
        assert!(matches!(result, Err(ConfigurationError::Parse { .. })));
    }
}
