//! The tenant record consumed by context configuration.

use serde::{Deserialize, Serialize};

use super::id::TenantId;

/// A logical customer partition with its own datastore binding.
///
/// Tenants are owned by an external catalog. The persistence layer only reads
/// the two binding attributes: the configuration key naming the tenant's
/// connection-string template, and the storage-engine identifier.
///
/// # Examples
///
/// ```
/// use meridian_persistence::tenant::Tenant;
///
/// let tenant = Tenant::new("acme", "DefaultConnection", "sqlite");
/// assert_eq!(tenant.connection_string_key(), "DefaultConnection");
/// assert_eq!(tenant.storage_engine(), "sqlite");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    id: TenantId,
    #[serde(default)]
    name: Option<String>,
    connection_string_key: String,
    storage_engine: String,
}

impl Tenant {
    /// Creates a tenant record.
    pub fn new(
        id: impl Into<TenantId>,
        connection_string_key: impl Into<String>,
        storage_engine: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            connection_string_key: connection_string_key.into(),
            storage_engine: storage_engine.into(),
        }
    }

    /// Sets a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the tenant ID.
    pub fn id(&self) -> &TenantId {
        &self.id
    }

    /// Returns the display name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the configuration key of the connection-string template.
    pub fn connection_string_key(&self) -> &str {
        &self.connection_string_key
    }

    /// Returns the storage-engine identifier.
    pub fn storage_engine(&self) -> &str {
        &self.storage_engine
    }
}
