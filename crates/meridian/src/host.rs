//! Composition root.
//!
//! Builds the shared collaborators once: configuration source, storage
//! engine registry, tenant resolver and policy provider. Every unit of work
//! then gets a fresh [`TenantDbContext`] from [`Host::new_context`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use meridian_persistence::connection::FixedDataDirectory;
use meridian_persistence::context::{ContextDependencies, TenantDbContext};
use meridian_persistence::engines::StorageEngineRegistry;
use meridian_persistence::tenant::{FixedTenantResolver, TenantCatalog, TenantId, TenantResolver};
use meridian_security::{
    AuthorizationPolicy, AuthorizationPolicyProvider, PermissionRequirement, normalize,
};

use crate::config::HostConfig;

/// Name of the policy registered for "any signed-in user".
pub const AUTHENTICATED_POLICY: &str = "Authenticated";

/// What a unit of work bound to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingReport {
    /// Active tenant, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Binding progress.
    pub status: String,
    /// Bound engine identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_engine: Option<String>,
    /// Display name of the bound engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_label: Option<String>,
    /// Engine-shaped connection string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
    /// Identity table names for the bound engine.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub identity_tables: BTreeMap<String, String>,
}

/// What a policy name resolved to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyReport {
    /// Name as requested.
    pub name: String,
    /// Name after legacy aliasing.
    pub canonical: String,
    /// Permission requirement, if the name has a permission policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<PermissionRequirement>,
    /// Whether any policy exists for the name.
    pub found: bool,
}

/// Long-lived collaborators shared by every unit of work.
#[derive(Debug, Clone)]
pub struct Host {
    deps: ContextDependencies,
    policies: Arc<AuthorizationPolicyProvider>,
}

impl Host {
    /// Builds the host from its configuration.
    pub fn from_config(config: &HostConfig) -> anyhow::Result<Self> {
        let configuration = config.configuration_strategy().acquire()?;

        let tenants: Arc<dyn TenantResolver> = match (&config.tenants, &config.tenant) {
            (Some(path), Some(id)) => {
                let catalog = TenantCatalog::from_json_file(path)?;
                info!(tenants = catalog.len(), active = %id, "Loaded tenant catalog");
                Arc::new(catalog.resolver_for(&TenantId::new(id.as_str())))
            }
            _ => {
                debug!("No active tenant configured");
                Arc::new(FixedTenantResolver::none())
            }
        };

        let deps = ContextDependencies::new(
            tenants,
            configuration,
            Arc::new(StorageEngineRegistry::with_builtin()),
            Arc::new(FixedDataDirectory::new(config.data_dir.clone())),
        );

        let policies = Arc::new(AuthorizationPolicyProvider::new());
        policies.register_policy(AUTHENTICATED_POLICY, AuthorizationPolicy::authenticated())?;

        Ok(Self::with_parts(deps, policies))
    }

    /// Builds a host from existing collaborators.
    pub fn with_parts(
        deps: ContextDependencies,
        policies: Arc<AuthorizationPolicyProvider>,
    ) -> Self {
        Self { deps, policies }
    }

    /// Creates a context for a new unit of work.
    pub fn new_context(&self) -> TenantDbContext {
        TenantDbContext::new(self.deps.clone())
    }

    /// Returns the shared policy provider.
    pub fn policies(&self) -> &Arc<AuthorizationPolicyProvider> {
        &self.policies
    }

    /// Configures a fresh context and reports its binding.
    pub fn describe_binding(&self) -> BindingReport {
        let tenant = self.deps.tenants.current().map(|t| t.id().to_string());
        let mut context = self.new_context();
        let status = context.configure();

        let identity_tables = context
            .build_identity_schema()
            .map(|schema| {
                schema
                    .iter()
                    .map(|(table, name)| (table.to_string(), name.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        BindingReport {
            tenant,
            status: status.to_string(),
            storage_engine: context.options().storage_engine().map(String::from),
            engine_label: context.active_engine().map(|e| e.label().to_string()),
            connection_string: context.options().connection_string().map(String::from),
            identity_tables,
        }
    }

    /// Resolves a policy name and reports the result.
    pub fn describe_policy(&self, name: &str) -> PolicyReport {
        let policy = self.policies.get_or_create(name);
        PolicyReport {
            name: name.to_string(),
            canonical: normalize(name).to_string(),
            requirement: policy.as_ref().and_then(|p| p.permission().cloned()),
            found: policy.is_some(),
        }
    }
}
