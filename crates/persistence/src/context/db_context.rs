//! The unit-of-work context.

use async_trait::async_trait;
use tracing::debug;

use super::binding::{BindingStatus, ContextBinding};
use super::options::ContextOptions;
use super::ContextDependencies;
use crate::engines::StorageEngine;
use crate::error::{BindingError, PersistenceResult, SaveError};
use crate::interceptor::PendingChanges;
use crate::schema::IdentitySchema;

/// Where a commit is sent.
#[derive(Debug, Clone, Copy)]
pub struct CommitTarget<'a> {
    /// The bound storage engine.
    pub engine: &'a dyn StorageEngine,
    /// The engine-shaped connection string.
    pub connection_string: &'a str,
}

/// The underlying persistence call a context delegates commits to.
#[async_trait]
pub trait ChangeSink: Send + Sync {
    /// Commits `changes`, returning the number of entities written.
    fn commit(
        &self,
        target: &CommitTarget<'_>,
        changes: PendingChanges,
    ) -> Result<usize, SaveError>;

    /// Async variant of [`ChangeSink::commit`]. Defaults to the blocking call.
    async fn commit_async(
        &self,
        target: &CommitTarget<'_>,
        changes: PendingChanges,
    ) -> Result<usize, SaveError> {
        self.commit(target, changes)
    }
}

/// A unit of work bound lazily to the active tenant's datastore.
///
/// The binding is resolved on first use and kept for the lifetime of the
/// context; a new unit of work gets a new context and a new binding.
#[derive(Debug)]
pub struct TenantDbContext {
    deps: ContextDependencies,
    binding: ContextBinding,
    options: ContextOptions,
}

impl TenantDbContext {
    /// Creates an unconfigured context.
    pub fn new(deps: ContextDependencies) -> Self {
        Self {
            deps,
            binding: ContextBinding::new(),
            options: ContextOptions::new(),
        }
    }

    /// Runs the context configurator. Never fails; see [`ContextBinding`].
    pub fn configure(&mut self) -> BindingStatus {
        self.binding.configure(&self.deps, &mut self.options)
    }

    /// Returns the binding.
    pub fn binding(&self) -> &ContextBinding {
        &self.binding
    }

    /// Returns the options the binding was applied to.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Returns the bound storage engine, if any.
    pub fn active_engine(&self) -> Option<&dyn StorageEngine> {
        self.binding.engine()
    }

    /// Builds the identity schema with the bound engine's table names.
    pub fn build_identity_schema(&mut self) -> Result<IdentitySchema, BindingError> {
        self.configure();
        let (engine, _) = self.binding.require_bound()?;
        let mut schema = IdentitySchema::default();
        engine.update_identity_table_names(&mut schema);
        Ok(schema)
    }

    /// Runs the save interceptor, then commits through `sink`.
    pub fn save_changes(
        &mut self,
        mut changes: PendingChanges,
        sink: &dyn ChangeSink,
    ) -> PersistenceResult<usize> {
        self.configure();
        self.deps.interceptor.before_save(&mut changes);

        let target = self.commit_target()?;
        debug!(
            storage_engine = target.engine.name(),
            changes = changes.len(),
            "Saving changes"
        );
        Ok(sink.commit(&target, changes)?)
    }

    /// Async variant of [`TenantDbContext::save_changes`]. The interceptor
    /// runs synchronously before the commit is awaited.
    pub async fn save_changes_async(
        &mut self,
        mut changes: PendingChanges,
        sink: &dyn ChangeSink,
    ) -> PersistenceResult<usize> {
        self.configure();
        self.deps.interceptor.before_save(&mut changes);

        let target = self.commit_target()?;
        debug!(
            storage_engine = target.engine.name(),
            changes = changes.len(),
            "Saving changes"
        );
        Ok(sink.commit_async(&target, changes).await?)
    }

    fn commit_target(&self) -> Result<CommitTarget<'_>, BindingError> {
        let (engine, unshaped) = self.binding.require_bound()?;
        Ok(CommitTarget {
            engine,
            connection_string: self.options.connection_string().unwrap_or(unshaped),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::InMemoryConfiguration;
    use crate::connection::FixedDataDirectory;
    use crate::engines::StorageEngineRegistry;
    use crate::error::PersistenceError;
    use crate::interceptor::{ChangeState, PendingChange};
    use crate::schema::IdentityTable;
    use crate::tenant::{FixedTenantResolver, Tenant};

    struct CountingSink;

    #[async_trait]
    impl ChangeSink for CountingSink {
        fn commit(
            &self,
            _target: &CommitTarget<'_>,
            changes: PendingChanges,
        ) -> Result<usize, SaveError> {
            Ok(changes.len())
        }
    }

    fn context(engine: &str) -> TenantDbContext {
        TenantDbContext::new(ContextDependencies::new(
            Arc::new(FixedTenantResolver::new(Tenant::new("acme", "Acme", engine))),
            Arc::new(InMemoryConfiguration::new().with_connection_string("Acme", "Host=db")),
            Arc::new(StorageEngineRegistry::with_builtin()),
            Arc::new(FixedDataDirectory::new("/data")),
        ))
    }

    fn one_change() -> PendingChanges {
        std::iter::once(PendingChange::new("Page", ChangeState::Added)).collect()
    }

    #[test]
    fn test_identity_schema_uses_engine() {
        let mut ctx = context("postgresql");
        let schema = ctx.build_identity_schema().unwrap();
        assert_eq!(schema.table_name(IdentityTable::Users), "asp_net_users");
    }

    #[test]
    fn test_identity_schema_unconfigured() {
        let mut ctx = context("oracle");
        assert!(matches!(
            ctx.build_identity_schema(),
            Err(BindingError::Unconfigured { .. })
        ));
    }

    #[test]
    fn test_save_changes_configures_lazily() {
        let mut ctx = context("sqlserver");
        assert_eq!(ctx.binding().status(), BindingStatus::Unconfigured);
        assert_eq!(ctx.save_changes(one_change(), &CountingSink).unwrap(), 1);
        assert!(ctx.binding().is_bound());
    }

    #[test]
    fn test_save_changes_unconfigured_fails_at_use() {
        let mut ctx = context("oracle");
        let result = ctx.save_changes(one_change(), &CountingSink);
        assert!(matches!(result, Err(PersistenceError::Binding(_))));
    }

    #[tokio::test]
    async fn test_save_changes_async_default_commit() {
        let mut ctx = context("mysql");
        assert_eq!(
            ctx.save_changes_async(one_change(), &CountingSink).await.unwrap(),
            1
        );
    }
}
