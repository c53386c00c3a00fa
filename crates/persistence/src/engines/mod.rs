//! Storage-engine adapters and their registry.
//!
//! A tenant names its storage engine with an opaque string identifier. The
//! [`StorageEngineRegistry`] maps identifiers to factories; each configure run
//! asks the factory for a fresh adapter, so no adapter state is shared between
//! units of work.
//!
//! # Built-in Engines
//!
//! | Identifier | Adapter | Identity tables |
//! |------------|---------|-----------------|
//! | `sqlite` | [`SqliteEngine`] | unchanged |
//! | `sqlserver` | [`SqlServerEngine`] | unchanged |
//! | `postgresql` | [`PostgresEngine`] | lower snake case |
//! | `mysql` | [`MySqlEngine`] | lower case |
//!
//! # Example
//!
//! ```
//! use meridian_persistence::engines::StorageEngineRegistry;
//!
//! let registry = StorageEngineRegistry::with_builtin();
//! let engine = registry.create("postgresql").unwrap();
//! assert_eq!(engine.name(), "postgresql");
//!
//! assert!(registry.resolve("oracle").is_none());
//! ```

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlEngine;
pub use postgres::PostgresEngine;
pub use sqlite::SqliteEngine;
pub use sqlserver::SqlServerEngine;

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::schema::IdentitySchema;

/// A pluggable adapter for one kind of underlying datastore.
pub trait StorageEngine: Debug + Send + Sync {
    /// The registry identifier of this engine.
    fn name(&self) -> &str;

    /// A human-readable label.
    fn label(&self) -> &str {
        self.name()
    }

    /// Normalizes a resolved connection string for this engine.
    fn shape_connection_string(&self, connection_string: &str) -> String {
        connection_string.to_string()
    }

    /// Rewrites identity-store table names to this engine's conventions.
    fn update_identity_table_names(&self, _schema: &mut IdentitySchema) {}
}

/// Creates a fresh storage-engine adapter.
pub type StorageEngineFactory = Arc<dyn Fn() -> Box<dyn StorageEngine> + Send + Sync>;

/// Maps storage-engine identifiers to adapter factories.
///
/// The registry is populated at startup and read-only afterwards; lookups
/// need no synchronization.
#[derive(Clone, Default)]
pub struct StorageEngineRegistry {
    factories: HashMap<String, StorageEngineFactory>,
}

impl StorageEngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in engines registered.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SqliteEngine::NAME, || Box::new(SqliteEngine));
        registry.register(SqlServerEngine::NAME, || Box::new(SqlServerEngine));
        registry.register(PostgresEngine::NAME, || Box::new(PostgresEngine));
        registry.register(MySqlEngine::NAME, || Box::new(MySqlEngine));
        registry
    }

    /// Registers a factory under `identifier`.
    ///
    /// Returns `false` and keeps the existing factory if the identifier is
    /// already registered.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn StorageEngine> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        if self.factories.contains_key(&identifier) {
            return false;
        }
        self.factories.insert(identifier, Arc::new(factory));
        true
    }

    /// Looks up the factory for `identifier`.
    ///
    /// Returns `None` for unknown or empty identifiers.
    pub fn resolve(&self, identifier: &str) -> Option<&StorageEngineFactory> {
        if identifier.is_empty() {
            return None;
        }
        self.factories.get(identifier)
    }

    /// Instantiates a fresh adapter for `identifier`.
    pub fn create(&self, identifier: &str) -> Option<Box<dyn StorageEngine>> {
        self.resolve(identifier).map(|factory| factory())
    }

    /// Returns `true` if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_some()
    }

    /// Returns the registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Debug for StorageEngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageEngineRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestEngine;

    impl StorageEngine for TestEngine {
        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_builtin_identifiers() {
        let registry = StorageEngineRegistry::with_builtin();
        assert_eq!(
            registry.identifiers(),
            vec!["mysql", "postgresql", "sqlite", "sqlserver"]
        );
    }

    #[test]
    fn test_resolve_unknown_and_empty() {
        let registry = StorageEngineRegistry::with_builtin();
        assert!(registry.resolve("oracle").is_none());
        assert!(registry.resolve("").is_none());
        assert!(registry.create("").is_none());
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let registry = StorageEngineRegistry::with_builtin();
        assert!(registry.contains("sqlite"));
        assert!(!registry.contains("SQLite"));
    }

    #[test]
    fn test_register_custom_engine() {
        let mut registry = StorageEngineRegistry::with_builtin();
        assert!(registry.register("test", || Box::new(TestEngine)));

        let engine = registry.create("test").unwrap();
        assert_eq!(engine.name(), "test");
        assert_eq!(engine.label(), "test");
        assert_eq!(engine.shape_connection_string("x=1"), "x=1");
    }

    #[test]
    fn test_register_does_not_replace() {
        let mut registry = StorageEngineRegistry::with_builtin();
        assert!(!registry.register("sqlite", || Box::new(TestEngine)));
        assert_eq!(registry.create("sqlite").unwrap().name(), "sqlite");
    }

    #[test]
    fn test_create_returns_fresh_instances() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let mut registry = StorageEngineRegistry::new();
        registry.register("test", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(TestEngine)
        });

        registry.create("test");
        registry.create("test");
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }
}
