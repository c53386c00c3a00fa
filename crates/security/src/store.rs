//! Append-only store of named policies shared across units of work.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::policy::AuthorizationPolicy;

/// Result of [`PolicyStore::insert_if_absent`].
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The policy was stored.
    Inserted,
    /// Another policy already held the name; it is returned unchanged.
    AlreadyPresent(Arc<AuthorizationPolicy>),
}

impl InsertOutcome {
    /// Returns `true` if the insert stored the policy.
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// A concurrency-safe, append-only map from policy name to policy.
///
/// Entries are never replaced or evicted. Reads take a shared lock; inserts
/// take the exclusive lock only for the check-and-insert itself.
#[derive(Debug, Default)]
pub struct PolicyStore {
    policies: RwLock<HashMap<String, Arc<AuthorizationPolicy>>>,
}

impl PolicyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the policy stored under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<AuthorizationPolicy>> {
        self.policies.read().get(name).cloned()
    }

    /// Stores `policy` under `name` unless the name is taken.
    pub fn insert_if_absent(
        &self,
        name: impl Into<String>,
        policy: Arc<AuthorizationPolicy>,
    ) -> InsertOutcome {
        match self.policies.write().entry(name.into()) {
            Entry::Occupied(existing) => InsertOutcome::AlreadyPresent(Arc::clone(existing.get())),
            Entry::Vacant(slot) => {
                slot.insert(policy);
                InsertOutcome::Inserted
            }
        }
    }

    /// Returns the number of stored policies.
    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }

    /// Returns the stored names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.policies.read().keys().cloned().collect();
        names.sort();
        names
    }
}
