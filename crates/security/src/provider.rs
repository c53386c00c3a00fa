//! On-demand policy synthesis.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{SecurityError, SecurityResult};
use crate::normalizer::normalize;
use crate::parser::parse;
use crate::policy::AuthorizationPolicy;
use crate::store::{InsertOutcome, PolicyStore};

/// Builds permission policies from their names and caches them.
///
/// Create one provider at process start and share it by [`Arc`] with every
/// request path; the store it owns lives as long as the provider.
///
/// # Examples
///
/// ```
/// use meridian_security::AuthorizationPolicyProvider;
///
/// let provider = AuthorizationPolicyProvider::new();
///
/// let policy = provider.get_or_create("ViewModule").unwrap();
/// let requirement = policy.permission().unwrap();
/// assert_eq!(requirement.entity_name, "Module");
/// assert!(requirement.require_entity_id);
///
/// assert!(provider.get_or_create("NoColonHere").is_none());
/// ```
#[derive(Debug)]
pub struct AuthorizationPolicyProvider {
    store: PolicyStore,
    default_policy: Arc<AuthorizationPolicy>,
}

impl Default for AuthorizationPolicyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorizationPolicyProvider {
    /// Creates a provider with an empty store.
    pub fn new() -> Self {
        Self {
            store: PolicyStore::new(),
            default_policy: Arc::new(AuthorizationPolicy::authenticated()),
        }
    }

    /// Returns the policy for `name`, synthesizing it on first use.
    ///
    /// Legacy names are normalized first. Registered and previously
    /// synthesized policies are returned from the store. Otherwise the name
    /// is parsed; a name that does not parse has no policy and leaves the
    /// store untouched. When two callers race to synthesize the same name,
    /// both receive a valid policy and the store keeps one of them.
    pub fn get_or_create(&self, name: &str) -> Option<Arc<AuthorizationPolicy>> {
        let name = normalize(name);
        if let Some(policy) = self.store.get(name) {
            return Some(policy);
        }

        let Some(requirement) = parse(name) else {
            trace!(policy = name, "Not a permission policy name");
            return None;
        };

        let policy = Arc::new(AuthorizationPolicy::from_permission(requirement));
        match self.store.insert_if_absent(name, Arc::clone(&policy)) {
            InsertOutcome::Inserted => {
                debug!(policy = name, "Synthesized authorization policy");
            }
            InsertOutcome::AlreadyPresent(_) => {
                trace!(policy = name, "Policy already synthesized by a concurrent caller");
            }
        }
        Some(policy)
    }

    /// Returns the policy applied when no name is given.
    pub fn default_policy(&self) -> Arc<AuthorizationPolicy> {
        Arc::clone(&self.default_policy)
    }

    /// Registers a static policy. Returns `false` if the name is taken.
    pub fn add_policy(&self, name: &str, policy: AuthorizationPolicy) -> bool {
        self.store
            .insert_if_absent(normalize(name), Arc::new(policy))
            .is_inserted()
    }

    /// Registers a static policy, failing if the name is taken.
    pub fn register_policy(&self, name: &str, policy: AuthorizationPolicy) -> SecurityResult<()> {
        if self.add_policy(name, policy) {
            debug!(policy = name, "Registered authorization policy");
            Ok(())
        } else {
            Err(SecurityError::DuplicatePolicy {
                name: name.to_string(),
            })
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }
}
