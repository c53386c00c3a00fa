//! Authorization policy objects handed to the authorization evaluator.

use serde::{Deserialize, Serialize};

use crate::parser::PermissionRequirement;

/// A single requirement a policy places on the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PolicyRequirement {
    /// The caller must hold the permission.
    Permission(PermissionRequirement),
    /// The caller must be signed in.
    AuthenticatedUser,
}

/// An authorization rule built from one or more requirements.
///
/// Policies are constructed here and evaluated elsewhere; nothing in this
/// crate grants or denies access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationPolicy {
    requirements: Vec<PolicyRequirement>,
}

impl AuthorizationPolicy {
    /// Creates a policy from its requirements.
    pub fn new(requirements: Vec<PolicyRequirement>) -> Self {
        Self { requirements }
    }

    /// Creates a policy wrapping a single permission requirement.
    pub fn from_permission(requirement: PermissionRequirement) -> Self {
        Self::new(vec![PolicyRequirement::Permission(requirement)])
    }

    /// Creates a policy that only requires an authenticated user.
    pub fn authenticated() -> Self {
        Self::new(vec![PolicyRequirement::AuthenticatedUser])
    }

    /// Returns the requirements.
    pub fn requirements(&self) -> &[PolicyRequirement] {
        &self.requirements
    }

    /// Returns the first permission requirement, if any.
    pub fn permission(&self) -> Option<&PermissionRequirement> {
        self.requirements.iter().find_map(|r| match r {
            PolicyRequirement::Permission(p) => Some(p),
            PolicyRequirement::AuthenticatedUser => None,
        })
    }
}
