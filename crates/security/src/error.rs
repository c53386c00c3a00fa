//! Error types for policy registration and parsing.
//!
//! Policy lookup by name never fails: an unparseable name simply has no
//! policy. These errors are raised only by explicit APIs such as
//! [`PermissionRequirement::from_str`](std::str::FromStr::from_str) and
//! [`AuthorizationPolicyProvider::register_policy`](crate::AuthorizationPolicyProvider::register_policy).

#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised by the security crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// The name is not of the form `Entity:Permission:Roles[:RequireEntityId]`.
    #[error("invalid permission policy name: {name}")]
    InvalidPolicyName { name: String },

    /// A policy is already registered under the name.
    #[error("policy already registered: {name}")]
    DuplicatePolicy { name: String },
}

/// Result type for security operations.
pub type SecurityResult<T> = Result<T, SecurityError>;
