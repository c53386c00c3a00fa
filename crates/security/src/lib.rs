//! Meridian Security
//!
//! Builds authorization policies on demand from compact permission names,
//! so permissions need not be registered one by one at startup.
//!
//! # Policy Names
//!
//! ```text
//! Entity:Permission:Role1,Role2             three segments
//! Entity:Permission:Role1,Role2:RequireEntityId
//! ```
//!
//! Two legacy names are aliases of canonical forms:
//!
//! | Legacy | Canonical |
//! |--------|-----------|
//! | `ViewModule` | `Module:View:Administrators:RequireEntityId` |
//! | `EditModule` | `Module:Edit:Administrators:RequireEntityId` |
//!
//! # Architecture
//!
//! - [`normalizer`] - Legacy alias table
//! - [`parser`] - Policy name parsing into a [`PermissionRequirement`]
//! - [`policy`] - The policy objects handed to the evaluator
//! - [`store`] - The append-only, concurrency-safe policy store
//! - [`provider`] - [`AuthorizationPolicyProvider`], tying it together
//! - [`error`] - Error types for explicit registration and parsing
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use meridian_security::AuthorizationPolicyProvider;
//!
//! let provider = Arc::new(AuthorizationPolicyProvider::new());
//!
//! let legacy = provider.get_or_create("EditModule").unwrap();
//! let canonical = provider
//!     .get_or_create("Module:Edit:Administrators:RequireEntityId")
//!     .unwrap();
//! assert!(Arc::ptr_eq(&legacy, &canonical));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod normalizer;
pub mod parser;
pub mod policy;
pub mod provider;
pub mod store;

pub use error::{SecurityError, SecurityResult};
pub use normalizer::normalize;
pub use parser::{PermissionRequirement, parse};
pub use policy::{AuthorizationPolicy, PolicyRequirement};
pub use provider::AuthorizationPolicyProvider;
pub use store::{InsertOutcome, PolicyStore};
