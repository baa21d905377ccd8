//! # Warden Authorization
//!
//! Decides whether a caller may perform an action.
//!
//! - [`acl`]: ordered allow/deny rules over groups, with the synthetic
//!   `Everyone` / `AuthenticatedUser` groups and the deny-all sentinel
//! - [`groups`]: the asynchronous group-membership callback
//! - [`policy`]: the pluggable [`AuthorizationPolicy`] dispatcher and its ACL
//!   implementation
//! - [`guards`]: explicit checks composed around request handlers
//!
//! ACL evaluation is first-match-wins in insertion order. A `Deny` only
//! overrides a broader `Allow` when it is placed *before* it; specificity
//! plays no part.

#![forbid(unsafe_code)]

pub mod acl;
pub mod groups;
pub mod guards;
pub mod policy;

pub use acl::{check, resolve, AclRule, AclRuleSet, AclRuleSetBuilder, Effect, Group, GroupSet};
pub use groups::{FnGroups, GroupsProvider};
pub use guards::{guarded, require_authenticated, require_permission};
pub use policy::{AclPolicy, AuthorizationPolicy};
