//! Access-control lists.
//!
//! `identity -> resolve -> group set -> AclRuleSet::evaluate -> allow/deny`.
//! Everything here is synchronous and pure; fetching the application groups
//! is the caller's (possibly asynchronous) business.

mod group;
mod resolver;
mod rule;
mod ruleset;

pub use group::{Group, GroupSet, AUTHENTICATED, EVERYONE};
pub use resolver::resolve;
pub use rule::{AclRule, Effect};
pub use ruleset::{AclRuleSet, AclRuleSetBuilder};

use std::borrow::Borrow;
use std::hash::Hash;

/// Resolve `raw_groups` for `identity` and evaluate `permission` against
/// `rules`.
pub fn check<G, P, Q, I>(
    rules: &AclRuleSet<G, P>,
    identity: Option<&str>,
    raw_groups: Option<I>,
    permission: &Q,
) -> bool
where
    G: Eq + Hash,
    P: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    I: IntoIterator<Item = G>,
{
    let groups = resolve(identity, raw_groups);
    rules.evaluate(groups.as_ref(), permission)
}
