//! Single ACL rule.

use super::group::Group;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// Outcome of a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Grant the permission
    Allow,
    /// Refuse the permission
    Deny,
}

impl Effect {
    /// Whether a match with this effect grants access
    pub fn is_allow(self) -> bool {
        matches!(self, Effect::Allow)
    }
}

/// `(effect, group, permissions)`; immutable once built.
#[derive(Debug, Clone)]
pub struct AclRule<G, P> {
    effect: Effect,
    group: Group<G>,
    permissions: HashSet<P>,
}

impl<G, P> AclRule<G, P>
where
    G: Eq + Hash,
    P: Eq + Hash,
{
    /// Build a rule
    pub fn new<I>(effect: Effect, group: Group<G>, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<P>,
    {
        Self {
            effect,
            group,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow rule
    pub fn allow<I>(group: Group<G>, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<P>,
    {
        Self::new(Effect::Allow, group, permissions)
    }

    /// Deny rule
    pub fn deny<I>(group: Group<G>, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<P>,
    {
        Self::new(Effect::Deny, group, permissions)
    }

    /// Rule effect
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Group the rule applies to
    pub fn group(&self) -> &Group<G> {
        &self.group
    }

    /// Permissions the rule covers
    pub fn permissions(&self) -> &HashSet<P> {
        &self.permissions
    }

    /// Whether the rule applies to a caller in `groups` asking for `permission`
    pub fn matches<Q>(&self, groups: &HashSet<Group<G>>, permission: &Q) -> bool
    where
        P: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        groups.contains(&self.group) && self.permissions.contains(permission)
    }
}

impl<G, P> PartialEq for AclRule<G, P>
where
    G: Eq + Hash,
    P: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.effect == other.effect
            && self.group == other.group
            && self.permissions == other.permissions
    }
}

impl<G: Eq + Hash, P: Eq + Hash> Eq for AclRule<G, P> {}
