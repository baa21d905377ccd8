//! Ordered ACL rule set and its evaluation.
//!
//! # Evaluation
//!
//! 1. A `None` group set is the deny-all sentinel: the answer is `false`
//!    before any rule is looked at.
//! 2. Rules are scanned in insertion order. The first rule whose group is in
//!    the caller's set *and* whose permissions contain the requested one
//!    decides: `Allow` grants, `Deny` refuses.
//! 3. If nothing matches, the answer is `false`.
//!
//! Order, not specificity, sets precedence. With
//!
//! ```text
//! 0: Allow  Everyone           {view}
//! 1: Deny   super_user         {view_extra}
//! 2: Allow  AuthenticatedUser  {view, view_extra}
//! ```
//!
//! an authenticated `super_user` is refused `view_extra` because rule 1 is
//! reached before rule 2. Moving the deny below the allow would grant it.

use super::group::{Group, GroupSet};
use super::rule::{AclRule, Effect};
use serde::Deserialize;
use std::borrow::Borrow;
use std::hash::Hash;
use std::path::Path;
use tracing::trace;
use warden_core::{Result, WardenError};

/// Ordered, immutable sequence of [`AclRule`]s.
#[derive(Debug, Clone)]
pub struct AclRuleSet<G, P> {
    rules: Vec<AclRule<G, P>>,
}

impl<G, P> Default for AclRuleSet<G, P> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<G, P> AclRuleSet<G, P>
where
    G: Eq + Hash,
    P: Eq + Hash,
{
    /// Rule set from an ordered list of rules
    pub fn new(rules: Vec<AclRule<G, P>>) -> Self {
        Self { rules }
    }

    /// Start building a rule set
    pub fn builder() -> AclRuleSetBuilder<G, P> {
        AclRuleSetBuilder::default()
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[AclRule<G, P>] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules (everything is denied)
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the rule that decides `permission` for `groups`, if any.
    pub fn matching_rule<Q>(&self, groups: &GroupSet<G>, permission: &Q) -> Option<usize>
    where
        P: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rules
            .iter()
            .position(|rule| rule.matches(groups, permission))
    }

    /// Whether `permission` is granted to a caller with `groups`.
    pub fn evaluate<Q>(&self, groups: Option<&GroupSet<G>>, permission: &Q) -> bool
    where
        P: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(groups) = groups else {
            trace!("deny-all sentinel");
            return false;
        };

        match self.matching_rule(groups, permission) {
            Some(index) => {
                let effect = self.rules[index].effect();
                trace!(rule = index, ?effect, "acl rule matched");
                effect.is_allow()
            }
            None => {
                trace!("no acl rule matched");
                false
            }
        }
    }
}

impl<G, P> PartialEq for AclRuleSet<G, P>
where
    G: Eq + Hash,
    P: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl<G: Eq + Hash, P: Eq + Hash> Eq for AclRuleSet<G, P> {}

impl<G, P> FromIterator<AclRule<G, P>> for AclRuleSet<G, P> {
    fn from_iter<T: IntoIterator<Item = AclRule<G, P>>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Fluent construction preserving call order.
#[derive(Debug, Clone)]
pub struct AclRuleSetBuilder<G, P> {
    rules: Vec<AclRule<G, P>>,
}

impl<G, P> Default for AclRuleSetBuilder<G, P> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<G, P> AclRuleSetBuilder<G, P>
where
    G: Eq + Hash,
    P: Eq + Hash,
{
    /// Append an allow rule
    pub fn allow<I>(self, group: Group<G>, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<P>,
    {
        self.rule(AclRule::allow(group, permissions))
    }

    /// Append a deny rule
    pub fn deny<I>(self, group: Group<G>, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<P>,
    {
        self.rule(AclRule::deny(group, permissions))
    }

    /// Append an existing rule
    pub fn rule(mut self, rule: AclRule<G, P>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Freeze the rule set
    pub fn build(self) -> AclRuleSet<G, P> {
        AclRuleSet::new(self.rules)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    effect: Effect,
    group: String,
    permissions: Vec<String>,
}

impl AclRuleSet<String, String> {
    /// Parse `[[rule]]` tables from TOML, keeping document order.
    ///
    /// ```toml
    /// [[rule]]
    /// effect = "allow"
    /// group = "everyone"
    /// permissions = ["view"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(content)
            .map_err(|e| WardenError::config(format!("invalid ACL rules: {e}")))?;
        Ok(file
            .rules
            .into_iter()
            .map(|entry| AclRule::new(entry.effect, Group::parse(&entry.group), entry.permissions))
            .collect())
    }

    /// Load rules from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WardenError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }
}
