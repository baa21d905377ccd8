//! ACL groups, including the two synthetic groups.

use std::collections::HashSet;
use std::fmt;

/// Name under which rule files refer to [`Group::Everyone`].
pub const EVERYONE: &str = "everyone";

/// Name under which rule files refer to [`Group::AuthenticatedUser`].
pub const AUTHENTICATED: &str = "authenticated";

/// A unit of permission grant.
///
/// `Named` carries an application group of any comparable type. The two
/// synthetic variants are added by [`super::resolve`] and can never collide
/// with an application group, whatever its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group<G> {
    /// Present in every resolved group set
    Everyone,
    /// Present iff the caller is authenticated
    AuthenticatedUser,
    /// Application-defined group
    Named(G),
}

/// Resolved groups of one caller.
pub type GroupSet<G> = HashSet<Group<G>>;

impl<G> Group<G> {
    /// Wrap an application group
    pub fn named(group: impl Into<G>) -> Self {
        Group::Named(group.into())
    }

    /// Whether this is one of the synthetic groups
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Group::Named(_))
    }
}

impl Group<String> {
    /// Parse a rule-file group name; the reserved names map to the synthetic
    /// groups.
    pub fn parse(name: &str) -> Self {
        match name {
            EVERYONE => Group::Everyone,
            AUTHENTICATED => Group::AuthenticatedUser,
            other => Group::Named(other.to_string()),
        }
    }
}

impl<G: fmt::Display> fmt::Display for Group<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Everyone => f.write_str(EVERYONE),
            Group::AuthenticatedUser => f.write_str(AUTHENTICATED),
            Group::Named(group) => group.fmt(f),
        }
    }
}
