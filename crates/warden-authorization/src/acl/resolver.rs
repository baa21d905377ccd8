//! Group resolution: application groups plus the synthetic groups.

use super::group::{Group, GroupSet};
use std::hash::Hash;

/// Resolve the group set a caller is evaluated under.
///
/// - `raw_groups == None` is the explicit deny-all sentinel and stays `None`.
/// - Otherwise the application groups (possibly none) are extended with
///   [`Group::Everyone`], and with [`Group::AuthenticatedUser`] iff
///   `identity` is present.
///
/// The identity itself is never added as a group.
pub fn resolve<G, I>(identity: Option<&str>, raw_groups: Option<I>) -> Option<GroupSet<G>>
where
    G: Eq + Hash,
    I: IntoIterator<Item = G>,
{
    let raw_groups = raw_groups?;

    let mut groups: GroupSet<G> = raw_groups.into_iter().map(Group::Named).collect();
    groups.insert(Group::Everyone);
    if identity.is_some() {
        groups.insert(Group::AuthenticatedUser);
    }
    Some(groups)
}
