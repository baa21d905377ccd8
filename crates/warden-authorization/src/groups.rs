//! Group-membership lookup.
//!
//! The application owns group membership. Warden only asks for it, once per
//! authorization decision, and resolves the answer with [`crate::resolve`].

use async_trait::async_trait;
use std::sync::Arc;
use warden_core::Result;

/// Supplies the application groups of an identity.
///
/// Return values:
/// - `Ok(Some(groups))`: the caller's groups; may be empty
/// - `Ok(None)`: deny the caller outright, regardless of the rules
/// - `Err(_)`: the lookup itself failed; authorization fails with it
#[async_trait]
pub trait GroupsProvider<G>: Send + Sync {
    /// Fetch the groups of `identity` (`None` for an anonymous caller)
    async fn fetch_groups(&self, identity: Option<&str>) -> Result<Option<Vec<G>>>;
}

#[async_trait]
impl<G, T> GroupsProvider<G> for Arc<T>
where
    G: Send + 'static,
    T: GroupsProvider<G> + ?Sized,
{
    async fn fetch_groups(&self, identity: Option<&str>) -> Result<Option<Vec<G>>> {
        (**self).fetch_groups(identity).await
    }
}

/// [`GroupsProvider`] backed by a synchronous closure.
///
/// ```
/// use warden_authorization::FnGroups;
///
/// let groups = FnGroups::new(|identity: Option<&str>| -> warden_core::Result<_> {
///     Ok(match identity {
///         Some("admin") => Some(vec!["admin".to_string()]),
///         Some("banned") => None,
///         _ => Some(Vec::new()),
///     })
/// });
/// # let _ = groups;
/// ```
pub struct FnGroups<F> {
    lookup: F,
}

impl<F> FnGroups<F> {
    /// Wrap a lookup closure
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> std::fmt::Debug for FnGroups<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnGroups").finish_non_exhaustive()
    }
}

#[async_trait]
impl<G, F> GroupsProvider<G> for FnGroups<F>
where
    G: Send + 'static,
    F: Fn(Option<&str>) -> Result<Option<Vec<G>>> + Send + Sync,
{
    async fn fetch_groups(&self, identity: Option<&str>) -> Result<Option<Vec<G>>> {
        (self.lookup)(identity)
    }
}
