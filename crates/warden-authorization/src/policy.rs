//! Pluggable authorization.
//!
//! Anything that can answer `permit(identity, permission, context)` is an
//! [`AuthorizationPolicy`]. [`AclPolicy`] is the stock implementation: it
//! looks the caller's groups up, resolves them and evaluates an
//! [`AclRuleSet`].

use crate::acl::{resolve, AclRuleSet, GroupSet};
use crate::groups::GroupsProvider;
use async_trait::async_trait;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};
use warden_core::{Result, WardenError};

/// Decides whether `identity` may exercise `permission`.
///
/// `context` is policy specific; for [`AclPolicy`] it is a rule set that
/// replaces the policy's global one for this call.
#[async_trait]
pub trait AuthorizationPolicy<Q: ?Sized + Sync>: Send + Sync {
    /// Per-call evaluation context
    type Context: Send + Sync;

    /// `Ok(true)` grants, `Ok(false)` refuses; `Err` means no decision could
    /// be made.
    async fn permit(
        &self,
        identity: Option<&str>,
        permission: &Q,
        context: Option<&Self::Context>,
    ) -> Result<bool>;
}

#[async_trait]
impl<Q, T> AuthorizationPolicy<Q> for Arc<T>
where
    Q: ?Sized + Sync,
    T: AuthorizationPolicy<Q> + ?Sized,
{
    type Context = T::Context;

    async fn permit(
        &self,
        identity: Option<&str>,
        permission: &Q,
        context: Option<&Self::Context>,
    ) -> Result<bool> {
        (**self).permit(identity, permission, context).await
    }
}

/// ACL-backed authorization policy.
pub struct AclPolicy<S, G, P> {
    groups: S,
    context: Option<Arc<AclRuleSet<G, P>>>,
    _groups: PhantomData<fn() -> G>,
}

impl<S, G, P> AclPolicy<S, G, P>
where
    S: GroupsProvider<G>,
    G: Eq + Hash,
    P: Eq + Hash,
{
    /// Policy without a global rule set; every call must pass one.
    pub fn new(groups: S) -> Self {
        Self {
            groups,
            context: None,
            _groups: PhantomData,
        }
    }

    /// Install a global rule set used when a call passes none.
    pub fn with_context(mut self, rules: impl Into<Arc<AclRuleSet<G, P>>>) -> Self {
        self.context = Some(rules.into());
        self
    }

    /// Global rule set, if any
    pub fn context(&self) -> Option<&AclRuleSet<G, P>> {
        self.context.as_deref()
    }

    /// Fetch and resolve the groups of `identity`.
    ///
    /// `Ok(None)` is the deny-all sentinel. Lookup failures surface as
    /// [`WardenError::GroupLookup`].
    pub async fn user_groups(&self, identity: Option<&str>) -> Result<Option<GroupSet<G>>> {
        let raw = self
            .groups
            .fetch_groups(identity)
            .await
            .map_err(|err| match err {
                WardenError::GroupLookup { .. } => err,
                other => WardenError::group_lookup(other.to_string()),
            })?;
        Ok(resolve(identity, raw))
    }
}

impl<S, G, P> fmt::Debug for AclPolicy<S, G, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AclPolicy")
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S, G, P, Q> AuthorizationPolicy<Q> for AclPolicy<S, G, P>
where
    S: GroupsProvider<G>,
    G: Eq + Hash + Send + Sync + 'static,
    P: Eq + Hash + Borrow<Q> + Send + Sync,
    Q: Hash + Eq + ?Sized + Sync,
{
    type Context = AclRuleSet<G, P>;

    async fn permit(
        &self,
        identity: Option<&str>,
        permission: &Q,
        context: Option<&Self::Context>,
    ) -> Result<bool> {
        let Some(rules) = context.or(self.context.as_deref()) else {
            warn!("ACL permit called without a rule set");
            return Err(WardenError::runtime_configuration(
                "context should be specified globally through the ACL policy or passed to permit",
            ));
        };

        let groups = self.user_groups(identity).await?;
        if groups.is_none() {
            debug!(authenticated = identity.is_some(), "caller denied by group lookup");
        }
        Ok(rules.evaluate(groups.as_ref(), permission))
    }
}
