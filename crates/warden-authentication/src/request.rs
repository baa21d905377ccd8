//! Per-request authentication state.
//!
//! A [`RequestAuth`] wraps one request's [`TicketStore`]. The identity is
//! verified at most once and cached. `remember` / `forget` only record intent;
//! [`RequestAuth::finish`] applies it once the response status is known, and
//! re-issues an ageing ticket when nothing else was requested.

use crate::authenticator::validate_identity;
use crate::policy::AuthenticationPolicy;
use crate::store::TicketStore;
use tracing::trace;
use warden_core::Result;

/// Store write requested during the request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Nothing,
    Remember(String),
    Forget,
}

/// Authentication state for a single request.
pub struct RequestAuth<'p, P: ?Sized, S> {
    policy: &'p P,
    store: S,
    client_address: Option<String>,
    identity: Option<Option<String>>,
    pending: Pending,
}

impl<'p, P, S> RequestAuth<'p, P, S>
where
    P: AuthenticationPolicy + ?Sized,
    S: TicketStore,
{
    /// Start a request with the incoming store contents.
    pub fn new(policy: &'p P, store: S, client_address: Option<&str>) -> Self {
        Self {
            policy,
            store,
            client_address: client_address.map(str::to_string),
            identity: None,
            pending: Pending::Nothing,
        }
    }

    /// Authenticated identity for this request, verified on first use.
    pub fn identity(&mut self) -> Option<&str> {
        if self.identity.is_none() {
            let verified = self
                .policy
                .get(&self.store, self.client_address.as_deref());
            trace!(authenticated = verified.is_some(), "resolved request identity");
            self.identity = Some(verified);
        }
        self.identity.as_ref().and_then(|id| id.as_deref())
    }

    /// Remember `identity` for subsequent requests.
    ///
    /// The identity is validated now so misuse surfaces at the call site; the
    /// store is written in [`RequestAuth::finish`].
    pub fn remember(&mut self, identity: &str) -> Result<()> {
        validate_identity(identity)?;
        self.identity = Some(Some(identity.to_string()));
        self.pending = Pending::Remember(identity.to_string());
        Ok(())
    }

    /// Forget the caller. Calling it again changes nothing.
    pub fn forget(&mut self) {
        self.identity = Some(None);
        self.pending = Pending::Forget;
    }

    /// Apply the pending store write and hand the store back.
    ///
    /// Without an explicit remember/forget, a ticket that was read during the
    /// request is re-issued when due, but only for responses below 400.
    pub fn finish(mut self, status: u16) -> Result<S> {
        let address = self.client_address.as_deref();
        match std::mem::replace(&mut self.pending, Pending::Nothing) {
            Pending::Remember(identity) => {
                self.policy.remember(&mut self.store, &identity, address)?;
            }
            Pending::Forget => self.policy.forget(&mut self.store),
            Pending::Nothing => {
                let authenticated = matches!(self.identity, Some(Some(_)));
                if authenticated && status < 400 {
                    self.policy.refresh(&mut self.store, address)?;
                }
            }
        }
        Ok(self.store)
    }

    /// The wrapped store, without applying pending writes
    pub fn store(&self) -> &S {
        &self.store
    }
}
