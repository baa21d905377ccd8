//! Pluggable authentication policy.
//!
//! A policy answers three questions against a [`TicketStore`]: who is the
//! caller, remember this caller, forget the caller. [`TicketPolicy`] is the
//! signed-ticket implementation; other schemes implement the same trait.

use crate::authenticator::TicketAuthenticator;
use crate::store::TicketStore;
use tracing::debug;
use warden_core::{ClockSource, Result, TicketConfig, TicketSecret};

/// Authentication capability consumed by [`crate::RequestAuth`].
pub trait AuthenticationPolicy: Send + Sync {
    /// Identity asserted by the store's blob, if any.
    fn get(&self, store: &dyn TicketStore, client_address: Option<&str>) -> Option<String>;

    /// Persist a fresh assertion for `identity`.
    fn remember(
        &self,
        store: &mut dyn TicketStore,
        identity: &str,
        client_address: Option<&str>,
    ) -> Result<()>;

    /// Drop whatever assertion the store holds.
    fn forget(&self, store: &mut dyn TicketStore);

    /// Refresh the stored assertion of an authenticated caller if it is due.
    /// Returns whether the store was rewritten.
    fn refresh(&self, _store: &mut dyn TicketStore, _client_address: Option<&str>) -> Result<bool> {
        Ok(false)
    }
}

/// Signed-ticket authentication over any clock.
#[derive(Debug, Clone)]
pub struct TicketPolicy<C> {
    authenticator: TicketAuthenticator,
    reissue_after_secs: Option<u64>,
    clock: C,
}

impl<C: ClockSource> TicketPolicy<C> {
    /// Build from configuration; the secret keys the signer.
    pub fn new(secret: &TicketSecret, config: &TicketConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            authenticator: TicketAuthenticator::new(secret, config)?,
            reissue_after_secs: config.reissue_after_secs,
            clock,
        })
    }

    /// The underlying authenticator
    pub fn authenticator(&self) -> &TicketAuthenticator {
        &self.authenticator
    }

    /// The clock used for issue and verify
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: ClockSource> AuthenticationPolicy for TicketPolicy<C> {
    fn get(&self, store: &dyn TicketStore, client_address: Option<&str>) -> Option<String> {
        let blob = store.get()?;
        self.authenticator
            .verify(&blob, self.clock.now_secs(), client_address)
    }

    fn remember(
        &self,
        store: &mut dyn TicketStore,
        identity: &str,
        client_address: Option<&str>,
    ) -> Result<()> {
        let blob = self
            .authenticator
            .issue(identity, self.clock.now_secs(), client_address)?;
        store.set(blob, self.authenticator.max_age_secs());
        Ok(())
    }

    fn forget(&self, store: &mut dyn TicketStore) {
        self.authenticator.revoke(store);
    }

    fn refresh(&self, store: &mut dyn TicketStore, client_address: Option<&str>) -> Result<bool> {
        let Some(reissue_after_secs) = self.reissue_after_secs else {
            return Ok(false);
        };
        let Some(blob) = store.get() else {
            return Ok(false);
        };

        let now = self.clock.now_secs();
        let Some(ticket) = self.authenticator.verify_ticket(&blob, now, client_address) else {
            return Ok(false);
        };
        if !self
            .authenticator
            .needs_reissue(&ticket, now, reissue_after_secs)
        {
            return Ok(false);
        }

        debug!(
            age_secs = now.saturating_sub(self.authenticator.issued_at(&ticket)),
            "re-issuing ticket"
        );
        let fresh = self
            .authenticator
            .issue(&ticket.identity, now, client_address)?;
        store.set(fresh, self.authenticator.max_age_secs());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTicketStore;
    use std::sync::atomic::{AtomicU64, Ordering};
    use warden_core::WardenError;

    #[derive(Debug, Default)]
    struct StepClock(AtomicU64);

    impl ClockSource for StepClock {
        fn now_secs(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn policy(reissue_after_secs: Option<u64>) -> TicketPolicy<StepClock> {
        let secret = TicketSecret::from_bytes(b"01234567890abcdef".to_vec()).unwrap();
        let config = TicketConfig {
            max_age_secs: 15,
            reissue_after_secs,
            ..TicketConfig::default()
        };
        TicketPolicy::new(&secret, &config, StepClock(AtomicU64::new(1000))).unwrap()
    }

    #[test]
    fn test_remember_get_forget() {
        let policy = policy(None);
        let mut store = MemoryTicketStore::new();

        assert!(policy.get(&store, None).is_none());
        policy.remember(&mut store, "some_user", None).unwrap();
        assert_eq!(store.max_age_secs(), Some(15));
        assert_eq!(policy.get(&store, None).as_deref(), Some("some_user"));

        policy.forget(&mut store);
        assert!(policy.get(&store, None).is_none());
    }

    #[test]
    fn test_remember_rejects_empty_identity() {
        let policy = policy(None);
        let mut store = MemoryTicketStore::new();
        let err = policy.remember(&mut store, "", None).unwrap_err();
        assert!(matches!(err, WardenError::InvalidIdentity { .. }));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let secret = TicketSecret::from_bytes(b"01234567890abcdef".to_vec()).unwrap();
        let config = TicketConfig {
            max_age_secs: 5,
            reissue_after_secs: Some(10),
            ..TicketConfig::default()
        };
        assert!(TicketPolicy::new(&secret, &config, StepClock::default()).is_err());
    }

    #[test]
    fn test_refresh_only_when_due() {
        let policy = policy(Some(5));
        let mut store = MemoryTicketStore::new();
        policy.remember(&mut store, "some_user", None).unwrap();
        let original = store.get().unwrap();

        policy.clock().0.store(1005, Ordering::SeqCst);
        assert!(!policy.refresh(&mut store, None).unwrap());
        assert_eq!(store.get().unwrap(), original);

        policy.clock().0.store(1006, Ordering::SeqCst);
        assert!(policy.refresh(&mut store, None).unwrap());
        assert_ne!(store.get().unwrap(), original);
        assert_eq!(policy.get(&store, None).as_deref(), Some("some_user"));
    }

    #[test]
    fn test_refresh_disabled_without_threshold() {
        let policy = policy(None);
        let mut store = MemoryTicketStore::new();
        policy.remember(&mut store, "some_user", None).unwrap();
        policy.clock().0.store(1014, Ordering::SeqCst);
        assert!(!policy.refresh(&mut store, None).unwrap());
    }

    #[test]
    fn test_refresh_ignores_invalid_ticket() {
        let policy = policy(Some(0));
        let mut store = MemoryTicketStore::with_blob("garbage");
        policy.clock().0.store(2000, Ordering::SeqCst);
        assert!(!policy.refresh(&mut store, None).unwrap());
        assert_eq!(store.get().as_deref(), Some("garbage"));
    }
}
