//! Request lifecycle: remember, verify, re-issue, forget

use assert_matches::assert_matches;
use warden_authentication::{
    AuthenticationPolicy, MemoryTicketStore, RequestAuth, SessionRecord, SessionTicketStore,
    TicketPolicy, TicketStore,
};
use warden_core::{TicketConfig, WardenError};
use warden_testkit::{test_secret, ManualClock};

fn policy(clock: &ManualClock, reissue_after_secs: Option<u64>) -> TicketPolicy<ManualClock> {
    let config = TicketConfig {
        max_age_secs: 100,
        reissue_after_secs,
        ..TicketConfig::default()
    };
    TicketPolicy::new(&test_secret(3), &config, clock.clone()).unwrap()
}

fn login(policy: &TicketPolicy<ManualClock>, identity: &str) -> MemoryTicketStore {
    let mut request = RequestAuth::new(policy, MemoryTicketStore::new(), None);
    request.remember(identity).unwrap();
    request.finish(200).unwrap()
}

#[test]
fn remembered_identity_is_seen_by_the_next_request() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, None);
    let store = login(&policy, "alice");
    assert_eq!(store.max_age_secs(), Some(100));

    clock.advance(50);
    let mut request = RequestAuth::new(&policy, store, None);
    assert_eq!(request.identity(), Some("alice"));
}

#[test]
fn expired_ticket_yields_anonymous() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, None);
    let store = login(&policy, "alice");

    clock.set(1_100);
    assert_eq!(policy.get(&store, None).as_deref(), Some("alice"));
    clock.set(1_101);
    assert_eq!(policy.get(&store, None), None);
}

#[test]
fn ageing_ticket_is_reissued() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, Some(10));
    let store = login(&policy, "alice");
    let first = store.get().unwrap();

    // Young ticket: untouched.
    clock.advance(5);
    let mut request = RequestAuth::new(&policy, store, None);
    assert_eq!(request.identity(), Some("alice"));
    let store = request.finish(200).unwrap();
    assert_eq!(store.get().as_deref(), Some(first.as_str()));

    // Older than the threshold: replaced with a later expiry.
    clock.advance(10);
    let mut request = RequestAuth::new(&policy, store, None);
    assert_eq!(request.identity(), Some("alice"));
    let store = request.finish(204).unwrap();
    let second = store.get().unwrap();
    assert_ne!(second, first);

    clock.set(1_110);
    assert_eq!(policy.get(&store, None).as_deref(), Some("alice"));
}

#[test]
fn error_responses_do_not_reissue() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, Some(10));
    let store = login(&policy, "alice");
    let writes = store.writes();

    clock.advance(50);
    let mut request = RequestAuth::new(&policy, store, None);
    assert_eq!(request.identity(), Some("alice"));
    let store = request.finish(500).unwrap();
    assert_eq!(store.writes(), writes);
}

#[test]
fn unread_identity_is_not_reissued() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, Some(10));
    let store = login(&policy, "alice");
    let writes = store.writes();

    clock.advance(50);
    let request = RequestAuth::new(&policy, store, None);
    let store = request.finish(200).unwrap();
    assert_eq!(store.writes(), writes);
}

#[test]
fn forget_clears_and_is_idempotent() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, None);
    let store = login(&policy, "alice");

    let mut request = RequestAuth::new(&policy, store, None);
    request.forget();
    request.forget();
    assert_eq!(request.identity(), None);
    let store = request.finish(200).unwrap();
    assert_eq!(store.get(), None);

    let mut request = RequestAuth::new(&policy, store, None);
    request.forget();
    let store = request.finish(200).unwrap();
    assert_eq!(store.get(), None);
}

#[test]
fn empty_identity_is_rejected_at_remember() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, None);
    let mut request = RequestAuth::new(&policy, MemoryTicketStore::new(), None);
    assert_matches!(
        request.remember(""),
        Err(WardenError::InvalidIdentity { .. })
    );
    let store = request.finish(200).unwrap();
    assert_eq!(store.writes(), 0);
}

#[test]
fn session_store_round_trip() {
    let clock = ManualClock::at(1_000);
    let config = TicketConfig::default();
    let policy = TicketPolicy::new(&test_secret(3), &config, clock.clone()).unwrap();
    let session = SessionRecord::new();

    let mut request = RequestAuth::new(
        &policy,
        SessionTicketStore::new(session.clone(), config.ticket_name.clone()),
        None,
    );
    request.remember("carol").unwrap();
    request.finish(200).unwrap();
    assert!(session.contains_key(&config.ticket_name));

    let mut request = RequestAuth::new(
        &policy,
        SessionTicketStore::new(session.clone(), config.ticket_name.clone()),
        None,
    );
    assert_eq!(request.identity(), Some("carol"));
    request.forget();
    request.finish(200).unwrap();
    assert!(!session.contains_key(&config.ticket_name));
}

#[test]
fn bound_ticket_requires_same_address() {
    let clock = ManualClock::at(1_000);
    let config = TicketConfig {
        bind_client_address: true,
        ..TicketConfig::default()
    };
    let policy = TicketPolicy::new(&test_secret(3), &config, clock.clone()).unwrap();

    let mut request = RequestAuth::new(&policy, MemoryTicketStore::new(), Some("192.0.2.7"));
    request.remember("dave").unwrap();
    let store = request.finish(200).unwrap();

    assert_eq!(policy.get(&store, Some("192.0.2.7")).as_deref(), Some("dave"));
    assert_eq!(policy.get(&store, Some("::ffff:192.0.2.7")).as_deref(), Some("dave"));
    assert_eq!(policy.get(&store, Some("192.0.2.8")), None);
    assert_eq!(policy.get(&store, None), None);
}

#[test]
fn policy_is_usable_as_trait_object() {
    let clock = ManualClock::at(1_000);
    let policy = policy(&clock, None);
    let dynamic: &dyn AuthenticationPolicy = &policy;

    let mut request = RequestAuth::new(dynamic, MemoryTicketStore::new(), None);
    request.remember("erin").unwrap();
    let store = request.finish(200).unwrap();
    assert_eq!(dynamic.get(&store, None).as_deref(), Some("erin"));
}
