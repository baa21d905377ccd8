//! Property test strategies for Warden types

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use warden_authorization::{AclRule, AclRuleSet, Effect, Group};

/// Non-empty identities, including the ticket delimiter and non-ASCII text.
pub fn arb_identity() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_.@-]{0,24}",
        "\\PC{1,16}",
        "[a-z]{1,6}![a-z]{1,6}",
    ]
}

/// Client addresses in the forms tickets are bound to.
pub fn arb_client_address() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        any::<[u8; 4]>().prop_map(|o| Some(format!("{}.{}.{}.{}", o[0], o[1], o[2], o[3]))),
        any::<std::net::Ipv6Addr>().prop_map(|ip| Some(ip.to_string())),
    ]
}

/// Expiry instants well clear of overflow.
pub fn arb_instant() -> impl Strategy<Value = u64> {
    0u64..4_000_000_000
}

fn arb_group() -> impl Strategy<Value = Group<String>> {
    prop_oneof![
        Just(Group::Everyone),
        Just(Group::AuthenticatedUser),
        "g[0-3]".prop_map(Group::Named),
    ]
}

/// Permission names drawn from a small alphabet so rules overlap.
pub fn arb_permission() -> impl Strategy<Value = String> {
    "p[0-3]"
}

/// Small rule sets over the `g0..g3` / `p0..p3` alphabet.
pub fn arb_rule_set() -> impl Strategy<Value = AclRuleSet<String, String>> {
    let rule = (
        prop_oneof![Just(Effect::Allow), Just(Effect::Deny)],
        arb_group(),
        prop::collection::vec(arb_permission(), 0..4),
    )
        .prop_map(|(effect, group, permissions)| AclRule::new(effect, group, permissions));
    prop::collection::vec(rule, 0..8).prop_map(AclRuleSet::new)
}

/// Application group lists, or the deny-all sentinel.
pub fn arb_raw_groups() -> impl Strategy<Value = Option<Vec<String>>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::collection::vec("g[0-3]", 0..4).prop_map(Some),
    ]
}
