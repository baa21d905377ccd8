//! Fixture secrets, configurations and rule sets

use warden_authorization::{AclRuleSet, Group};
use warden_core::{TicketConfig, TicketSecret};

/// Deterministic 32-byte secret derived from `seed`.
pub fn test_secret(seed: u8) -> TicketSecret {
    let bytes: Vec<u8> = (0..32u8).map(|i| i.wrapping_mul(31).wrapping_add(seed)).collect();
    TicketSecret::from_bytes(bytes).expect("fixture secret is long enough")
}

/// Ticket configuration with the given lifetime and no reissue.
pub fn test_config(max_age_secs: u64) -> TicketConfig {
    TicketConfig {
        max_age_secs,
        ..TicketConfig::default()
    }
}

/// The view / view_extra / edit rule set used throughout the docs.
///
/// ```text
/// 0: Allow  Everyone           {view}
/// 1: Deny   super_user         {view_extra}
/// 2: Allow  AuthenticatedUser  {view, view_extra}
/// 3: Allow  edit_group         {view, view_extra, edit}
/// ```
pub fn editorial_rules() -> AclRuleSet<String, String> {
    AclRuleSet::builder()
        .allow(Group::Everyone, ["view"])
        .deny(Group::named("super_user"), ["view_extra"])
        .allow(Group::AuthenticatedUser, ["view", "view_extra"])
        .allow(Group::named("edit_group"), ["view", "view_extra", "edit"])
        .build()
}
