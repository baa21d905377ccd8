//! Shared command plumbing

use anyhow::{Context, Result};
use std::path::Path;
use warden_authentication::TicketAuthenticator;
use warden_core::{ClockSource, SystemClock, TicketSecret, WardenConfig};

/// Config file (or defaults) merged with `WARDEN_TICKET_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<WardenConfig> {
    WardenConfig::resolve(path).context("failed to load configuration")
}

/// Secret from `--secret-hex` / `WARDEN_SECRET_HEX`.
pub fn load_secret(secret_hex: Option<&str>) -> Result<TicketSecret> {
    let encoded = secret_hex.context("a ticket secret is required (--secret-hex or WARDEN_SECRET_HEX)")?;
    TicketSecret::from_hex(encoded).context("invalid ticket secret")
}

/// Authenticator for the configured ticket section.
pub fn authenticator(config: &WardenConfig, secret: &TicketSecret) -> Result<TicketAuthenticator> {
    Ok(TicketAuthenticator::new(secret, &config.ticket)?)
}

/// `--now` if given, the wall clock otherwise.
pub fn now_or_clock(now: Option<u64>) -> u64 {
    now.unwrap_or_else(|| SystemClock.now_secs())
}
