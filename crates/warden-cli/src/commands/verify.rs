//! `warden verify`

use super::common;
use anyhow::Result;
use clap::Args;
use warden_core::{TicketSecret, WardenConfig};

/// Arguments for `warden verify`
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Ticket blob
    #[arg(short, long)]
    pub ticket: String,

    /// Client address the request came from
    #[arg(short, long)]
    pub address: Option<String>,

    /// Verification instant in Unix seconds (defaults to now)
    #[arg(long)]
    pub now: Option<u64>,
}

/// Verify a ticket; `None` when it is rejected.
pub fn run(config: &WardenConfig, secret: &TicketSecret, args: &VerifyArgs) -> Result<Option<String>> {
    let authenticator = common::authenticator(config, secret)?;
    let now = common::now_or_clock(args.now);
    Ok(authenticator.verify(&args.ticket, now, args.address.as_deref()))
}
