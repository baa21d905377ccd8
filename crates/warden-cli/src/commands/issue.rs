//! `warden issue`

use super::common;
use anyhow::Result;
use clap::Args;
use warden_core::{TicketSecret, WardenConfig};

/// Arguments for `warden issue`
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Identity to assert
    #[arg(short, long)]
    pub identity: String,

    /// Client address to bind the ticket to
    #[arg(short, long)]
    pub address: Option<String>,

    /// Issue instant in Unix seconds (defaults to now)
    #[arg(long)]
    pub now: Option<u64>,
}

/// Issue a ticket and return the blob.
pub fn run(config: &WardenConfig, secret: &TicketSecret, args: &IssueArgs) -> Result<String> {
    let authenticator = common::authenticator(config, secret)?;
    let now = common::now_or_clock(args.now);
    let blob = authenticator.issue(&args.identity, now, args.address.as_deref())?;
    tracing::debug!(identity = %args.identity, now, "issued ticket");
    Ok(blob)
}
