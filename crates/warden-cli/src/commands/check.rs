//! `warden check`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use warden_authorization::{AclPolicy, AclRuleSet, AuthorizationPolicy, FnGroups};

/// Arguments for `warden check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// TOML file of `[[rule]]` tables
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Permission to evaluate
    #[arg(short, long)]
    pub permission: String,

    /// Authenticated identity; omit for an anonymous caller
    #[arg(short, long)]
    pub identity: Option<String>,

    /// Application group of the caller (repeatable)
    #[arg(short, long = "group")]
    pub groups: Vec<String>,

    /// Deny the caller regardless of the rules
    #[arg(long, conflicts_with = "groups")]
    pub forbidden: bool,
}

/// Evaluate the permission; return `allow` or `deny`.
pub async fn run(args: &CheckArgs) -> Result<String> {
    let rules = AclRuleSet::load_from_file(&args.rules)
        .with_context(|| format!("failed to load rules from {}", args.rules.display()))?;

    let groups = (!args.forbidden).then(|| args.groups.clone());
    let lookup = FnGroups::new(move |_: Option<&str>| -> warden_core::Result<Option<Vec<String>>> {
        Ok(groups.clone())
    });
    let policy = AclPolicy::new(lookup).with_context(rules);

    let granted = policy
        .permit(args.identity.as_deref(), args.permission.as_str(), None)
        .await?;
    Ok(if granted { "allow" } else { "deny" }.to_string())
}
