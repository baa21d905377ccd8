//! Warden command-line tool
//!
//! Issues and verifies tickets with a hex-encoded secret, and evaluates ACL
//! rule files against a caller description.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, issue, verify};

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Warden - signed identity tickets and ACL checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ticket secret as hex
    #[arg(long, global = true, env = "WARDEN_SECRET_HEX", hide_env_values = true)]
    secret_hex: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a ticket for an identity
    Issue(issue::IssueArgs),

    /// Verify a ticket and print the identity it asserts; exits non-zero when rejected
    Verify(verify::VerifyArgs),

    /// Evaluate a permission against an ACL rule file
    Check(check::CheckArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = match cli.command {
        Commands::Issue(args) => {
            let config = commands::common::load_config(cli.config.as_deref())?;
            let secret = commands::common::load_secret(cli.secret_hex.as_deref())?;
            issue::run(&config, &secret, &args)?
        }
        Commands::Verify(args) => {
            let config = commands::common::load_config(cli.config.as_deref())?;
            let secret = commands::common::load_secret(cli.secret_hex.as_deref())?;
            match verify::run(&config, &secret, &args)? {
                Some(identity) => identity,
                None => anyhow::bail!("ticket rejected"),
            }
        }
        Commands::Check(args) => check::run(&args).await?,
    };

    println!("{output}");
    Ok(())
}
