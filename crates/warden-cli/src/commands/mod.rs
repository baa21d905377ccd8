//! Subcommand implementations. Each returns the line to print.

pub mod check;
pub mod common;
pub mod issue;
pub mod verify;
