//! Warden Testing Infrastructure
//!
//! Deterministic clocks, canned group lookups, fixture secrets and rule sets,
//! and proptest strategies shared by the Warden crates' test suites.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! warden-testkit = { path = "../warden-testkit" }
//! ```
//!
//! ```rust,no_run
//! use warden_core::ClockSource;
//! use warden_testkit::*;
//!
//! let clock = ManualClock::at(1_000);
//! clock.advance(30);
//! assert_eq!(clock.now_secs(), 1_030);
//! ```

pub mod fixtures;
pub mod mocks;
pub mod strategies;
pub mod time;

pub use fixtures::*;
pub use mocks::*;
pub use time::ManualClock;
