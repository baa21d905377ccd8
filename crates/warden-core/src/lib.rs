//! Warden Core - shared foundation
//!
//! Types every other Warden crate builds on. Nothing here performs I/O on the
//! request path; the clock and the secret are the only ambient inputs and both
//! are passed in explicitly.
//!
//! - [`WardenError`]: the single error taxonomy for authentication and
//!   authorization outcomes
//! - [`ClockSource`]: wall-clock seconds for ticket expiry
//! - [`TicketSecret`]: the process-wide keying material for ticket digests
//! - [`config`]: TOML/env configuration with validation

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// Clock abstraction for expiry checks
pub mod time;

/// Ticket signing secret
pub mod secret;

/// Configuration loading and validation
pub mod config;

pub use config::{TicketConfig, WardenConfig};
pub use errors::{Result, WardenError};
pub use secret::{TicketSecret, MIN_SECRET_LEN, SECRET_LEN};
pub use time::{ClockSource, SystemClock};
