//! Warden configuration.
//!
//! Configuration is resolved in three layers: built-in defaults, a TOML file,
//! then `WARDEN_*` environment overrides. The result is validated before use.
//! The ticket secret is intentionally not part of this structure.

mod validation;

pub use validation::{ConfigValidator, ValidationError, ValidationResult};

use crate::{Result, WardenError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides of the `[ticket]` section.
pub const TICKET_ENV_PREFIX: &str = "WARDEN_TICKET_";

/// Default ticket lifetime in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Default store key for the ticket blob.
pub const DEFAULT_TICKET_NAME: &str = "warden_ticket";

/// Ticket issuance and verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TicketConfig {
    /// Ticket lifetime; zero makes a ticket valid only at its issue instant.
    pub max_age_secs: u64,
    /// Re-issue an authenticated ticket once it is older than this.
    pub reissue_after_secs: Option<u64>,
    /// Bind tickets to the normalized client address they were issued to.
    pub bind_client_address: bool,
    /// Key under which a session store keeps the blob.
    pub ticket_name: String,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            reissue_after_secs: None,
            bind_client_address: false,
            ticket_name: DEFAULT_TICKET_NAME.to_string(),
        }
    }
}

impl TicketConfig {
    /// Validate the ticket section
    pub fn validate(&self) -> Result<()> {
        let mut validator = ConfigValidator::for_section("ticket");
        validator
            .non_empty("ticket_name", &self.ticket_name)
            .at_most("reissue_after_secs", self.reissue_after_secs, self.max_age_secs);
        validator.result().map_err(|err| {
            tracing::warn!(error = %err, "invalid ticket configuration");
            WardenError::from(err)
        })
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "MAX_AGE_SECS" => self.max_age_secs = parse_u64(key, value)?,
            "REISSUE_AFTER_SECS" => {
                self.reissue_after_secs = if value.is_empty() {
                    None
                } else {
                    Some(parse_u64(key, value)?)
                };
            }
            "BIND_CLIENT_ADDRESS" => self.bind_client_address = parse_bool(key, value)?,
            "NAME" => self.ticket_name = value.to_string(),
            _ => {
                return Err(WardenError::config(format!(
                    "unknown ticket setting {TICKET_ENV_PREFIX}{key}"
                )))
            }
        }
        Ok(())
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WardenConfig {
    /// `[ticket]` section
    pub ticket: TicketConfig,
}

impl WardenConfig {
    /// Parse a TOML document; missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WardenConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WardenError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `WARDEN_TICKET_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from an explicit variable list.
    ///
    /// Variables outside the `WARDEN_TICKET_` namespace are ignored; unknown
    /// keys inside it are rejected so typos do not pass silently.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            if let Some(setting) = key.as_ref().strip_prefix(TICKET_ENV_PREFIX) {
                self.ticket.set_from_string(setting, value.as_ref())?;
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.ticket.validate()
    }

    /// Defaults, then optional file, then environment, then validation.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| WardenError::config(format!("{TICKET_ENV_PREFIX}{key}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WardenError::config(format!(
            "{TICKET_ENV_PREFIX}{key}: expected a boolean, got '{other}'"
        ))),
    }
}
