//! Ticket signing secret.
//!
//! The secret keys every ticket digest. It is generated once, held for the life
//! of the authenticator, and never serialized. Memory is wiped on drop.

use crate::{Result, WardenError};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// Length of a freshly generated secret in bytes.
pub const SECRET_LEN: usize = 32;

/// Shortest secret accepted from external key material.
pub const MIN_SECRET_LEN: usize = 16;

/// Keying material for ticket digests.
#[derive(Clone)]
pub struct TicketSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl TicketSecret {
    /// Generate a new secret from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; SECRET_LEN]);
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Wrap existing key material.
    ///
    /// Fails with [`WardenError::Config`] when the material is shorter than
    /// [`MIN_SECRET_LEN`]; an empty secret is a misuse, not a weak default.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.len() < MIN_SECRET_LEN {
            tracing::warn!(len = bytes.len(), "rejecting short ticket secret");
            return Err(WardenError::config(format!(
                "ticket secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Decode hex key material (e.g. from `WARDEN_SECRET_HEX`).
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| WardenError::config(format!("ticket secret is not valid hex: {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Raw key bytes for the keyed hash.
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of key bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed secret; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for TicketSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
