//! Ticket digest: HMAC-SHA256 keyed with the [`TicketSecret`].
//!
//! The MAC input is a domain tag followed by each field in fixed order, with
//! variable-length fields length-prefixed so that `("alice", 100)` and
//! `("alice1", 00)` can never produce the same input.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use warden_core::{Result, TicketSecret, WardenError};

type HmacSha256 = Hmac<Sha256>;

/// Digest length in bytes (SHA-256 output).
pub const DIGEST_LEN: usize = 32;

/// Fixed-length keyed digest.
pub type Digest = [u8; DIGEST_LEN];

const DOMAIN_TAG: &[u8] = b"warden.ticket.v1";

/// Computes and checks ticket digests.
#[derive(Clone)]
pub struct TicketSigner {
    keyed: HmacSha256,
}

impl TicketSigner {
    /// Key a signer with the process secret.
    pub fn new(secret: &TicketSecret) -> Result<Self> {
        let keyed = HmacSha256::new_from_slice(secret.expose())
            .map_err(|e| WardenError::crypto(format!("HMAC key setup failed: {e}")))?;
        Ok(Self { keyed })
    }

    /// Digest over `(identity, expiry, client_tag)`.
    pub fn sign(&self, identity: &str, expiry: u64, client_tag: &str) -> Digest {
        let mut mac = self.keyed.clone();
        mac.update(DOMAIN_TAG);
        update_prefixed(&mut mac, identity.as_bytes());
        mac.update(&expiry.to_be_bytes());
        update_prefixed(&mut mac, client_tag.as_bytes());
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&mac.finalize().into_bytes());
        digest
    }

    /// Constant-time check of `candidate` against the expected digest.
    pub fn verify_digest(
        &self,
        identity: &str,
        expiry: u64,
        client_tag: &str,
        candidate: &[u8],
    ) -> bool {
        let expected = self.sign(identity, expiry, client_tag);
        if candidate.len() != expected.len() {
            return false;
        }
        expected[..].ct_eq(candidate).into()
    }
}

impl fmt::Debug for TicketSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TicketSigner { .. }")
    }
}

fn update_prefixed(mac: &mut HmacSha256, field: &[u8]) {
    mac.update(&(field.len() as u64).to_be_bytes());
    mac.update(field);
}
