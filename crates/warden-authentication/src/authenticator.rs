//! Ticket issue / verify / revoke.
//!
//! All operations take `now` explicitly and touch no shared mutable state, so a
//! single authenticator can serve any number of concurrent requests by shared
//! reference.
//!
//! Verification never tells the caller *why* a ticket was refused. Every
//! failure (malformed, tampered, expired, replayed from another address)
//! collapses to `None`; the reason is only visible in `debug` logs.

use crate::address::normalize_client_address;
use crate::codec::{Ticket, TicketCodec};
use crate::signer::TicketSigner;
use crate::store::TicketStore;
use tracing::debug;
use warden_core::{Result, TicketConfig, TicketSecret, WardenError};

/// Reject identities that cannot be issued a ticket.
pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.is_empty() {
        return Err(WardenError::invalid_identity("identity must not be empty"));
    }
    Ok(())
}

/// Why a blob was refused. Internal only; surfaced through logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Malformed,
    Digest,
    Expired,
    Address,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Rejection::Malformed => "malformed",
            Rejection::Digest => "digest mismatch",
            Rejection::Expired => "expired",
            Rejection::Address => "client address mismatch",
        }
    }
}

/// Issues and verifies signed identity tickets.
#[derive(Debug, Clone)]
pub struct TicketAuthenticator {
    signer: TicketSigner,
    max_age_secs: u64,
    bind_client_address: bool,
}

impl TicketAuthenticator {
    /// Build an authenticator from the process secret and ticket settings.
    pub fn new(secret: &TicketSecret, config: &TicketConfig) -> Result<Self> {
        Ok(Self {
            signer: TicketSigner::new(secret)?,
            max_age_secs: config.max_age_secs,
            bind_client_address: config.bind_client_address,
        })
    }

    /// Ticket lifetime in seconds.
    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Whether tickets are bound to the client address.
    pub fn binds_client_address(&self) -> bool {
        self.bind_client_address
    }

    /// Build a signed ticket for `identity`, valid through `now + max_age`.
    pub fn issue_ticket(
        &self,
        identity: &str,
        now: u64,
        client_address: Option<&str>,
    ) -> Result<Ticket> {
        validate_identity(identity)?;

        let expiry = now.saturating_add(self.max_age_secs);
        let client_tag = self.client_tag(client_address);
        let digest = self.signer.sign(identity, expiry, &client_tag);

        Ok(Ticket {
            identity: identity.to_string(),
            expiry,
            client_tag,
            digest,
        })
    }

    /// Issue a ticket and encode it as a blob for the store adapter.
    pub fn issue(&self, identity: &str, now: u64, client_address: Option<&str>) -> Result<String> {
        let ticket = self.issue_ticket(identity, now, client_address)?;
        Ok(TicketCodec::encode(&ticket))
    }

    /// Verify a blob and return the full ticket when it is acceptable.
    pub fn verify_ticket(&self, blob: &str, now: u64, client_address: Option<&str>) -> Option<Ticket> {
        match self.check(blob, now, client_address) {
            Ok(ticket) => Some(ticket),
            Err(rejection) => {
                debug!(reason = rejection.as_str(), "ticket rejected");
                None
            }
        }
    }

    /// Verify a blob and return the identity it asserts, or `None`.
    pub fn verify(&self, blob: &str, now: u64, client_address: Option<&str>) -> Option<String> {
        self.verify_ticket(blob, now, client_address)
            .map(|ticket| ticket.identity)
    }

    /// Ask the store adapter to drop its blob. Idempotent.
    pub fn revoke<S: TicketStore + ?Sized>(&self, store: &mut S) {
        store.clear();
    }

    /// Unix seconds at which `ticket` was issued.
    pub fn issued_at(&self, ticket: &Ticket) -> u64 {
        ticket.expiry.saturating_sub(self.max_age_secs)
    }

    /// Whether `ticket` is older than `reissue_after_secs` at `now`.
    pub fn needs_reissue(&self, ticket: &Ticket, now: u64, reissue_after_secs: u64) -> bool {
        now.saturating_sub(self.issued_at(ticket)) > reissue_after_secs
    }

    fn client_tag(&self, client_address: Option<&str>) -> String {
        if self.bind_client_address {
            normalize_client_address(client_address)
        } else {
            String::new()
        }
    }

    fn check(
        &self,
        blob: &str,
        now: u64,
        client_address: Option<&str>,
    ) -> std::result::Result<Ticket, Rejection> {
        let ticket = TicketCodec::decode(blob).map_err(|err| {
            debug!(error = %err, "ticket decode failed");
            Rejection::Malformed
        })?;

        if !self.signer.verify_digest(
            &ticket.identity,
            ticket.expiry,
            &ticket.client_tag,
            &ticket.digest,
        ) {
            return Err(Rejection::Digest);
        }

        if now > ticket.expiry {
            return Err(Rejection::Expired);
        }

        // With binding off the stored tag is ignored entirely
        if self.bind_client_address && self.client_tag(client_address) != ticket.client_tag {
            return Err(Rejection::Address);
        }

        Ok(ticket)
    }
}
