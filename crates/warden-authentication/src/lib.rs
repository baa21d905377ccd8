//! Warden Authentication
//!
//! Remembers a caller's identity across requests with a signed, expiring
//! ticket. The ticket adds integrity, not confidentiality: anyone holding the
//! blob can read the identity, nobody without the secret can forge or alter it.
//!
//! Layering, leaves first:
//! - [`codec`]: ticket <-> delimited text blob
//! - [`signer`]: keyed digest over the ticket fields
//! - [`authenticator`]: issue / verify / revoke against a clock value
//! - [`store`]: the blob store collaborators (session record, in-memory slot)
//! - [`policy`]: pluggable authentication policy, ticket-backed by default
//! - [`request`]: per-request state with deferred remember/forget and re-issue

#![forbid(unsafe_code)]

pub mod address;
pub mod authenticator;
pub mod codec;
pub mod policy;
pub mod request;
pub mod signer;
pub mod store;

pub use address::normalize_client_address;
pub use authenticator::{validate_identity, TicketAuthenticator};
pub use codec::{DecodeError, Ticket, TicketCodec, TICKET_DELIMITER};
pub use policy::{AuthenticationPolicy, TicketPolicy};
pub use request::RequestAuth;
pub use signer::{Digest, TicketSigner, DIGEST_LEN};
pub use store::{MemoryTicketStore, SessionRecord, SessionTicketStore, TicketStore};
