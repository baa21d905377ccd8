//! Ticket wire format.
//!
//! A blob is four `!`-separated fields in fixed order:
//!
//! ```text
//! base64url(identity) ! expiry ! base64url(client_tag) ! hex(digest)
//! ```
//!
//! Identity and client tag are base64url (no padding) so they can never carry
//! the delimiter. Expiry is decimal Unix seconds. The digest is lower-case hex
//! of exactly [`DIGEST_LEN`] bytes.

use crate::signer::{Digest, DIGEST_LEN};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Field separator; outside the base64url and hex alphabets.
pub const TICKET_DELIMITER: char = '!';

const FIELD_COUNT: usize = 4;

/// Malformed ticket blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Wrong number of delimited fields
    #[error("expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { found: usize },

    /// Expiry field is not an unsigned decimal integer
    #[error("expiry is not a decimal timestamp")]
    Expiry,

    /// Digest field has the wrong length
    #[error("digest must be {expected} hex characters, found {found}")]
    DigestLength { expected: usize, found: usize },

    /// A field is not valid base64url / hex / UTF-8
    #[error("{field} is not validly encoded")]
    Encoding { field: &'static str },
}

/// One issued identity assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Authenticated principal
    pub identity: String,
    /// Unix seconds after which the ticket is no longer valid
    pub expiry: u64,
    /// Normalized client address, empty when address binding is off
    pub client_tag: String,
    /// Keyed digest over the other three fields
    pub digest: Digest,
}

/// Stateless encoder/decoder for [`Ticket`] blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketCodec;

impl TicketCodec {
    /// Serialize a ticket into its blob form.
    pub fn encode(ticket: &Ticket) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            URL_SAFE_NO_PAD.encode(ticket.identity.as_bytes()),
            ticket.expiry,
            URL_SAFE_NO_PAD.encode(ticket.client_tag.as_bytes()),
            hex::encode(ticket.digest),
            d = TICKET_DELIMITER,
        )
    }

    /// Parse a blob produced by [`TicketCodec::encode`].
    ///
    /// Decoding checks structure only; the digest is not verified here.
    pub fn decode(blob: &str) -> Result<Ticket, DecodeError> {
        let fields: Vec<&str> = blob.split(TICKET_DELIMITER).collect();
        let [identity, expiry, client_tag, digest] = fields.as_slice() else {
            return Err(DecodeError::FieldCount {
                found: fields.len(),
            });
        };

        Ok(Ticket {
            identity: decode_text(identity, "identity")?,
            expiry: decode_expiry(expiry)?,
            client_tag: decode_text(client_tag, "client tag")?,
            digest: decode_digest(digest)?,
        })
    }
}

fn decode_text(field: &str, name: &'static str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(field)
        .map_err(|_| DecodeError::Encoding { field: name })?;
    String::from_utf8(bytes).map_err(|_| DecodeError::Encoding { field: name })
}

fn decode_expiry(field: &str) -> Result<u64, DecodeError> {
    // one spelling per timestamp: no sign, no leading zeros
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::Expiry);
    }
    if field.len() > 1 && field.starts_with('0') {
        return Err(DecodeError::Expiry);
    }
    field.parse().map_err(|_| DecodeError::Expiry)
}

fn decode_digest(field: &str) -> Result<Digest, DecodeError> {
    if field.len() != DIGEST_LEN * 2 {
        return Err(DecodeError::DigestLength {
            expected: DIGEST_LEN * 2,
            found: field.len(),
        });
    }
    // hex accepts upper case too; only the encoder's lower-case form is valid
    if !field.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(DecodeError::Encoding { field: "digest" });
    }
    let mut digest = [0u8; DIGEST_LEN];
    hex::decode_to_slice(field, &mut digest)
        .map_err(|_| DecodeError::Encoding { field: "digest" })?;
    Ok(digest)
}
