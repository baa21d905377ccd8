//! Ticket blob stores.
//!
//! The authenticator never decides where a blob lives. A store holds at most
//! one blob per request context and supports three operations: read it, replace
//! it, drop it. Transport concerns (cookie attributes, session backends) belong
//! to whoever implements this trait.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Holder of the current request's ticket blob.
pub trait TicketStore: Send {
    /// The stored blob, if any.
    fn get(&self) -> Option<String>;

    /// Replace the stored blob. `max_age_secs` is a hint for stores that
    /// expire entries themselves.
    fn set(&mut self, blob: String, max_age_secs: u64);

    /// Drop the stored blob. Clearing an empty store is a no-op.
    fn clear(&mut self);
}

impl<T: TicketStore + ?Sized> TicketStore for &mut T {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&mut self, blob: String, max_age_secs: u64) {
        (**self).set(blob, max_age_secs);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Single-slot store, e.g. the value of one cookie for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTicketStore {
    blob: Option<String>,
    max_age_secs: Option<u64>,
    writes: usize,
}

impl MemoryTicketStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with an incoming blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            ..Self::default()
        }
    }

    /// Max-age hint passed with the most recent `set`
    pub fn max_age_secs(&self) -> Option<u64> {
        self.max_age_secs
    }

    /// Number of `set` and `clear` calls seen
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TicketStore for MemoryTicketStore {
    fn get(&self) -> Option<String> {
        self.blob.clone()
    }

    fn set(&mut self, blob: String, max_age_secs: u64) {
        self.blob = Some(blob);
        self.max_age_secs = Some(max_age_secs);
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.blob = None;
        self.max_age_secs = None;
        self.writes += 1;
    }
}

/// Shared key/value session record, as a session middleware would hand out.
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionRecord {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one entry
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Write one entry
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.lock().insert(key.into(), value.into());
    }

    /// Remove one entry
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.lock().remove(key)
    }

    /// Whether an entry exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the session holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Keeps the blob inside a [`SessionRecord`] under a fixed key.
///
/// Expiry is enforced by the ticket itself, so the max-age hint is unused.
#[derive(Debug, Clone)]
pub struct SessionTicketStore {
    session: SessionRecord,
    key: String,
}

impl SessionTicketStore {
    /// Store the blob under `key` (normally `TicketConfig::ticket_name`)
    pub fn new(session: SessionRecord, key: impl Into<String>) -> Self {
        Self {
            session,
            key: key.into(),
        }
    }

    /// Underlying session record
    pub fn session(&self) -> &SessionRecord {
        &self.session
    }
}

impl TicketStore for SessionTicketStore {
    fn get(&self) -> Option<String> {
        self.session.get(&self.key)
    }

    fn set(&mut self, blob: String, _max_age_secs: u64) {
        self.session.insert(self.key.clone(), blob);
    }

    fn clear(&mut self) {
        self.session.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemoryTicketStore::new();
        assert!(store.get().is_none());

        store.set("blob".to_string(), 15);
        assert_eq!(store.get().as_deref(), Some("blob"));
        assert_eq!(store.max_age_secs(), Some(15));

        store.clear();
        store.clear();
        assert!(store.get().is_none());
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn test_session_store_keeps_other_entries() {
        let session = SessionRecord::new();
        session.insert("cart", "3 items");

        let mut store = SessionTicketStore::new(session.clone(), "auth");
        store.set("blob".to_string(), 15);
        assert_eq!(session.get("auth").as_deref(), Some("blob"));

        store.clear();
        assert!(!session.contains_key("auth"));
        assert_eq!(session.get("cart").as_deref(), Some("3 items"));
    }

    #[test]
    fn test_session_record_shared_across_clones() {
        let session = SessionRecord::new();
        let reader = SessionTicketStore::new(session.clone(), "auth");
        let mut writer = SessionTicketStore::new(session, "auth");

        writer.set("blob".to_string(), 0);
        assert_eq!(reader.get().as_deref(), Some("blob"));
    }
}
