//! Mock group-membership collaborators

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use warden_authorization::GroupsProvider;
use warden_core::{Result, WardenError};

/// Fixed identity → groups table.
///
/// Unknown identities (and anonymous callers) get an empty group list unless
/// [`StaticGroups::deny_unknown`] is set, in which case they get the deny-all
/// sentinel. Every lookup is recorded.
#[derive(Debug, Default)]
pub struct StaticGroups {
    table: HashMap<String, Option<Vec<String>>>,
    deny_unknown: bool,
    calls: Mutex<Vec<Option<String>>>,
}

impl StaticGroups {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `identity` these groups
    pub fn with_member<I, S>(mut self, identity: &str, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.insert(
            identity.to_string(),
            Some(groups.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Deny `identity` outright
    pub fn with_forbidden(mut self, identity: &str) -> Self {
        self.table.insert(identity.to_string(), None);
        self
    }

    /// Treat identities missing from the table as forbidden
    pub fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Identities looked up so far, in order
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GroupsProvider<String> for StaticGroups {
    async fn fetch_groups(&self, identity: Option<&str>) -> Result<Option<Vec<String>>> {
        self.calls.lock().push(identity.map(str::to_string));
        let known = identity.and_then(|id| self.table.get(id));
        Ok(match known {
            Some(groups) => groups.clone(),
            None if self.deny_unknown => None,
            None => Some(Vec::new()),
        })
    }
}

/// Lookup that always fails.
#[derive(Debug, Clone)]
pub struct FailingGroups {
    message: String,
}

impl FailingGroups {
    /// Fail every lookup with `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl GroupsProvider<String> for FailingGroups {
    async fn fetch_groups(&self, _identity: Option<&str>) -> Result<Option<Vec<String>>> {
        Err(WardenError::group_lookup(self.message.clone()))
    }
}
