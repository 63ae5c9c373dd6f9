//! Local user collection and page counters

use tracing::warn;

use crate::api::UserPage;
use crate::models::{PageMetadata, UserDraft, UserRecord};

/// The users shown by the shell, in fetch order, plus pagination metadata.
/// Ids (as returned by `UserRecord::key`) are unique within the collection.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<UserRecord>,
    metadata: PageMetadata,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Replace the collection and metadata with a fetched page
    pub fn replace(&mut self, page: UserPage) {
        self.users = Vec::with_capacity(page.users.len());
        for user in page.users {
            self.append(user);
        }
        self.metadata = page.metadata;
    }

    /// Append a record. A record whose id is already present replaces the
    /// existing entry in place.
    pub fn append(&mut self, user: UserRecord) {
        let key = user.key();
        if !key.is_empty() {
            if let Some(existing) = self.users.iter_mut().find(|u| u.key() == key) {
                warn!(id = key, "Duplicate user id, replacing existing record");
                *existing = user;
                return;
            }
        }
        self.users.push(user);
    }

    pub fn find(&self, id: &str) -> Option<&UserRecord> {
        if id.is_empty() {
            return None;
        }
        self.users.iter().find(|u| u.key() == id)
    }

    /// Overwrite every editable field of the record with `id`.
    /// Returns false when no such record exists.
    pub fn update(&mut self, id: &str, draft: &UserDraft) -> bool {
        if id.is_empty() {
            return false;
        }
        match self.users.iter_mut().find(|u| u.key() == id) {
            Some(user) => {
                user.apply_draft(draft);
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`; absent ids leave the collection unchanged
    pub fn remove(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        let before = self.users.len();
        self.users.retain(|u| u.key() != id);
        self.users.len() != before
    }

    /// Advance the page counter. No fetch is triggered.
    pub fn next_page(&mut self) -> i64 {
        self.metadata.page += 1;
        self.metadata.page
    }

    /// Step the page counter back, unclamped. No fetch is triggered.
    pub fn prev_page(&mut self) -> i64 {
        self.metadata.page -= 1;
        self.metadata.page
    }
}
