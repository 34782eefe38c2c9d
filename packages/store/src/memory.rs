use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{ExternalProfile, NewNote, Note, NoteChanges, User};
use crate::repo::{NoteStore, UserDirectory};
use crate::search::{matches, sanitize_query};

/// In-memory store for tests and local development.
///
/// Notes are kept in insertion order; a single lock per collection makes
/// find-or-create atomic.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user records, for asserting that nothing was duplicated.
    pub fn user_count(&self) -> usize {
        lock(&self.users).len()
    }

    /// Remove a user and their notes, mimicking a deletion made outside the app.
    pub fn remove_user(&self, id: Uuid) {
        lock(&self.users).remove(&id);
        lock(&self.notes).retain(|n| n.user_id != id);
    }

    fn owned_newest_first(&self, owner: Uuid, keep: impl Fn(&Note) -> bool) -> Vec<Note> {
        let mut notes: Vec<Note> = lock(&self.notes)
            .iter()
            .rev()
            .filter(|n| n.user_id == owner && keep(n))
            .cloned()
            .collect();
        // Stable sort keeps later insertions first on equal timestamps.
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_or_create_by_external_profile(
        &self,
        profile: &ExternalProfile,
    ) -> Result<User, StoreError> {
        let mut users = lock(&self.users);
        if let Some(user) = users.values().find(|u| u.google_id == profile.provider_id) {
            return Ok(user.clone());
        }
        let user = User::from_profile(profile);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.users).get(&id).cloned())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Uuid, StoreError> {
        // Held until the note is stored, so `remove_user` cannot interleave
        let users = lock(&self.users);
        if !users.contains_key(&owner) {
            return Err(StoreError::UnknownOwner(owner));
        }
        let id = Uuid::new_v4();
        lock(&self.notes).push(Note {
            id,
            user_id: owner,
            title: note.title,
            content: note.content,
            tags: note.tags,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        Ok(self.owned_newest_first(owner, |_| true))
    }

    async fn get_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Note>, StoreError> {
        Ok(lock(&self.notes)
            .iter()
            .find(|n| n.id == id && n.user_id == owner)
            .cloned())
    }

    async fn update_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<bool, StoreError> {
        let mut notes = lock(&self.notes);
        let Some(note) = notes.iter_mut().find(|n| n.id == id && n.user_id == owner) else {
            return Ok(false);
        };
        note.title = changes.title;
        note.content = changes.content;
        Ok(true)
    }

    async fn delete_by_owner_and_id(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut notes = lock(&self.notes);
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.user_id == owner));
        Ok(notes.len() != before)
    }

    async fn search_by_owner(
        &self,
        owner: Uuid,
        raw_query: &str,
    ) -> Result<Vec<Note>, StoreError> {
        let Some(query) = sanitize_query(raw_query) else {
            return Ok(Vec::new());
        };
        let needle = query.to_lowercase();
        Ok(self.owned_newest_first(owner, |n| {
            matches(&needle, &n.title, n.content.as_deref())
        }))
    }
}
