//! # Store traits: users and owner-scoped notes
//!
//! Every route handler talks to persistence through the two traits defined here,
//! so the same handlers run against [`crate::PgStore`] in production and
//! [`crate::MemoryStore`] in tests.
//!
//! ## [`UserDirectory`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`find_or_create_by_external_profile`](UserDirectory::find_or_create_by_external_profile) | Resolves a provider profile to a local user, creating it on first sight. At most one user exists per provider id, even under concurrent first sign-ins. Existing users are returned as stored. |
//! | [`find_by_id`](UserDirectory::find_by_id) | Looks a user up by local id. |
//!
//! ## [`NoteStore`]
//!
//! Every method takes the acting user's id and applies it as a filter. A note
//! that belongs to someone else is indistinguishable from a note that does not
//! exist: reads return `None`, mutations match nothing.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create`](NoteStore::create) | Persists a note for `owner` with a server-assigned id and timestamp. Fails with [`StoreError::UnknownOwner`](crate::StoreError::UnknownOwner) when `owner` is not a user. |
//! | [`list_by_owner`](NoteStore::list_by_owner) | All of `owner`'s notes, newest first. |
//! | [`get_by_owner_and_id`](NoteStore::get_by_owner_and_id) | One note, if `owner` owns it. |
//! | [`update_by_owner_and_id`](NoteStore::update_by_owner_and_id) | Overwrites title and content. Returns whether a note matched. |
//! | [`delete_by_owner_and_id`](NoteStore::delete_by_owner_and_id) | Removes a note. Returns whether a note matched. |
//! | [`search_by_owner`](NoteStore::search_by_owner) | Sanitised, case-insensitive substring search over title and content (see [`crate::search`]). A query with nothing searchable left returns no notes. |

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{ExternalProfile, NewNote, Note, NoteChanges, User};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_or_create_by_external_profile(
        &self,
        profile: &ExternalProfile,
    ) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Uuid, StoreError>;

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError>;

    async fn get_by_owner_and_id(&self, owner: Uuid, id: Uuid)
        -> Result<Option<Note>, StoreError>;

    async fn update_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<bool, StoreError>;

    async fn delete_by_owner_and_id(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;

    async fn search_by_owner(&self, owner: Uuid, raw_query: &str)
        -> Result<Vec<Note>, StoreError>;
}
