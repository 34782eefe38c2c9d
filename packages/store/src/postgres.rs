//! PostgreSQL-backed store.
//!
//! Every note query carries `user_id = $owner` in its `WHERE` clause; there is
//! no code path that reads or writes a note by id alone.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{ExternalProfile, NewNote, Note, NoteChanges, User};
use crate::repo::{NoteStore, UserDirectory};
use crate::search::sanitize_query;

const NOTE_COLUMNS: &str = "id, user_id, title, content, tags, created_at";

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a pool of up to 5 connections.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_or_create_by_external_profile(
        &self,
        profile: &ExternalProfile,
    ) -> Result<User, StoreError> {
        let candidate = User::from_profile(profile);

        // DO NOTHING keeps the first record when two sign-ins race
        let inserted: Option<User> = sqlx::query_as(
            r#"
            INSERT INTO users (id, google_id, display_name, first_name, last_name, profile_photo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (google_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.google_id)
        .bind(&candidate.display_name)
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.profile_photo)
        .bind(candidate.created_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = inserted {
            debug!(user_id = %user.id, "created user");
            return Ok(user);
        }

        let existing: User = sqlx::query_as("SELECT * FROM users WHERE google_id = $1")
            .bind(&profile.provider_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(existing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Uuid, StoreError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO notes (id, user_id, title, content, tags) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => StoreError::UnknownOwner(owner),
            _ => StoreError::from(err),
        })?;
        Ok(id)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn get_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn update_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE notes SET title = $1, content = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_owner_and_id(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_owner(
        &self,
        owner: Uuid,
        raw_query: &str,
    ) -> Result<Vec<Note>, StoreError> {
        let Some(query) = sanitize_query(raw_query) else {
            return Ok(Vec::new());
        };
        // Sanitised queries cannot contain % or _
        let pattern = format!("%{query}%");
        let notes = sqlx::query_as(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE user_id = $1 AND (title ILIKE $2 OR content ILIKE $2) \
             ORDER BY created_at DESC"
        ))
        .bind(owner)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }
}
