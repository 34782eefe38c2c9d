use thiserror::Error;
use uuid::Uuid;

/// Errors produced by a [`crate::NoteStore`] or [`crate::UserDirectory`].
///
/// A missing note is never an error here: lookups return `Option` and owner-scoped
/// mutations report whether anything matched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    /// A note was written for a user that does not exist.
    #[error("no user with id {0}")]
    UnknownOwner(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
