//! # Domain models for users and notes
//!
//! Defines the records persisted by the [`crate::UserDirectory`] and
//! [`crate::NoteStore`] implementations, plus the input types accepted by them.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A local account, created once per distinct Google id on first sign-in and never mutated afterwards. |
//! | [`ExternalProfile`] | The identity payload handed back by the OAuth provider after a successful handshake. |
//! | [`Note`] | A text note owned by exactly one user. `user_id` and `created_at` never change after creation. |
//! | [`NewNote`] | Validated input for creating a note. Tags are normalised to a sorted set. |
//! | [`NoteChanges`] | Validated input for overwriting a note's title and content. |
//!
//! Both input types trim the title and reject it when nothing is left, so the
//! in-memory and PostgreSQL stores enforce the same rule.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::StoreError;

/// Local user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub google_id: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record from a provider profile.
    pub fn from_profile(profile: &ExternalProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            google_id: profile.provider_id.clone(),
            display_name: profile.display_name.clone(),
            first_name: profile.given_name.clone(),
            last_name: profile.family_name.clone(),
            profile_photo: profile.avatar_url.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Profile returned by the identity provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalProfile {
    /// Stable provider-side identifier (the Google account id).
    pub provider_id: String,
    pub display_name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A stored note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for [`crate::NoteStore::create`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn new(
        title: &str,
        content: Option<&str>,
        tags: impl IntoIterator<Item = String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            title: validate_title(title)?,
            content: normalize_content(content),
            tags: normalize_tags(tags),
        })
    }

    /// Like [`NewNote::new`], with tags given as a comma-separated list.
    pub fn with_tag_list(
        title: &str,
        content: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Self, StoreError> {
        let tags = tags
            .unwrap_or_default()
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>();
        Self::new(title, content, tags)
    }
}

/// Input for [`crate::NoteStore::update_by_owner_and_id`].
#[derive(Clone, Debug, PartialEq)]
pub struct NoteChanges {
    pub title: String,
    pub content: Option<String>,
}

impl NoteChanges {
    pub fn new(title: &str, content: Option<&str>) -> Result<Self, StoreError> {
        Ok(Self {
            title: validate_title(title)?,
            content: normalize_content(content),
        })
    }
}

fn validate_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::Validation("Title is required".to_string()));
    }
    Ok(title.to_string())
}

fn normalize_content(content: Option<&str>) -> Option<String> {
    content
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
}

/// Trim, drop blanks, de-duplicate and sort.
pub fn normalize_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
