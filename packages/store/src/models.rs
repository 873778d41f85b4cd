//! # Domain models for accounts and notes
//!
//! Defines the records persisted by an [`crate::AccountStore`] / [`crate::NoteStore`]
//! and the request-side shapes used to create or change them. Records that cross the
//! HTTP boundary are `Serialize + Deserialize` so the server and the client share a
//! single definition of the wire format.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Account`] | A stored account row, including the Argon2 password hash. Never serialised. |
//! | [`AccountInfo`] | The client-safe projection of an [`Account`] (no hash). |
//! | [`NewAccount`] | Input to [`crate::AccountStore::insert_account`]. The password is already hashed. |
//! | [`Note`] | A stored note, owned by exactly one account via `user_id`. |
//! | [`NewNote`] | Title and content of a note about to be created. |
//! | [`NotePatch`] | A partial update. `None` fields are left untouched. |
//!
//! With the `sqlx` feature the stored records also derive [`sqlx::FromRow`] so the
//! Postgres store can load them straight from query results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full account record from the store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Convert to AccountInfo for client consumption.
    pub fn to_info(&self) -> AccountInfo {
        AccountInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account information safe to send to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A validated registration, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A note owned by a single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Note {
    pub id: Uuid,
    /// Owning account; set once at creation.
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and content for a note about to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Partial update of a note. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl NotePatch {
    /// Patch that only flips the favorite flag to `favorite`.
    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.favorite.is_none()
    }

    /// Apply the supplied fields to `note` and stamp `updated_at`.
    pub fn apply(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(favorite) = self.favorite {
            note.favorite = favorite;
        }
        note.updated_at = now;
    }
}
