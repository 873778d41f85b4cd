//! # Store traits: ownership-scoped persistence for accounts and notes
//!
//! Every backend (the in-memory [`crate::MemoryStore`], the Postgres store in the `api`
//! crate) implements these two traits. Services hold them as `Arc<dyn AccountStore>` /
//! `Arc<dyn NoteStore>`, so a test can swap the database for memory without touching
//! any business logic.
//!
//! Every [`NoteStore`] method except [`insert_note`](NoteStore::insert_note) takes the
//! owner id *and* the note id and must match on both. A note owned by somebody else is
//! indistinguishable from a note that does not exist.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Account, NewAccount, NewNote, Note, NotePatch};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account. Fails with [`StoreError::DuplicateEmail`] or
    /// [`StoreError::DuplicateUsername`] when either is already taken.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a note owned by `owner` with `favorite = false`.
    /// Fails with [`StoreError::MissingOwner`] if `owner` is not a known account.
    async fn insert_note(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError>;

    /// All notes owned by `owner`, newest-created first.
    async fn list_notes(&self, owner: Uuid) -> Result<Vec<Note>, StoreError>;

    /// Apply `patch` to the note matching both `owner` and `id`.
    /// `Ok(None)` means no such note; nothing was modified.
    async fn update_note(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: NotePatch,
    ) -> Result<Option<Note>, StoreError>;

    /// Remove the note matching both `owner` and `id`. Returns whether a note was removed.
    async fn delete_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;
}
