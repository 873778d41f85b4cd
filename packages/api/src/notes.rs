//! # Note service: ownership-scoped CRUD
//!
//! Every method takes the authenticated owner id and passes it down to the store,
//! so a caller can only ever reach their own notes. A note id that exists but
//! belongs to someone else produces the same [`ApiError::NotFound`] as an id that
//! does not exist at all.

use std::sync::Arc;

use store::{NewNote, Note, NotePatch, NoteStore};
use uuid::Uuid;

use crate::error::ApiError;

pub struct NoteService {
    notes: Arc<dyn NoteStore>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteStore>) -> Self {
        Self { notes }
    }

    pub async fn create(&self, owner: Uuid, title: &str, content: &str) -> Result<Note, ApiError> {
        if is_blank(title) || is_blank(content) {
            return Err(ApiError::validation("Title and content are required"));
        }

        let note = self
            .notes
            .insert_note(
                owner,
                NewNote {
                    title: title.to_string(),
                    content: content.to_string(),
                },
            )
            .await?;

        tracing::debug!(account_id = %owner, note_id = %note.id, "created note");
        Ok(note)
    }

    /// The owner's notes, newest first.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Note>, ApiError> {
        Ok(self.notes.list_notes(owner).await?)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, patch: NotePatch) -> Result<Note, ApiError> {
        if patch.title.as_deref().is_some_and(is_blank) {
            return Err(ApiError::validation("Title cannot be empty"));
        }
        if patch.content.as_deref().is_some_and(is_blank) {
            return Err(ApiError::validation("Content cannot be empty"));
        }

        let note = self
            .notes
            .update_note(owner, id, patch)
            .await?
            .ok_or_else(ApiError::note_not_found)?;

        tracing::debug!(account_id = %owner, note_id = %id, "updated note");
        Ok(note)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !self.notes.delete_note(owner, id).await? {
            return Err(ApiError::note_not_found());
        }

        tracing::debug!(account_id = %owner, note_id = %id, "deleted note");
        Ok(())
    }
}
