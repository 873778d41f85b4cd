//! Note CRUD. Every handler takes [`AuthUser`], so all of them require a session.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use store::{Note, NotePatch};
use uuid::Uuid;

use super::{json_body, message};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// A path id that is not a UUID cannot name any note.
fn note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::note_not_found())
}

pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let req = json_body(payload)?;
    let note = state
        .notes
        .create(user.account_id, &req.title, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list_notes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.list(user.account_id).await?))
}

pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<NotePatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = note_id(&id)?;
    let patch = json_body(payload)?;
    let note = state.notes.update(user.account_id, id, patch).await?;
    Ok(Json(json!({ "message": "Note updated", "note": note })))
}

pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = note_id(&id)?;
    state.notes.delete(user.account_id, id).await?;
    Ok(message("Note deleted"))
}
