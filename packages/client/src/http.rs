//! Typed HTTP client for the notes backend.
//!
//! The underlying `reqwest::Client` keeps a cookie store, so the `token` cookie
//! set by [`NotesClient::login`] rides along on every later call and is dropped
//! again when [`NotesClient::logout`] receives the removal cookie.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use store::{AccountInfo, Note, NotePatch};
use uuid::Uuid;

use crate::editor::Submission;
use crate::error::{ClientError, FALLBACK_MESSAGE};

pub struct NotesClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    note: Note,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request`, turning any non-success status into [`ClientError::Api`].
    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        tracing::debug!(status = status.as_u16(), "request failed: {}", message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }

    async fn acknowledge(request: RequestBuilder) -> Result<String, ClientError> {
        Ok(Self::fetch::<MessageBody>(request).await?.message)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let body = json!({ "username": username, "email": email, "password": password });
        Self::acknowledge(self.client.post(self.url("/register")).json(&body)).await
    }

    /// Log in; on success the session cookie is held by this client.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = json!({ "email": email, "password": password });
        Self::acknowledge(self.client.post(self.url("/login")).json(&body)).await
    }

    pub async fn logout(&self) -> Result<String, ClientError> {
        Self::acknowledge(self.client.post(self.url("/logout"))).await
    }

    pub async fn me(&self) -> Result<AccountInfo, ClientError> {
        Self::fetch(self.client.get(self.url("/me"))).await
    }

    /// The caller's notes, newest first.
    pub async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        Self::fetch(self.client.get(self.url("/notes"))).await
    }

    pub async fn create_note(&self, title: &str, content: &str) -> Result<Note, ClientError> {
        let body = json!({ "title": title, "content": content });
        Self::fetch(self.client.post(self.url("/notes")).json(&body)).await
    }

    pub async fn update_note(&self, id: Uuid, patch: &NotePatch) -> Result<Note, ClientError> {
        let request = self
            .client
            .put(self.url(&format!("/notes/{}", id)))
            .json(patch);
        Ok(Self::fetch::<UpdateBody>(request).await?.note)
    }

    /// Flip `note`'s favorite flag and return the stored result.
    pub async fn toggle_favorite(&self, note: &Note) -> Result<Note, ClientError> {
        self.update_note(note.id, &NotePatch::favorite(!note.favorite))
            .await
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<String, ClientError> {
        Self::acknowledge(self.client.delete(self.url(&format!("/notes/{}", id)))).await
    }

    /// Send an editor submission as a create or an update.
    pub async fn save(&self, submission: Submission) -> Result<Note, ClientError> {
        match submission {
            Submission::Create(new) => self.create_note(&new.title, &new.content).await,
            Submission::Update(id, patch) => self.update_note(id, &patch).await,
        }
    }
}
