use thiserror::Error;

/// Shown when the server fails without a readable `error` field.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// The session is missing or has been cleared; the caller should show login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }

    /// Message fit for display next to a form.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Api { message, .. } => message,
            ClientError::Transport(_) => FALLBACK_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Title and content are required")]
    MissingFields,

    #[error("already recording")]
    AlreadyRecording,

    #[error("not recording")]
    NotRecording,

    #[error("Please upload a text file.")]
    UnsupportedFile { file_name: String, mime: String },

    #[error("{0} is not valid UTF-8 text")]
    NotUtf8(String),
}
