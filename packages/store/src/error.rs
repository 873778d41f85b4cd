use thiserror::Error;

/// Failures reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("username already taken")]
    DuplicateUsername,

    #[error("owner account does not exist")]
    MissingOwner,

    #[error("store backend error: {0}")]
    Backend(String),
}
