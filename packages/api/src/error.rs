//! # Error taxonomy for the HTTP surface
//!
//! [`ApiError`] is the only error type a handler returns. Each variant carries the
//! short, user-facing message that ends up in the `{"error": "..."}` body. The
//! exception is [`ApiError::Internal`]: its detail is logged server-side and the
//! client only ever sees `"Internal Server Error"`.
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Validation` | 400 |
//! | `Conflict` | 400 |
//! | `Auth` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Internal` | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use store::StoreError;
use thiserror::Error;

use crate::auth::TokenError;

pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal<T: ToString>(detail: T) -> Self {
        Self::Internal(detail.to_string())
    }

    pub fn note_not_found() -> Self {
        Self::NotFound("Note not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message the client is allowed to see.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Auth(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => msg,
            ApiError::Internal(_) => INTERNAL_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("request failed: {}", detail);
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Conflict("Email already registered".to_string()),
            StoreError::DuplicateUsername => ApiError::Conflict("Username already taken".to_string()),
            StoreError::MissingOwner | StoreError::Backend(_) => ApiError::internal(err),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::debug!("rejected session token: {}", err);
        ApiError::Forbidden("Forbidden: Invalid token".to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::internal(format!("password hashing failed: {}", err))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Auth("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::note_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_public() {
        let err = ApiError::internal("connection refused to 10.0.0.3");
        assert_eq!(err.public_message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_store_errors_map_to_conflict() {
        let err: ApiError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Email already registered"));

        let err: ApiError = StoreError::Backend("down".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
