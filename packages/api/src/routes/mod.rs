//! # HTTP routes
//!
//! | Method | Path | Auth | Handler |
//! |--------|------|------|---------|
//! | `POST` | `/register` | – | [`auth::register`] |
//! | `POST` | `/login` | – | [`auth::login`] |
//! | `POST` | `/logout` | – | [`auth::logout`] |
//! | `GET` | `/me` | ✓ | [`auth::me`] |
//! | `POST` | `/notes` | ✓ | [`notes::create_note`] |
//! | `GET` | `/notes` | ✓ | [`notes::list_notes`] |
//! | `PUT` | `/notes/{id}` | ✓ | [`notes::update_note`] |
//! | `DELETE` | `/notes/{id}` | ✓ | [`notes::delete_note`] |
//! | `GET` | `/health` | – | [`health`] |
//!
//! Every failure leaves as `{"error": "..."}`. A panicking handler is caught and
//! answered with the same 500 body as any other internal error, and unknown paths
//! get a JSON 404.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub mod auth;
pub mod notes;

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/notes", post(notes::create_note).get(notes::list_notes))
        .route("/notes/{id}", put(notes::update_note).delete(notes::delete_note))
        .route("/health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy admitting credentialed requests from `origin` only.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn fallback() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}

/// Unwrap a JSON body, reporting any rejection as a validation error.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("rejected request body: {}", rejection.body_text());
            Err(ApiError::validation("Invalid request body"))
        }
    }
}

/// `{"message": ...}` body used by the acknowledgement-only endpoints.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}
