//! # API crate: the notes HTTP backend
//!
//! This crate holds everything the server binary wires together: the session
//! service, the note service, the Postgres store, settings, the error taxonomy and
//! the axum router.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing, HMAC-signed session credentials, [`auth::SessionService`] and the [`auth::AuthUser`] extractor |
//! | [`notes`] | [`notes::NoteService`]: ownership-scoped create / list / update / delete |
//! | [`db`] | PostgreSQL pool, migrations and [`db::PgStore`] |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`error`] | [`ApiError`] and its mapping onto HTTP status codes |
//! | [`routes`] | The axum [`Router`](axum::Router) and its handlers |
//! | [`state`] | [`AppState`], the handler state |
//!
//! ## Authentication
//!
//! Login sets an HTTP-only `token` cookie holding a signed credential valid for
//! seven days. Nothing is stored server-side: any request carrying a correctly
//! signed, unexpired credential is authenticated. Logout only clears the cookie.
//! Bearer headers are not consulted.

pub mod auth;
pub mod db;
pub mod error;
pub mod notes;
pub mod routes;
pub mod settings;
pub mod state;

pub use error::ApiError;
pub use routes::{cors_layer, router};
pub use settings::{Settings, SettingsError};
pub use state::AppState;
