//! # Database module: PostgreSQL pool and store
//!
//! The pool is created once at startup from the configured `DATABASE_URL` and handed
//! to [`PgStore`] explicitly.
//!
//! ## Re-exports
//!
//! - [`connect`]: opens a [`sqlx::PgPool`] with up to 5 connections.
//! - [`migrate`]: applies `packages/api/migrations`.
//! - [`PgStore`]: implements both store traits over the pool.

mod pg_store;
mod pool;

pub use pg_store::PgStore;
pub use pool::{connect, migrate};
