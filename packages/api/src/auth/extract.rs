//! Request extractor for authenticated routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::session::TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// The caller's identity, resolved from the session cookie.
///
/// Adding this as a handler argument makes the route require authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub account_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(TOKEN_COOKIE).map(|c| c.value());
        let account_id = state.sessions.authenticate(token)?;
        Ok(AuthUser { account_id })
    }
}
