//! Registration, login, logout and the current-account lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;
use store::AccountInfo;

use super::{json_body, message};
use crate::auth::{removal_cookie, session_cookie, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let req = json_body(payload)?;
    state
        .sessions
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, message("User registered successfully")))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let req = json_body(payload)?;
    let token = state.sessions.login(&req.email, &req.password).await?;
    let cookie = session_cookie(token, state.sessions.signer(), state.secure_cookies);
    Ok((jar.add(cookie), message("Login successful")))
}

/// Clears the credential cookie. Succeeds whether or not a session exists.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.add(removal_cookie()), message("Logout successful"))
}

pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AccountInfo>, ApiError> {
    Ok(Json(state.sessions.me(user.account_id).await?))
}
