// Shared helpers for router-level tests: a router over MemoryStore plus a tiny
// request/response wrapper that plays the part of the browser.

#![allow(dead_code)]

use std::sync::Arc;

use api::auth::TokenSigner;
use api::{router, AppState};
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use store::MemoryStore;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

pub fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let signer = TokenSigner::new(SECRET).expect("signer");
    router(AppState::new(store.clone(), store, signer, false))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the session cookie, if any.
    pub fn session_set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("token="))
            .map(str::to_string)
    }

    /// Value of the session cookie, as a browser would store it.
    pub fn session_token(&self) -> Option<String> {
        let header = self.session_set_cookie()?;
        let pair = header.split(';').next()?;
        pair.strip_prefix("token=").map(str::to_string)
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn register(app: &Router, username: &str, email: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "username": username, "email": email, "password": password })),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Register and log in, returning the session token.
pub async fn signed_in(app: &Router, username: &str, email: &str) -> String {
    let res = register(app, username, email, "pw123").await;
    assert_eq!(res.status, StatusCode::CREATED);
    let res = login(app, email, "pw123").await;
    assert_eq!(res.status, StatusCode::OK);
    res.session_token().expect("session cookie")
}

pub async fn create_note(app: &Router, token: &str, title: &str, content: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/notes",
        Some(token),
        Some(json!({ "title": title, "content": content })),
    )
    .await
}
