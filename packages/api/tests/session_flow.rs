mod common;

use api::auth::TokenSigner;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_and_login_sets_http_only_cookie() {
    let app = app();

    let res = register(&app, "alice", "a@x.com", "pw123").await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "User registered successfully");
    assert!(res.body.get("password").is_none());
    assert!(res.session_set_cookie().is_none());

    let res = login(&app, "a@x.com", "pw123").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Login successful");

    let cookie = res.session_set_cookie().expect("Set-Cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));
    assert!(!res.session_token().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app();
    assert_eq!(
        register(&app, "alice", "a@x.com", "pw123").await.status,
        StatusCode::CREATED
    );

    let res = register(&app, "someone", "a@x.com", "other").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Email already registered");

    let res = register(&app, "alice", "b@x.com", "other").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Username already taken");
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = app();

    let res = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "username": "alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "All fields are required");

    let res = send(&app, Method::POST, "/register", None, None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid request body");
}

#[tokio::test]
async fn test_login_failures() {
    let app = app();
    register(&app, "alice", "a@x.com", "pw123").await;

    let res = login(&app, "a@x.com", "wrong").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Invalid email or password");
    assert!(res.session_set_cookie().is_none());

    let res = login(&app, "nobody@x.com", "pw123").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Invalid email or password");

    let res = login(&app, "a@x.com", "").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Email and password required");
}

#[tokio::test]
async fn test_missing_vs_invalid_credential() {
    let app = app();

    let res = send(&app, Method::GET, "/notes", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Unauthorized: No token provided");

    let res = send(&app, Method::GET, "/notes", Some("garbage"), None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.error(), "Forbidden: Invalid token");

    let foreign = TokenSigner::new("some other secret")
        .unwrap()
        .issue(Uuid::new_v4())
        .unwrap();
    let res = send(&app, Method::GET, "/notes", Some(&foreign), None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_credential_is_forbidden() {
    let app = app();
    let token = signed_in(&app, "alice", "a@x.com").await;

    let me = send(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    let account_id: Uuid = serde_json::from_value(me.body["id"].clone()).unwrap();

    let stale = TokenSigner::new(SECRET)
        .unwrap()
        .issue_at(account_id, Utc::now() - Duration::days(8))
        .unwrap();
    let res = send(&app, Method::GET, "/notes", Some(&stale), None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_returns_public_view() {
    let app = app();
    let token = signed_in(&app, "alice", "A@x.com").await;

    let res = send(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["username"], "alice");
    assert_eq!(res.body["email"], "a@x.com");
    assert!(res.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie_and_ends_session() {
    let app = app();
    let token = signed_in(&app, "alice", "a@x.com").await;
    assert_eq!(
        send(&app, Method::GET, "/notes", Some(&token), None).await.status,
        StatusCode::OK
    );

    let res = send(&app, Method::POST, "/logout", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Logout successful");
    let removal = res.session_set_cookie().expect("removal cookie");
    assert!(removal.contains("Max-Age=0"));
    assert!(removal.contains("Path=/"));

    // The browser now holds the cleared value.
    let cleared = res.session_token().unwrap();
    assert!(cleared.is_empty());
    let res = send(&app, Method::GET, "/notes", Some(&cleared), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app, Method::GET, "/notes", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = app();
    let res = send(&app, Method::POST, "/logout", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.session_set_cookie().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health_and_fallback() {
    let app = app();

    let res = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");

    let res = send(&app, Method::GET, "/nope", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Not found");
}
