//! Degenerate backend behavior: contract violations and expiry handling.

mod common;

use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use common::{client_for, spawn_router, CountingTokenStore, RecordingNotices};
use lodgr::error::Error;
use lodgr::models::LoginForm;
use lodgr::{AuthSession, TokenStore};

fn login_form() -> LoginForm {
    LoginForm {
        email: "someone@example.com".to_string(),
        password: "123456".to_string(),
    }
}

async fn unauthorized() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": { "code": "unauthorized", "message": "Token expired" } })),
    )
}

#[tokio::test]
async fn login_without_token_in_response_fails_and_persists_nothing() {
    // Backend violates the contract: 200 but no token field.
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async { Json(serde_json::json!({ "user": null })) }),
    );
    let addr = spawn_router(router).await;

    let notices = Arc::new(RecordingNotices::default());
    let tokens = Arc::new(CountingTokenStore::default());
    let client = client_for(addr, tokens.clone(), notices.clone());
    let session = AuthSession::new(client, notices);

    let err = session.login(&login_form()).await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(tokens.load(), None);
    assert!(session.user().is_none());
}

#[tokio::test]
async fn login_rolls_back_when_user_fetch_fails() {
    // Login hands out a token but the current-user fetch rejects it.
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(|| async { Json(serde_json::json!({ "token": "short-lived" })) }),
        )
        .route("/api/auth/me", get(unauthorized));
    let addr = spawn_router(router).await;

    let notices = Arc::new(RecordingNotices::default());
    let tokens = Arc::new(CountingTokenStore::default());
    let client = client_for(addr, tokens.clone(), notices.clone());
    let session = AuthSession::new(client, notices);

    let err = session.login(&login_form()).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
    // Nothing was persisted before the failure, and the teardown cleared
    // the store exactly once.
    assert_eq!(tokens.load(), None);
    assert_eq!(tokens.clear_count(), 1);
    assert!(session.user().is_none());
}

#[tokio::test]
async fn unauthorized_response_clears_session_exactly_once() {
    let router = Router::new().route("/api/orders", get(unauthorized));
    let addr = spawn_router(router).await;

    let notices = Arc::new(RecordingNotices::default());
    let tokens = Arc::new(CountingTokenStore::default());
    tokens.save("previously-valid");
    let client = client_for(addr, tokens.clone(), notices.clone());
    let session = AuthSession::new(client.clone(), notices.clone());

    let err = client.list_orders().await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
    assert_eq!(tokens.load(), None);
    assert_eq!(tokens.clear_count(), 1);
    assert!(session.user().is_none());
    assert!(notices
        .errors
        .lock()
        .iter()
        .any(|m| m.contains("session has expired")));
}

#[tokio::test]
async fn failing_logout_does_not_tear_down_the_session() {
    let router = Router::new().route("/api/auth/logout", post(unauthorized));
    let addr = spawn_router(router).await;

    let notices = Arc::new(RecordingNotices::default());
    let tokens = Arc::new(CountingTokenStore::default());
    tokens.save("still-here");
    let client = client_for(addr, tokens.clone(), notices.clone());

    let err = client.logout().await.unwrap_err();
    // The logout call is exempt from expiry handling: the error surfaces
    // as an ordinary failure and the token store is untouched.
    assert!(!matches!(err, Error::SessionExpired));
    assert_eq!(tokens.load(), Some("still-here".to_string()));
    assert_eq!(tokens.clear_count(), 0);
}

#[tokio::test]
async fn overlapping_logins_are_rejected() {
    // A login endpoint that never answers within the test window keeps the
    // first call in flight.
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
            Json(serde_json::json!({ "token": "late" }))
        }),
    );
    let addr = spawn_router(router).await;

    let notices = Arc::new(RecordingNotices::default());
    let tokens = Arc::new(CountingTokenStore::default());
    let client = client_for(addr, tokens.clone(), notices.clone());
    let session = Arc::new(AuthSession::new(client, notices));

    let racing = Arc::clone(&session);
    let first = tokio::spawn(async move { racing.login(&login_form()).await });

    // Give the first call time to claim the in-flight flag.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(session.is_loading());
    let err = session.login(&login_form()).await.unwrap_err();
    assert!(matches!(err, Error::LoginInFlight));

    first.abort();
}
