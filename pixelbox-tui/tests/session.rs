//! Session store integration tests: persistence, logout and reconciliation

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::MockApi;
use pixelbox_client::ClientError;
use pixelbox_tui::core::{AppContext, SessionStore, StoreError};
use pixelbox_tui::ui::{failure, PageEvent};
use rust_decimal::Decimal;
use shared::{LoginRequest, RegisterRequest};
use tempfile::TempDir;

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "pixel_fan".to_string(),
        password: "secret1".to_string(),
    }
}

#[tokio::test]
async fn session_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new().with_account(common::user(100)));

    let session = SessionStore::load(api.clone(), dir.path()).unwrap();
    session.login(credentials()).await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(api.token.lock().unwrap().as_deref(), Some("test-token"));
    drop(session);

    // A fresh process restores the persisted trio and re-installs the token
    let api2 = Arc::new(MockApi::new());
    let restored = SessionStore::load(api2.clone(), dir.path()).unwrap();
    let state = restored.state();
    assert!(state.authenticated);
    assert_eq!(state.token.as_deref(), Some("test-token"));
    assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("pixel_fan"));
    // Loading flags are never persisted
    assert!(!state.loading);
    assert_eq!(api2.token.lock().unwrap().as_deref(), Some("test-token"));
}

#[tokio::test]
async fn logout_clears_local_state_even_when_the_server_call_fails() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new().with_account(common::user(100)));
    let session = SessionStore::load(api.clone(), dir.path()).unwrap();
    session.login(credentials()).await.unwrap();

    api.fail_logout.store(true, Ordering::SeqCst);
    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(api.token.lock().unwrap().is_none());
    assert!(!dir.path().join("session.json").exists());
    // The server was still notified (best effort)
    assert_eq!(api.count("logout"), 1);
}

#[tokio::test]
async fn refresh_failure_clears_the_whole_session() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new().with_account(common::user(100)));
    let session = SessionStore::load(api.clone(), dir.path()).unwrap();
    session.login(credentials()).await.unwrap();

    api.fail_refresh.store(true, Ordering::SeqCst);
    assert!(session.refresh_token().await.is_err());

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(api.token.lock().unwrap().is_none());
}

#[tokio::test]
async fn register_is_validated_before_any_request() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new());
    let session = SessionStore::load(api.clone(), dir.path()).unwrap();

    let bad = RegisterRequest {
        username: "x!".to_string(),
        email: "not-an-email".to_string(),
        password: "123".to_string(),
        confirm_password: "456".to_string(),
    };
    let err = session.register(&bad).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(api.count("register"), 0);

    let good = RegisterRequest {
        username: "pixel_fan".to_string(),
        email: "fan@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
    };
    session.register(&good).await.unwrap();
    assert_eq!(api.count("register"), 1);
    // Registration never authenticates by itself
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn unauthorized_failure_forces_a_local_logout() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new().with_account(common::user(100)));
    let ctx = AppContext::new(api.clone(), dir.path()).unwrap();
    ctx.session.login(credentials()).await.unwrap();

    let event = failure(
        &ctx,
        StoreError::Client(ClientError::Unauthorized),
        "Request failed",
    );

    assert!(matches!(event, PageEvent::ForceLogin(_)));
    assert!(!ctx.session.is_authenticated());
    assert!(api.token.lock().unwrap().is_none());
}

#[tokio::test]
async fn profile_fetch_supersedes_optimistic_balance_math() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(MockApi::new().with_account(common::user(150)));
    let session = SessionStore::load(api.clone(), dir.path()).unwrap();
    session.login(credentials()).await.unwrap();

    // Optimistic local debit
    session
        .update_user(|u| u.points -= Decimal::from(100))
        .unwrap();
    assert_eq!(session.points(), Some(Decimal::from(50)));

    // Server truth differs; the authoritative fetch wins wholesale
    api.account.lock().unwrap().as_mut().unwrap().points = Decimal::from(140);
    session.fetch_profile().await.unwrap();
    assert_eq!(session.points(), Some(Decimal::from(140)));
}
