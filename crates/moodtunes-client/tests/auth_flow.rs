mod common;

use std::sync::Arc;

use moodtunes_client::auth::NETWORK_REQUEST_FAILED;
use moodtunes_client::storage::LocalStorage;

#[tokio::test]
async fn sign_up_then_sign_in_persists_session() {
    let url = common::spawn_server().await;
    let storage = Arc::new(LocalStorage::in_memory());
    let app = common::app_with_storage(&url, storage.clone());

    let user_id = app.auth.sign_up("Frank@Example.com", "hunter22", Some("Frank")).await.unwrap();
    assert!(app.session().is_none());
    assert!(app.cloud.token().is_none());

    let session = app.auth.sign_in("frank@example.com", "hunter22").await.unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(app.session(), Some(session.clone()));

    let me = app.auth.me().await.unwrap();
    assert_eq!(me.email, "frank@example.com");
    assert_eq!(me.display_name.as_deref(), Some("Frank"));

    // a second launch on the same device is already signed in
    let relaunched = common::app_with_storage(&url, storage.clone());
    assert_eq!(relaunched.cloud.token(), Some(session.token.clone()));
    assert!(relaunched.auth.me().await.is_ok());

    relaunched.auth.sign_out().await.unwrap();
    assert!(relaunched.session().is_none());
    assert!(relaunched.cloud.token().is_none());
    assert_eq!(storage.get_item("auth:session").unwrap(), None);
}

#[tokio::test]
async fn login_failures_are_described() {
    let url = common::spawn_server().await;
    let app = common::app(&url);
    app.auth.sign_up("gina@example.com", "hunter22", None).await.unwrap();

    let err = app.auth.sign_in("gina@example.com", "wrong-one").await.unwrap_err();
    assert_eq!(err.code.as_deref(), Some("auth/wrong-password"));
    assert_eq!(err.message, "Incorrect password. Please check your password and try again.");

    let err = app.auth.sign_in("nobody@example.com", "hunter22").await.unwrap_err();
    assert_eq!(err.code.as_deref(), Some("auth/user-not-found"));
    assert!(err.message.starts_with("No account found with this email address."));

    assert!(app.session().is_none());
}

#[tokio::test]
async fn repeated_failures_lock_the_account() {
    let url = common::spawn_server().await;
    let app = common::app(&url);
    app.auth.sign_up("hank@example.com", "hunter22", None).await.unwrap();

    for _ in 0..5 {
        app.auth.sign_in("hank@example.com", "bad-pass").await.unwrap_err();
    }
    let err = app.auth.sign_in("hank@example.com", "hunter22").await.unwrap_err();
    assert_eq!(err.code.as_deref(), Some("auth/too-many-requests"));
    assert_eq!(err.message, "Too many failed login attempts. Please try again later.");
}

#[tokio::test]
async fn sign_up_failures_are_described() {
    let url = common::spawn_server().await;
    let app = common::app(&url);
    app.auth.sign_up("ivy@example.com", "hunter22", None).await.unwrap();

    let err = app.auth.sign_up("ivy@example.com", "hunter22", None).await.unwrap_err();
    assert_eq!(err.message, "An account with this email already exists");

    let err = app.auth.sign_up("not-an-email", "hunter22", None).await.unwrap_err();
    assert_eq!(err.message, "Invalid email address");

    let err = app.auth.sign_up("jo@example.com", "short", None).await.unwrap_err();
    assert_eq!(err.code, None);
    assert_eq!(err.message, "Password must be at least 6 characters long");
}

#[tokio::test]
async fn unreachable_server_reports_network_error() {
    let app = common::app(&common::dead_url().await);

    let err = app.auth.sign_in("kim@example.com", "hunter22").await.unwrap_err();
    assert_eq!(err.code.as_deref(), Some(NETWORK_REQUEST_FAILED));
    assert_eq!(err.message, "Network error. Please check your internet connection and try again.");

    let err = app.auth.sign_up("kim@example.com", "hunter22", None).await.unwrap_err();
    assert_eq!(err.message, "Network error. Please check your connection");

    // signing out never needs the server
    app.auth.sign_out().await.unwrap();
}
