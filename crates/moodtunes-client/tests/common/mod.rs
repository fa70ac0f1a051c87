#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use moodtunes_api::auth::AppStateInner;
use moodtunes_client::MoodTunes;
use moodtunes_client::config::ClientConfig;
use moodtunes_client::storage::LocalStorage;
use moodtunes_db::Database;
use tokio::net::TcpListener;

/// Serves the real router over an in-memory database on an ephemeral port.
pub async fn spawn_server() -> String {
    let db = Database::open_in_memory().unwrap();
    let app = moodtunes_api::router(AppStateInner::new(db, "integration-secret".into(), 1));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn config(api_url: &str) -> ClientConfig {
    ClientConfig {
        api_url: api_url.to_string(),
        preview_url: "http://127.0.0.1:1".into(),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    }
}

pub fn app(api_url: &str) -> MoodTunes {
    app_with_storage(api_url, Arc::new(LocalStorage::in_memory()))
}

pub fn app_with_storage(api_url: &str, storage: Arc<LocalStorage>) -> MoodTunes {
    MoodTunes::with_storage(&config(api_url), storage).unwrap()
}

/// Registers `email` and signs the app in as that user.
pub async fn signed_in(api_url: &str, email: &str) -> MoodTunes {
    let app = app(api_url);
    app.auth.sign_up(email, "hunter22", None).await.unwrap();
    app.auth.sign_in(email, "hunter22").await.unwrap();
    app
}
