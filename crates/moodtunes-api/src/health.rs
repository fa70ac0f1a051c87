use axum::{Json, extract::State};
use tracing::warn;

use moodtunes_types::api::HealthResponse;

use crate::auth::AppState;
use crate::error::blocking;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = state.clone();
    let database = match blocking(move || db.db.ping()).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: database unreachable: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
    })
}
