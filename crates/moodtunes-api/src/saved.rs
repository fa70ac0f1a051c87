use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use moodtunes_db::models::SavedItemRow;
use moodtunes_types::api::{Claims, CreatedResponse, TextRequest};
use moodtunes_types::models::SavedItem;

use crate::auth::AppState;
use crate::comments::non_empty_text;
use crate::error::{ApiError, blocking};

/// Saved items are only reachable through their owner's session.
fn ensure_owner(claims: &Claims, user_id: &str) -> Result<(), ApiError> {
    if claims.sub.to_string() != user_id {
        warn!("User {} tried to access saved items of {}", claims.sub, user_id);
        return Err(ApiError::PermissionDenied);
    }
    Ok(())
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<SavedItem>>, ApiError> {
    ensure_owner(&claims, &user_id)?;

    let db = state.clone();
    let rows = blocking(move || db.db.list_saved_items(&user_id)).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| SavedItem {
                id: row.id,
                text: row.text,
                created_at: row.created_at,
                updated_at: row.updated_at,
                user_id: row.user_id,
            })
            .collect(),
    ))
}

pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner(&claims, &user_id)?;
    let text = non_empty_text(&req.text)?;

    let row = SavedItemRow {
        id: Uuid::new_v4().to_string(),
        user_id,
        text,
        created_at: chrono::Utc::now().timestamp_millis(),
        updated_at: None,
    };
    let id = row.id.clone();

    let db = state.clone();
    blocking(move || db.db.insert_saved_item(&row)).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TextRequest>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&claims, &user_id)?;
    let text = non_empty_text(&req.text)?;
    let now = chrono::Utc::now().timestamp_millis();

    let db = state.clone();
    let found = blocking(move || db.db.update_saved_item(&user_id, &item_id, &text, now)).await?;
    if !found {
        return Err(ApiError::NotFound("saved item"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&claims, &user_id)?;

    let db = state.clone();
    blocking(move || db.db.delete_saved_item(&user_id, &item_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&claims, &user_id)?;

    let db = state.clone();
    blocking(move || db.db.clear_saved_items(&user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
