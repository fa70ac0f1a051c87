use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, warn};
use uuid::Uuid;

use moodtunes_db::models::CommentRow;
use moodtunes_types::api::{CreatedResponse, TextRequest};
use moodtunes_types::models::{Comment, Mood};

use crate::auth::AppState;
use crate::error::{ApiError, blocking};
use crate::middleware::Identity;

// Comment boards are open: any caller may edit or delete any comment.

pub async fn list(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let mood = parse_mood(&mood)?;

    let db = state.clone();
    let rows = blocking(move || db.db.list_comments(mood.as_str())).await?;

    let comments = rows
        .into_iter()
        .map(|row| Comment {
            id: row.id,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user_id: row.user_id,
            user_email: row.user_email,
            mood: row.mood.parse().unwrap_or_else(|e| {
                warn!("Corrupt mood on comment: {}", e);
                mood
            }),
        })
        .collect();

    Ok(Json(comments))
}

pub async fn add(
    State(state): State<AppState>,
    Path(mood): Path<String>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<TextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mood = parse_mood(&mood)?;
    let text = non_empty_text(&req.text)?;

    let (user_id, user_email) = match identity.0 {
        Some(claims) => (Some(claims.sub.to_string()), Some(claims.email)),
        None => (None, None),
    };

    let row = CommentRow {
        id: Uuid::new_v4().to_string(),
        mood: mood.to_string(),
        text,
        created_at: chrono::Utc::now().timestamp_millis(),
        updated_at: None,
        user_id,
        user_email,
    };
    let id = row.id.clone();

    let db = state.clone();
    blocking(move || db.db.insert_comment(&row)).await?;
    debug!("Comment {} added to {}", id, mood);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update(
    State(state): State<AppState>,
    Path((mood, comment_id)): Path<(String, String)>,
    Json(req): Json<TextRequest>,
) -> Result<StatusCode, ApiError> {
    let mood = parse_mood(&mood)?;
    let text = non_empty_text(&req.text)?;
    let now = chrono::Utc::now().timestamp_millis();

    let db = state.clone();
    let found = blocking(move || db.db.update_comment(mood.as_str(), &comment_id, &text, now)).await?;
    if !found {
        return Err(ApiError::NotFound("comment"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path((mood, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mood = parse_mood(&mood)?;

    let db = state.clone();
    blocking(move || db.db.delete_comment(mood.as_str(), &comment_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mood = parse_mood(&mood)?;

    let db = state.clone();
    let removed = blocking(move || db.db.clear_comments(mood.as_str())).await?;
    debug!("Cleared {} comments from {}", removed, mood);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn parse_mood(raw: &str) -> Result<Mood, ApiError> {
    raw.parse()
        .map_err(|e: moodtunes_types::models::UnknownMood| ApiError::InvalidArgument(e.to_string()))
}

pub(crate) fn non_empty_text(raw: &str) -> Result<String, ApiError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ApiError::InvalidArgument("text must not be empty".into()));
    }
    Ok(text.to_string())
}
