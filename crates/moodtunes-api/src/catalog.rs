use axum::{Json, extract::Path};

use moodtunes_types::api::MoodSummary;
use moodtunes_types::catalog::{self, Artist, MoodArtist, Song};
use moodtunes_types::models::Mood;

use crate::comments::parse_mood;
use crate::error::ApiError;

pub async fn list_moods() -> Json<Vec<MoodSummary>> {
    Json(
        Mood::ALL
            .into_iter()
            .map(|m| MoodSummary {
                id: m,
                name: m.display_name().to_string(),
                title: m.title(),
            })
            .collect(),
    )
}

pub async fn mood_artists(Path(mood): Path<String>) -> Result<Json<Vec<MoodArtist>>, ApiError> {
    let mood = parse_mood(&mood)?;
    Ok(Json(catalog::artists_for_mood(mood)))
}

pub async fn list_artists() -> Json<&'static [Artist]> {
    Json(catalog::ARTISTS)
}

pub async fn artist_songs(Path(artist_id): Path<String>) -> Result<Json<&'static [Song]>, ApiError> {
    let artist = catalog::find_artist(&artist_id).ok_or(ApiError::NotFound("artist"))?;
    Ok(Json(artist.songs))
}
