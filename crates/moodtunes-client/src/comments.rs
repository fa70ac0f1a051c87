use reqwest::Method;
use tracing::{error, warn};

use moodtunes_types::api::{CreatedResponse, TextRequest};
use moodtunes_types::models::{Comment, Mood};

use crate::error::{ClientError, ServiceError};
use crate::http::CloudClient;

/// Cloud comment board for every mood. One round trip per call.
#[derive(Clone)]
pub struct CommentsService {
    cloud: CloudClient,
}

impl CommentsService {
    pub fn new(cloud: CloudClient) -> Self {
        Self { cloud }
    }

    /// Newest first by creation time.
    pub async fn load(&self, mood: Mood) -> Result<Vec<Comment>, ServiceError> {
        self.cloud
            .get_json(&board_path(mood))
            .await
            .map_err(|e| failed("load comments", e))
    }

    pub async fn add(&self, mood: Mood, text: &str) -> Result<String, ServiceError> {
        let created: CreatedResponse = self
            .cloud
            .post_json(&board_path(mood), &TextRequest { text: text.to_string() })
            .await
            .map_err(|e| failed("add comment", e))?;
        Ok(created.id)
    }

    pub async fn update(&self, mood: Mood, id: &str, text: &str) -> Result<(), ServiceError> {
        self.cloud
            .send(
                Method::PATCH,
                &comment_path(mood, id),
                Some(&TextRequest { text: text.to_string() }),
            )
            .await
            .map_err(|e| failed("update comment", e))
    }

    pub async fn delete(&self, mood: Mood, id: &str) -> Result<(), ServiceError> {
        self.cloud
            .delete(&comment_path(mood, id))
            .await
            .map_err(|e| failed("delete comment", e))
    }

    pub async fn clear(&self, mood: Mood) -> Result<(), ServiceError> {
        self.cloud
            .delete(&board_path(mood))
            .await
            .map_err(|e| failed("clear comments", e))
    }
}

fn board_path(mood: Mood) -> String {
    format!("/moods/{}/comments", mood)
}

fn comment_path(mood: Mood, id: &str) -> String {
    format!("/moods/{}/comments/{}", mood, id)
}

pub(crate) fn failed(operation: &'static str, source: ClientError) -> ServiceError {
    let err = ServiceError::new(operation, source);
    if err.is_unavailable() {
        warn!("Cloud unavailable ({}): {}", operation, err.source);
    } else {
        error!("Failed to {}: {}", operation, err.source);
    }
    err
}
