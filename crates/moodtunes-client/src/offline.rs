use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use tracing::error;

use moodtunes_types::models::{Comment, Mood};

use crate::{now_millis, random_id};
use crate::storage::{LocalStorage, Stored, offline_comments_key};

/// Comment board kept on the device, used while the cloud is unreachable.
#[derive(Clone)]
pub struct OfflineComments {
    storage: Arc<LocalStorage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredComment {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    user_email: Option<String>,
    #[serde(default)]
    mood: Option<String>,
}

impl OfflineComments {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    /// Most recent activity first. Unreadable data yields an empty board.
    pub fn load(&self, mood: Mood) -> Vec<Comment> {
        match self.read(mood) {
            Ok(mut comments) => {
                comments.sort_by_key(|c| std::cmp::Reverse(c.last_activity()));
                comments
            }
            Err(e) => {
                error!("Error loading offline comments for {}: {}", mood, e);
                Vec::new()
            }
        }
    }

    pub fn add(
        &self,
        mood: Mood,
        text: &str,
        user_id: Option<String>,
        user_email: Option<String>,
    ) -> Result<String> {
        let mut comments = self.read(mood)?;
        let now = now_millis();
        let comment = Comment {
            id: format!("{}-{}", now, random_id()),
            text: text.trim().to_string(),
            created_at: now,
            updated_at: None,
            user_id,
            user_email,
            mood,
        };
        let id = comment.id.clone();
        comments.push(comment);
        self.write(mood, &comments)?;
        Ok(id)
    }

    pub fn update(&self, mood: Mood, id: &str, text: &str) -> Result<()> {
        let mut comments = self.read(mood)?;
        let now = now_millis();
        for comment in comments.iter_mut().filter(|c| c.id == id) {
            comment.text = text.trim().to_string();
            comment.updated_at = Some(now);
        }
        self.write(mood, &comments)
    }

    pub fn delete(&self, mood: Mood, id: &str) -> Result<()> {
        let mut comments = self.read(mood)?;
        comments.retain(|c| c.id != id);
        self.write(mood, &comments)
    }

    pub fn clear(&self, mood: Mood) -> Result<()> {
        self.storage.remove_item(&offline_comments_key(mood))
    }

    fn read(&self, mood: Mood) -> Result<Vec<Comment>> {
        let entries: Vec<Stored<StoredComment>> = self
            .storage
            .get_json(&offline_comments_key(mood))?
            .unwrap_or_default();
        Ok(entries.into_iter().map(|e| normalize(e, mood)).collect())
    }

    fn write(&self, mood: Mood, comments: &[Comment]) -> Result<()> {
        self.storage.set_json(&offline_comments_key(mood), comments)
    }
}

fn normalize(entry: Stored<StoredComment>, mood: Mood) -> Comment {
    match entry {
        Stored::Text(text) => Comment {
            id: random_id(),
            text,
            created_at: now_millis(),
            updated_at: None,
            user_id: None,
            user_email: None,
            mood,
        },
        Stored::Record(c) => Comment {
            id: c.id.unwrap_or_else(random_id),
            text: c.text,
            created_at: c.created_at.unwrap_or(0),
            updated_at: c.updated_at,
            user_id: c.user_id,
            user_email: c.user_email,
            mood: c.mood.and_then(|m| m.parse().ok()).unwrap_or(mood),
        },
    }
}
