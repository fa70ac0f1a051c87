use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use moodtunes_types::models::Mood;

use crate::comments::CommentsService;
use crate::storage::{LocalStorage, Stored, legacy_comments_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationCount {
    pub local: usize,
    pub cloud: usize,
}

#[derive(Debug, Deserialize)]
struct LegacyComment {
    text: String,
}

/// One-way copy of pre-cloud comment boards (`comments:{mood}`) to the cloud.
pub struct CommentsMigration {
    comments: CommentsService,
    storage: Arc<LocalStorage>,
}

impl CommentsMigration {
    pub fn new(comments: CommentsService, storage: Arc<LocalStorage>) -> Self {
        Self { comments, storage }
    }

    /// Adds every legacy entry of `mood` as an anonymous cloud comment and
    /// returns how many were readable. Unreadable entries and failed uploads
    /// are logged and skipped; the local copy is kept.
    pub async fn migrate_mood(&self, mood: Mood) -> Result<usize> {
        let Some(stored) = self.storage.get_json::<Value>(&legacy_comments_key(mood))? else {
            info!("No comments found for mood: {}", mood);
            return Ok(0);
        };
        let entries = match stored {
            Value::Array(entries) if !entries.is_empty() => entries,
            _ => {
                info!("No comments to migrate for mood: {}", mood);
                return Ok(0);
            }
        };

        let mut migrated = 0;
        for (index, entry) in entries.into_iter().enumerate() {
            let text = match serde_json::from_value::<Stored<LegacyComment>>(entry) {
                Ok(Stored::Text(text)) => text,
                Ok(Stored::Record(c)) => c.text,
                Err(e) => {
                    warn!("Skipping unreadable legacy comment {} for mood {}: {}", index, mood, e);
                    continue;
                }
            };
            migrated += 1;
            if let Err(e) = self.comments.add(mood, &text).await {
                error!("Failed to migrate comment for mood {}: {}", mood, e);
            }
        }

        info!("Migrated {} comments for mood: {}", migrated, mood);
        Ok(migrated)
    }

    pub async fn migrate_all(&self) -> BTreeMap<Mood, usize> {
        let mut migrated = BTreeMap::new();
        for mood in Mood::ALL {
            match self.migrate_mood(mood).await {
                Ok(n) => {
                    migrated.insert(mood, n);
                }
                Err(e) => error!("Failed to migrate comments for mood {}: {}", mood, e),
            }
        }
        migrated
    }

    /// Legacy and cloud comment counts per mood; `{0, 0}` where either side fails.
    pub async fn status(&self) -> BTreeMap<Mood, MigrationCount> {
        let mut status = BTreeMap::new();
        for mood in Mood::ALL {
            let count = match self.count(mood).await {
                Ok(count) => count,
                Err(e) => {
                    error!("Error checking migration status for mood {}: {}", mood, e);
                    MigrationCount::default()
                }
            };
            status.insert(mood, count);
        }
        status
    }

    async fn count(&self, mood: Mood) -> Result<MigrationCount> {
        let local = self
            .storage
            .get_json::<Value>(&legacy_comments_key(mood))?
            .and_then(|stored| stored.as_array().map(Vec::len))
            .unwrap_or(0);
        let cloud = self.comments.load(mood).await?.len();
        Ok(MigrationCount { local, cloud })
    }
}
