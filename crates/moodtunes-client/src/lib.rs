pub mod auth;
pub mod comments;
pub mod config;
pub mod connection;
pub mod error;
pub mod http;
pub mod migrate;
pub mod offline;
pub mod player;
pub mod preview;
pub mod saved;
pub mod screens;
pub mod storage;

use std::sync::Arc;

use rand::Rng;

use moodtunes_types::models::Mood;

use crate::auth::{AuthClient, Session};
use crate::comments::CommentsService;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::CloudClient;
use crate::migrate::CommentsMigration;
use crate::offline::OfflineComments;
use crate::player::SavedSongs;
use crate::preview::PreviewClient;
use crate::saved::SavedItemsService;
use crate::screens::{CommentBoard, MoodGrid, SavedBoard};
use crate::storage::LocalStorage;

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Ten random digits, used to keep locally minted ids unique.
pub(crate) fn random_id() -> String {
    rand::rng().random_range(1_000_000_000u64..10_000_000_000).to_string()
}

/// Everything a front end needs, wired against one server and one device store.
pub struct MoodTunes {
    pub cloud: CloudClient,
    pub storage: Arc<LocalStorage>,
    pub auth: AuthClient,
    pub comments: CommentsService,
    pub saved: SavedItemsService,
    pub offline: OfflineComments,
    pub preview: PreviewClient,
    pub saved_songs: SavedSongs,
}

impl MoodTunes {
    /// Opens local storage and restores any stored session.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let storage = Arc::new(LocalStorage::open(&config.storage_path));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: &ClientConfig, storage: Arc<LocalStorage>) -> Result<Self, ClientError> {
        let cloud = CloudClient::new(&config.api_url, config.timeout)?;
        let preview = PreviewClient::new(&config.preview_url, config.timeout)?;
        let auth = AuthClient::new(cloud.clone(), storage.clone());
        auth.restore();

        Ok(Self {
            comments: CommentsService::new(cloud.clone()),
            saved: SavedItemsService::new(cloud.clone()),
            offline: OfflineComments::new(storage.clone()),
            saved_songs: SavedSongs::new(storage.clone()),
            auth,
            preview,
            cloud,
            storage,
        })
    }

    pub fn session(&self) -> Option<Session> {
        self.auth.current()
    }

    pub fn comment_board(&self, mood: Mood) -> CommentBoard {
        CommentBoard::new(mood, self.comments.clone(), self.offline.clone(), self.session())
    }

    pub fn saved_board(&self) -> SavedBoard {
        SavedBoard::new(self.session(), self.saved.clone(), self.storage.clone())
    }

    pub fn mood_grid(&self) -> MoodGrid {
        MoodGrid::new(self.comments.clone())
    }

    pub fn migration(&self) -> CommentsMigration {
        CommentsMigration::new(self.comments.clone(), self.storage.clone())
    }
}
