use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use moodtunes_types::models::{ANONYMOUS_USER, LOCAL_ID_PREFIX, SavedItem, TEMP_ID_PREFIX};

use super::{Alert, LoadState};
use crate::auth::Session;
use crate::{now_millis, random_id};
use crate::saved::SavedItemsService;
use crate::storage::{LocalStorage, SAVED_ITEMS_KEY};

/// Favorites list. Signed-in users sync with the cloud on a best-effort
/// basis; the in-memory list is what the user sees either way.
pub struct SavedBoard {
    session: Option<Session>,
    service: SavedItemsService,
    storage: Arc<LocalStorage>,
    pub items: Vec<SavedItem>,
    pub state: LoadState,
    pub input: String,
    pub editing_id: Option<String>,
}

impl SavedBoard {
    pub fn new(session: Option<Session>, service: SavedItemsService, storage: Arc<LocalStorage>) -> Self {
        Self {
            session,
            service,
            storage,
            items: Vec::new(),
            state: LoadState::Loading,
            input: String::new(),
            editing_id: None,
        }
    }

    fn user_id(&self) -> &str {
        self.session.as_ref().map_or(ANONYMOUS_USER, |s| s.user_id.as_str())
    }

    pub async fn load(&mut self) -> Option<Alert> {
        self.state = LoadState::Loading;

        if let Some(session) = &self.session {
            match self.service.load(&session.user_id).await {
                Ok(items) => {
                    self.items = items;
                    self.state = LoadState::Loaded;
                    return None;
                }
                Err(e) => info!("Saved items cloud unavailable, using local storage: {}", e),
            }
        }

        match self.load_local() {
            Ok(Some(items)) => {
                self.items = items;
                self.state = LoadState::Loaded;
                None
            }
            Ok(None) => {
                self.state = LoadState::Loaded;
                None
            }
            Err(e) => {
                warn!("Error loading saved items: {}", e);
                self.state = LoadState::Error;
                Some(Alert::error("Failed to load saved items"))
            }
        }
    }

    fn load_local(&self) -> Result<Option<Vec<SavedItem>>> {
        let Some(stored) = self.storage.get_json::<Value>(SAVED_ITEMS_KEY)? else {
            return Ok(None);
        };
        let Value::Array(entries) = stored else {
            return Ok(Some(Vec::new()));
        };

        let now = now_millis();
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let fallback_id = format!("{}{}", LOCAL_ID_PREFIX, index);
                match entry {
                    Value::String(text) => SavedItem {
                        id: fallback_id,
                        text,
                        created_at: now,
                        updated_at: None,
                        user_id: self.user_id().to_string(),
                    },
                    other => SavedItem {
                        id: other
                            .get("id")
                            .and_then(Value::as_str)
                            .filter(|id| !id.is_empty())
                            .map_or(fallback_id, str::to_string),
                        text: other.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
                        created_at: other.get("createdAt").and_then(Value::as_i64).unwrap_or(now),
                        updated_at: None,
                        user_id: self.user_id().to_string(),
                    },
                }
            })
            .collect();
        Ok(Some(items))
    }

    /// Snapshot of the list texts under `savedItems`; an empty list is not written.
    fn backup(&self) {
        if self.items.is_empty() {
            return;
        }
        let texts: Vec<&str> = self.items.iter().map(|i| i.text.as_str()).collect();
        if let Err(e) = self.storage.set_json(SAVED_ITEMS_KEY, &texts) {
            warn!("Error saving to local storage: {}", e);
        }
    }

    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter().find(|i| i.id == id) else {
            return false;
        };
        self.input = item.text.clone();
        self.editing_id = Some(item.id.clone());
        true
    }

    /// Adds the input as a new item, or applies it to the item being edited.
    pub async fn save(&mut self) -> Option<Alert> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        let now = now_millis();

        match self.editing_id.take() {
            Some(id) => {
                if let Some(session) = &self.session {
                    if let Err(e) = self.service.update(&session.user_id, &id, &text).await {
                        info!("Cloud update failed, updating locally: {}", e);
                    }
                }
                for item in self.items.iter_mut().filter(|i| i.id == id) {
                    item.text = text.clone();
                    item.updated_at = Some(now);
                }
            }
            None => {
                let mut item = SavedItem {
                    id: format!("{}{}-{}", TEMP_ID_PREFIX, now, random_id()),
                    text: text.clone(),
                    created_at: now,
                    updated_at: None,
                    user_id: self.user_id().to_string(),
                };
                if let Some(session) = &self.session {
                    match self.service.add(&session.user_id, &text).await {
                        Ok(id) => item.id = id,
                        Err(e) => info!("Cloud add failed, saving locally: {}", e),
                    }
                }
                self.items.push(item);
            }
        }

        self.input.clear();
        self.backup();
        None
    }

    pub async fn delete(&mut self, id: &str) -> Option<Alert> {
        let local_only = id.starts_with(LOCAL_ID_PREFIX) || id.starts_with(TEMP_ID_PREFIX);
        if let Some(session) = &self.session {
            if !local_only {
                if let Err(e) = self.service.delete(&session.user_id, id).await {
                    info!("Cloud delete failed, deleting locally: {}", e);
                }
            }
        }
        self.items.retain(|i| i.id != id);
        self.backup();
        None
    }
}
