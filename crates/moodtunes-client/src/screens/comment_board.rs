use tracing::warn;

use moodtunes_types::models::{Comment, Mood};

use super::{Alert, LoadState, save_comment_alert};
use crate::auth::Session;
use crate::comments::CommentsService;
use crate::now_millis;
use crate::offline::OfflineComments;

/// Open comment editor. `editing_id` is `None` for a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub editing_id: Option<String>,
    pub text: String,
}

/// Comment list of one mood.
pub struct CommentBoard {
    mood: Mood,
    service: CommentsService,
    offline: OfflineComments,
    author: Option<Session>,
    pub comments: Vec<Comment>,
    pub state: LoadState,
    pub draft: Option<Draft>,
}

impl CommentBoard {
    pub fn new(
        mood: Mood,
        service: CommentsService,
        offline: OfflineComments,
        author: Option<Session>,
    ) -> Self {
        Self {
            mood,
            service,
            offline,
            author,
            comments: Vec::new(),
            state: LoadState::Loading,
            draft: None,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Cloud first. An unreachable or locked-down cloud falls back to the
    /// device's offline board without bothering the user.
    pub async fn load(&mut self) -> Option<Alert> {
        self.state = LoadState::Loading;
        match self.service.load(self.mood).await {
            Ok(comments) => {
                self.comments = comments;
                self.state = LoadState::Loaded;
                None
            }
            Err(e) if e.is_unavailable() => {
                warn!("Showing offline comments for {}", self.mood);
                self.comments = self.offline.load(self.mood);
                self.state = LoadState::Loaded;
                None
            }
            Err(_) => {
                self.state = LoadState::Error;
                Some(Alert::error("Failed to load comments."))
            }
        }
    }

    pub fn open_create(&mut self) {
        self.draft = Some(Draft::default());
    }

    /// Returns false when `id` is not on the board.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(comment) = self.comments.iter().find(|c| c.id == id) else {
            return false;
        };
        self.draft = Some(Draft {
            editing_id: Some(comment.id.clone()),
            text: comment.text.clone(),
        });
        true
    }

    pub fn set_draft_text(&mut self, text: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.text = text.to_string();
        }
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    /// Commits the open editor. The editor is closed whatever the outcome.
    pub async fn save_draft(&mut self) -> Option<Alert> {
        let draft = self.draft.take()?;
        let text = draft.text.trim();
        if text.is_empty() {
            return None;
        }

        match draft.editing_id {
            Some(id) => match self.service.update(self.mood, &id, text).await {
                Ok(()) => {
                    let now = now_millis();
                    for c in self.comments.iter_mut().filter(|c| c.id == id) {
                        c.text = text.to_string();
                        c.updated_at = Some(now);
                    }
                    None
                }
                Err(e) => Some(save_comment_alert(&e)),
            },
            None => match self.service.add(self.mood, text).await {
                Ok(id) => {
                    let comment = Comment {
                        id,
                        text: text.to_string(),
                        created_at: now_millis(),
                        updated_at: None,
                        user_id: self.author.as_ref().map(|s| s.user_id.clone()),
                        user_email: self.author.as_ref().map(|s| s.email.clone()),
                        mood: self.mood,
                    };
                    self.comments.insert(0, comment);
                    None
                }
                Err(e) => Some(save_comment_alert(&e)),
            },
        }
    }

    pub async fn delete_one(&mut self, id: &str) -> Option<Alert> {
        match self.service.delete(self.mood, id).await {
            Ok(()) => {
                self.comments.retain(|c| c.id != id);
                None
            }
            Err(_) => Some(Alert::error("Failed to delete comment.")),
        }
    }

    pub async fn clear_all(&mut self) -> Option<Alert> {
        match self.service.clear(self.mood).await {
            Ok(()) => {
                self.comments.clear();
                None
            }
            Err(_) => Some(Alert::error("Failed to clear comments.")),
        }
    }
}
