use std::collections::BTreeMap;

use moodtunes_types::catalog;
use moodtunes_types::models::{Comment, Mood};

use super::{Alert, save_comment_alert};
use crate::comments::CommentsService;

/// Comments previewed under each mood card.
pub const RECENT_COMMENTS: usize = 5;

/// Home screen: one card per mood with its latest comments.
pub struct MoodGrid {
    service: CommentsService,
    pub recent: BTreeMap<Mood, Vec<Comment>>,
}

impl MoodGrid {
    pub fn new(service: CommentsService) -> Self {
        Self {
            service,
            recent: BTreeMap::new(),
        }
    }

    /// Refreshes every card. A mood whose board fails to load shows no comments.
    pub async fn recent_comments(&mut self) -> &BTreeMap<Mood, Vec<Comment>> {
        let mut recent = BTreeMap::new();
        for mood in Mood::ALL {
            let comments = match self.service.load(mood).await {
                Ok(comments) => latest(comments),
                Err(_) => Vec::new(),
            };
            recent.insert(mood, comments);
        }
        self.recent = recent;
        &self.recent
    }

    /// Adds (or edits, with `editing_id`) a comment from a mood card, then refreshes.
    pub async fn save_comment(&mut self, mood: Mood, editing_id: Option<&str>, text: &str) -> Option<Alert> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let saved = match editing_id {
            Some(id) => self.service.update(mood, id, text).await,
            None => self.service.add(mood, text).await.map(|_| ()),
        };
        match saved {
            Ok(()) => {
                self.recent_comments().await;
                None
            }
            Err(e) => Some(save_comment_alert(&e)),
        }
    }

    pub async fn delete_comment(&mut self, mood: Mood, id: &str) -> Option<Alert> {
        match self.service.delete(mood, id).await {
            Ok(()) => {
                self.recent_comments().await;
                None
            }
            Err(_) => Some(Alert::error("Failed to delete comment.")),
        }
    }

    /// `Ok(None)` for a blank query.
    pub fn search(&self, query: &str) -> Result<Option<Mood>, Alert> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        catalog::search_mood(query)
            .map(Some)
            .ok_or_else(|| Alert::new("No results", "Try another keyword."))
    }
}

fn latest(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by_key(|c| std::cmp::Reverse(c.last_activity()));
    comments.truncate(RECENT_COMMENTS);
    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, created_at: i64, updated_at: Option<i64>) -> Comment {
        Comment {
            id: id.into(),
            text: id.into(),
            created_at,
            updated_at,
            user_id: None,
            user_email: None,
            mood: Mood::Sad,
        }
    }

    #[test]
    fn latest_keeps_five_most_active() {
        let mut comments: Vec<_> = (0..7).map(|i| comment(&format!("c{}", i), i * 10, None)).collect();
        comments.push(comment("edited", 1, Some(1_000)));

        let ids: Vec<_> = latest(comments).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["edited", "c6", "c5", "c4", "c3"]);
    }
}
