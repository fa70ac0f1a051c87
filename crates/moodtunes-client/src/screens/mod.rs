//! View-models behind each screen. Rendering is left to the embedding UI.

mod comment_board;
mod mood_grid;
mod saved_board;

pub use comment_board::{CommentBoard, Draft};
pub use mood_grid::{MoodGrid, RECENT_COMMENTS};
pub use saved_board::SavedBoard;

use crate::error::ServiceError;

/// Modal message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Error,
}

pub(crate) fn save_comment_alert(err: &ServiceError) -> Alert {
    if err.is_permission() {
        Alert::new(
            "Setup Required",
            "Comment permissions need to be configured on the server. Please check the setup guide.",
        )
    } else {
        Alert::error("Failed to save comment.")
    }
}
