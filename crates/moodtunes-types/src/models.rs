use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User tag for saved items created without a signed-in session.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Id prefix for saved items recovered from the local fallback store.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Id prefix for saved items that never reached the cloud.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Mood category. Partitions comments and groups artists for browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sad,
    Healing,
    Meditation,
    Inspiration,
    Family,
    Friendship,
    Dance,
    Country,
}

#[derive(Debug, Clone, Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Sad,
        Mood::Healing,
        Mood::Meditation,
        Mood::Inspiration,
        Mood::Family,
        Mood::Friendship,
        Mood::Dance,
        Mood::Country,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Healing => "healing",
            Mood::Meditation => "meditation",
            Mood::Inspiration => "inspiration",
            Mood::Family => "family",
            Mood::Friendship => "friendship",
            Mood::Dance => "dance",
            Mood::Country => "country",
        }
    }

    /// Name shown on the mood grid card, e.g. "Sad Songs".
    pub fn display_name(self) -> &'static str {
        match self {
            Mood::Sad => "Sad Songs",
            Mood::Healing => "Healing Songs",
            Mood::Meditation => "Meditation Songs",
            Mood::Inspiration => "Inspiration Songs",
            Mood::Family => "Family Songs",
            Mood::Friendship => "Friendship Songs",
            Mood::Dance => "Dance Songs",
            Mood::Country => "Country Songs",
        }
    }

    /// Heading of the mood's artist list, e.g. "SAD SONGS".
    pub fn title(self) -> String {
        self.display_name().to_uppercase()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// A comment left on a mood board. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub mood: Mood,
}

impl Comment {
    /// Most recent write time: the edit time if edited, else creation time.
    pub fn last_activity(&self) -> i64 {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// A user-scoped favorite. `user_id` is [`ANONYMOUS_USER`] for signed-out use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: String,
    pub text: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    pub user_id: String,
}

impl SavedItem {
    /// True when the item only exists on this device.
    pub fn is_local_only(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX) || self.id.starts_with(TEMP_ID_PREFIX)
    }
}
