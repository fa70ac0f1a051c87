/// Database row types. These map directly to SQLite rows and stay
/// independent of the wire models in moodtunes-types.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub password: String,
    pub disabled: bool,
    pub created_at: String,
}

pub struct CommentRow {
    pub id: String,
    pub mood: String,
    pub text: String,
    /// Unix milliseconds
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

pub struct SavedItemRow {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}
