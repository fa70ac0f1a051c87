use crate::models::{CommentRow, SavedItemRow, UserRow};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

impl Database {
    // -- Health --

    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        display_name: Option<&str>,
        password_hash: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, display_name, password) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, email, display_name, password_hash],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Returns false if no such user exists.
    pub fn set_user_disabled(&self, id: &str, disabled: bool) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE users SET disabled = ?1 WHERE id = ?2",
                rusqlite::params![disabled, id],
            )?;
            Ok(n > 0)
        })
    }

    // -- Comments --

    pub fn insert_comment(&self, row: &CommentRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, mood, text, created_at, updated_at, user_id, user_email)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    row.id,
                    row.mood,
                    row.text,
                    row.created_at,
                    row.updated_at,
                    row.user_id,
                    row.user_email
                ],
            )?;
            Ok(())
        })
    }

    /// All comments of a mood, newest first. Ties on the millisecond go to the
    /// later insert.
    pub fn list_comments(&self, mood: &str) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, mood, text, created_at, updated_at, user_id, user_email
                 FROM comments
                 WHERE mood = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([mood], comment_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Returns false if the comment does not exist in this mood.
    pub fn update_comment(&self, mood: &str, id: &str, text: &str, updated_at: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE comments SET text = ?1, updated_at = ?2 WHERE id = ?3 AND mood = ?4",
                rusqlite::params![text, updated_at, id, mood],
            )?;
            Ok(n > 0)
        })
    }

    pub fn delete_comment(&self, mood: &str, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM comments WHERE id = ?1 AND mood = ?2",
                rusqlite::params![id, mood],
            )?;
            Ok(n > 0)
        })
    }

    /// Deletes every comment of a mood. Returns how many went.
    pub fn clear_comments(&self, mood: &str) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM comments WHERE mood = ?1", [mood])?))
    }

    // -- Saved items --

    pub fn insert_saved_item(&self, row: &SavedItemRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO saved_items (id, user_id, text, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![row.id, row.user_id, row.text, row.created_at, row.updated_at],
            )?;
            Ok(())
        })
    }

    pub fn list_saved_items(&self, user_id: &str) -> Result<Vec<SavedItemRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, text, created_at, updated_at
                 FROM saved_items
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(SavedItemRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        text: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_saved_item(&self, user_id: &str, id: &str, text: &str, updated_at: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE saved_items SET text = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
                rusqlite::params![text, updated_at, id, user_id],
            )?;
            Ok(n > 0)
        })
    }

    pub fn delete_saved_item(&self, user_id: &str, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM saved_items WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id],
            )?;
            Ok(n > 0)
        })
    }

    pub fn clear_saved_items(&self, user_id: &str) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM saved_items WHERE user_id = ?1", [user_id])?))
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!(
        "SELECT id, email, display_name, password, disabled, created_at FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                display_name: row.get(2)?,
                password: row.get(3)?,
                disabled: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// True when `err` is a UNIQUE/PRIMARY KEY conflict raised by SQLite.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn comment_row(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        mood: row.get(1)?,
        text: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        user_id: row.get(5)?,
        user_email: row.get(6)?,
    })
}
