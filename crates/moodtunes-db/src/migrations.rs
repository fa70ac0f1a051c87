use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id            TEXT PRIMARY KEY,
                email         TEXT NOT NULL UNIQUE,
                display_name  TEXT,
                password      TEXT NOT NULL,
                disabled      INTEGER NOT NULL DEFAULT 0,
                created_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- One row per comment; mood is the partition key.
            CREATE TABLE comments (
                id          TEXT PRIMARY KEY,
                mood        TEXT NOT NULL,
                text        TEXT NOT NULL,
                created_at  INTEGER NOT NULL,
                updated_at  INTEGER,
                user_id     TEXT,
                user_email  TEXT
            );

            CREATE INDEX idx_comments_mood
                ON comments(mood, created_at);

            CREATE TABLE saved_items (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL,
                text        TEXT NOT NULL,
                created_at  INTEGER NOT NULL,
                updated_at  INTEGER
            );

            CREATE INDEX idx_saved_items_user
                ON saved_items(user_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
