//! Device-local key/value store backing every offline fallback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

pub const SAVED_ITEMS_KEY: &str = "savedItems";
pub const SAVED_SONGS_KEY: &str = "saved:songs";
pub const SESSION_KEY: &str = "auth:session";

pub fn offline_comments_key(mood: impl std::fmt::Display) -> String {
    format!("offline_comments:{}", mood)
}

pub fn legacy_comments_key(mood: impl std::fmt::Display) -> String {
    format!("comments:{}", mood)
}

enum Backend {
    Sqlite(Mutex<Connection>),
    Memory(Mutex<HashMap<String, String>>),
}

pub struct LocalStorage {
    backend: Backend,
}

impl LocalStorage {
    /// Opens the SQLite store, or degrades to an in-memory map for the
    /// lifetime of the process if the file cannot be used.
    pub fn open(path: &Path) -> Self {
        match open_sqlite(path) {
            Ok(conn) => {
                info!("Local storage opened at {}", path.display());
                Self {
                    backend: Backend::Sqlite(Mutex::new(conn)),
                }
            }
            Err(e) => {
                warn!(
                    "Local storage unavailable at {} ({}), using in-memory store",
                    path.display(),
                    e
                );
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Sqlite(_))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                let conn = lock(conn)?;
                let value = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
                    .optional()?;
                Ok(value)
            }
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                lock(conn)?.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![key, value],
                )?;
            }
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                lock(conn)?.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            }
            Backend::Memory(map) => {
                lock(map)?.remove(key);
            }
        }
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set_item(key, &serde_json::to_string(value)?)
    }
}

/// A stored list entry: either a bare string from older builds or a full record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Stored<T> {
    Text(String),
    Record(T),
}

fn open_sqlite(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    Ok(conn)
}

fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    m.lock().map_err(|e| anyhow::anyhow!("local storage lock poisoned: {}", e))
}
