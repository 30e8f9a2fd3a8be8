//! The local document store.
//!
//! Every persisted entity in AI Chef (favorites, grocery list, meal plan,
//! recent searches, cached recipe details) lives as one JSON-encoded string
//! under one exact key. The [`DocumentStore`] trait captures that surface
//! (get/set/delete by key, nothing else) so the ledgers stay independent of
//! the backing engine.
//!
//! Two implementations are provided:
//! - **[`SqliteStore`]** — the real on-disk store, one `documents` table.
//! - **[`InMemoryStore`]** — `RwLock<HashMap>` backing for tests.
//!
//! Keys are independent documents. There are no cross-key transactions; a
//! read-modify-write cycle on the same key from two overlapping operations
//! is last-write-wins.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::config::Config;

/// Abstract key-value document store.
///
/// Implementations must be `Send + Sync`; all values are JSON-encoded
/// strings owned by the calling ledger.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` entirely. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// SQLite-backed document store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the store at the configured path, creating the database file
    /// and schema on first use.
    pub async fn open(config: &Config) -> Result<Self> {
        let db_path = &config.store.path;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM documents WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO documents (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM documents WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory store for tests.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("favorites").await.unwrap(), None);

        store.set("favorites", "[]").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap().unwrap(), "[]");

        store.set("favorites", "[1]").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap().unwrap(), "[1]");

        store.delete("favorites").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = InMemoryStore::new();
        store.delete("never-written").await.unwrap();
    }

    #[tokio::test]
    async fn test_sqlite_roundtrip_and_persistence() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.store.path = tmp.path().join("chef.sqlite");

        {
            let store = SqliteStore::open(&config).await.unwrap();
            store.set("groceryList", r#"["2 eggs"]"#).await.unwrap();
            store.set("mealPlan", "{}").await.unwrap();
            store.delete("mealPlan").await.unwrap();
        }

        // Reopen: values survive, deleted keys stay gone
        let store = SqliteStore::open(&config).await.unwrap();
        assert_eq!(
            store.get("groceryList").await.unwrap().unwrap(),
            r#"["2 eggs"]"#
        );
        assert_eq!(store.get("mealPlan").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_upsert_replaces() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.store.path = tmp.path().join("chef.sqlite");

        let store = SqliteStore::open(&config).await.unwrap();
        store.set("recentSearches", r#"["a"]"#).await.unwrap();
        store.set("recentSearches", r#"["b","a"]"#).await.unwrap();
        assert_eq!(
            store.get("recentSearches").await.unwrap().unwrap(),
            r#"["b","a"]"#
        );
    }
}
