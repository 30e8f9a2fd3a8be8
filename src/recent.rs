//! Bounded recent-search ledger over the single `recentSearches` document.

use std::sync::Arc;

use anyhow::Result;

use crate::store::DocumentStore;

const RECENT_KEY: &str = "recentSearches";

/// Most recent distinct queries kept, newest first.
pub const MAX_RECENT: usize = 5;

pub struct RecentSearches {
    store: Arc<dyn DocumentStore>,
}

impl RecentSearches {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn read(&self) -> Result<Vec<String>> {
        let raw = match self.store.get(RECENT_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                log::warn!("discarding unreadable recent-search document: {}", err);
                Ok(Vec::new())
            }
        }
    }

    /// Record `query` at the front, deduplicating and truncating to
    /// [`MAX_RECENT`]. Blank queries are ignored.
    pub async fn record(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let mut entries = self.read().await?;
        entries.retain(|existing| existing != query);
        entries.insert(0, query.to_string());
        entries.truncate(MAX_RECENT);
        self.store
            .set(RECENT_KEY, &serde_json::to_string(&entries)?)
            .await?;
        Ok(())
    }

    /// Queries most-recent-first.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.read().await
    }
}
