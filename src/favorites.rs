//! Favorites ledger: CRUD over the single `favorites` document.
//!
//! The document holds the full [`RecipeDetail`] of every saved recipe in
//! insertion order, unique by id. Every mutation re-reads and re-writes the
//! whole list; overlapping writers are last-write-wins.

use std::sync::Arc;

use anyhow::Result;

use crate::models::RecipeDetail;
use crate::store::DocumentStore;

const FAVORITES_KEY: &str = "favorites";

pub struct FavoritesLedger {
    store: Arc<dyn DocumentStore>,
}

impl FavoritesLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn read(&self) -> Result<Vec<RecipeDetail>> {
        let raw = match self.store.get(FAVORITES_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str(&raw) {
            Ok(favorites) => Ok(favorites),
            Err(err) => {
                log::warn!("discarding unreadable favorites document: {}", err);
                Ok(Vec::new())
            }
        }
    }

    /// All saved recipes, insertion order.
    pub async fn list(&self) -> Result<Vec<RecipeDetail>> {
        self.read().await
    }

    pub async fn is_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.read().await?.iter().any(|recipe| recipe.id == id))
    }

    /// Add or remove `recipe`; returns the resulting membership state.
    pub async fn toggle(&self, recipe: &RecipeDetail) -> Result<bool> {
        let mut favorites = self.read().await?;
        let was_saved = favorites.iter().any(|saved| saved.id == recipe.id);
        if was_saved {
            favorites.retain(|saved| saved.id != recipe.id);
        } else {
            favorites.push(recipe.clone());
        }
        self.store
            .set(FAVORITES_KEY, &serde_json::to_string(&favorites)?)
            .await?;
        Ok(!was_saved)
    }

    /// Saved recipes whose name contains `query`, case-insensitive.
    /// A blank query returns everything.
    pub async fn filter_by_name(&self, query: &str) -> Result<Vec<RecipeDetail>> {
        let favorites = self.read().await?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(favorites);
        }
        Ok(favorites
            .into_iter()
            .filter(|recipe| recipe.name.to_lowercase().contains(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn recipe(id: &str, name: &str) -> RecipeDetail {
        RecipeDetail {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            area: None,
            instructions: String::new(),
            thumbnail: None,
            youtube: None,
            ingredients: Vec::new(),
        }
    }

    fn ledger() -> FavoritesLedger {
        FavoritesLedger::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        assert!(ledger().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let ledger = ledger();
        let handi = recipe("52795", "Chicken Handi");

        assert!(ledger.toggle(&handi).await.unwrap());
        assert!(ledger.is_favorite("52795").await.unwrap());

        assert!(!ledger.toggle(&handi).await.unwrap());
        assert!(!ledger.is_favorite("52795").await.unwrap());
    }

    #[tokio::test]
    async fn test_double_toggle_restores_original_contents() {
        let ledger = ledger();
        let kept = recipe("1", "Kept");
        let churned = recipe("2", "Churned");

        ledger.toggle(&kept).await.unwrap();
        let before = ledger.list().await.unwrap();

        ledger.toggle(&churned).await.unwrap();
        ledger.toggle(&churned).await.unwrap();

        assert_eq!(ledger.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_no_duplicate_ids_ever() {
        let ledger = ledger();
        let first = recipe("9", "Original");
        let replay = recipe("9", "Replayed");

        ledger.toggle(&first).await.unwrap();
        // Toggling the same id again removes it, regardless of payload.
        assert!(!ledger.toggle(&replay).await.unwrap());
        assert!(ledger.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let ledger = ledger();
        for (id, name) in [("1", "Alpha"), ("2", "Beta"), ("3", "Gamma")] {
            ledger.toggle(&recipe(id, name)).await.unwrap();
        }
        ledger.toggle(&recipe("2", "Beta")).await.unwrap();

        let names: Vec<String> = ledger
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[tokio::test]
    async fn test_filter_by_name_case_insensitive() {
        let ledger = ledger();
        ledger.toggle(&recipe("1", "Chicken Handi")).await.unwrap();
        ledger.toggle(&recipe("2", "Beef Wellington")).await.unwrap();

        let hits = ledger.filter_by_name("chick").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chicken Handi");

        assert_eq!(ledger.filter_by_name("  ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_document_degrades_to_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.set("favorites", "not json").await.unwrap();
        let ledger = FavoritesLedger::new(store);
        assert!(ledger.list().await.unwrap().is_empty());
    }
}
