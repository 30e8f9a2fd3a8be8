//! Grocery list accumulator over the single `groceryList` document.
//!
//! A flat list of ingredient strings; duplicates are allowed and identity is
//! positional, so removal works on a snapshot index and callers must
//! re-fetch before issuing another indexed removal.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::store::DocumentStore;

const GROCERY_KEY: &str = "groceryList";

pub struct GroceryList {
    store: Arc<dyn DocumentStore>,
}

impl GroceryList {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn read(&self) -> Result<Vec<String>> {
        let raw = match self.store.get(GROCERY_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!("discarding unreadable grocery document: {}", err);
                Ok(Vec::new())
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        self.read().await
    }

    /// Append `items` to the end, keeping duplicates.
    pub async fn add_all(&self, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let mut list = self.read().await?;
        list.extend(items.iter().cloned());
        self.store
            .set(GROCERY_KEY, &serde_json::to_string(&list)?)
            .await?;
        Ok(())
    }

    /// Remove the item at `index` in the current snapshot, returning it.
    /// A stale or out-of-range index is an error and the list is untouched.
    pub async fn remove_at(&self, index: usize) -> Result<String> {
        let mut list = self.read().await?;
        if index >= list.len() {
            bail!(
                "no grocery item at index {} (list has {})",
                index,
                list.len()
            );
        }
        let removed = list.remove(index);
        self.store
            .set(GROCERY_KEY, &serde_json::to_string(&list)?)
            .await?;
        Ok(removed)
    }

    /// Delete the document entirely.
    pub async fn clear(&self) -> Result<()> {
        self.store.delete(GROCERY_KEY).await
    }
}
