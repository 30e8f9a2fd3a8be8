//! Write-through, read-fallback recipe detail cache.
//!
//! On a successful remote fetch the detail is persisted under
//! `recipe-{id}`; the cached copy is consulted only when the fetch fails.
//! Entries never expire; only a later successful fetch refreshes them.

use anyhow::Result;

use crate::gateway::RecipeGateway;
use crate::models::RecipeDetail;
use crate::store::DocumentStore;

fn cache_key(id: &str) -> String {
    format!("recipe-{}", id)
}

/// Fetch a recipe by id, falling back to the cached copy on failure.
///
/// `Ok(None)` is the "not found, no cache" outcome: the remote fetch did
/// not produce a recipe and no prior success had cached one. A cache write
/// failure after a successful fetch never discards the fetched detail.
pub async fn fetch_or_cached(
    gateway: &dyn RecipeGateway,
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Option<RecipeDetail>> {
    match gateway.lookup(id).await {
        Ok(Some(detail)) => {
            match serde_json::to_string(&detail) {
                Ok(raw) => {
                    if let Err(err) = store.set(&cache_key(id), &raw).await {
                        log::warn!("failed to cache recipe {}: {:#}", id, err);
                    }
                }
                Err(err) => log::warn!("failed to encode recipe {} for caching: {}", id, err),
            }
            Ok(Some(detail))
        }
        Ok(None) => read_cached(store, id).await,
        Err(err) => {
            log::warn!("recipe lookup failed for {}: {:#}; trying cache", id, err);
            read_cached(store, id).await
        }
    }
}

async fn read_cached(store: &dyn DocumentStore, id: &str) -> Result<Option<RecipeDetail>> {
    let raw = match store.get(&cache_key(id)).await? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match serde_json::from_str(&raw) {
        Ok(detail) => Ok(Some(detail)),
        Err(err) => {
            log::warn!("discarding unreadable cached recipe {}: {}", id, err);
            Ok(None)
        }
    }
}
