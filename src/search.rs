use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::gateway::RecipeGateway;
use crate::models::RecipeSummary;

/// Result of a multi-ingredient search.
///
/// `matches` keeps the order of the first ingredient's result list. A term
/// whose gateway call failed is recorded in `failed_terms`; callers treat a
/// non-empty `failed_terms` as "search failed", distinct from a genuine
/// zero-match outcome. `phrase` echoes the queried input so interleaving
/// callers can check request identity before applying results.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub phrase: String,
    pub matches: Vec<RecipeSummary>,
    pub failed_terms: Vec<String>,
}

impl SearchOutcome {
    pub fn is_failure(&self) -> bool {
        !self.failed_terms.is_empty()
    }
}

/// Search recipes containing every ingredient in the whitespace-separated
/// `phrase`: one gateway call per ingredient, intersected by recipe id.
pub async fn search_by_ingredients(
    gateway: &dyn RecipeGateway,
    phrase: &str,
) -> Result<SearchOutcome> {
    let terms: Vec<&str> = phrase.split_whitespace().collect();
    if terms.is_empty() {
        bail!("search phrase must not be empty");
    }

    let mut matches: Option<Vec<RecipeSummary>> = None;
    let mut failed_terms = Vec::new();

    for term in terms {
        // Once the intersection is empty no further term can widen it.
        if matches.as_ref().is_some_and(|m| m.is_empty()) {
            break;
        }

        match gateway.filter_by_ingredient(term).await {
            Ok(found) => {
                matches = Some(match matches.take() {
                    None => found,
                    Some(current) => {
                        let ids: HashSet<&str> = found.iter().map(|r| r.id.as_str()).collect();
                        current
                            .into_iter()
                            .filter(|r| ids.contains(r.id.as_str()))
                            .collect()
                    }
                });
            }
            Err(err) => {
                // A failed term matches nothing; the search itself still
                // completes so the caller can report which term broke.
                log::warn!("ingredient lookup failed for '{}': {:#}", term, err);
                failed_terms.push(term.to_string());
                matches = Some(Vec::new());
            }
        }
    }

    Ok(SearchOutcome {
        phrase: phrase.to_string(),
        matches: matches.unwrap_or_default(),
        failed_terms,
    })
}

/// Single-call category search; no intersection involved.
pub async fn search_by_category(
    gateway: &dyn RecipeGateway,
    category: &str,
) -> Result<Vec<RecipeSummary>> {
    let category = category.trim();
    if category.is_empty() {
        bail!("category must not be empty");
    }
    gateway.filter_by_category(category).await
}
