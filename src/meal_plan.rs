//! Weekly meal plan ledger over the single `mealPlan` document.
//!
//! A map from the seven canonical weekday names to one free-text meal
//! description each. A missing key means "unset"; an empty string is a
//! stored value, not a removal.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use crate::models::Weekday;
use crate::store::DocumentStore;

const MEAL_PLAN_KEY: &str = "mealPlan";

pub struct MealPlanLedger {
    store: Arc<dyn DocumentStore>,
}

impl MealPlanLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<HashMap<Weekday, String>> {
        let raw = match self.store.get(MEAL_PLAN_KEY).await? {
            Some(raw) => raw,
            None => return Ok(HashMap::new()),
        };
        match serde_json::from_str(&raw) {
            Ok(plan) => Ok(plan),
            Err(err) => {
                log::warn!("discarding unreadable meal plan document: {}", err);
                Ok(HashMap::new())
            }
        }
    }

    /// Upsert one day and persist the whole map.
    pub async fn set(&self, day: Weekday, meal: &str) -> Result<()> {
        let mut plan = self.get().await?;
        plan.insert(day, meal.to_string());
        self.store
            .set(MEAL_PLAN_KEY, &serde_json::to_string(&plan)?)
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.delete(MEAL_PLAN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn ledger() -> MealPlanLedger {
        MealPlanLedger::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_set_and_get_single_day() {
        let plan = ledger();
        plan.set(Weekday::Monday, "dal and rice").await.unwrap();

        let stored = plan.get().await.unwrap();
        assert_eq!(stored.get(&Weekday::Monday).unwrap(), "dal and rice");
        assert!(!stored.contains_key(&Weekday::Tuesday));
    }

    #[tokio::test]
    async fn test_upsert_replaces_one_day_only() {
        let plan = ledger();
        plan.set(Weekday::Monday, "soup").await.unwrap();
        plan.set(Weekday::Friday, "pizza").await.unwrap();
        plan.set(Weekday::Monday, "stew").await.unwrap();

        let stored = plan.get().await.unwrap();
        assert_eq!(stored.get(&Weekday::Monday).unwrap(), "stew");
        assert_eq!(stored.get(&Weekday::Friday).unwrap(), "pizza");
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_text_is_stored_not_removed() {
        let plan = ledger();
        plan.set(Weekday::Sunday, "roast").await.unwrap();
        plan.set(Weekday::Sunday, "").await.unwrap();

        let stored = plan.get().await.unwrap();
        assert_eq!(stored.get(&Weekday::Sunday).unwrap(), "");
    }

    #[tokio::test]
    async fn test_clear_empties_the_plan() {
        let plan = ledger();
        plan.set(Weekday::Wednesday, "noodles").await.unwrap();
        plan.clear().await.unwrap();
        assert!(plan.get().await.unwrap().is_empty());
    }
}
