//! Core data models for AI Chef.
//!
//! These types represent the recipes, ingredient pairs, and weekday keys that
//! flow through the search engine, the ledgers, and the detail cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recipe summary as returned by the lookup gateway's filter endpoints.
///
/// Field names map onto TheMealDB's wire shape (`idMeal`, `strMeal`,
/// `strMealThumb`); ids are unique within any result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
}

/// One (ingredient, measure) pair from a recipe's sparse slot list.
///
/// The measure may be empty; the ingredient never is, since empty slots
/// are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub ingredient: String,
    pub measure: String,
}

impl IngredientEntry {
    /// Display form used for grocery list entries, e.g. `"1 cup flour"`.
    pub fn display(&self) -> String {
        if self.measure.is_empty() {
            self.ingredient.clone()
        } else {
            format!("{} {}", self.measure, self.ingredient)
        }
    }
}

/// A full recipe as persisted in favorites and the detail cache.
///
/// The gateway's 20 sparse `strIngredient{n}`/`strMeasure{n}` slots are
/// collapsed into `ingredients` at parse time; everything else carries over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: String,
    pub thumbnail: Option<String>,
    pub youtube: Option<String>,
    pub ingredients: Vec<IngredientEntry>,
}

impl RecipeDetail {
    /// The summary view of this recipe.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }

    /// Grocery-list form of the ingredient list, one string per entry.
    pub fn grocery_items(&self) -> Vec<String> {
        self.ingredients.iter().map(IngredientEntry::display).collect()
    }
}

/// Canonical weekday keys for the meal plan document.
///
/// Serializes to the full English day name, which is also the JSON object
/// key used in the persisted `mealPlan` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first (the planner's display order).
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Case-insensitive; accepts the full day name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("not a weekday: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_case_insensitive() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!(" SUNDAY ".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("someday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_roundtrips_as_json_map_key() {
        let mut plan = std::collections::HashMap::new();
        plan.insert(Weekday::Friday, "tacos".to_string());
        let raw = serde_json::to_string(&plan).unwrap();
        assert!(raw.contains("\"Friday\""));
        let restored: std::collections::HashMap<Weekday, String> =
            serde_json::from_str(&raw).unwrap();
        assert_eq!(restored.get(&Weekday::Friday).unwrap(), "tacos");
    }

    #[test]
    fn test_ingredient_display_skips_empty_measure() {
        let with = IngredientEntry {
            ingredient: "flour".into(),
            measure: "1 cup".into(),
        };
        let without = IngredientEntry {
            ingredient: "salt".into(),
            measure: String::new(),
        };
        assert_eq!(with.display(), "1 cup flour");
        assert_eq!(without.display(), "salt");
    }
}
