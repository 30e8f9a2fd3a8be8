//! Recipe lookup gateway.
//!
//! Defines the [`RecipeGateway`] trait and the [`MealDbGateway`]
//! implementation over TheMealDB's public JSON API:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`filter_by_ingredient`](RecipeGateway::filter_by_ingredient) | `GET filter.php?i=<ingredient>` |
//! | [`filter_by_category`](RecipeGateway::filter_by_category) | `GET filter.php?c=<category>` |
//! | [`lookup`](RecipeGateway::lookup) | `GET lookup.php?i=<id>` |
//! | [`list_categories`](RecipeGateway::list_categories) | `GET list.php?c=list` |
//!
//! Every endpoint answers `{"meals": [...]}` with `null` standing in for an
//! empty result set. The full-detail shape carries up to 20 sparse
//! 1-indexed `strIngredient{n}`/`strMeasure{n}` slots; a slot counts only if
//! its ingredient string is non-empty after trimming.
//!
//! The gateway is read-only and unauthenticated. Calls are not retried;
//! failures surface to the caller, which decides whether a cached or empty
//! result stands in.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::models::{IngredientEntry, RecipeDetail, RecipeSummary};

/// Number of ingredient/measure slot pairs in the detail wire format.
const INGREDIENT_SLOTS: usize = 20;

/// Read-only interface to the remote recipe database.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Recipes whose ingredient list contains `ingredient`.
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<RecipeSummary>>;

    /// Recipes belonging to `category`.
    async fn filter_by_category(&self, category: &str) -> Result<Vec<RecipeSummary>>;

    /// Full detail for one recipe id; `None` when the id is unknown.
    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>>;

    /// All category names.
    async fn list_categories(&self) -> Result<Vec<String>>;
}

#[derive(Deserialize)]
struct FilterEnvelope {
    meals: Option<Vec<RecipeSummary>>,
}

#[derive(Deserialize)]
struct CategoryRow {
    #[serde(rename = "strCategory")]
    category: String,
}

#[derive(Deserialize)]
struct CategoryEnvelope {
    meals: Option<Vec<CategoryRow>>,
}

/// [`RecipeGateway`] backed by TheMealDB's HTTP API.
pub struct MealDbGateway {
    client: reqwest::Client,
    base_url: String,
}

impl MealDbGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn filter(&self, param: &str, value: &str) -> Result<Vec<RecipeSummary>> {
        let json = self.get_json("filter.php", &[(param, value)]).await?;
        let envelope: FilterEnvelope = serde_json::from_value(json)?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeGateway for MealDbGateway {
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<RecipeSummary>> {
        self.filter("i", ingredient).await
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<RecipeSummary>> {
        self.filter("c", category).await
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>> {
        let json = self.get_json("lookup.php", &[("i", id)]).await?;
        let meal = json
            .get("meals")
            .and_then(Value::as_array)
            .and_then(|meals| meals.first());
        match meal {
            Some(meal) => Ok(Some(parse_detail(meal)?)),
            None => Ok(None),
        }
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        let json = self.get_json("list.php", &[("c", "list")]).await?;
        let envelope: CategoryEnvelope = serde_json::from_value(json)?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.category)
            .collect())
    }
}

/// Parse one full-detail meal object, collapsing the sparse ingredient
/// slots into an ordered list.
fn parse_detail(meal: &Value) -> Result<RecipeDetail> {
    let id = str_field(meal, "idMeal").ok_or_else(|| anyhow!("meal record missing idMeal"))?;
    let name = str_field(meal, "strMeal").ok_or_else(|| anyhow!("meal record missing strMeal"))?;

    let mut ingredients = Vec::new();
    for slot in 1..=INGREDIENT_SLOTS {
        let ingredient = match str_field(meal, &format!("strIngredient{}", slot)) {
            Some(value) => value,
            None => continue,
        };
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            continue;
        }
        let measure = str_field(meal, &format!("strMeasure{}", slot)).unwrap_or_default();
        ingredients.push(IngredientEntry {
            ingredient: ingredient.to_string(),
            measure: measure.trim().to_string(),
        });
    }

    Ok(RecipeDetail {
        id,
        name,
        category: str_field(meal, "strCategory"),
        area: str_field(meal, "strArea"),
        instructions: str_field(meal, "strInstructions").unwrap_or_default(),
        thumbnail: str_field(meal, "strMealThumb"),
        youtube: str_field(meal, "strYoutube").filter(|url| !url.is_empty()),
        ingredients,
    })
}

/// String field access; JSON `null` and non-strings read as absent.
fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
