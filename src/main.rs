//! # AI Chef CLI (`chef`)
//!
//! The `chef` binary is the presentation layer for AI Chef. It provides
//! commands for recipe search, detail viewing, favorites, the grocery list,
//! the weekly meal plan, recent searches, AI suggestions, and starting the
//! suggestion backend.
//!
//! ## Usage
//!
//! ```bash
//! chef --config ./config/chef.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chef init` | Create the local document store |
//! | `chef search "<ingredients>"` | Recipes containing every listed ingredient |
//! | `chef category <name>` | Recipes in a category |
//! | `chef categories` | List all categories |
//! | `chef recipe <id>` | Full recipe detail (cached for offline use) |
//! | `chef favorite <id>` | Toggle a recipe in the favorites ledger |
//! | `chef favorites` | List saved recipes |
//! | `chef grocery <action>` | Show/add/remove/clear grocery items |
//! | `chef plan <action>` | Show/set/clear the weekly meal plan |
//! | `chef recent` | Recent searches, newest first |
//! | `chef suggest "<query>"` | Ask the AI chef directly |
//! | `chef serve` | Start the AI suggestion backend |

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ai_chef::cache::fetch_or_cached;
use ai_chef::config::{self, Config};
use ai_chef::favorites::FavoritesLedger;
use ai_chef::gateway::{MealDbGateway, RecipeGateway};
use ai_chef::grocery::GroceryList;
use ai_chef::meal_plan::MealPlanLedger;
use ai_chef::models::{RecipeDetail, RecipeSummary, Weekday};
use ai_chef::recent::RecentSearches;
use ai_chef::search;
use ai_chef::server;
use ai_chef::store::{DocumentStore, SqliteStore};
use ai_chef::suggest;

/// AI Chef — recipe discovery with an AI suggestion backend.
#[derive(Parser)]
#[command(
    name = "chef",
    about = "AI Chef — find recipes from ingredients you have",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/chef.toml`; built-in defaults apply when the
    /// file does not exist.
    #[arg(long, global = true, default_value = "./config/chef.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the local document store.
    ///
    /// Idempotent — running it multiple times is safe. Other commands also
    /// create the store on first use; this just makes it explicit.
    Init,

    /// Search recipes by ingredients.
    ///
    /// The phrase is split on whitespace and only recipes containing every
    /// ingredient are returned. The query is remembered in recent searches.
    Search {
        /// Whitespace-separated ingredients, e.g. "chicken tomato".
        phrase: String,
    },

    /// List recipes in a category.
    Category {
        /// Category name, e.g. "Seafood".
        name: String,
    },

    /// List all recipe categories.
    Categories,

    /// Show a recipe's full detail.
    ///
    /// Successful fetches are cached locally; when the gateway is
    /// unreachable the cached copy is shown instead.
    Recipe {
        /// Recipe id.
        id: String,
    },

    /// Toggle a recipe in the favorites ledger.
    Favorite {
        /// Recipe id.
        id: String,
    },

    /// List saved favorite recipes.
    Favorites {
        /// Only show favorites whose name contains this text.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Manage the grocery list.
    Grocery {
        #[command(subcommand)]
        action: GroceryAction,
    },

    /// Manage the weekly meal plan.
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Show recent searches, newest first.
    Recent,

    /// Ask the AI chef for a suggestion.
    Suggest {
        /// Free-text ingredient query.
        query: String,
    },

    /// Start the AI suggestion backend.
    ///
    /// Listens on the `PORT` environment variable (default 3000) and
    /// forwards `POST /ai-chef` queries to the completion API.
    Serve,
}

/// Grocery list subcommands.
#[derive(Subcommand)]
enum GroceryAction {
    /// Show the grocery list with removal indexes.
    Show,
    /// Append a recipe's ingredient list to the grocery list.
    Add {
        /// Recipe id whose ingredients should be added.
        recipe_id: String,
    },
    /// Remove one item by its index in the current list.
    Remove {
        /// Index as shown by `chef grocery show`.
        index: usize,
    },
    /// Delete the whole grocery list.
    Clear,
}

/// Meal plan subcommands.
#[derive(Subcommand)]
enum PlanAction {
    /// Show the plan for all seven days.
    Show,
    /// Set the meal for one day.
    Set {
        /// Weekday name, e.g. "monday".
        day: String,
        /// Free-text meal description.
        meal: String,
    },
    /// Delete the whole meal plan.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            SqliteStore::open(&config).await?;
            println!("Document store initialized successfully.");
        }
        Commands::Search { phrase } => {
            cmd_search(&config, &phrase).await?;
        }
        Commands::Category { name } => {
            let gateway = MealDbGateway::new(&config.gateway)?;
            let results = search::search_by_category(&gateway, &name).await?;
            print_summaries(&results);
        }
        Commands::Categories => {
            let gateway = MealDbGateway::new(&config.gateway)?;
            for category in gateway.list_categories().await? {
                println!("{}", category);
            }
        }
        Commands::Recipe { id } => {
            cmd_recipe(&config, &id).await?;
        }
        Commands::Favorite { id } => {
            cmd_favorite(&config, &id).await?;
        }
        Commands::Favorites { filter } => {
            let store = open_store(&config).await?;
            let ledger = FavoritesLedger::new(store);
            let favorites = match filter {
                Some(query) => ledger.filter_by_name(&query).await?,
                None => ledger.list().await?,
            };
            if favorites.is_empty() {
                println!("No favorites saved yet.");
            }
            for recipe in favorites {
                println!("{}  (id {})", recipe.name, recipe.id);
            }
        }
        Commands::Grocery { action } => {
            cmd_grocery(&config, action).await?;
        }
        Commands::Plan { action } => {
            cmd_plan(&config, action).await?;
        }
        Commands::Recent => {
            let store = open_store(&config).await?;
            let recent = RecentSearches::new(store).list().await?;
            if recent.is_empty() {
                println!("No recent searches.");
            }
            for query in recent {
                println!("{}", query);
            }
        }
        Commands::Suggest { query } => {
            match suggest::suggest(&config.ai, &query).await {
                Ok(reply) => println!("{}", reply),
                Err(err) => bail!("could not reach the AI chef: {:#}", err),
            }
        }
        Commands::Serve => {
            server::run_server(&config).await?;
        }
    }

    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    Ok(Arc::new(SqliteStore::open(config).await?))
}

async fn cmd_search(config: &Config, phrase: &str) -> Result<()> {
    let store = open_store(config).await?;
    RecentSearches::new(store).record(phrase).await?;

    let gateway = MealDbGateway::new(&config.gateway)?;
    let outcome = search::search_by_ingredients(&gateway, phrase).await?;

    if outcome.is_failure() {
        bail!(
            "search failed while looking up: {}",
            outcome.failed_terms.join(", ")
        );
    }
    print_summaries(&outcome.matches);
    Ok(())
}

async fn cmd_recipe(config: &Config, id: &str) -> Result<()> {
    let store = open_store(config).await?;
    let gateway = MealDbGateway::new(&config.gateway)?;

    let detail = fetch_or_cached(&gateway, store.as_ref(), id)
        .await?
        .ok_or_else(|| anyhow!("recipe {} not found (and no cached copy)", id))?;
    print_detail(&detail);
    Ok(())
}

async fn cmd_favorite(config: &Config, id: &str) -> Result<()> {
    let store = open_store(config).await?;
    let gateway = MealDbGateway::new(&config.gateway)?;

    let detail = fetch_or_cached(&gateway, store.as_ref(), id)
        .await?
        .ok_or_else(|| anyhow!("recipe {} not found (and no cached copy)", id))?;

    let saved = FavoritesLedger::new(store).toggle(&detail).await?;
    if saved {
        println!("Added {} to favorites", detail.name);
    } else {
        println!("Removed {} from favorites", detail.name);
    }
    Ok(())
}

async fn cmd_grocery(config: &Config, action: GroceryAction) -> Result<()> {
    let store = open_store(config).await?;
    let grocery = GroceryList::new(store.clone());

    match action {
        GroceryAction::Show => {
            let items = grocery.list().await?;
            if items.is_empty() {
                println!("Grocery list is empty.");
            }
            for (index, item) in items.iter().enumerate() {
                println!("[{}] {}", index, item);
            }
        }
        GroceryAction::Add { recipe_id } => {
            let gateway = MealDbGateway::new(&config.gateway)?;
            let detail = fetch_or_cached(&gateway, store.as_ref(), &recipe_id)
                .await?
                .ok_or_else(|| anyhow!("recipe {} not found (and no cached copy)", recipe_id))?;
            let items = detail.grocery_items();
            grocery.add_all(&items).await?;
            println!("Added {} items from {}", items.len(), detail.name);
        }
        GroceryAction::Remove { index } => {
            let removed = grocery.remove_at(index).await?;
            println!("Removed {}", removed);
        }
        GroceryAction::Clear => {
            grocery.clear().await?;
            println!("Grocery list cleared.");
        }
    }
    Ok(())
}

async fn cmd_plan(config: &Config, action: PlanAction) -> Result<()> {
    let store = open_store(config).await?;
    let plan = MealPlanLedger::new(store);

    match action {
        PlanAction::Show => {
            let stored = plan.get().await?;
            for day in Weekday::ALL {
                match stored.get(&day).filter(|meal| !meal.is_empty()) {
                    Some(meal) => println!("{:<10} {}", day, meal),
                    None => println!("{:<10} (unset)", day),
                }
            }
        }
        PlanAction::Set { day, meal } => {
            let day: Weekday = day.parse().map_err(|message: String| anyhow!(message))?;
            plan.set(day, &meal).await?;
            println!("{}: {}", day, meal);
        }
        PlanAction::Clear => {
            plan.clear().await?;
            println!("Meal plan cleared.");
        }
    }
    Ok(())
}

fn print_summaries(results: &[RecipeSummary]) {
    if results.is_empty() {
        println!("No recipes found.");
        return;
    }
    for (position, recipe) in results.iter().enumerate() {
        println!("{:2}. {}  (id {})", position + 1, recipe.name, recipe.id);
    }
}

fn print_detail(detail: &RecipeDetail) {
    println!("--- {} ---", detail.name);
    if let Some(ref category) = detail.category {
        println!("category: {}", category);
    }
    if let Some(ref area) = detail.area {
        println!("area:     {}", area);
    }
    println!();

    println!("--- Ingredients ---");
    for entry in &detail.ingredients {
        println!("- {}", entry.display());
    }
    println!();

    println!("--- Instructions ---");
    println!("{}", detail.instructions);

    if let Some(ref url) = detail.youtube {
        println!();
        println!("video: {}", url);
    }
}
