//! # AI Chef
//!
//! A recipe-discovery core with an AI suggestion backend.
//!
//! AI Chef lets a client search TheMealDB by ingredients (intersecting the
//! per-ingredient result sets) or by category, view recipe details with an
//! offline fallback cache, and keep favorites, a grocery list, a weekly
//! meal plan, and a bounded recent-search history in local key-value
//! storage. A thin HTTP proxy forwards free-text ingredient queries to a
//! chat-completion API and relays the suggestion.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌───────────┐
//! │ Lookup       │──▶│ Search engine │   │  SQLite    │
//! │ Gateway      │   │ + detail cache│──▶│ documents  │
//! │ (TheMealDB)  │   └───────────────┘   │ (ledgers)  │
//! └──────────────┘                       └─────┬─────┘
//!                                              │
//!                          ┌───────────────────┤
//!                          ▼                   ▼
//!                     ┌──────────┐       ┌──────────┐
//!                     │   CLI    │       │   HTTP   │
//!                     │  (chef)  │       │ /ai-chef │
//!                     └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! chef init                        # create the local store
//! chef search "chicken tomato"     # recipes containing both ingredients
//! chef recipe 52795                # full detail (cached for offline use)
//! chef favorite 52795              # toggle a favorite
//! chef grocery add 52795           # append its ingredients to the list
//! chef serve                       # start the AI suggestion backend
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with env overrides |
//! | [`models`] | Recipe, ingredient, and weekday types |
//! | [`store`] | Key-value document store (SQLite + in-memory) |
//! | [`gateway`] | Recipe lookup gateway client |
//! | [`search`] | Multi-ingredient intersection search |
//! | [`favorites`] | Favorites ledger |
//! | [`grocery`] | Grocery list accumulator |
//! | [`meal_plan`] | Weekly meal plan ledger |
//! | [`recent`] | Bounded recent-search ledger |
//! | [`cache`] | Write-through / read-fallback detail cache |
//! | [`suggest`] | AI suggestion forwarder |
//! | [`server`] | HTTP backend |

pub mod cache;
pub mod config;
pub mod favorites;
pub mod gateway;
pub mod grocery;
pub mod meal_plan;
pub mod models;
pub mod recent;
pub mod search;
pub mod server;
pub mod store;
pub mod suggest;
