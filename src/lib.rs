//! Recipe aggregation and search over a TheMealDB-style HTTP API.
//!
//! The crate normalizes the upstream's sparse wire records into dense
//! recipe values, loads the landing feed as an all-or-nothing bundle,
//! and runs debounced name-then-ingredient searches with stale-result
//! suppression.

pub mod browse;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod search;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use browse::CategoryBrowser;
pub use config::EngineConfig;
pub use error::EngineError;
pub use feed::{Feed, FeedAggregator};
pub use model::{Category, Ingredient, Recipe};
pub use remote::{MealDbClient, RecipeSource};
pub use search::{
    SearchConfig, SearchEngine, SearchHandle, SearchOrchestrator, SearchPhase, SearchState,
};

fn default_client() -> Result<(EngineConfig, Arc<MealDbClient>), EngineError> {
    let config = EngineConfig::load()?;
    let client = Arc::new(MealDbClient::new(&config)?);
    Ok((config, client))
}

/// Load the landing feed with configuration from files and environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), mealdb_engine::EngineError> {
/// let feed = mealdb_engine::load_feed().await?;
/// println!("{} categories, {} recipes", feed.categories.len(), feed.recipes.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_feed() -> Result<Feed, EngineError> {
    let (config, client) = default_client()?;
    FeedAggregator::new(client, &config).load_feed().await
}

/// Run one search cascade without the debounce machinery.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), mealdb_engine::EngineError> {
/// for recipe in mealdb_engine::search("chicken").await? {
///     println!("{}", recipe.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str) -> Result<Vec<Recipe>, EngineError> {
    let (config, client) = default_client()?;
    SearchEngine::new(client, SearchConfig::from(&config))
        .run_query(query)
        .await
}

/// Fetch and normalize one recipe by id. Unknown ids and records too
/// sparse to normalize both come back as `None`.
pub async fn load_recipe(id: &str) -> Result<Option<Recipe>, EngineError> {
    let (config, client) = default_client()?;
    FeedAggregator::new(client, &config).load_recipe(id).await
}

/// Spawn the debounced search orchestrator with default wiring.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), mealdb_engine::EngineError> {
/// let handle = mealdb_engine::spawn_search()?;
/// handle.input("chicken");
/// # Ok(())
/// # }
/// ```
pub fn spawn_search() -> Result<SearchHandle, EngineError> {
    let (config, client) = default_client()?;
    let engine = SearchEngine::new(client, SearchConfig::from(&config));
    Ok(SearchOrchestrator::spawn(engine))
}
