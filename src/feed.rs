//! Landing-feed aggregation: one atomic bundle of categories, a random
//! recipe batch, and a featured recipe.

use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::model::{Category, Recipe};
use crate::normalize::{normalize_category, normalize_meal};
use crate::remote::RecipeSource;

/// The landing-page bundle. Success is all-or-nothing: a `Feed` either
/// materializes completely or the load fails and the caller keeps
/// whatever it was showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub categories: Vec<Category>,
    pub recipes: Vec<Recipe>,
    /// `None` when the featured draw normalized to nothing; not a failure
    pub featured: Option<Recipe>,
}

/// Fetches and normalizes multi-resource bundles.
///
/// Initial load and manual refresh are the same entry point; callers
/// serialize refreshes by disabling their trigger while one is in flight.
#[derive(Clone)]
pub struct FeedAggregator {
    source: Arc<dyn RecipeSource>,
    random_batch: usize,
}

impl FeedAggregator {
    pub fn new(source: Arc<dyn RecipeSource>, config: &EngineConfig) -> Self {
        FeedAggregator {
            source,
            random_batch: config.random_batch,
        }
    }

    /// Load the landing bundle: categories, `random_batch` random draws,
    /// and one featured draw, fetched concurrently.
    ///
    /// If any of the three fetches fails the whole call fails with the
    /// first encountered error; nothing partial is ever returned. On
    /// success, unusable random draws are dropped (the batch may come
    /// back shorter than requested) and an unusable featured draw leaves
    /// `featured` empty.
    pub async fn load_feed(&self) -> Result<Feed, EngineError> {
        let (raw_categories, raw_randoms, raw_featured) = tokio::try_join!(
            self.source.categories(),
            self.source.random_meals(self.random_batch),
            self.source.random_meal(),
        )?;

        let categories = raw_categories
            .iter()
            .enumerate()
            .map(|(index, raw)| normalize_category(index + 1, raw))
            .collect::<Vec<Category>>();
        let recipes = raw_randoms
            .iter()
            .filter_map(normalize_meal)
            .collect::<Vec<Recipe>>();
        let featured = normalize_meal(&raw_featured);

        debug!(
            "feed loaded: {} categories, {}/{} recipes, featured: {}",
            categories.len(),
            recipes.len(),
            raw_randoms.len(),
            featured.is_some()
        );

        Ok(Feed {
            categories,
            recipes,
            featured,
        })
    }

    /// Load the recipes of one category. Transport failure surfaces as an
    /// error for the caller to turn into its empty state.
    pub async fn load_category_feed(&self, category: &str) -> Result<Vec<Recipe>, EngineError> {
        let records = self.source.filter_by_category(category).await?;
        let recipes = records
            .iter()
            .filter_map(normalize_meal)
            .collect::<Vec<Recipe>>();
        debug!(
            "category '{}': {}/{} usable recipes",
            category,
            recipes.len(),
            records.len()
        );
        Ok(recipes)
    }

    /// Fetch and normalize a single recipe by id. Unknown ids and
    /// unusable records both come back as `None`.
    pub async fn load_recipe(&self, id: &str) -> Result<Option<Recipe>, EngineError> {
        let record = self.source.lookup_by_id(id).await?;
        Ok(record.as_ref().and_then(|raw| normalize_meal(raw)))
    }
}
