//! Category selection and the per-category recipe list.

use log::{debug, warn};

use crate::feed::{Feed, FeedAggregator};
use crate::model::Recipe;

/// Tracks which category is selected and holds the recipes shown for
/// it. The recipe list is only ever replaced wholesale, so a row from a
/// previously selected category can never linger next to rows from the
/// current one.
pub struct CategoryBrowser {
    aggregator: FeedAggregator,
    selected: Option<String>,
    recipes: Vec<Recipe>,
}

impl CategoryBrowser {
    pub fn new(aggregator: FeedAggregator) -> Self {
        CategoryBrowser {
            aggregator,
            selected: None,
            recipes: Vec::new(),
        }
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Take a freshly loaded landing bundle: the recipe list becomes the
    /// bundle's random batch, and the first category becomes the default
    /// selection if the user has not picked one yet. A selection made
    /// before or between refreshes is never overridden.
    pub fn apply_feed(&mut self, feed: &Feed) {
        self.recipes = feed.recipes.clone();
        if self.selected.is_none() {
            if let Some(first) = feed.categories.first() {
                debug!("defaulting to first category '{}'", first.name);
                self.selected = Some(first.name.clone());
            }
        }
    }

    /// Switch to a category. The selection updates before any network
    /// round trip, so it reflects the user's intent even when the load
    /// fails; a failed load leaves the list empty rather than keeping
    /// rows from the previous category.
    pub async fn select_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.selected = Some(name.clone());
        match self.aggregator.load_category_feed(&name).await {
            Ok(recipes) => {
                self.recipes = recipes;
            }
            Err(error) => {
                warn!("loading category '{name}' failed: {error}");
                self.recipes = Vec::new();
            }
        }
    }
}
