mod client;
mod records;

pub use client::MealDbClient;
pub use records::{CategoryRecord, MealRecord, INGREDIENT_SLOTS};

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::EngineError;

/// Read-only operations against the remote recipe source.
///
/// Implemented over HTTP by [`MealDbClient`]; the trait is the seam at
/// which alternate transports (or test doubles) plug in. Every operation
/// is a pure read: no retries, no side effects beyond the fetch itself.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn categories(&self) -> Result<Vec<CategoryRecord>, EngineError>;

    /// One random draw. The source picks the record.
    async fn random_meal(&self) -> Result<MealRecord, EngineError>;

    /// `count` independent random draws, issued concurrently. Duplicates
    /// across draws are possible and kept; the first failed draw fails
    /// the whole batch.
    async fn random_meals(&self, count: usize) -> Result<Vec<MealRecord>, EngineError> {
        try_join_all((0..count).map(|_| self.random_meal())).await
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<MealRecord>, EngineError>;

    async fn filter_by_ingredient(&self, query: &str) -> Result<Vec<MealRecord>, EngineError>;

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealRecord>, EngineError>;

    /// Fetch a single record by identifier; an unknown id is `None`, not
    /// an error.
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, EngineError>;
}
