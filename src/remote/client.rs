use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::remote::records::{CategoriesEnvelope, CategoryRecord, MealRecord, MealsEnvelope};
use crate::remote::RecipeSource;

/// Thin typed wrapper over the recipe API's read-only GET endpoints.
///
/// No business logic lives here: each call is one request, decoded into
/// raw records. Retry policy, if any, belongs to the caller.
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client from configuration
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(MealDbClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against a specific base URL with default transport
    /// settings. Used for alternate API deployments and in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        MealDbClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_body(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<String, EngineError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn fetch_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<MealRecord>, EngineError> {
        let body = self.fetch_body(endpoint, query).await?;
        let envelope: MealsEnvelope =
            serde_json::from_str(&body).map_err(|e| EngineError::malformed(endpoint, e))?;
        let records = envelope.into_records();
        debug!("{} -> {} meal records", endpoint, records.len());
        Ok(records)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn categories(&self) -> Result<Vec<CategoryRecord>, EngineError> {
        let body = self.fetch_body("categories.php", &[]).await?;
        let envelope: CategoriesEnvelope = serde_json::from_str(&body)
            .map_err(|e| EngineError::malformed("categories.php", e))?;
        let records = envelope.into_records();
        debug!("categories.php -> {} category records", records.len());
        Ok(records)
    }

    async fn random_meal(&self) -> Result<MealRecord, EngineError> {
        self.fetch_meals("random.php", &[])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::malformed("random.php", "expected one meal record"))
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<MealRecord>, EngineError> {
        self.fetch_meals("search.php", &[("s", query)]).await
    }

    async fn filter_by_ingredient(&self, query: &str) -> Result<Vec<MealRecord>, EngineError> {
        self.fetch_meals("filter.php", &[("i", query)]).await
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealRecord>, EngineError> {
        self.fetch_meals("filter.php", &[("c", category)]).await
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, EngineError> {
        Ok(self
            .fetch_meals("lookup.php", &[("i", id)])
            .await?
            .into_iter()
            .next())
    }
}
