//! Scripted [`RecipeSource`] double for timing- and failure-sensitive
//! unit tests. HTTP-level behavior is covered separately with mockito.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::EngineError;
use crate::remote::{CategoryRecord, MealRecord, RecipeSource};

#[derive(Default)]
struct StubState {
    categories: Vec<CategoryRecord>,
    randoms: Vec<MealRecord>,
    next_random: usize,
    by_name: HashMap<String, Vec<MealRecord>>,
    by_ingredient: HashMap<String, Vec<MealRecord>>,
    by_category: HashMap<String, Vec<MealRecord>>,
    name_delays: HashMap<String, Duration>,
    ingredient_delays: HashMap<String, Duration>,
    fail_categories: bool,
    fail_random: bool,
    fail_random_after: Option<usize>,
    fail_name: bool,
    fail_category_filter: bool,
}

/// Test double returning staged records, with optional per-query latency
/// (driven by the paused tokio clock) and per-operation forced failures.
#[derive(Default)]
pub(crate) struct StubSource {
    state: Mutex<StubState>,
    pub name_calls: AtomicUsize,
    pub ingredient_calls: AtomicUsize,
    pub random_calls: AtomicUsize,
}

fn stub_failure(op: &str) -> EngineError {
    EngineError::MalformedResponse {
        endpoint: op.to_string(),
        reason: "forced failure".to_string(),
    }
}

impl StubSource {
    pub fn new() -> Arc<Self> {
        Arc::new(StubSource::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    pub fn set_categories(&self, records: Vec<CategoryRecord>) {
        self.lock().categories = records;
    }

    /// Records handed out, one per draw, cycling when exhausted.
    pub fn set_randoms(&self, records: Vec<MealRecord>) {
        let mut state = self.lock();
        state.randoms = records;
        state.next_random = 0;
    }

    pub fn stage_name(&self, query: &str, records: Vec<MealRecord>) {
        self.lock().by_name.insert(query.to_string(), records);
    }

    pub fn stage_ingredient(&self, query: &str, records: Vec<MealRecord>) {
        self.lock().by_ingredient.insert(query.to_string(), records);
    }

    pub fn stage_category(&self, category: &str, records: Vec<MealRecord>) {
        self.lock().by_category.insert(category.to_string(), records);
    }

    pub fn delay_name(&self, query: &str, delay: Duration) {
        self.lock().name_delays.insert(query.to_string(), delay);
    }

    pub fn delay_ingredient(&self, query: &str, delay: Duration) {
        self.lock()
            .ingredient_delays
            .insert(query.to_string(), delay);
    }

    pub fn fail_categories(&self) {
        self.lock().fail_categories = true;
    }

    pub fn fail_random(&self) {
        self.lock().fail_random = true;
    }

    /// Let the first `count` random draws succeed and fail the rest.
    pub fn fail_random_after(&self, count: usize) {
        self.lock().fail_random_after = Some(count);
    }

    pub fn fail_name(&self) {
        self.lock().fail_name = true;
    }

    pub fn fail_category_filter(&self) {
        self.lock().fail_category_filter = true;
    }
}

#[async_trait]
impl RecipeSource for StubSource {
    async fn categories(&self) -> Result<Vec<CategoryRecord>, EngineError> {
        let state = self.lock();
        if state.fail_categories {
            return Err(stub_failure("categories"));
        }
        Ok(state.categories.clone())
    }

    async fn random_meal(&self) -> Result<MealRecord, EngineError> {
        let draw = self.random_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        if state.fail_random {
            return Err(stub_failure("random_meal"));
        }
        if let Some(allowed) = state.fail_random_after {
            if draw >= allowed {
                return Err(stub_failure("random_meal"));
            }
        }
        if state.randoms.is_empty() {
            return Err(stub_failure("random_meal"));
        }
        let record = state.randoms[state.next_random % state.randoms.len()].clone();
        state.next_random += 1;
        Ok(record)
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<MealRecord>, EngineError> {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        let (delay, result) = {
            let state = self.lock();
            let delay = state.name_delays.get(query).copied();
            let result = if state.fail_name {
                Err(stub_failure("search_by_name"))
            } else {
                Ok(state.by_name.get(query).cloned().unwrap_or_default())
            };
            (delay, result)
        };
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        result
    }

    async fn filter_by_ingredient(&self, query: &str) -> Result<Vec<MealRecord>, EngineError> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        let (delay, result) = {
            let state = self.lock();
            let delay = state.ingredient_delays.get(query).copied();
            let result = Ok(state.by_ingredient.get(query).cloned().unwrap_or_default());
            (delay, result)
        };
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        result
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealRecord>, EngineError> {
        let state = self.lock();
        if state.fail_category_filter {
            return Err(stub_failure("filter_by_category"));
        }
        Ok(state.by_category.get(category).cloned().unwrap_or_default())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, EngineError> {
        let state = self.lock();
        Ok(state
            .randoms
            .iter()
            .find(|record| record.id.as_deref() == Some(id))
            .cloned())
    }
}

/// Meal record fixture with an id, a title, and a thumbnail.
pub(crate) fn meal_record(id: &str, name: &str) -> MealRecord {
    MealRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        thumbnail: Some(format!("https://example.com/{id}.jpg")),
        ..MealRecord::default()
    }
}

/// Meal record fixture missing its title, so normalization drops it.
pub(crate) fn unusable_record(id: &str) -> MealRecord {
    MealRecord {
        id: Some(id.to_string()),
        ..MealRecord::default()
    }
}

pub(crate) fn category_record(name: &str) -> CategoryRecord {
    CategoryRecord {
        name: Some(name.to_string()),
        thumbnail: Some(format!("https://example.com/{name}.png")),
        description: Some(format!("{name} dishes")),
    }
}
