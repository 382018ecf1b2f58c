//! Debounced search with a cascading fallback strategy and stale-result
//! suppression.
//!
//! The orchestrator owns all search state and mutates it from a single
//! task; callers feed keystrokes through a [`SearchHandle`] and observe
//! [`SearchState`] snapshots through a watch channel. Races between
//! overlapping fetches are settled by generation tokens, not locks: a
//! completion only applies when it carries the highest generation issued
//! so far.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::future::pending;
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Sleep};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::model::Recipe;
use crate::normalize::normalize_meal;
use crate::remote::RecipeSource;

/// Search tunables, lifted out of [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period between the last keystroke and the search firing
    pub debounce: Duration,
    /// Cap on results kept per query
    pub max_results: usize,
    /// Batch size for the empty-query random feed
    pub random_batch: usize,
}

impl From<&EngineConfig> for SearchConfig {
    fn from(config: &EngineConfig) -> Self {
        SearchConfig {
            debounce: config.debounce(),
            max_results: config.max_results,
            random_batch: config.random_batch,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::from(&EngineConfig::default())
    }
}

/// Where the search state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    /// Nothing typed yet and no load in progress
    Idle,
    /// A keystroke arrived; the quiet period is running
    Debouncing,
    /// A generation has been issued and its fetch is in flight
    Searching,
    /// The latest issued generation has completed
    Settled,
}

/// Snapshot of the orchestrator's state, published on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    /// Raw query text as last typed (trimming happens at issue time)
    pub query: String,
    /// Highest generation issued so far; completions carrying anything
    /// lower are stale and get discarded
    pub active_generation: u64,
    pub phase: SearchPhase,
    pub results: Vec<Recipe>,
    /// Most recent reported failure; cleared when a later generation
    /// settles successfully
    pub error: Option<String>,
}

impl SearchState {
    fn new() -> Self {
        SearchState {
            query: String::new(),
            active_generation: 0,
            phase: SearchPhase::Idle,
            results: Vec::new(),
            error: None,
        }
    }

    /// True while a fetch for the current generation is in flight.
    pub fn is_searching(&self) -> bool {
        self.phase == SearchPhase::Searching
    }
}

/// Executes one fallback cascade per call. Stateless; the orchestrator
/// layers debounce and staleness control on top.
#[derive(Clone)]
pub struct SearchEngine {
    source: Arc<dyn RecipeSource>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn RecipeSource>, config: SearchConfig) -> Self {
        SearchEngine { source, config }
    }

    /// Run the cascade for one query:
    /// - blank query: a fixed-size batch of random recipes;
    /// - otherwise search by name, and only if that yields zero usable
    ///   recipes, fall back to ingredient filtering.
    ///
    /// Results come from exactly one branch, normalized, in source
    /// order, truncated to the configured cap. Unusable records are
    /// dropped silently.
    pub async fn run_query(&self, query: &str) -> Result<Vec<Recipe>, EngineError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let records = self.source.random_meals(self.config.random_batch).await?;
            return Ok(records.iter().filter_map(normalize_meal).collect());
        }

        let by_name: Vec<Recipe> = self
            .source
            .search_by_name(trimmed)
            .await?
            .iter()
            .filter_map(normalize_meal)
            .take(self.config.max_results)
            .collect();
        if !by_name.is_empty() {
            return Ok(by_name);
        }

        debug!("no name matches for '{trimmed}', trying ingredient filter");
        let by_ingredient = self
            .source
            .filter_by_ingredient(trimmed)
            .await?
            .iter()
            .filter_map(normalize_meal)
            .take(self.config.max_results)
            .collect();
        Ok(by_ingredient)
    }
}

/// Restartable quiet-period timer. Arming replaces any previous
/// deadline; firing disarms. While unarmed, [`DebounceTimer::fired`]
/// pends forever, so it can sit in a select loop unconditionally.
struct DebounceTimer {
    quiet_period: Duration,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl DebounceTimer {
    fn new(quiet_period: Duration) -> Self {
        DebounceTimer {
            quiet_period,
            deadline: None,
        }
    }

    fn restart(&mut self) {
        self.deadline = Some(Box::pin(sleep(self.quiet_period)));
    }

    async fn fired(&mut self) {
        match self.deadline.as_mut() {
            Some(deadline) => {
                deadline.await;
                self.deadline = None;
            }
            None => pending::<()>().await,
        }
    }
}

/// Entry point for spawning the search state machine.
pub struct SearchOrchestrator;

impl SearchOrchestrator {
    /// Spawn the orchestrator task. It runs the empty-query branch once
    /// before accepting the debounce pipeline, so the first debounced
    /// search never races an unloaded base state. Dropping the returned
    /// handle shuts the task down; an in-flight fetch is not aborted,
    /// its result is simply never applied.
    pub fn spawn(engine: SearchEngine) -> SearchHandle {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::new());
        tokio::spawn(run_loop(engine, input_rx, state_tx));
        SearchHandle { input_tx, state_rx }
    }
}

/// Caller-side handle: feed keystrokes in, watch state snapshots out.
pub struct SearchHandle {
    input_tx: mpsc::UnboundedSender<String>,
    state_rx: watch::Receiver<SearchState>,
}

impl SearchHandle {
    /// Report the current text of the search box. Never blocks; sending
    /// the same text twice is a no-op downstream.
    pub fn input(&self, text: impl Into<String>) {
        if self.input_tx.send(text.into()).is_err() {
            warn!("search orchestrator is gone; keystroke dropped");
        }
    }

    /// Latest state snapshot.
    pub fn state(&self) -> SearchState {
        self.state_rx.borrow().clone()
    }

    /// Watch receiver for awaiting state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_rx.clone()
    }
}

type SearchOutcome = (u64, Result<Vec<Recipe>, EngineError>);

async fn run_loop(
    engine: SearchEngine,
    mut input_rx: mpsc::UnboundedReceiver<String>,
    state_tx: watch::Sender<SearchState>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SearchOutcome>();
    let mut timer = DebounceTimer::new(engine.config.debounce);
    let mut state = SearchState::new();

    // Initial load: generation 0, gating the debounce pipeline on its
    // completion. Keystrokes arriving meanwhile queue up in the input
    // channel and are debounced afterwards.
    state.phase = SearchPhase::Searching;
    state_tx.send_replace(state.clone());
    match engine.run_query("").await {
        Ok(recipes) => {
            state.results = recipes;
        }
        Err(error) => {
            warn!("initial recipe load failed: {error}");
            state.error = Some(error.to_string());
        }
    }
    state.phase = SearchPhase::Settled;
    state_tx.send_replace(state.clone());

    loop {
        tokio::select! {
            maybe_input = input_rx.recv() => {
                match maybe_input {
                    Some(text) => {
                        if text != state.query {
                            state.query = text;
                            state.phase = SearchPhase::Debouncing;
                            timer.restart();
                            state_tx.send_replace(state.clone());
                        }
                    }
                    // handle dropped: the session is over
                    None => break,
                }
            }
            _ = timer.fired() => {
                state.active_generation += 1;
                state.phase = SearchPhase::Searching;
                state_tx.send_replace(state.clone());

                let generation = state.active_generation;
                let query = state.query.clone();
                let engine = engine.clone();
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let outcome = engine.run_query(&query).await;
                    let _ = done_tx.send((generation, outcome));
                });
            }
            Some((generation, outcome)) = done_rx.recv() => {
                if generation != state.active_generation {
                    debug!(
                        "discarding stale search generation {generation} (current {})",
                        state.active_generation
                    );
                    continue;
                }
                match outcome {
                    Ok(recipes) => {
                        debug!(
                            "generation {generation} settled with {} results",
                            recipes.len()
                        );
                        state.results = recipes;
                        state.error = None;
                    }
                    Err(error) => {
                        warn!("search for '{}' failed: {error}", state.query.trim());
                        state.error = Some(error.to_string());
                    }
                }
                // a keystroke may already have moved us back to Debouncing
                if state.phase == SearchPhase::Searching {
                    state.phase = SearchPhase::Settled;
                }
                state_tx.send_replace(state.clone());
            }
        }
    }
}
