use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Engine configuration: remote endpoint plus the search/feed tunables
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Base URL of the recipe API, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Quiet period between the last keystroke and the search firing, in
    /// milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Cap on the number of search results kept per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Number of independent random draws for the landing feed and the
    /// empty-query search
    #[serde(default = "default_random_batch")]
    pub random_batch: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            debounce_ms: default_debounce_ms(),
            max_results: default_max_results(),
            random_batch: default_random_batch(),
        }
    }
}

impl EngineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("mealdb-engine/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_max_results() -> usize {
    12
}

fn default_random_batch() -> usize {
    12
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with MEALDB__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: MEALDB__DEBOUNCE_MS
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Environment variables with MEALDB_ prefix
        // Use double underscore for nested: MEALDB__BASE_URL
        .add_source(
            Environment::with_prefix("MEALDB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
