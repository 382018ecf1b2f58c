use thiserror::Error;

/// Errors that can occur while talking to the recipe source
#[derive(Error, Debug)]
pub enum EngineError {
    /// Transport failure: timeout, connection error, or non-2xx status
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not decode as the expected record envelope
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl EngineError {
    pub(crate) fn malformed(endpoint: &str, reason: impl ToString) -> Self {
        EngineError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
