use async_trait::async_trait;
use thiserror::Error;

mod providers;

pub use providers::OpenAICompatible;

/// A single prompt with the fixed persona and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub persona: String,
    pub prompt: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("rate limited by completion endpoint: {0}")]
    RateLimited(String),

    #[error("completion endpoint error: {0}")]
    Api(String),

    #[error("could not reach completion endpoint: {0}")]
    Transport(String),
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the text of the first choice, or an empty string if there is none.
    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError>;
}
