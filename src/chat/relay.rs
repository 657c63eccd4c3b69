use std::{sync::Arc, time::Duration};

use thiserror::Error;

use super::client::{BackendError, CompletionBackend, CompletionRequest};
use crate::config::structure::LLMConfig;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("still rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("completion endpoint returned an empty result")]
    EmptyResult,

    #[error(transparent)]
    Endpoint(#[from] BackendError),
}

impl RelayError {
    /// Short message safe to show in a channel; details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "🚫 Rate limit hit! Please wait a moment and try again.",
            Self::EmptyResult => "⚠️ Sorry, I didn't get anything back from the AI. Try again.",
            Self::Endpoint(_) => "❌ An unexpected error occurred.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub persona: String,
    pub max_tokens: u64,
    pub temperature: f64,
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl From<&LLMConfig> for RelaySettings {
    fn from(config: &LLMConfig) -> Self {
        Self {
            persona: config.persona.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_attempts: config.max_attempts,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }
}

pub struct CompletionRelay {
    backend: Arc<dyn CompletionBackend>,
    settings: RelaySettings,
}

impl CompletionRelay {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: RelaySettings) -> Self {
        Self { backend, settings }
    }

    fn request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            persona: self.settings.persona.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Runs one prompt through the endpoint, backing off on rate limits.
    ///
    /// Only rate limits are retried. The wait starts at `backoff_base` and
    /// doubles before every further attempt, up to `max_attempts` in total.
    pub async fn complete(&self, prompt: &str) -> Result<String, RelayError> {
        let request = self.request(prompt);
        let max_attempts = self.settings.max_attempts.max(1);
        let mut delay = self.settings.backoff_base;
        let mut attempt = 1;

        loop {
            match self.backend.complete(request.clone()).await {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        log::warn!("completion came back empty on attempt {attempt}");
                        return Err(RelayError::EmptyResult);
                    }

                    return Ok(text.to_string());
                }
                Err(BackendError::RateLimited(why)) if attempt < max_attempts => {
                    log::warn!(
                        "rate limited on attempt {attempt}/{max_attempts}, retrying in {delay:?}: {why}"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(BackendError::RateLimited(why)) => {
                    log::error!("rate limited on final attempt {attempt}: {why}");
                    return Err(RelayError::RateLimited { attempts: attempt });
                }
                Err(why) => return Err(why.into()),
            }
        }
    }
}
