use async_trait::async_trait;
use rig::{
    completion::{CompletionError, CompletionModel, CompletionRequest as RigRequest},
    message::{AssistantContent, Message},
    providers::openai,
};

use super::{BackendError, CompletionBackend, CompletionRequest};

/// Any endpoint speaking the OpenAI chat completions API (Together.ai by default).
pub struct OpenAICompatible {
    model: openai::CompletionModel,
}

impl OpenAICompatible {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        let client = openai::Client::from_url(api_key, base_url);

        Self {
            model: client.completion_model(model),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompatible {
    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError> {
        let CompletionRequest {
            persona,
            prompt,
            max_tokens,
            temperature,
        } = request;

        let request = RigRequest {
            additional_params: None,
            chat_history: vec![],
            documents: vec![],
            max_tokens: Some(max_tokens),
            preamble: Some(persona),
            temperature: Some(temperature),
            tools: vec![],
            prompt: Message::user(prompt),
        };

        let response = self.model.completion(request).await?;

        match response.choice.first() {
            AssistantContent::Text(text) => Ok(text.text),
            _ => {
                log::warn!("first choice was not text, treating as empty");
                Ok(String::new())
            }
        }
    }
}

impl From<CompletionError> for BackendError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::HttpError(why) => {
                if why.status().map(|status| status.as_u16()) == Some(429) {
                    BackendError::RateLimited(why.to_string())
                } else {
                    BackendError::Transport(why.to_string())
                }
            }
            CompletionError::ProviderError(body) => {
                if is_rate_limit(&body) {
                    BackendError::RateLimited(body)
                } else {
                    BackendError::Api(body)
                }
            }
            other => BackendError::Api(other.to_string()),
        }
    }
}

/// rig hands back the raw error body for non-2xx responses, so 429s are spotted by wording.
/// Bare status digits are not trusted, they turn up in request ids and token counts.
fn is_rate_limit(body: &str) -> bool {
    let body = body.to_lowercase();

    ["rate limit", "rate_limit", "too many requests"]
        .iter()
        .any(|marker| body.contains(marker))
}
