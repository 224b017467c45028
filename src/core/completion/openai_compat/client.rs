//! Chat-completions client for Groq and other OpenAI-compatible APIs.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.groq.com/openai/v1/chat/completions`
//! - Auth: `Authorization: Bearer <key>`
//! - Body: `{ model, messages, temperature }`
//!
//! One request per user turn. No retries: a failed request is reported to
//! the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::config::ChatBackend;
use super::messages::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};
use crate::core::completion::base::{
    BaseCompletion, CompletionConfig, CompletionError, CompletionResult,
};
use crate::core::session::ChatTurn;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("SanaCall/", env!("CARGO_PKG_VERSION"));

/// Client for one OpenAI-compatible chat-completions endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    backend: ChatBackend,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl ChatCompletionsClient {
    /// Create a client for `backend`.
    ///
    /// Fails when the API key is empty or the HTTP client cannot be built.
    pub fn new(backend: ChatBackend, config: CompletionConfig) -> CompletionResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::InvalidConfiguration(format!(
                "{backend} API key is not configured"
            )));
        }

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder.build().map_err(|e| {
            CompletionError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        let endpoint = config
            .endpoint
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| backend.default_endpoint().to_string());
        let model = if config.model.trim().is_empty() {
            backend.default_model().to_string()
        } else {
            config.model
        };

        Ok(Self {
            client,
            backend,
            endpoint,
            model,
            temperature: config.temperature,
            api_key: config.api_key,
        })
    }

    pub fn backend(&self) -> ChatBackend {
        self.backend
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    fn build_http_request(&self, request: &ChatCompletionRequest) -> reqwest::RequestBuilder {
        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
    }
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl BaseCompletion for ChatCompletionsClient {
    async fn reply(
        &self,
        user_text: &str,
        history: &[ChatTurn],
        system_prompt: &str,
    ) -> CompletionResult<String> {
        if user_text.trim().is_empty() {
            return Err(CompletionError::EmptyInput);
        }

        let request = ChatCompletionRequest::build(
            &self.model,
            self.temperature,
            system_prompt,
            history,
            user_text,
        );

        debug!(
            provider = %self.backend,
            model = %self.model,
            history_len = history.len(),
            "Sending chat completion request"
        );

        let response = self
            .build_http_request(&request)
            .send()
            .await
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(provider = %self.backend, status = status.as_u16(), %message, "Chat completion failed");
            return Err(CompletionError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                provider = %self.backend,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parsed
            .first_content()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyResponse)
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": self.backend.as_str(),
            "api_type": "HTTP REST",
            "model": self.model,
            "temperature": self.temperature,
            "endpoint": self.endpoint,
        })
    }
}
