//! Base traits and types for chat-completion providers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::session::ChatTurn;

/// Default sampling temperature for persona replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Missing API key or unusable provider settings
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider answered with a non-success status
    #[error("Provider error ({status}): {message}")]
    ProviderError { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider returned no choices
    #[error("Provider returned no reply")]
    EmptyResponse,

    /// Nothing to send
    #[error("User message must not be empty")]
    EmptyInput,
}

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

// =============================================================================
// Configuration
// =============================================================================

/// Provider-independent completion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Provider name (e.g., "groq")
    #[serde(default)]
    pub provider: String,

    /// API key for authentication
    pub api_key: String,

    /// Model identifier
    #[serde(default)]
    pub model: String,

    /// Override for the chat-completions endpoint URL
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds (0 uses the client default)
    #[serde(default)]
    pub timeout_seconds: u64,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            api_key: String::new(),
            model: String::new(),
            endpoint: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: 0,
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Chat-completion provider.
#[async_trait]
pub trait BaseCompletion: Send + Sync {
    /// Ask the provider for the assistant's next message.
    ///
    /// The request carries `system_prompt`, then `history` in order, then
    /// `user_text` as the final user message. The top choice is returned
    /// verbatim.
    async fn reply(
        &self,
        user_text: &str,
        history: &[ChatTurn],
        system_prompt: &str,
    ) -> CompletionResult<String>;

    /// Provider metadata for diagnostics.
    fn get_provider_info(&self) -> serde_json::Value;
}

/// Shared completion provider handle.
pub type BoxedCompletion = Arc<dyn BaseCompletion>;
