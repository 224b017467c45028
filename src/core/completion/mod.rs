mod base;
pub mod openai_compat;

pub use base::{
    BaseCompletion, BoxedCompletion, CompletionConfig, CompletionError, CompletionResult,
    DEFAULT_TEMPERATURE,
};
pub use openai_compat::{
    ChatBackend, ChatCompletionsClient, GROQ_CHAT_COMPLETIONS_URL, OPENAI_CHAT_COMPLETIONS_URL,
};

use std::sync::Arc;

/// Factory function to create a completion provider.
///
/// # Supported Providers
///
/// - `"groq"` - Groq chat completions (default, `llama-3.1-8b-instant`)
/// - `"openai"` - OpenAI chat completions
///
/// Provider names are case-insensitive.
pub fn create_completion_provider(
    provider_type: &str,
    config: CompletionConfig,
) -> CompletionResult<BoxedCompletion> {
    match ChatBackend::parse(provider_type) {
        Some(backend) => Ok(Arc::new(ChatCompletionsClient::new(backend, config)?)),
        None => Err(CompletionError::InvalidConfiguration(format!(
            "Unsupported completion provider: {provider_type}. Supported providers: groq, openai"
        ))),
    }
}

/// Names accepted by [`create_completion_provider`].
pub fn get_supported_completion_providers() -> Vec<&'static str> {
    vec!["groq", "openai"]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CompletionConfig {
        CompletionConfig {
            api_key: "test_key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_groq_provider() {
        let provider = create_completion_provider("groq", config()).unwrap();
        assert_eq!(provider.get_provider_info()["provider"], "groq");
    }

    #[test]
    fn test_create_provider_case_insensitive() {
        assert!(create_completion_provider("GROQ", config()).is_ok());
        assert!(create_completion_provider("OpenAI", config()).is_ok());
    }

    #[test]
    fn test_invalid_provider_error_message() {
        match create_completion_provider("invalid_provider", config()) {
            Err(CompletionError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("groq"));
                assert!(msg.contains("openai"));
            }
            Err(other) => panic!("Expected InvalidConfiguration error, got: {other:?}"),
            Ok(_) => panic!("Expected error for invalid provider"),
        }
    }

    #[test]
    fn test_missing_key_fails_at_creation() {
        let result = create_completion_provider("groq", CompletionConfig::default());
        assert!(matches!(
            result,
            Err(CompletionError::InvalidConfiguration(_))
        ));
    }
}
