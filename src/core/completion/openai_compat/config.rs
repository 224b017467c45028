//! Endpoint and model settings for OpenAI-compatible chat-completion APIs.
//!
//! Groq exposes the same `/chat/completions` contract as OpenAI, so both are
//! served by one client; only the endpoint and default model differ.

use serde::{Deserialize, Serialize};

/// Groq chat-completions endpoint.
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// OpenAI chat-completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default Groq model for persona replies.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Supported OpenAI-compatible backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackend {
    #[default]
    Groq,
    OpenAI,
}

impl ChatBackend {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
        }
    }

    /// Parse a provider name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "groq" | "groq-cloud" => Some(Self::Groq),
            "openai" | "open-ai" => Some(Self::OpenAI),
            _ => None,
        }
    }

    #[inline]
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Groq => GROQ_CHAT_COMPLETIONS_URL,
            Self::OpenAI => OPENAI_CHAT_COMPLETIONS_URL,
        }
    }

    #[inline]
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => DEFAULT_GROQ_MODEL,
            Self::OpenAI => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl std::fmt::Display for ChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
