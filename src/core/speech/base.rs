//! Base traits and types for text-to-speech providers.
//!
//! A speech provider turns one assistant reply into one contiguous audio
//! buffer. The call site waits for the whole buffer before handing it to the
//! presentation layer.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while synthesizing speech.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Missing API key or unusable provider settings
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider answered with a non-success status
    #[error("Provider error ({status}): {message}")]
    ProviderError { status: u16, message: String },

    /// The audio stream broke off mid-transfer
    #[error("Audio stream error: {0}")]
    StreamError(String),

    /// The provider returned a successful response without audio
    #[error("Provider returned no audio")]
    EmptyAudio,

    /// Nothing to synthesize
    #[error("Text must not be empty")]
    EmptyText,
}

/// Result type for speech operations.
pub type SpeechResult<T> = Result<T, SpeechError>;

// =============================================================================
// Configuration
// =============================================================================

/// Provider-independent speech configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Provider name (e.g., "elevenlabs")
    #[serde(default)]
    pub provider: String,

    /// API key for authentication
    pub api_key: String,

    /// Voice identity used for every reply
    #[serde(default)]
    pub voice_id: String,

    /// Provider model identifier
    #[serde(default)]
    pub model_id: String,

    /// Output encoding/bitrate identifier (e.g., "mp3_44100_128")
    #[serde(default)]
    pub output_format: String,

    /// Override for the provider base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (0 uses the client default)
    #[serde(default)]
    pub timeout_seconds: u64,
}

// =============================================================================
// Audio Data
// =============================================================================

/// A complete synthesized utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    /// Encoded audio bytes
    pub data: Bytes,
    /// Provider output format identifier
    pub format: String,
    /// MIME type used when serving or embedding the audio
    pub content_type: String,
}

impl AudioData {
    pub fn new(data: impl Into<Bytes>, format: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            format: format.into(),
            content_type: content_type.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Text-to-speech provider.
#[async_trait]
pub trait BaseSpeech: Send + Sync {
    /// Synthesize `text` into a single audio buffer.
    ///
    /// Streamed responses are concatenated in arrival order before returning.
    async fn synthesize(&self, text: &str) -> SpeechResult<AudioData>;

    /// Provider metadata for diagnostics.
    fn get_provider_info(&self) -> serde_json::Value;
}

/// Shared speech provider handle.
pub type BoxedSpeech = Arc<dyn BaseSpeech>;
