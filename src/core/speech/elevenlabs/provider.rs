//! ElevenLabs TTS provider implementation.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.elevenlabs.io/v1/text-to-speech/{voice_id}?output_format=...`
//! - Auth: `xi-api-key` header
//! - Body: `{ "text": ..., "model_id": ... }`
//! - Output: audio bytes, delivered with chunked transfer encoding

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use super::config::{
    DEFAULT_MODEL_ID, DEFAULT_VOICE_ID, ELEVENLABS_BASE_URL, ElevenLabsOutputFormat,
};
use crate::core::speech::base::{AudioData, BaseSpeech, SpeechConfig, SpeechError, SpeechResult};

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("SanaCall/", env!("CARGO_PKG_VERSION"));

/// ElevenLabs text-to-speech provider with a fixed voice and output format.
pub struct ElevenLabsSpeech {
    client: Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
    output_format: ElevenLabsOutputFormat,
}

impl ElevenLabsSpeech {
    pub fn new(config: SpeechConfig) -> SpeechResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SpeechError::InvalidConfiguration(
                "ElevenLabs API key is not configured".to_string(),
            ));
        }

        let output_format = if config.output_format.trim().is_empty() {
            ElevenLabsOutputFormat::default()
        } else {
            ElevenLabsOutputFormat::parse(&config.output_format).ok_or_else(|| {
                SpeechError::InvalidConfiguration(format!(
                    "Unsupported ElevenLabs output format: {}",
                    config.output_format
                ))
            })?
        };

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder.build().map_err(|e| {
            SpeechError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        let base_url = config
            .base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| ELEVENLABS_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            voice_id: non_empty_or(config.voice_id, DEFAULT_VOICE_ID),
            model_id: non_empty_or(config.model_id, DEFAULT_MODEL_ID),
            output_format,
        })
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn output_format(&self) -> ElevenLabsOutputFormat {
        self.output_format
    }

    /// Full synthesis URL for the configured voice.
    pub fn synthesis_url(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }

    fn build_http_request(&self, text: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.synthesis_url())
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", self.output_format.content_type())
            .json(&json!({
                "text": text,
                "model_id": self.model_id,
            }))
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// ElevenLabs errors come as `{"detail": {"message": ...}}` or `{"detail": "..."}`.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(|v| v.get("detail"));
    match detail {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| obj.to_string()),
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl BaseSpeech for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str) -> SpeechResult<AudioData> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!(
            voice_id = %self.voice_id,
            model_id = %self.model_id,
            output_format = %self.output_format,
            chars = text.len(),
            "Requesting speech synthesis"
        );

        let response = self
            .build_http_request(text)
            .send()
            .await
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!(status = status.as_u16(), %message, "ElevenLabs synthesis failed");
            return Err(SpeechError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        // Concatenate chunks in arrival order.
        let mut buffer = BytesMut::new();
        let mut chunks = 0usize;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SpeechError::StreamError(e.to_string()))?;
            buffer.extend_from_slice(&chunk);
            chunks += 1;
        }

        if buffer.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        debug!(bytes = buffer.len(), chunks, "Speech synthesis complete");

        Ok(AudioData::new(
            buffer.freeze(),
            self.output_format.as_str(),
            self.output_format.content_type(),
        ))
    }

    fn get_provider_info(&self) -> serde_json::Value {
        json!({
            "provider": "elevenlabs",
            "api_type": "HTTP REST",
            "voice_id": self.voice_id,
            "model_id": self.model_id,
            "output_format": self.output_format.as_str(),
            "sample_rate": self.output_format.sample_rate(),
            "endpoint": self.synthesis_url(),
            "documentation": "https://elevenlabs.io/docs/api-reference/text-to-speech",
        })
    }
}
