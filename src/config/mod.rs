//! Configuration module for the Sana call server
//!
//! Server configuration comes from YAML files, environment variables and
//! `.env` files. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Applying YAML overrides on top of the environment
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use sana_call::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::completion::{CompletionConfig, DEFAULT_TEMPERATURE};
use crate::core::controller::{DEFAULT_HISTORY_WINDOW, TurnSettings};
use crate::core::persona::Persona;
use crate::core::speech::SpeechConfig;
use crate::core::speech::elevenlabs::{DEFAULT_MODEL_ID, DEFAULT_VOICE_ID};

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Default request timeout for provider calls.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("{provider} API key not configured in server environment")]
    MissingApiKey { provider: String },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
}

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Chat-completion settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    /// Provider name (`groq` or `openai`)
    pub provider: String,
    /// Model id; `None` uses the provider's default
    pub model: Option<String>,
    /// Full chat-completions URL override
    pub endpoint: Option<String>,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: None,
            endpoint: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub provider: String,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: String,
    /// API base URL override (testing or proxies)
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            provider: "elevenlabs".to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: "mp3_44100_128".to_string(),
            base_url: None,
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

/// Conversation policy and session store limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub history_window: usize,
    pub clear_history_on_start: bool,
    /// Sessions untouched for this long are evicted
    pub idle_timeout_seconds: u64,
    pub max_sessions: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            clear_history_on_start: false,
            idle_timeout_seconds: 3600,
            max_sessions: 10_000,
        }
    }
}

impl SessionSettings {
    pub fn turn_settings(&self) -> TurnSettings {
        TurnSettings {
            history_window: self.history_window,
            clear_history_on_start: self.clear_history_on_start,
        }
    }
}

/// Server configuration
///
/// Contains everything needed to run the server:
/// - Server settings (host, port, TLS)
/// - Provider API keys (Groq, OpenAI, ElevenLabs)
/// - Completion, speech and persona settings
/// - Session settings
/// - Security settings (CORS, rate limiting)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Provider API keys
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,

    pub completion: CompletionSettings,
    pub speech: SpeechSettings,
    pub persona: Persona,
    pub session: SessionSettings,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (same-origin only)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            tls: None,
            groq_api_key: None,
            openai_api_key: None,
            elevenlabs_api_key: None,
            completion: CompletionSettings::default(),
            speech: SpeechSettings::default(),
            persona: Persona::default(),
            session: SessionSettings::default(),
            cors_allowed_origins: None,
            rate_limit_requests_per_second: 60,
            rate_limit_burst_size: 10,
        }
    }
}

/// Zeroize API keys when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.groq_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.elevenlabs_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and defaults).
    ///
    /// `.env` values are expected to be loaded into the process environment
    /// before this is called (see `main.rs`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = env::load_from_env()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Get the API key for a provider by name (case-insensitive).
    pub fn get_api_key(&self, provider: &str) -> Result<String, ConfigError> {
        let (label, key) = match provider.trim().to_lowercase().as_str() {
            "groq" => ("Groq", &self.groq_api_key),
            "openai" => ("OpenAI", &self.openai_api_key),
            "elevenlabs" | "eleven-labs" | "eleven_labs" => {
                ("ElevenLabs", &self.elevenlabs_api_key)
            }
            _ => return Err(ConfigError::UnsupportedProvider(provider.to_string())),
        };

        key.as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: label.to_string(),
            })
    }

    /// Provider configuration for the completion client.
    pub fn completion_config(&self) -> Result<CompletionConfig, ConfigError> {
        Ok(CompletionConfig {
            provider: self.completion.provider.clone(),
            api_key: self.get_api_key(&self.completion.provider)?,
            model: self.completion.model.clone().unwrap_or_default(),
            endpoint: self.completion.endpoint.clone(),
            temperature: self.completion.temperature,
            timeout_seconds: self.completion.timeout_seconds,
        })
    }

    /// Provider configuration for the speech client.
    pub fn speech_config(&self) -> Result<SpeechConfig, ConfigError> {
        Ok(SpeechConfig {
            provider: self.speech.provider.clone(),
            api_key: self.get_api_key(&self.speech.provider)?,
            voice_id: self.speech.voice_id.clone(),
            model_id: self.speech.model_id.clone(),
            output_format: self.speech.output_format.clone(),
            base_url: self.speech.base_url.clone(),
            timeout_seconds: self.speech.timeout_seconds,
        })
    }
}
