use serde::Deserialize;
use std::path::Path;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables and defaults.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8501
///   tls:
///     enabled: true
///     cert_path: "/etc/sana/cert.pem"
///     key_path: "/etc/sana/key.pem"
///
/// providers:
///   groq_api_key: "gsk_..."
///   elevenlabs_api_key: "your-elevenlabs-key"
///
/// completion:
///   provider: "groq"
///   model: "llama-3.1-8b-instant"
///   temperature: 0.8
///   timeout_seconds: 60
///
/// speech:
///   provider: "elevenlabs"
///   voice_id: "flHkNRp1BlvT73UL6gyz"
///   model_id: "eleven_multilingual_v2"
///   output_format: "mp3_44100_128"
///
/// persona:
///   name: "Sana"
///   system_prompt: "You are Sana, ..."
///
/// session:
///   history_window: 5
///   clear_history_on_start: false
///   idle_timeout_seconds: 3600
///   max_sessions: 10000
///
/// security:
///   cors_allowed_origins: "https://example.com"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub completion: Option<CompletionYaml>,
    pub speech: Option<SpeechYaml>,
    pub persona: Option<PersonaYaml>,
    pub session: Option<SessionYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Provider API keys from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CompletionYaml {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Full chat-completions URL, for self-hosted OpenAI-compatible servers
    pub endpoint: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SpeechYaml {
    pub provider: Option<String>,
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
    pub output_format: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PersonaYaml {
    pub name: Option<String>,
    pub system_prompt: Option<String>,
}

/// Conversation and session store settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SessionYaml {
    /// Prior turns sent with each completion request
    pub history_window: Option<usize>,
    /// Wipe the conversation when a new call starts
    pub clear_history_on_start: Option<bool>,
    pub idle_timeout_seconds: Option<u64>,
    pub max_sessions: Option<u64>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: Option<u32>,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: YamlConfig = serde_yaml::from_str(&contents)?;

        Ok(config)
    }
}
