use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ServerConfig, TlsConfig};

/// Read a variable, treating unset and blank values the same.
pub(super) fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable. Unset is `Ok(None)`; unparseable is an error.
pub(super) fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env_var(key) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

/// Accepts true/false, 1/0, yes/no, on/off.
pub(super) fn parse_env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env_var(key) {
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        },
        None => Ok(None),
    }
}

/// Build a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();

    // Server
    if let Some(host) = env_var("HOST") {
        config.host = host;
    }
    if let Some(port) = parse_env("PORT")? {
        config.port = port;
    }
    config.tls = match (env_var("TLS_CERT_PATH"), env_var("TLS_KEY_PATH")) {
        (Some(cert), Some(key)) => Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        }),
        (None, None) => None,
        _ => {
            return Err(ConfigError::Validation(
                "TLS_CERT_PATH and TLS_KEY_PATH must be set together".to_string(),
            ));
        }
    };

    // Provider API keys
    config.groq_api_key = env_var("GROQ_API_KEY");
    config.openai_api_key = env_var("OPENAI_API_KEY");
    config.elevenlabs_api_key = env_var("ELEVENLABS_API_KEY");

    // Completion
    if let Some(provider) = env_var("COMPLETION_PROVIDER") {
        config.completion.provider = provider;
    }
    if let Some(model) = env_var("COMPLETION_MODEL") {
        config.completion.model = Some(model);
    }
    if let Some(endpoint) = env_var("COMPLETION_ENDPOINT") {
        config.completion.endpoint = Some(endpoint);
    }
    if let Some(temperature) = parse_env("COMPLETION_TEMPERATURE")? {
        config.completion.temperature = temperature;
    }
    if let Some(timeout) = parse_env("COMPLETION_TIMEOUT_SECONDS")? {
        config.completion.timeout_seconds = timeout;
    }

    // Speech
    if let Some(provider) = env_var("SPEECH_PROVIDER") {
        config.speech.provider = provider;
    }
    if let Some(voice_id) = env_var("SPEECH_VOICE_ID") {
        config.speech.voice_id = voice_id;
    }
    if let Some(model_id) = env_var("SPEECH_MODEL_ID") {
        config.speech.model_id = model_id;
    }
    if let Some(format) = env_var("SPEECH_OUTPUT_FORMAT") {
        config.speech.output_format = format;
    }
    if let Some(base_url) = env_var("SPEECH_BASE_URL") {
        config.speech.base_url = Some(base_url);
    }
    if let Some(timeout) = parse_env("SPEECH_TIMEOUT_SECONDS")? {
        config.speech.timeout_seconds = timeout;
    }

    // Persona
    if let Some(name) = env_var("PERSONA_NAME") {
        config.persona.name = name;
    }
    if let Some(prompt) = env_var("PERSONA_SYSTEM_PROMPT") {
        config.persona.system_prompt = prompt;
    }

    // Session
    if let Some(window) = parse_env("SESSION_HISTORY_WINDOW")? {
        config.session.history_window = window;
    }
    if let Some(clear) = parse_env_bool("SESSION_CLEAR_HISTORY_ON_START")? {
        config.session.clear_history_on_start = clear;
    }
    if let Some(idle) = parse_env("SESSION_IDLE_TIMEOUT_SECONDS")? {
        config.session.idle_timeout_seconds = idle;
    }
    if let Some(max) = parse_env("SESSION_MAX_SESSIONS")? {
        config.session.max_sessions = max;
    }

    // Security
    config.cors_allowed_origins = env_var("CORS_ALLOWED_ORIGINS");
    if let Some(rps) = parse_env("RATE_LIMIT_REQUESTS_PER_SECOND")? {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = parse_env("RATE_LIMIT_BURST_SIZE")? {
        config.rate_limit_burst_size = burst;
    }

    Ok(config)
}
