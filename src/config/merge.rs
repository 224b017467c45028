use std::path::PathBuf;

use super::env::load_from_env;
use super::yaml::YamlConfig;
use super::{ConfigError, ServerConfig, TlsConfig};

/// Environment configuration with YAML values layered on top.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let mut config = load_from_env()?;
    if let Some(yaml) = yaml {
        apply_yaml(&mut config, yaml)?;
    }
    Ok(config)
}

fn apply_yaml(config: &mut ServerConfig, yaml: YamlConfig) -> Result<(), ConfigError> {
    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(tls) = server.tls {
            if tls.enabled == Some(false) {
                config.tls = None;
            } else {
                match (tls.cert_path, tls.key_path) {
                    (Some(cert), Some(key)) => {
                        config.tls = Some(TlsConfig {
                            cert_path: PathBuf::from(cert),
                            key_path: PathBuf::from(key),
                        });
                    }
                    (None, None) if tls.enabled.is_none() => {}
                    _ => {
                        return Err(ConfigError::Validation(
                            "server.tls requires both cert_path and key_path".to_string(),
                        ));
                    }
                }
            }
        }
    }

    if let Some(providers) = yaml.providers {
        if providers.groq_api_key.is_some() {
            config.groq_api_key = providers.groq_api_key;
        }
        if providers.openai_api_key.is_some() {
            config.openai_api_key = providers.openai_api_key;
        }
        if providers.elevenlabs_api_key.is_some() {
            config.elevenlabs_api_key = providers.elevenlabs_api_key;
        }
    }

    if let Some(completion) = yaml.completion {
        if let Some(provider) = completion.provider {
            config.completion.provider = provider;
        }
        if completion.model.is_some() {
            config.completion.model = completion.model;
        }
        if completion.endpoint.is_some() {
            config.completion.endpoint = completion.endpoint;
        }
        if let Some(temperature) = completion.temperature {
            config.completion.temperature = temperature;
        }
        if let Some(timeout) = completion.timeout_seconds {
            config.completion.timeout_seconds = timeout;
        }
    }

    if let Some(speech) = yaml.speech {
        if let Some(provider) = speech.provider {
            config.speech.provider = provider;
        }
        if let Some(voice_id) = speech.voice_id {
            config.speech.voice_id = voice_id;
        }
        if let Some(model_id) = speech.model_id {
            config.speech.model_id = model_id;
        }
        if let Some(format) = speech.output_format {
            config.speech.output_format = format;
        }
        if speech.base_url.is_some() {
            config.speech.base_url = speech.base_url;
        }
        if let Some(timeout) = speech.timeout_seconds {
            config.speech.timeout_seconds = timeout;
        }
    }

    if let Some(persona) = yaml.persona {
        if let Some(name) = persona.name {
            config.persona.name = name;
        }
        if let Some(prompt) = persona.system_prompt {
            config.persona.system_prompt = prompt;
        }
    }

    if let Some(session) = yaml.session {
        if let Some(window) = session.history_window {
            config.session.history_window = window;
        }
        if let Some(clear) = session.clear_history_on_start {
            config.session.clear_history_on_start = clear;
        }
        if let Some(idle) = session.idle_timeout_seconds {
            config.session.idle_timeout_seconds = idle;
        }
        if let Some(max) = session.max_sessions {
            config.session.max_sessions = max;
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    Ok(())
}
