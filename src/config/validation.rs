use crate::core::completion::get_supported_completion_providers;
use crate::core::speech::{ElevenLabsOutputFormat, get_supported_speech_providers};

use super::{ConfigError, ServerConfig};

/// Reject configurations the server cannot run with.
///
/// Missing API keys are not checked here; they surface on first use.
pub(super) fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    validate_server(config)?;
    validate_completion(config)?;
    validate_speech(config)?;
    validate_session(config)?;
    Ok(())
}

fn validate_server(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::Validation("port must be non-zero".to_string()));
    }
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation("host must not be empty".to_string()));
    }
    if config.rate_limit_requests_per_second == 0 || config.rate_limit_burst_size == 0 {
        return Err(ConfigError::Validation(
            "rate limit values must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_completion(config: &ServerConfig) -> Result<(), ConfigError> {
    let completion = &config.completion;
    let provider = completion.provider.trim().to_lowercase();
    if !get_supported_completion_providers().contains(&provider.as_str()) {
        return Err(ConfigError::UnsupportedProvider(completion.provider.clone()));
    }

    if !(0.0..=2.0).contains(&completion.temperature) {
        return Err(ConfigError::Validation(format!(
            "completion temperature must be between 0 and 2, got {}",
            completion.temperature
        )));
    }

    if completion
        .model
        .as_ref()
        .is_some_and(|model| model.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "completion model must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_speech(config: &ServerConfig) -> Result<(), ConfigError> {
    let speech = &config.speech;
    let provider = speech.provider.trim().to_lowercase();
    let known = get_supported_speech_providers().contains(&provider.as_str())
        || matches!(provider.as_str(), "eleven-labs" | "eleven_labs");
    if !known {
        return Err(ConfigError::UnsupportedProvider(speech.provider.clone()));
    }

    if speech.voice_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "speech voice_id must not be empty".to_string(),
        ));
    }
    if speech.model_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "speech model_id must not be empty".to_string(),
        ));
    }
    let Some(format) = ElevenLabsOutputFormat::parse(&speech.output_format) else {
        return Err(ConfigError::InvalidValue {
            key: "speech.output_format".to_string(),
            value: speech.output_format.clone(),
        });
    };
    // Replies are embedded in an <audio> element; raw PCM and u-law do not play.
    if !format.is_browser_playable() {
        return Err(ConfigError::Validation(format!(
            "speech output_format {format} cannot be played by browsers, use an mp3_* format"
        )));
    }
    Ok(())
}

fn validate_session(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.session.max_sessions == 0 {
        return Err(ConfigError::Validation(
            "session max_sessions must be greater than zero".to_string(),
        ));
    }
    if config.session.idle_timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "session idle_timeout_seconds must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_temperature_range() {
        let mut config = ServerConfig::default();
        config.completion.temperature = 2.0;
        assert!(validate(&config).is_ok());

        config.completion.temperature = 2.5;
        assert!(validate(&config).unwrap_err().to_string().contains("temperature"));

        config.completion.temperature = -0.1;
        assert!(validate(&config).is_err());

        config.completion.temperature = f32::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_providers_rejected() {
        let mut config = ServerConfig::default();
        config.completion.provider = "anthropic".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::UnsupportedProvider(_))
        ));

        let mut config = ServerConfig::default();
        config.completion.provider = "OpenAI".to_string();
        config.speech.provider = "Eleven-Labs".to_string();
        assert!(validate(&config).is_ok());

        config.speech.provider = "polly".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_ids_rejected() {
        let mut config = ServerConfig::default();
        config.completion.model = Some(" ".to_string());
        assert!(validate(&config).is_err());

        let mut config = ServerConfig::default();
        config.speech.voice_id = String::new();
        assert!(validate(&config).unwrap_err().to_string().contains("voice_id"));
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let mut config = ServerConfig::default();
        config.speech.output_format = "flac".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unplayable_output_format_rejected() {
        for format in ["pcm_16000", "pcm_24000", "ulaw_8000"] {
            let mut config = ServerConfig::default();
            config.speech.output_format = format.to_string();
            match validate(&config) {
                Err(ConfigError::Validation(msg)) => assert!(msg.contains(format)),
                other => panic!("Expected Validation error for {format}, got: {other:?}"),
            }
        }

        let mut config = ServerConfig::default();
        config.speech.output_format = "mp3_22050_32".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_session_limits() {
        let mut config = ServerConfig::default();
        config.session.max_sessions = 0;
        assert!(validate(&config).is_err());

        let mut config = ServerConfig::default();
        config.session.history_window = 0;
        assert!(validate(&config).is_ok());
    }
}
