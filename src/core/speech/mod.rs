mod base;
pub mod elevenlabs;

pub use base::{AudioData, BaseSpeech, BoxedSpeech, SpeechConfig, SpeechError, SpeechResult};
pub use elevenlabs::{ELEVENLABS_TTS_URL, ElevenLabsOutputFormat, ElevenLabsSpeech};

use std::sync::Arc;

/// Factory function to create a speech provider.
///
/// # Supported Providers
///
/// - `"elevenlabs"` (aliases `"eleven-labs"`, `"eleven_labs"`) - ElevenLabs TTS API
pub fn create_speech_provider(provider_type: &str, config: SpeechConfig) -> SpeechResult<BoxedSpeech> {
    match provider_type.trim().to_lowercase().as_str() {
        "elevenlabs" | "eleven-labs" | "eleven_labs" => Ok(Arc::new(ElevenLabsSpeech::new(config)?)),
        _ => Err(SpeechError::InvalidConfiguration(format!(
            "Unsupported speech provider: {provider_type}. Supported providers: elevenlabs"
        ))),
    }
}

/// Names accepted by [`create_speech_provider`].
pub fn get_supported_speech_providers() -> Vec<&'static str> {
    vec!["elevenlabs"]
}
