//! ElevenLabs TTS provider module.
//!
//! Synthesizes each assistant reply with a fixed voice, model and output
//! encoding. The streamed response body is collected into one buffer.

mod config;
mod provider;

pub use config::{
    DEFAULT_MODEL_ID, DEFAULT_VOICE_ID, ELEVENLABS_BASE_URL, ELEVENLABS_TTS_URL,
    ElevenLabsOutputFormat,
};
pub use provider::ElevenLabsSpeech;
