//! Configuration types for the ElevenLabs text-to-speech API.

use serde::{Deserialize, Serialize};

/// ElevenLabs API base URL.
pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// ElevenLabs text-to-speech endpoint (voice id is appended).
pub const ELEVENLABS_TTS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// Voice used for the Sana persona.
pub const DEFAULT_VOICE_ID: &str = "flHkNRp1BlvT73UL6gyz";

/// Default synthesis model.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

// =============================================================================
// Output Format
// =============================================================================

/// Output encodings accepted by the `output_format` query parameter.
///
/// The identifier encodes codec, sample rate and (for mp3) bitrate.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElevenLabsOutputFormat {
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,
    #[serde(rename = "mp3_44100_96")]
    Mp3_44100_96,
    /// MP3 44.1kHz 128kbps (default)
    #[default]
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
    #[serde(rename = "mp3_44100_192")]
    Mp3_44100_192,
    #[serde(rename = "pcm_16000")]
    Pcm16000,
    #[serde(rename = "pcm_22050")]
    Pcm22050,
    #[serde(rename = "pcm_24000")]
    Pcm24000,
    #[serde(rename = "pcm_44100")]
    Pcm44100,
    #[serde(rename = "ulaw_8000")]
    Ulaw8000,
}

impl ElevenLabsOutputFormat {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3_22050_32 => "mp3_22050_32",
            Self::Mp3_44100_64 => "mp3_44100_64",
            Self::Mp3_44100_96 => "mp3_44100_96",
            Self::Mp3_44100_128 => "mp3_44100_128",
            Self::Mp3_44100_192 => "mp3_44100_192",
            Self::Pcm16000 => "pcm_16000",
            Self::Pcm22050 => "pcm_22050",
            Self::Pcm24000 => "pcm_24000",
            Self::Pcm44100 => "pcm_44100",
            Self::Ulaw8000 => "ulaw_8000",
        }
    }

    /// Parse a format identifier. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let format = match s.trim().to_lowercase().as_str() {
            "mp3_22050_32" => Self::Mp3_22050_32,
            "mp3_44100_64" => Self::Mp3_44100_64,
            "mp3_44100_96" => Self::Mp3_44100_96,
            "mp3_44100_128" | "mp3" => Self::Mp3_44100_128,
            "mp3_44100_192" => Self::Mp3_44100_192,
            "pcm_16000" => Self::Pcm16000,
            "pcm_22050" => Self::Pcm22050,
            "pcm_24000" | "pcm" => Self::Pcm24000,
            "pcm_44100" => Self::Pcm44100,
            "ulaw_8000" | "ulaw" | "mulaw" => Self::Ulaw8000,
            _ => return None,
        };
        Some(format)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        match self {
            Self::Mp3_22050_32 | Self::Pcm22050 => 22050,
            Self::Pcm16000 => 16000,
            Self::Pcm24000 => 24000,
            Self::Ulaw8000 => 8000,
            Self::Mp3_44100_64
            | Self::Mp3_44100_96
            | Self::Mp3_44100_128
            | Self::Mp3_44100_192
            | Self::Pcm44100 => 44100,
        }
    }

    /// MIME type of the returned audio.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3_22050_32
            | Self::Mp3_44100_64
            | Self::Mp3_44100_96
            | Self::Mp3_44100_128
            | Self::Mp3_44100_192 => "audio/mpeg",
            Self::Pcm16000 | Self::Pcm22050 | Self::Pcm24000 | Self::Pcm44100 => "audio/pcm",
            Self::Ulaw8000 => "audio/basic",
        }
    }

    /// Whether a browser `<audio>` element can play this format directly.
    pub fn is_browser_playable(&self) -> bool {
        self.content_type() == "audio/mpeg"
    }
}

impl std::fmt::Display for ElevenLabsOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
