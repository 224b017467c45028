//! The assistant persona: system prompt and display labels.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PERSONA_NAME: &str = "Sana";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Sana, an eloquent villainess. Calm, confident, teasing, intelligent, slightly cruel. You always call the user 'senpai'. Your replies are concise but dramatic.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name of the assistant
    pub name: String,
    /// System-level instruction sent with every completion request
    pub system_prompt: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: DEFAULT_PERSONA_NAME.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Persona {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
        }
    }
}
