//! OpenAI-compatible chat-completions provider.
//!
//! Serves Groq (the default backend) and OpenAI through the same request
//! shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use sana_call::core::completion::{BaseCompletion, ChatBackend, ChatCompletionsClient, CompletionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CompletionConfig {
//!         api_key: "gsk_...".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let client = ChatCompletionsClient::new(ChatBackend::Groq, config).unwrap();
//!     let reply = client.reply("Hello", &[], "You are Sana.").await.unwrap();
//!     println!("{reply}");
//! }
//! ```

mod client;
mod config;
mod messages;

pub use client::ChatCompletionsClient;
pub use config::{
    ChatBackend, DEFAULT_GROQ_MODEL, DEFAULT_OPENAI_MODEL, GROQ_CHAT_COMPLETIONS_URL,
    OPENAI_CHAT_COMPLETIONS_URL,
};
pub use messages::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
