//! Mock provider backends for integration tests
//!
//! - wiremock helpers for the chat-completions and text-to-speech APIs
//! - `http_mock`: an axum server that streams audio in chunks

#![allow(dead_code)]

pub mod http_mock;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sana_call::ServerConfig;

pub const CHAT_PATH: &str = "/openai/v1/chat/completions";
pub const TEST_VOICE_ID: &str = "flHkNRp1BlvT73UL6gyz";

/// Chat-completions response body with a single choice.
pub fn chat_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

pub async fn mount_chat_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(content)))
        .mount(server)
        .await;
}

pub async fn mount_chat_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "message": message, "type": "invalid_request_error" }
        })))
        .mount(server)
        .await;
}

pub async fn mount_speech_audio(server: &MockServer, audio: &[u8]) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/text-to-speech/[^/]+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(audio.to_vec()),
        )
        .mount(server)
        .await;
}

pub async fn mount_speech_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/text-to-speech/[^/]+$"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "detail": { "status": "error", "message": message }
        })))
        .mount(server)
        .await;
}

/// Server configuration pointing both providers at mock servers.
pub fn mock_config(completion: &MockServer, speech_base_url: &str) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.groq_api_key = Some("test_groq_key".to_string());
    config.elevenlabs_api_key = Some("test_elevenlabs_key".to_string());
    config.completion.endpoint = Some(format!("{}{CHAT_PATH}", completion.uri()));
    config.completion.timeout_seconds = 5;
    config.speech.base_url = Some(speech_base_url.to_string());
    config.speech.timeout_seconds = 5;
    config
}
