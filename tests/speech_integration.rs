//! ElevenLabs speech client tests against mocked endpoints.

mod mock_providers;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mock_providers::http_mock::spawn_chunked_speech_server;
use mock_providers::{TEST_VOICE_ID, mount_speech_audio, mount_speech_error};
use sana_call::core::speech::{BaseSpeech, ElevenLabsSpeech, SpeechConfig, SpeechError};

fn speech_for(base_url: &str) -> ElevenLabsSpeech {
    ElevenLabsSpeech::new(SpeechConfig {
        provider: "elevenlabs".to_string(),
        api_key: "test_elevenlabs_key".to_string(),
        base_url: Some(base_url.to_string()),
        timeout_seconds: 5,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/text-to-speech/{TEST_VOICE_ID}")))
        .and(query_param("output_format", "mp3_44100_128"))
        .and(header("xi-api-key", "test_elevenlabs_key"))
        .and(body_json(json!({
            "text": "Greetings, senpai.",
            "model_id": "eleven_multilingual_v2"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(b"ID3audio".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let speech = speech_for(&server.uri());
    let audio = speech.synthesize("Greetings, senpai.").await.unwrap();

    assert_eq!(audio.data.as_ref(), b"ID3audio");
    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(audio.format, "mp3_44100_128");
}

#[tokio::test]
async fn test_chunks_concatenated_in_order() {
    let server = spawn_chunked_speech_server(vec![b"ab", b"cd", b"ef"]).await;

    let speech = speech_for(&server.base_url);
    let audio = speech.synthesize("Hello").await.unwrap();

    assert_eq!(audio.data.as_ref(), b"abcdef");
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_provider_error_message_extracted() {
    let server = MockServer::start().await;
    mount_speech_error(&server, 401, "Invalid API key").await;

    let speech = speech_for(&server.uri());
    match speech.synthesize("Hello").await {
        Err(SpeechError::ProviderError { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("Expected ProviderError, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_body_is_empty_audio() {
    let server = MockServer::start().await;
    mount_speech_audio(&server, b"").await;

    let speech = speech_for(&server.uri());
    assert!(matches!(
        speech.synthesize("Hello").await,
        Err(SpeechError::EmptyAudio)
    ));
}

#[tokio::test]
async fn test_error_display_names_cause() {
    let server = MockServer::start().await;
    mount_speech_error(&server, 429, "Quota exceeded").await;

    let speech = speech_for(&server.uri());
    let err = speech.synthesize("Hello").await.unwrap_err();
    assert!(err.to_string().contains("Quota exceeded"));
}
