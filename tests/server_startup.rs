//! Server Startup Tests
//!
//! Configuration loading and state construction.

use std::fs;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serial_test::serial;
use tempfile::TempDir;
use tower::util::ServiceExt;

use sana_call::{ServerConfig, routes, state::AppState};

const ENV_VARS: &[&str] = &[
    "HOST",
    "PORT",
    "TLS_CERT_PATH",
    "TLS_KEY_PATH",
    "GROQ_API_KEY",
    "OPENAI_API_KEY",
    "ELEVENLABS_API_KEY",
    "COMPLETION_PROVIDER",
    "COMPLETION_MODEL",
    "COMPLETION_TEMPERATURE",
    "SESSION_HISTORY_WINDOW",
    "SESSION_CLEAR_HISTORY_ON_START",
];

fn clear_env() {
    for key in ENV_VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// The server boots without any API keys
#[tokio::test]
async fn test_minimal_config_boot() {
    let app_state = AppState::new(ServerConfig::default()).await;
    let app = routes::create_app_router(app_state);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_state_reflects_config() {
    let mut config = ServerConfig::default();
    config.persona.name = "Mira".to_string();
    config.session.history_window = 2;
    config.rate_limit_requests_per_second = 100000;

    let app_state = AppState::new(config).await;
    assert_eq!(app_state.controller.persona().name, "Mira");
    assert_eq!(app_state.controller.settings().history_window, 2);
    assert!(app_state.config.rate_limit_requests_per_second >= 100000);
    assert!(app_state.sessions.is_empty());
}

#[test]
#[serial]
fn test_from_file_overrides_env() {
    clear_env();
    unsafe {
        std::env::set_var("PORT", "9100");
        std::env::set_var("GROQ_API_KEY", "gsk-env");
    }

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
server:
  host: "127.0.0.1"
completion:
  model: "llama-3.3-70b-versatile"
  temperature: 0.4
session:
  history_window: 0
"#,
    )
    .unwrap();

    let config = ServerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.address(), "127.0.0.1:9100");
    assert_eq!(config.groq_api_key.as_deref(), Some("gsk-env"));
    assert_eq!(
        config.completion.model.as_deref(),
        Some("llama-3.3-70b-versatile")
    );
    assert_eq!(config.session.history_window, 0);

    clear_env();
}

#[test]
#[serial]
fn test_from_file_rejects_invalid_values() {
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "completion:\n  temperature: 3.5\n").unwrap();

    let err = ServerConfig::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("temperature"));
}

#[test]
#[serial]
fn test_from_env_rejects_unknown_provider() {
    clear_env();
    unsafe {
        std::env::set_var("COMPLETION_PROVIDER", "mystery");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("mystery"));

    clear_env();
}
