use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::completion::{CompletionError, create_completion_provider};
use crate::core::controller::TurnController;
use crate::core::session::{SessionHandle, SessionId, SessionStore};
use crate::core::speech::{SpeechError, create_speech_provider};
use crate::errors::{AppError, AppResult};

/// Application state shared by all handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub sessions: SessionStore,
    pub controller: TurnController,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> Arc<Self> {
        let controller = build_controller(&config);
        let sessions = SessionStore::new(
            config.session.max_sessions,
            Duration::from_secs(config.session.idle_timeout_seconds),
        );

        info!(
            completion_provider = %config.completion.provider,
            speech_provider = %config.speech.provider,
            history_window = config.session.history_window,
            "Application state initialized"
        );

        Arc::new(Self {
            config,
            sessions,
            controller,
        })
    }

    /// Look up a session or fail with `SessionNotFound`.
    pub async fn session(&self, id: &SessionId) -> AppResult<SessionHandle> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }
}

/// Wire the configured providers into a controller.
///
/// A missing key does not stop the server: the controller keeps the error
/// and reports it on the first turn.
pub fn build_controller(config: &ServerConfig) -> TurnController {
    let completion = config
        .completion_config()
        .map_err(|e| CompletionError::InvalidConfiguration(e.to_string()))
        .and_then(|c| create_completion_provider(&config.completion.provider, c));

    let speech = config
        .speech_config()
        .map_err(|e| SpeechError::InvalidConfiguration(e.to_string()))
        .and_then(|c| create_speech_provider(&config.speech.provider, c));

    TurnController::new(
        completion,
        speech,
        config.persona.clone(),
        config.session.turn_settings(),
    )
}
