//! JSON session API.
//!
//! ```text
//! POST   /api/sessions                 -> 201 { session_id, snapshot }
//! GET    /api/sessions/{id}            -> snapshot
//! DELETE /api/sessions/{id}            -> 204
//! POST   /api/sessions/{id}/commands   -> { snapshot, error? }
//! GET    /api/sessions/{id}/audio      -> audio bytes (consumed) or 204
//! ```

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info};

use super::parse_session_id;
use crate::core::controller::{CommandOutcome, SessionCommand};
use crate::core::session::{SessionId, SessionSnapshot};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub snapshot: SessionSnapshot,
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let (session_id, session) = state.sessions.create().await;
    let snapshot = session.lock().snapshot(session_id);
    info!(session_id = %session_id, "Session created via API");

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            snapshot,
        }),
    )
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionSnapshot>> {
    let session_id = parse_session_id(&id)?;
    let session = state.session(&session_id).await?;
    let snapshot = session.lock().snapshot(session_id);
    Ok(Json(snapshot))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let session_id = parse_session_id(&id)?;
    if state.sessions.remove(&session_id).await {
        info!(session_id = %session_id, "Session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound(id))
    }
}

/// Run one command. A failed completion still answers 200: the command was
/// accepted and the outcome carries the error.
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SessionCommand>, JsonRejection>,
) -> AppResult<Json<CommandOutcome>> {
    let session_id = parse_session_id(&id)?;
    let session = state.session(&session_id).await?;
    let Json(command) = payload?;
    let outcome = state
        .controller
        .dispatch(session_id, &session, command)
        .await?;
    Ok(Json(outcome))
}

/// Hand out the pending reply audio once.
pub async fn take_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session_id = parse_session_id(&id)?;
    let session = state.session(&session_id).await?;

    let Some(audio) = state.controller.consume_audio(&session) else {
        debug!(session_id = %session_id, "No pending audio");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let mut headers = HeaderMap::new();
    let content_type = HeaderValue::from_str(&audio.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    debug!(session_id = %session_id, bytes = audio.len(), "Audio delivered");
    Ok((StatusCode::OK, headers, audio.data).into_response())
}
