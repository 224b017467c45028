//! Browser call page.
//!
//! Every button is a form post that runs one command and redirects back to
//! the page (post/redirect/get). A rejected command leaves a one-shot alert
//! for the next render. Unknown sessions are sent to `/`, which starts a
//! fresh one.

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use super::page::render_call_page;
use super::parse_session_id;
use crate::core::controller::SessionCommand;
use crate::core::session::{Alert, AlertKind, SessionHandle, SessionId};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub text: String,
}

fn call_url(session_id: SessionId) -> String {
    format!("/call/{session_id}")
}

async fn resolve(state: &AppState, id: &str) -> Option<(SessionId, SessionHandle)> {
    let session_id = parse_session_id(id).ok()?;
    let session = state.sessions.get(&session_id).await?;
    Some((session_id, session))
}

/// Create a session and send the browser to its page.
pub async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let (session_id, _) = state.sessions.create().await;
    info!(session_id = %session_id, "Session created for browser");
    Redirect::to(&call_url(session_id))
}

/// Render the page. Pending audio and the alert are consumed by the render.
pub async fn call_page(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let Some((session_id, session)) = resolve(&state, &id).await else {
        debug!(session_id = %id, "Unknown session, redirecting to a new one");
        return Redirect::to("/").into_response();
    };

    let (snapshot, audio) = {
        let mut guard = session.lock();
        let audio = guard.take_pending_audio();
        let snapshot = guard.snapshot(session_id);
        guard.take_alert();
        (snapshot, audio)
    };

    let html = render_call_page(&snapshot, &state.controller.persona().name, audio.as_ref());
    let mut response = Html(html).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

async fn run_and_redirect(state: &AppState, id: &str, command: SessionCommand) -> Redirect {
    let Some((session_id, session)) = resolve(state, id).await else {
        return Redirect::to("/");
    };

    let name = command.name();
    if let Err(e) = state.controller.dispatch(session_id, &session, command).await {
        debug!(session_id = %session_id, command = name, "Command rejected: {e}");
        session
            .lock()
            .set_alert(Alert::new(AlertKind::Rejected, e.to_string()));
    }
    Redirect::to(&call_url(session_id))
}

pub async fn start_call(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Redirect {
    run_and_redirect(&state, &id, SessionCommand::StartCall).await
}

pub async fn end_call(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Redirect {
    run_and_redirect(&state, &id, SessionCommand::EndCall).await
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    run_and_redirect(&state, &id, SessionCommand::ClearHistory).await
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Redirect {
    run_and_redirect(&state, &id, SessionCommand::UserInput { text: form.text }).await
}
