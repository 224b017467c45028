//! Per-session conversation state.
//!
//! `SessionState` only exposes mutations that keep its invariants:
//! user and assistant turns are appended as separate completed writes,
//! at most one turn is in flight, and pending audio always points at the
//! latest assistant turn.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::turn::ChatTurn;
use crate::core::speech::AudioData;

/// Identifier of a session in the store.
pub type SessionId = Uuid;

/// Commands rejected because of the current session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Call is not active")]
    CallNotActive,

    #[error("A turn is already being processed for this session")]
    TurnInProgress,

    #[error("Message must not be empty")]
    EmptyInput,
}

/// Observable state of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPhase {
    /// Call not active
    Idle,
    /// Call active, waiting for input
    Active,
    /// Waiting for completion and speech results
    Processing,
}

/// Which subsystem raised a user-visible alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Completion,
    Speech,
    Configuration,
    /// A command the session could not accept in its current phase
    Rejected,
}

/// One-shot message for the user surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audio waiting to be played for the assistant turn at `turn_index`.
#[derive(Debug, Clone)]
pub struct PendingAudio {
    pub turn_index: usize,
    pub audio: AudioData,
}

/// Handed out by [`SessionState::begin_turn`]; ties late results to the
/// history generation they were requested for.
#[derive(Debug, Clone)]
pub struct TurnTicket {
    epoch: u64,
    user_text: String,
    history: Vec<ChatTurn>,
}

impl TurnTicket {
    /// The new user message.
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    /// Turns preceding the new message, already truncated to the window.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }
}

/// Immutable view of a session handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub call_active: bool,
    pub phase: CallPhase,
    pub turns: Vec<ChatTurn>,
    pub has_pending_audio: bool,
    pub alert: Option<Alert>,
}

#[derive(Debug, Default)]
pub struct SessionState {
    turns: Vec<ChatTurn>,
    call_active: bool,
    processing: bool,
    pending_audio: Option<PendingAudio>,
    alert: Option<Alert>,
    epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CallPhase {
        if self.processing {
            CallPhase::Processing
        } else if self.call_active {
            CallPhase::Active
        } else {
            CallPhase::Idle
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_call_active(&self) -> bool {
        self.call_active
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn has_pending_audio(&self) -> bool {
        self.pending_audio.is_some()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Idle -> Active. Starting an already active call changes nothing.
    pub fn start_call(&mut self, clear_history: bool) -> Result<(), SessionError> {
        self.ensure_not_processing()?;
        if self.call_active {
            return Ok(());
        }
        if clear_history {
            self.clear_history();
        }
        self.call_active = true;
        Ok(())
    }

    /// Active -> Idle. History is kept until an explicit clear.
    pub fn end_call(&mut self) -> Result<(), SessionError> {
        self.ensure_not_processing()?;
        self.call_active = false;
        Ok(())
    }

    /// Allowed in every phase. A turn still in flight discards its results.
    pub fn clear_history(&mut self) {
        self.turns.clear();
        self.pending_audio = None;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Active -> Processing. Appends the user turn before any outbound call
    /// so it stays visible whatever happens next.
    ///
    /// The text is stored and sent exactly as typed; surrounding whitespace
    /// only matters for the emptiness check.
    pub fn begin_turn(
        &mut self,
        text: &str,
        history_window: usize,
    ) -> Result<TurnTicket, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        self.ensure_not_processing()?;
        if !self.call_active {
            return Err(SessionError::CallNotActive);
        }

        let start = self.turns.len().saturating_sub(history_window);
        let history = self.turns[start..].to_vec();

        self.pending_audio = None;
        self.turns.push(ChatTurn::user(text));
        self.processing = true;

        Ok(TurnTicket {
            epoch: self.epoch,
            user_text: text.to_string(),
            history,
        })
    }

    /// Whether history was cleared since the ticket was issued.
    pub fn is_stale(&self, ticket: &TurnTicket) -> bool {
        ticket.epoch != self.epoch
    }

    /// Appends the assistant reply. Returns its index, or `None` when the
    /// history was cleared while the completion was in flight.
    pub fn complete_reply(&mut self, ticket: &TurnTicket, reply: String) -> Option<usize> {
        if self.is_stale(ticket) {
            return None;
        }
        self.turns.push(ChatTurn::assistant(reply));
        Some(self.turns.len() - 1)
    }

    /// Stores audio for the assistant turn at `turn_index` if that turn is
    /// still the latest one.
    pub fn attach_audio(&mut self, ticket: &TurnTicket, turn_index: usize, audio: AudioData) -> bool {
        if self.is_stale(ticket) || turn_index + 1 != self.turns.len() {
            return false;
        }
        self.pending_audio = Some(PendingAudio { turn_index, audio });
        true
    }

    /// Processing -> Active.
    pub fn finish_turn(&mut self) {
        self.processing = false;
    }

    /// Hands out pending audio exactly once.
    pub fn take_pending_audio(&mut self) -> Option<AudioData> {
        self.pending_audio.take().map(|pending| pending.audio)
    }

    pub fn set_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    pub fn snapshot(&self, session_id: SessionId) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            call_active: self.call_active,
            phase: self.phase(),
            turns: self.turns.clone(),
            has_pending_audio: self.pending_audio.is_some(),
            alert: self.alert.clone(),
        }
    }

    fn ensure_not_processing(&self) -> Result<(), SessionError> {
        if self.processing {
            Err(SessionError::TurnInProgress)
        } else {
            Ok(())
        }
    }
}
