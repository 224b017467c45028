//! Conversational turn controller.
//!
//! Every user action arrives as a [`SessionCommand`]. The controller applies
//! it to the session, runs the completion and speech calls for user input,
//! and returns a fresh [`SessionSnapshot`] for the presentation layer.
//!
//! ```text
//!   Idle --start--> Active --input--> Processing --reply+speech--> Active
//!    ^                |                   |
//!    +------end-------+                   +--completion error--> Active
//! ```
//!
//! The session lock is only taken for the short synchronous steps; both
//! outbound calls happen without it, so snapshots stay readable while a turn
//! is in flight.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::core::completion::{BoxedCompletion, CompletionError, CompletionResult};
use crate::core::persona::Persona;
use crate::core::session::{
    Alert, AlertKind, SessionError, SessionHandle, SessionId, SessionSnapshot, TurnTicket,
};
use crate::core::speech::{AudioData, BoxedSpeech, SpeechError, SpeechResult};

/// Number of prior turns sent as context when not configured.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Conversation policy knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSettings {
    /// Prior turns sent with each completion request (0 disables context)
    pub history_window: usize,
    /// Whether starting a call wipes the previous conversation
    pub clear_history_on_start: bool,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            clear_history_on_start: false,
        }
    }
}

/// A user action against one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    StartCall,
    EndCall,
    ClearHistory,
    UserInput { text: String },
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartCall => "start_call",
            Self::EndCall => "end_call",
            Self::ClearHistory => "clear_history",
            Self::UserInput { .. } => "user_input",
        }
    }
}

/// Result of an accepted command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub snapshot: SessionSnapshot,
    /// Set when the turn was aborted by a completion failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct TurnController {
    completion: Result<BoxedCompletion, String>,
    speech: Result<BoxedSpeech, String>,
    persona: Persona,
    settings: TurnSettings,
}

impl TurnController {
    /// Build a controller. Provider construction errors are kept and
    /// reported on first use rather than at startup.
    pub fn new(
        completion: CompletionResult<BoxedCompletion>,
        speech: SpeechResult<BoxedSpeech>,
        persona: Persona,
        settings: TurnSettings,
    ) -> Self {
        let completion = completion.map_err(|e| {
            warn!("Completion provider unavailable: {e}");
            match e {
                CompletionError::InvalidConfiguration(msg) => msg,
                other => other.to_string(),
            }
        });
        let speech = speech.map_err(|e| {
            warn!("Speech provider unavailable: {e}");
            match e {
                SpeechError::InvalidConfiguration(msg) => msg,
                other => other.to_string(),
            }
        });

        Self {
            completion,
            speech,
            persona,
            settings,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn settings(&self) -> &TurnSettings {
        &self.settings
    }

    /// Apply `command` to the session and return the resulting snapshot.
    ///
    /// Commands that are not valid in the current phase are rejected
    /// without touching the session.
    pub async fn dispatch(
        &self,
        session_id: SessionId,
        session: &SessionHandle,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        debug!(session_id = %session_id, command = command.name(), "Dispatching command");

        match command {
            SessionCommand::StartCall => {
                let mut state = session.lock();
                state.start_call(self.settings.clear_history_on_start)?;
                state.take_alert();
                info!(session_id = %session_id, "Call started");
                Ok(CommandOutcome {
                    snapshot: state.snapshot(session_id),
                    error: None,
                })
            }
            SessionCommand::EndCall => {
                let mut state = session.lock();
                state.end_call()?;
                state.take_alert();
                info!(session_id = %session_id, turns = state.turns().len(), "Call ended");
                Ok(CommandOutcome {
                    snapshot: state.snapshot(session_id),
                    error: None,
                })
            }
            SessionCommand::ClearHistory => {
                let mut state = session.lock();
                state.clear_history();
                state.take_alert();
                info!(session_id = %session_id, "History cleared");
                Ok(CommandOutcome {
                    snapshot: state.snapshot(session_id),
                    error: None,
                })
            }
            SessionCommand::UserInput { text } => self.run_turn(session_id, session, &text).await,
        }
    }

    /// Hand pending audio to the presentation layer. Later calls return
    /// `None` until the next reply is synthesized.
    pub fn consume_audio(&self, session: &SessionHandle) -> Option<AudioData> {
        session.lock().take_pending_audio()
    }

    /// Begin a turn and wait for it.
    ///
    /// The provider calls run on their own task, so a caller that goes away
    /// mid-turn does not leave the session in `Processing`: the task still
    /// runs to success or failure and finishes the turn.
    async fn run_turn(
        &self,
        session_id: SessionId,
        session: &SessionHandle,
        text: &str,
    ) -> Result<CommandOutcome, SessionError> {
        let ticket = {
            let mut state = session.lock();
            let ticket = state.begin_turn(text, self.settings.history_window)?;
            state.take_alert();
            ticket
        };

        info!(
            session_id = %session_id,
            history_len = ticket.history().len(),
            "Processing user input"
        );

        let job = TurnJob {
            session_id,
            session: session.clone(),
            completion: self.completion.clone(),
            speech: self.speech.clone(),
            system_prompt: self.persona.system_prompt.clone(),
        };

        match tokio::spawn(job.run(ticket)).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(session_id = %session_id, "Turn task failed: {e}");
                let message = format!("Turn aborted: {e}");
                let mut state = session.lock();
                state.set_alert(Alert::new(AlertKind::Completion, message.clone()));
                state.finish_turn();
                Ok(CommandOutcome {
                    snapshot: state.snapshot(session_id),
                    error: Some(message),
                })
            }
        }
    }
}

/// Owned state for one in-flight turn.
struct TurnJob {
    session_id: SessionId,
    session: SessionHandle,
    completion: Result<BoxedCompletion, String>,
    speech: Result<BoxedSpeech, String>,
    system_prompt: String,
}

impl TurnJob {
    async fn run(self, ticket: TurnTicket) -> CommandOutcome {
        let session_id = self.session_id;

        let reply = match self.request_reply(&ticket).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(session_id = %session_id, "Completion failed: {e}");
                let kind = match e {
                    CompletionError::InvalidConfiguration(_) => AlertKind::Configuration,
                    _ => AlertKind::Completion,
                };
                let message = e.to_string();
                let mut state = self.session.lock();
                state.set_alert(Alert::new(kind, message.clone()));
                state.finish_turn();
                return CommandOutcome {
                    snapshot: state.snapshot(session_id),
                    error: Some(message),
                };
            }
        };

        let turn_index = self.session.lock().complete_reply(&ticket, reply.clone());

        match turn_index {
            Some(turn_index) => match self.request_speech(&reply).await {
                Ok(audio) => {
                    debug!(session_id = %session_id, bytes = audio.len(), "Reply audio ready");
                    self.session.lock().attach_audio(&ticket, turn_index, audio);
                }
                Err(e) => {
                    warn!(session_id = %session_id, "Speech synthesis failed: {e}");
                    let kind = match e {
                        SpeechError::InvalidConfiguration(_) => AlertKind::Configuration,
                        _ => AlertKind::Speech,
                    };
                    self.session
                        .lock()
                        .set_alert(Alert::new(kind, format!("Audio generation error: {e}")));
                }
            },
            None => {
                info!(session_id = %session_id, "History cleared during turn, reply discarded");
            }
        }

        let mut state = self.session.lock();
        state.finish_turn();
        CommandOutcome {
            snapshot: state.snapshot(session_id),
            error: None,
        }
    }

    async fn request_reply(&self, ticket: &TurnTicket) -> CompletionResult<String> {
        let completion = self
            .completion
            .as_ref()
            .map_err(|msg| CompletionError::InvalidConfiguration(msg.clone()))?;
        completion
            .reply(ticket.user_text(), ticket.history(), &self.system_prompt)
            .await
    }

    async fn request_speech(&self, text: &str) -> SpeechResult<AudioData> {
        let speech = self
            .speech
            .as_ref()
            .map_err(|msg| SpeechError::InvalidConfiguration(msg.clone()))?;
        speech.synthesize(text).await
    }
}
