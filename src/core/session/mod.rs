//! Conversation session state and the store that owns it.

mod state;
mod store;
mod turn;

pub use state::{
    Alert, AlertKind, CallPhase, PendingAudio, SessionError, SessionId, SessionSnapshot,
    SessionState, TurnTicket,
};
pub use store::{SessionHandle, SessionStore};
pub use turn::{ChatTurn, Role};
