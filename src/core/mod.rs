pub mod completion;
pub mod controller;
pub mod persona;
pub mod session;
pub mod speech;

// Re-export commonly used types for convenience
pub use completion::{
    BaseCompletion, BoxedCompletion, ChatBackend, ChatCompletionsClient, CompletionConfig,
    CompletionError, CompletionResult, create_completion_provider,
    get_supported_completion_providers,
};

pub use speech::{
    AudioData, BaseSpeech, BoxedSpeech, ElevenLabsOutputFormat, ElevenLabsSpeech, SpeechConfig,
    SpeechError, SpeechResult, create_speech_provider, get_supported_speech_providers,
};

pub use controller::{CommandOutcome, SessionCommand, TurnController, TurnSettings};
pub use persona::Persona;
pub use session::{
    Alert, AlertKind, CallPhase, ChatTurn, Role, SessionError, SessionHandle, SessionId,
    SessionSnapshot, SessionState, SessionStore,
};
