//! Speech-input boundary
//!
//! The calculator core never talks to a speech engine directly; transcripts
//! arrive through this seam as plain text events. Engine failures carry the
//! engine's error code and are surfaced to the user, never evaluated.

/// Failure reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionError {
    /// Engine-specific error code ("no-speech", "audio-capture", ...).
    pub code: String,
}

impl TranscriptionError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl std::fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.code)
    }
}

impl std::error::Error for TranscriptionError {}

/// Events a transcript source delivers to the session.
#[derive(Debug, Clone)]
pub enum TranscriptEvent {
    /// Final transcript for one utterance.
    Final(String),
    /// Engine-level failure.
    Error(TranscriptionError),
    /// The engine closed the listening session.
    SessionEnded,
}

/// A source of transcripts. Implementations wrap a real speech engine (or a
/// scripted feed in tests); the session only ever starts and stops them.
pub trait TranscriptSource {
    fn start(&mut self) -> Result<(), TranscriptionError>;
    fn stop(&mut self);
}
