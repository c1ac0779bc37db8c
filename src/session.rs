//! Session controller core - drives raw input through the pipeline
//!
//! raw phrase -> normalize -> evaluate -> record, with every outcome
//! reported as a `SessionEvent` value. Also owns the listening lifecycle
//! state machine for continuous speech input.

use crate::config::Config;
use crate::eval::evaluate;
use crate::history::{HistoryEntry, HistoryError, Ledger, LedgerEvent};
use crate::normalize::normalize;
use crate::transcribe::{TranscriptEvent, TranscriptSource, TranscriptionError};

/// What happened to one piece of input.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Successful evaluation, already recorded in the ledger.
    Result { expression: String, value: f64 },
    /// Input normalized to something that would not evaluate.
    Invalid { expression: String },
    /// Nothing to evaluate. Not an error.
    Empty,
    /// Speech engine failure, shown verbatim.
    Transcription(TranscriptionError),
    /// The listening session is (still) active.
    Listening,
    /// Listening stopped.
    Idle,
}

/// Listening lifecycle. `Restarting` only exists between a session ending
/// and the source accepting a new start in continuous mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenState {
    Idle,
    Listening,
    Restarting,
}

/// Orchestrates input, evaluation, and history for one interactive session.
pub struct Session {
    ledger: Ledger,
    continuous: bool,
    listen: ListenState,
    source: Option<Box<dyn TranscriptSource>>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            ledger: Ledger::new(),
            continuous: config.continuous,
            listen: ListenState::Idle,
            source: None,
        }
    }

    /// Notify `observer` whenever the ledger records an entry.
    pub fn with_ledger_observer(mut self, observer: flume::Sender<LedgerEvent>) -> Self {
        self.ledger = Ledger::with_observer(observer);
        self
    }

    /// Attach a transcript source for the listening lifecycle.
    pub fn with_source(mut self, source: Box<dyn TranscriptSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Run one phrase through the pipeline. Typed and transcribed input
    /// take the same path.
    pub fn submit(&mut self, raw: &str) -> SessionEvent {
        let expression = normalize(raw);
        if expression.is_empty() {
            return SessionEvent::Empty;
        }
        match evaluate(&expression) {
            Ok(value) => {
                self.ledger.record(&expression, value);
                SessionEvent::Result { expression, value }
            }
            Err(_) => SessionEvent::Invalid { expression },
        }
    }

    /// Feed one event from the transcript source into the session.
    pub fn handle_transcript(&mut self, event: TranscriptEvent) -> SessionEvent {
        match event {
            TranscriptEvent::Final(text) => self.submit(&text),
            TranscriptEvent::Error(err) => SessionEvent::Transcription(err),
            TranscriptEvent::SessionEnded => self.on_session_ended(),
        }
    }

    /// Start listening on the attached source.
    pub fn begin_listening(&mut self) -> Result<(), TranscriptionError> {
        if let Some(source) = &mut self.source {
            source.start()?;
        }
        self.listen = ListenState::Listening;
        Ok(())
    }

    /// Stop listening and drop to `Idle`.
    pub fn stop_listening(&mut self) {
        if let Some(source) = &mut self.source {
            source.stop();
        }
        self.listen = ListenState::Idle;
    }

    /// In continuous mode a closed session is restarted immediately;
    /// otherwise the session goes idle.
    fn on_session_ended(&mut self) -> SessionEvent {
        if self.listen == ListenState::Listening && self.continuous {
            self.listen = ListenState::Restarting;
            if let Some(source) = &mut self.source {
                if let Err(err) = source.start() {
                    self.listen = ListenState::Idle;
                    return SessionEvent::Transcription(err);
                }
            }
            self.listen = ListenState::Listening;
            SessionEvent::Listening
        } else {
            self.listen = ListenState::Idle;
            SessionEvent::Idle
        }
    }

    pub fn listen_state(&self) -> ListenState {
        self.listen
    }

    /// Entry at `index` in the history, 0 = most recent.
    pub fn replay(&self, index: usize) -> Result<&HistoryEntry, HistoryError> {
        self.ledger.replay(index)
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.ledger.entries()
    }

    pub fn history_len(&self) -> usize {
        self.ledger.len()
    }
}
