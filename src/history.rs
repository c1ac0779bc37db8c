//! Bounded history of successful evaluations, newest first.

use std::collections::VecDeque;

/// Maximum number of entries the ledger keeps.
pub const HISTORY_LIMIT: usize = 20;

/// One past computation. Only created for successful evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub value: f64,
}

/// Notification sent to the ledger's observer on every successful record.
#[derive(Debug, Clone)]
pub enum LedgerEvent {
    Recorded(HistoryEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    OutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "No history entry {index} (history holds {len}).")
            }
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-bounded recency log of (expression, value) pairs.
///
/// Newest entries sit at the front; inserting past capacity evicts the
/// oldest. There is no clear operation; the ledger lives and dies with the
/// session.
#[derive(Default)]
pub struct Ledger {
    entries: VecDeque<HistoryEntry>,
    observer: Option<flume::Sender<LedgerEvent>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that notifies `observer` after each successful record.
    pub fn with_observer(observer: flume::Sender<LedgerEvent>) -> Self {
        Self {
            entries: VecDeque::new(),
            observer: Some(observer),
        }
    }

    /// Record a successful evaluation. No-op when the expression is empty
    /// or the value is not a number.
    pub fn record(&mut self, expression: &str, value: f64) {
        if expression.is_empty() || value.is_nan() {
            return;
        }
        let entry = HistoryEntry {
            expression: expression.to_string(),
            value,
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(HISTORY_LIMIT);
        if let Some(observer) = &self.observer {
            let _ = observer.send(LedgerEvent::Recorded(entry));
        }
    }

    /// Fetch the entry at `index`, where 0 is the most recent.
    pub fn replay(&self, index: usize) -> Result<&HistoryEntry, HistoryError> {
        self.entries.get(index).ok_or(HistoryError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
