//! Append-only log of human-readable hazard events.
//!
//! The narrative/UI layer consumes these records verbatim; nothing in the
//! hazard core interprets them after emission.

use std::fmt;

use crate::id::TurnId;

/// Severity tier of a log event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine observation.
    Notice,
    /// Worth the player's attention.
    Caution,
    /// Danger is imminent or ongoing.
    Warning,
    /// Survival is in question.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice => write!(f, "notice"),
            Self::Caution => write!(f, "caution"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One human-readable event record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    /// Turn on which the event occurred.
    pub turn: TurnId,
    /// Severity tier.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Append-only event log with a drain cursor.
///
/// The pipeline appends during a turn; the orchestrator either takes the
/// whole turn's records via [`EventLog::into_events`] or keeps one log
/// alive across turns and reads increments through [`EventLog::drain_new`].
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<LogEvent>,
    cursor: usize,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, turn: TurnId, severity: Severity, message: impl Into<String>) {
        self.events.push(LogEvent {
            turn,
            severity,
            message: message.into(),
        });
    }

    /// All records since the log was created.
    pub fn all(&self) -> &[LogEvent] {
        &self.events
    }

    /// Records appended since the last call to `drain_new`.
    ///
    /// Advances the cursor; the records themselves are never removed.
    pub fn drain_new(&mut self) -> &[LogEvent] {
        let start = self.cursor;
        self.cursor = self.events.len();
        &self.events[start..]
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the log, yielding its records.
    pub fn into_events(self) -> Vec<LogEvent> {
        self.events
    }
}
