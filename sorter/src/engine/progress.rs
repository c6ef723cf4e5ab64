//! Progress reporting for sort runs.

use std::fmt;

/// How serious a progress message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Routine progress.
    Info,
    /// A per-item problem; the run carries on.
    Warning,
    /// The run was abandoned.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One message from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Human-readable text.
    pub message: String,
    /// Severity of the message.
    pub severity: Severity,
    /// Overall progress in `0..=100`. Never decreases within a run.
    pub percent: u8,
}

impl ProgressEvent {
    /// Creates an event, clamping `percent` to 100.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity, percent: u8) -> Self {
        Self {
            message: message.into(),
            severity,
            percent: percent.min(100),
        }
    }
}

/// Receives progress events from a running engine.
pub trait ProgressSink {
    /// Handle one event.
    fn report(&mut self, event: &ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _event: &ProgressEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    /// Events in the order they were reported.
    pub events: Vec<ProgressEvent>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported with `severity`.
    #[must_use]
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.as_str())
            .collect()
    }
}

impl ProgressSink for CollectingSink {
    fn report(&mut self, event: &ProgressEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(ProgressEvent::new("x", Severity::Info, 250).percent, 100);
    }

    #[test]
    fn test_collecting_sink_filters_by_severity() {
        let mut sink = CollectingSink::new();
        sink.report(&ProgressEvent::new("start", Severity::Info, 0));
        sink.report(&ProgressEvent::new("locked", Severity::Warning, 50));
        assert_eq!(sink.messages(Severity::Warning), ["locked"]);
        assert_eq!(sink.events.len(), 2);
    }
}
