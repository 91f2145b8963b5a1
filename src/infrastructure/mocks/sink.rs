//! Mock log sink for testing.

use crate::application::ports::LogSink;
use std::sync::{Arc, Mutex, PoisonError};

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEntry {
    /// Informational message
    Info(String),
    /// Error message
    Error(String),
}

/// Log sink capturing every message for later assertions.
///
/// Clones share the same buffer, so a sink handed to a rule set can be
/// inspected after the composed action ran.
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    entries: Arc<Mutex<Vec<SinkEntry>>>,
}

impl MockSink {
    /// Create an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries, in order.
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured informational messages, in order.
    pub fn infos(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SinkEntry::Info(message) => Some(message),
                SinkEntry::Error(_) => None,
            })
            .collect()
    }

    /// Captured error messages, in order.
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SinkEntry::Error(message) => Some(message),
                SinkEntry::Info(_) => None,
            })
            .collect()
    }

    /// Total number of captured entries.
    pub fn count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Remove all captured entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MockSink {
    fn info(&self, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkEntry::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkEntry::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_order() {
        let sink = MockSink::new();
        sink.info("one");
        sink.error("two");
        sink.info("three");

        assert_eq!(
            sink.entries(),
            vec![
                SinkEntry::Info("one".to_string()),
                SinkEntry::Error("two".to_string()),
                SinkEntry::Info("three".to_string()),
            ]
        );
        assert_eq!(sink.infos(), vec!["one", "three"]);
        assert_eq!(sink.errors(), vec!["two"]);
        assert_eq!(sink.count(), 3);
    }

    #[test]
    fn test_clear() {
        let sink = MockSink::new();
        sink.info("message");
        sink.clear();

        assert_eq!(sink.count(), 0);
        assert!(sink.entries().is_empty());
    }
}
