//! Logging sink adapters.
//!
//! Provides `TracingSink`, which forwards chain log messages into the
//! `tracing` ecosystem so they pick up whatever subscriber the application
//! installed.

use crate::application::ports::LogSink;

/// Log sink emitting through the `tracing` crate.
///
/// Informational messages become `INFO` events and error messages become
/// `ERROR` events, all under the `action_chain` target so applications can
/// filter or reroute them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "action_chain", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "action_chain", "{message}");
    }
}
