//! Transactional scope adapters.
//!
//! Provides `TransactionLog`, an in-memory provider that records every
//! begin/commit/rollback. It serves as the reference adapter for the
//! transaction port and as a visible stand-in where no real transactional
//! store is wired up.

use crate::application::ports::{TransactionProvider, TransactionScope};
use std::sync::{Arc, Mutex, PoisonError};

/// Lifecycle event of a transactional scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEvent {
    /// A scope was opened.
    Began,
    /// A scope was committed on the normal exit path.
    Committed,
    /// A scope was dropped without a commit.
    RolledBack,
}

/// In-memory transaction provider recording scope lifecycles.
///
/// Clones share the same event log, so a provider handed to the registry can
/// be inspected afterwards.
///
/// # Example
/// ```
/// use action_chain::{TransactionEvent, TransactionLog, TransactionProvider};
///
/// let log = TransactionLog::new();
/// let scope = log.begin("Transfer");
/// scope.commit();
///
/// assert_eq!(
///     log.events(),
///     vec![
///         ("Transfer".to_string(), TransactionEvent::Began),
///         ("Transfer".to_string(), TransactionEvent::Committed),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    events: Arc<Mutex<Vec<(String, TransactionEvent)>>>,
}

impl TransactionLog {
    /// Create an empty transaction log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in order.
    pub fn events(&self) -> Vec<(String, TransactionEvent)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, label: &str, event: TransactionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((label.to_string(), event));
    }
}

impl TransactionProvider for TransactionLog {
    fn begin(&self, label: &str) -> Box<dyn TransactionScope> {
        self.record(label, TransactionEvent::Began);
        Box::new(LoggedScope {
            label: label.to_string(),
            log: self.clone(),
            committed: false,
        })
    }
}

/// Scope handed out by [`TransactionLog`].
///
/// Commit must be explicit; dropping an uncommitted scope records a
/// rollback.
struct LoggedScope {
    label: String,
    log: TransactionLog,
    committed: bool,
}

impl TransactionScope for LoggedScope {
    fn commit(mut self: Box<Self>) {
        self.committed = true;
        self.log.record(&self.label, TransactionEvent::Committed);
    }
}

impl Drop for LoggedScope {
    fn drop(&mut self) {
        if !self.committed {
            self.log.record(&self.label, TransactionEvent::RolledBack);
        }
    }
}
