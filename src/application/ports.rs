//! Ports (interfaces) for the application layer.
//!
//! The reference behaviors consume capabilities rather than concrete
//! implementations: a logging sink, a monotonic clock, and a transactional
//! scope provider. Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::time::Instant;

/// Port for recording informational and error messages.
///
/// The logging behavior writes entry/exit/error lines through this port;
/// the timing behavior reports elapsed durations through it.
/// Infrastructure provides concrete implementations (`TracingSink`,
/// `MockSink`).
pub trait LogSink: Send + Sync {
    /// Record an informational message.
    fn info(&self, message: &str);

    /// Record an error message.
    fn error(&self, message: &str);
}

/// Port for obtaining current time.
///
/// This abstraction lets the timing behavior measure elapsed durations
/// without depending on the system clock directly. Infrastructure provides
/// concrete implementations (`SystemClock`, `MockClock`).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// A live transactional scope.
///
/// A scope is committed explicitly on the normal exit path. Dropping a scope
/// that was never committed rolls it back; that is how an error propagating
/// out of the chain releases the resource without any extra handling in the
/// transaction behavior.
pub trait TransactionScope: Send {
    /// Commit the scope.
    fn commit(self: Box<Self>);
}

/// Port for beginning transactional scopes.
///
/// Infrastructure provides concrete implementations (`TransactionLog` for
/// in-memory use; applications supply their own adapter for a real store).
pub trait TransactionProvider: Send + Sync {
    /// Begin a new scope. `label` names the unit of work for diagnostics.
    fn begin(&self, label: &str) -> Box<dyn TransactionScope>;
}
