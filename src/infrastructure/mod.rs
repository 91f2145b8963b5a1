//! Infrastructure layer - adapters for the application ports.
//!
//! This layer provides:
//! - Clock adapter (system time vs mock)
//! - Log sink adapter for the `tracing` ecosystem
//! - In-memory transactional scope provider

pub mod clock;
pub mod sink;
pub mod transaction;

/// Mock implementations for testing.
///
/// Only available when the `test-helpers` feature is enabled, or during
/// test builds.
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
