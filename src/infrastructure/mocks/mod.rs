//! Mock implementations for testing.
//!
//! Controllable test doubles for the application ports: a clock whose time
//! only moves on request and a sink that captures every message. The
//! in-memory [`TransactionLog`](crate::infrastructure::transaction::TransactionLog)
//! already records its scopes and doubles as the transaction mock.
//!
//! This module is only available when the `test-helpers` feature is enabled,
//! or during test builds. To use the mocks in integration tests, add to your
//! `Cargo.toml`:
//! ```toml
//! [dev-dependencies]
//! action-chain = { version = "*", features = ["test-helpers"] }
//! ```

mod clock;
mod sink;

pub use clock::MockClock;
pub use sink::{MockSink, SinkEntry};
