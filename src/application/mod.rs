//! Application layer - orchestration of domain logic.
//!
//! This layer wires declarations to concrete wrappers and manages the
//! resolution lifecycle:
//! - Wrapper registry (declaration lookup and memoized resolution)
//! - Reference behaviors (logging, transaction, timing)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod behaviors;
pub mod ports;
pub mod registry;
