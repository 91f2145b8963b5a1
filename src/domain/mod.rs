//! Domain layer - pure composition logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of the chain:
//! - Actions, wrappers, and the fixed-point composer
//! - Behavior identifiers and ordered declarations
//!
//! All types in this layer are pure and easily testable.

pub mod behavior;
pub mod chain;
