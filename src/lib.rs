//! # action-chain
//!
//! Composable chains of cross-cutting behaviors around a unit-of-work action.
//!
//! This crate wraps a plain callable in an ordered sequence of behaviors
//! (logging, transactional scoping, performance timing, or your own) without
//! modifying the callable itself. The chain is produced by folding wrapper
//! functions around the base action: each wrapper receives the remainder of
//! the pipeline as a single opaque `next` action, decides when to delegate,
//! and keeps its own concern on the before/after sides of that call.
//!
//! ## Quick Start
//!
//! ```rust
//! use action_chain::{Action, Declaration, WrapperRegistry};
//! use action_chain::standard_rules;
//! use action_chain::{SystemClock, TracingSink, TransactionLog};
//! use std::sync::Arc;
//!
//! struct TransferTo {
//!     sale: u64,
//!     location: u64,
//! }
//!
//! // Declare once, at configuration time, which behaviors decorate the
//! // subject type. First declared = outermost.
//! let registry = WrapperRegistry::new();
//! registry
//!     .register::<TransferTo>(
//!         Declaration::standard(), // logging > transaction > performance
//!         standard_rules(
//!             Arc::new(TracingSink::new()),
//!             Arc::new(TransactionLog::new()),
//!             Arc::new(SystemClock::new()),
//!         ),
//!     )
//!     .unwrap();
//!
//! // Compose the chain around the unit of work...
//! let handler = registry
//!     .compose(Action::from_fn(|transfer: &TransferTo| {
//!         // move the sale to its new location
//!         let _ = (transfer.sale, transfer.location);
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! // ...and invoke it exactly like the base action.
//! handler.invoke(&TransferTo { sale: 1, location: 2 }).unwrap();
//! ```
//!
//! ## Composition Rules
//!
//! - Declaration order is authoritative: `[A, B, C]` behaves as `A` around
//!   (`B` around (`C` around base)). The first declared behavior runs its
//!   before-logic first and its after-logic last.
//! - An empty declaration yields a chain behaviorally identical to the base
//!   action, including its errors.
//! - The composer never catches or suppresses errors. A failure anywhere in
//!   the chain surfaces to the caller as if the chain were one flat function;
//!   individual wrappers decide whether to intercept, retry, or re-raise.
//! - Resolution is memoized per subject type. The first
//!   [`resolve`](WrapperRegistry::resolve) runs the wrapper factories
//!   (acquiring whatever shared resources they need) exactly once, even under
//!   concurrent first access; unknown behavior identifiers fail fast at that
//!   point, before the base action could ever run.
//!
//! ## Custom Behaviors
//!
//! Any `Fn(&Action<T>, &T) -> Result<(), BoxError>` closure, or any type
//! implementing [`Wrapper`], can join a chain. Register it under its own
//! [`BehaviorId`]:
//!
//! ```rust
//! use action_chain::{Action, BehaviorId, BoxError, Declaration};
//! use action_chain::{RuleSet, SubjectInfo, WrapperRegistry};
//! use std::sync::Arc;
//!
//! struct Job;
//!
//! let registry = WrapperRegistry::new();
//! registry
//!     .register::<Job>(
//!         Declaration::new(vec![BehaviorId::new("retry-once")]),
//!         RuleSet::new().with_rule(
//!             BehaviorId::new("retry-once"),
//!             Arc::new(|_info: &SubjectInfo| {
//!                 Arc::new(|next: &Action<Job>, job: &Job| {
//!                     next.invoke(job).or_else(|_| next.invoke(job))
//!                 })
//!             }),
//!         ),
//!     )
//!     .unwrap();
//!
//! let handler = registry
//!     .compose(Action::from_fn(|_: &Job| Ok::<(), BoxError>(())))
//!     .unwrap();
//! handler.invoke(&Job).unwrap();
//! ```
//!
//! ## Architecture
//!
//! The crate follows hexagonal architecture:
//! - [`domain`] - pure composition logic: actions, wrappers, the fold, and
//!   behavior declarations
//! - [`application`] - the registry, the reference behaviors, and the ports
//!   they consume (log sink, clock, transaction provider)
//! - [`infrastructure`] - adapters: `tracing`-backed sink, system clock,
//!   in-memory transaction log, and mocks for tests

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::behaviors::{
    standard_rules, LoggingBehavior, TimingBehavior, TransactionBehavior,
};
pub use application::ports::{Clock, LogSink, TransactionProvider, TransactionScope};
pub use application::registry::{
    ConfigError, RuleSet, SubjectInfo, WrapperChain, WrapperFactory, WrapperRegistry,
};
pub use domain::behavior::{BehaviorId, Declaration};
pub use domain::chain::{compose, Action, BoxError, Wrapper};
pub use infrastructure::clock::SystemClock;
pub use infrastructure::sink::TracingSink;
pub use infrastructure::transaction::{TransactionEvent, TransactionLog};
