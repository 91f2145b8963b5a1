//! Reference behaviors: logging, transactional scoping, and timing.
//!
//! These are small, canonical implementations of the wrapper contract. Each
//! one delegates to `next` exactly once and confines its own concern to the
//! before/after sides of that call. They double as templates for custom
//! behaviors.

use crate::application::ports::{Clock, LogSink, TransactionProvider};
use crate::application::registry::{RuleSet, SubjectInfo, WrapperFactory};
use crate::domain::behavior::BehaviorId;
use crate::domain::chain::{Action, BoxError, Wrapper};
use std::sync::Arc;

/// Entry/exit/error logging around the unit of work.
///
/// Records an entry line before delegating and a completion line after. On
/// failure the error is recorded and re-raised unchanged.
pub struct LoggingBehavior {
    sink: Arc<dyn LogSink>,
    subject: &'static str,
}

impl LoggingBehavior {
    /// Create a logging behavior for the named subject.
    pub fn new(sink: Arc<dyn LogSink>, subject: &'static str) -> Self {
        Self { sink, subject }
    }
}

impl<T> Wrapper<T> for LoggingBehavior {
    fn around(&self, next: &Action<T>, subject: &T) -> Result<(), BoxError> {
        self.sink.info(&format!("Entering: {}", self.subject));
        match next.invoke(subject) {
            Ok(()) => {
                self.sink.info(&format!("Finishing: {}", self.subject));
                Ok(())
            }
            Err(err) => {
                self.sink.error(&format!("{}: {}", self.subject, err));
                Err(err)
            }
        }
    }
}

/// Transactional scoping around the unit of work.
///
/// Begins a scope before delegating and commits it when the block completes
/// without an error. On failure the scope is dropped uncommitted, which rolls
/// it back through the provider's own release rule; the behavior adds no
/// extra error handling.
pub struct TransactionBehavior {
    provider: Arc<dyn TransactionProvider>,
    subject: &'static str,
}

impl TransactionBehavior {
    /// Create a transaction behavior for the named subject.
    pub fn new(provider: Arc<dyn TransactionProvider>, subject: &'static str) -> Self {
        Self { provider, subject }
    }
}

impl<T> Wrapper<T> for TransactionBehavior {
    fn around(&self, next: &Action<T>, subject: &T) -> Result<(), BoxError> {
        let scope = self.provider.begin(self.subject);
        next.invoke(subject)?;
        scope.commit();
        Ok(())
    }
}

/// Elapsed-time measurement around the unit of work.
///
/// Reads the clock before delegating and reports the elapsed duration after
/// a successful return. On failure the error propagates without a report.
pub struct TimingBehavior {
    clock: Arc<dyn Clock>,
    sink: Arc<dyn LogSink>,
    subject: &'static str,
}

impl TimingBehavior {
    /// Create a timing behavior for the named subject.
    pub fn new(clock: Arc<dyn Clock>, sink: Arc<dyn LogSink>, subject: &'static str) -> Self {
        Self {
            clock,
            sink,
            subject,
        }
    }
}

impl<T> Wrapper<T> for TimingBehavior {
    fn around(&self, next: &Action<T>, subject: &T) -> Result<(), BoxError> {
        let start = self.clock.now();
        next.invoke(subject)?;
        let elapsed = self.clock.now().saturating_duration_since(start);
        self.sink
            .info(&format!("Elapsed: {:?} ({})", elapsed, self.subject));
        Ok(())
    }
}

/// Rule set covering the three reference behaviors.
///
/// Maps [`BehaviorId::LOGGING`], [`BehaviorId::TRANSACTION`], and
/// [`BehaviorId::PERFORMANCE`] to their factories, sharing the given sink,
/// provider, and clock. Extend it with
/// [`with_rule`](RuleSet::with_rule) for custom behaviors.
pub fn standard_rules<T: 'static>(
    sink: Arc<dyn LogSink>,
    transactions: Arc<dyn TransactionProvider>,
    clock: Arc<dyn Clock>,
) -> RuleSet<T> {
    let logging_sink = Arc::clone(&sink);
    let logging: WrapperFactory<T> = Arc::new(move |info: &SubjectInfo| {
        Arc::new(LoggingBehavior::new(Arc::clone(&logging_sink), info.name()))
    });

    let transaction: WrapperFactory<T> = Arc::new(move |info: &SubjectInfo| {
        Arc::new(TransactionBehavior::new(
            Arc::clone(&transactions),
            info.name(),
        ))
    });

    let performance: WrapperFactory<T> = Arc::new(move |info: &SubjectInfo| {
        Arc::new(TimingBehavior::new(
            Arc::clone(&clock),
            Arc::clone(&sink),
            info.name(),
        ))
    });

    RuleSet::new()
        .with_rule(BehaviorId::LOGGING, logging)
        .with_rule(BehaviorId::TRANSACTION, transaction)
        .with_rule(BehaviorId::PERFORMANCE, performance)
}
