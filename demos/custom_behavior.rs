//! Custom behavior example: a retry wrapper registered alongside the
//! built-in logging behavior.
//!
//! Run with `cargo run --example custom_behavior`.

use action_chain::{
    Action, BehaviorId, BoxError, Declaration, LoggingBehavior, RuleSet, SubjectInfo, TracingSink,
    WrapperFactory, WrapperRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct FlakySync;

fn main() {
    tracing_subscriber::fmt().init();

    let retry_id = BehaviorId::new("retry-once");

    // A wrapper is free to call `next` more than once; retrying is its own
    // contract, not the composer's.
    let retry: WrapperFactory<FlakySync> = Arc::new(|_info: &SubjectInfo| {
        Arc::new(|next: &Action<FlakySync>, subject: &FlakySync| {
            next.invoke(subject).or_else(|err| {
                tracing::warn!("first attempt failed ({err}), retrying");
                next.invoke(subject)
            })
        })
    });

    let sink = Arc::new(TracingSink::new());
    let logging: WrapperFactory<FlakySync> = Arc::new(move |info: &SubjectInfo| {
        Arc::new(LoggingBehavior::new(
            Arc::clone(&sink) as Arc<dyn action_chain::LogSink>,
            info.name(),
        ))
    });

    let registry = WrapperRegistry::new();
    registry
        .register_named::<FlakySync>(
            "FlakySync",
            Declaration::new(vec![BehaviorId::LOGGING, retry_id.clone()]),
            RuleSet::new()
                .with_rule(BehaviorId::LOGGING, logging)
                .with_rule(retry_id, retry),
        )
        .expect("FlakySync registered once");

    // Fails on the first attempt, succeeds on the second.
    let attempts = Arc::new(AtomicUsize::new(0));
    let handler = registry
        .compose(Action::from_fn(move |_: &FlakySync| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "peer hung up",
                )) as BoxError)
            } else {
                Ok(())
            }
        }))
        .expect("declaration resolves");

    handler.invoke(&FlakySync).expect("retry saves the call");
    println!("sync completed after retry");
}
