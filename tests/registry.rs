//! Registry behavior through the public API: fail-fast configuration errors,
//! idempotent memoized resolution, and the reset hook.

use action_chain::{
    Action, BehaviorId, ConfigError, Declaration, RuleSet, SubjectInfo, WrapperFactory,
    WrapperRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Transfer;

fn passthrough_factory() -> WrapperFactory<Transfer> {
    Arc::new(|_info: &SubjectInfo| {
        Arc::new(|next: &Action<Transfer>, subject: &Transfer| next.invoke(subject))
    })
}

#[test]
fn test_unknown_behavior_fails_before_any_invocation() {
    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::LOGGING, BehaviorId::new("mystery")]),
            RuleSet::new().with_rule(BehaviorId::LOGGING, passthrough_factory()),
        )
        .unwrap();

    let invocations = Arc::new(AtomicUsize::new(0));
    let invocations_clone = Arc::clone(&invocations);
    let base = Action::from_fn(move |_: &Transfer| {
        invocations_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let err = registry.compose(base).unwrap_err();

    assert!(matches!(err, ConfigError::UnknownBehavior { behavior, .. }
        if behavior == BehaviorId::new("mystery")));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_resolving_twice_yields_the_same_order() {
    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::new("a"), BehaviorId::new("b")]),
            RuleSet::new()
                .with_rule(BehaviorId::new("a"), passthrough_factory())
                .with_rule(BehaviorId::new("b"), passthrough_factory()),
        )
        .unwrap();

    let first = registry.resolve::<Transfer>().unwrap();
    let second = registry.resolve::<Transfer>().unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    // Memoization hands back the very same chain.
    for (a, b) in first.iter().zip(second.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn test_resolution_acquires_resources_once() {
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let acquisitions_clone = Arc::clone(&acquisitions);
    let factory: WrapperFactory<Transfer> = Arc::new(move |_info: &SubjectInfo| {
        // Stands in for opening a logging channel or similar shared resource.
        acquisitions_clone.fetch_add(1, Ordering::SeqCst);
        Arc::new(|next: &Action<Transfer>, subject: &Transfer| next.invoke(subject))
    });

    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::LOGGING]),
            RuleSet::new().with_rule(BehaviorId::LOGGING, factory),
        )
        .unwrap();

    for _ in 0..10 {
        registry.resolve::<Transfer>().unwrap();
    }

    assert_eq!(acquisitions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reset_invalidates_the_cached_chain() {
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let acquisitions_clone = Arc::clone(&acquisitions);
    let factory: WrapperFactory<Transfer> = Arc::new(move |_info: &SubjectInfo| {
        acquisitions_clone.fetch_add(1, Ordering::SeqCst);
        Arc::new(|next: &Action<Transfer>, subject: &Transfer| next.invoke(subject))
    });

    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::LOGGING]),
            RuleSet::new().with_rule(BehaviorId::LOGGING, factory),
        )
        .unwrap();

    registry.resolve::<Transfer>().unwrap();
    registry.reset_all();
    registry.resolve::<Transfer>().unwrap();

    assert_eq!(acquisitions.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_first_access_resolves_once() {
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let acquisitions_clone = Arc::clone(&acquisitions);
    let factory: WrapperFactory<Transfer> = Arc::new(move |_info: &SubjectInfo| {
        acquisitions_clone.fetch_add(1, Ordering::SeqCst);
        Arc::new(|next: &Action<Transfer>, subject: &Transfer| next.invoke(subject))
    });

    let registry = Arc::new(WrapperRegistry::new());
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::LOGGING]),
            RuleSet::new().with_rule(BehaviorId::LOGGING, factory),
        )
        .unwrap();

    let mut handles = vec![];
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            registry.resolve::<Transfer>().unwrap()
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(acquisitions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_malformed_declaration_is_rejected() {
    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(
            Declaration::new(vec![BehaviorId::LOGGING, BehaviorId::LOGGING]),
            RuleSet::new().with_rule(BehaviorId::LOGGING, passthrough_factory()),
        )
        .unwrap();

    let err = registry.resolve::<Transfer>().unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateBehavior { .. }));
}

#[test]
fn test_empty_declaration_composes_to_the_bare_action() {
    let registry = WrapperRegistry::new();
    registry
        .register::<Transfer>(Declaration::empty(), RuleSet::new())
        .unwrap();

    let invocations = Arc::new(AtomicUsize::new(0));
    let invocations_clone = Arc::clone(&invocations);
    let composed = registry
        .compose(Action::from_fn(move |_: &Transfer| {
            invocations_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
        .unwrap();

    composed.invoke(&Transfer).unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}
