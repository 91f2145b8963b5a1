//! Action composition - the chain builder.
//!
//! An [`Action`] is a single unit of work over a subject value. A [`Wrapper`]
//! decorates an action by running logic before and/or after delegating to the
//! remainder of the chain, which it receives as an opaque `next` action.
//! [`compose`] folds an ordered wrapper sequence around a base action into one
//! new action with the same signature.

use std::sync::Arc;

/// Boxed error type carried through a chain.
///
/// Errors raised by the base action or by a wrapper travel through every
/// enclosing wrapper unchanged, so the original error value can be recovered
/// by the caller via downcasting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A unit of work over a subject value of type `T`.
///
/// Actions are cheap to clone (reference counted) and hold no mutable state
/// of their own, so a single action may be invoked repeatedly and from
/// multiple call sites.
///
/// # Example
/// ```
/// use action_chain::Action;
///
/// let action = Action::from_fn(|n: &u32| {
///     println!("processing {n}");
///     Ok(())
/// });
///
/// action.invoke(&7).unwrap();
/// ```
pub struct Action<T>(Arc<dyn Fn(&T) -> Result<(), BoxError> + Send + Sync>);

impl<T> Action<T> {
    /// Create an action from a function or closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the action against a subject value.
    pub fn invoke(&self, subject: &T) -> Result<(), BoxError> {
        (self.0)(subject)
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// A cross-cutting behavior wrapped around the remainder of a chain.
///
/// A wrapper receives the rest of the chain as a single `next` action and the
/// subject value, and decides how to delegate. The reference behaviors invoke
/// `next` exactly once, but the contract permits zero invocations (suppress)
/// or several (retry); that choice is the wrapper's own responsibility.
///
/// Closures of the shape `Fn(&Action<T>, &T) -> Result<(), BoxError>`
/// implement this trait automatically.
pub trait Wrapper<T>: Send + Sync {
    /// Run this wrapper's behavior around `next` for the given subject.
    fn around(&self, next: &Action<T>, subject: &T) -> Result<(), BoxError>;
}

impl<T> std::fmt::Debug for dyn Wrapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapper").finish_non_exhaustive()
    }
}

impl<T, F> Wrapper<T> for F
where
    F: Fn(&Action<T>, &T) -> Result<(), BoxError> + Send + Sync,
{
    fn around(&self, next: &Action<T>, subject: &T) -> Result<(), BoxError> {
        self(next, subject)
    }
}

/// Fold an ordered wrapper sequence around a base action.
///
/// Wrappers are given outermost-first: composing `[w0, w1, w2]` around `b`
/// behaves as `w0` around (`w1` around (`w2` around `b`)). `w0`'s
/// before-logic runs first and its after-logic runs last. An empty sequence
/// yields an action behaviorally identical to `b`, including its errors.
///
/// The fold is built by recursion from the innermost wrapper outward: each
/// step captures the chain built so far as the opaque `next` action of the
/// wrapper one level out. The composer itself never intercepts errors; a
/// failure anywhere surfaces to the caller exactly as if the chain were one
/// flat function.
pub fn compose<T: 'static>(base: Action<T>, wrappers: &[Arc<dyn Wrapper<T>>]) -> Action<T> {
    match wrappers.split_last() {
        None => base,
        Some((innermost, outer)) => {
            let wrapper = Arc::clone(innermost);
            let next = base;
            let wrapped = Action::from_fn(move |subject: &T| wrapper.around(&next, subject));
            compose(wrapped, outer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Wrapper that records its before/after steps into a shared trace.
    fn tracing_wrapper(label: &'static str, trace: Arc<Mutex<Vec<String>>>) -> Arc<dyn Wrapper<u32>> {
        Arc::new(move |next: &Action<u32>, subject: &u32| {
            trace
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(format!("{label}:before"));
            let result = next.invoke(subject);
            trace
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(format!("{label}:after"));
            result
        })
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_empty_chain_is_identity() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let base = Action::from_fn(move |_: &u32| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let composed = compose(base, &[]);
        composed.invoke(&1).unwrap();
        composed.invoke(&2).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_chain_propagates_errors() {
        let base = Action::from_fn(|_: &u32| Err(Box::new(Boom) as BoxError));
        let composed = compose(base, &[]);

        let err = composed.invoke(&0).unwrap_err();
        assert!(err.downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn test_nesting_order_outermost_first() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let trace_base = Arc::clone(&trace);
        let base = Action::from_fn(move |_: &u32| {
            trace_base
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push("base".to_string());
            Ok(())
        });

        let wrappers = vec![
            tracing_wrapper("outer", Arc::clone(&trace)),
            tracing_wrapper("inner", Arc::clone(&trace)),
        ];
        let composed = compose(base, &wrappers);
        composed.invoke(&0).unwrap();

        let recorded = trace
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        assert_eq!(
            recorded,
            vec!["outer:before", "inner:before", "base", "inner:after", "outer:after"]
        );
    }

    #[test]
    fn test_single_wrapper() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let trace_base = Arc::clone(&trace);
        let base = Action::from_fn(move |_: &u32| {
            trace_base
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push("base".to_string());
            Ok(())
        });

        let wrappers = vec![tracing_wrapper("only", Arc::clone(&trace))];
        compose(base, &wrappers).invoke(&0).unwrap();

        let recorded = trace
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        assert_eq!(recorded, vec!["only:before", "base", "only:after"]);
    }

    #[test]
    fn test_error_propagates_through_wrappers_unchanged() {
        let base = Action::from_fn(|_: &u32| Err(Box::new(Boom) as BoxError));
        let passthrough: Arc<dyn Wrapper<u32>> =
            Arc::new(|next: &Action<u32>, subject: &u32| next.invoke(subject));

        let composed = compose(base, &[Arc::clone(&passthrough), passthrough]);
        let err = composed.invoke(&0).unwrap_err();

        assert_eq!(err.downcast_ref::<Boom>(), Some(&Boom));
    }

    #[test]
    fn test_wrapper_may_suppress_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let base = Action::from_fn(move |_: &u32| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let suppress: Arc<dyn Wrapper<u32>> = Arc::new(|_: &Action<u32>, _: &u32| Ok(()));
        compose(base, &[suppress]).invoke(&0).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wrapper_may_retry_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let base = Action::from_fn(move |_: &u32| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let retry: Arc<dyn Wrapper<u32>> = Arc::new(|next: &Action<u32>, subject: &u32| {
            next.invoke(subject)?;
            next.invoke(subject)
        });
        compose(base, &[retry]).invoke(&0).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subject_value_reaches_every_level() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_wrapper = Arc::clone(&seen);
        let seen_base = Arc::clone(&seen);

        let base = Action::from_fn(move |n: &u32| {
            seen_base
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(*n);
            Ok(())
        });
        let observer: Arc<dyn Wrapper<u32>> = Arc::new(move |next: &Action<u32>, n: &u32| {
            seen_wrapper
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(*n);
            next.invoke(n)
        });

        compose(base, &[observer]).invoke(&42).unwrap();

        let recorded = seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        assert_eq!(recorded, vec![42, 42]);
    }

    #[test]
    fn test_independent_invocations_share_no_state() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let base = Action::from_fn(move |_: &u32| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let passthrough: Arc<dyn Wrapper<u32>> =
            Arc::new(|next: &Action<u32>, subject: &u32| next.invoke(subject));

        let composed = compose(base, &[passthrough]);
        composed.invoke(&0).unwrap();
        composed.invoke(&0).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
