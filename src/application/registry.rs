//! Central registry mapping subject types to wrapper chains.
//!
//! The registry holds one entry per subject type: the ordered behavior
//! declaration plus the rule set that knows how to construct a wrapper for
//! each declared behavior. Resolution interprets the declaration once,
//! memoizes the resulting chain, and reuses it for every later call.

use crate::domain::behavior::{BehaviorId, Declaration};
use crate::domain::chain::{self, Action, Wrapper};
use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Metadata about a subject type, passed to wrapper factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectInfo {
    name: &'static str,
}

impl SubjectInfo {
    /// Display name of the subject type, used in log messages and scope
    /// labels.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Resolved wrapper sequence for one subject type, outermost first.
pub type WrapperChain<T> = Arc<[Arc<dyn Wrapper<T>>]>;

/// Construction rule for one behavior.
///
/// Factories run at resolution time, never at invocation time, and at most
/// once per subject type thanks to memoization. A factory may acquire shared
/// resources; the registry only builds wrappers, it never runs them.
pub type WrapperFactory<T> = Arc<dyn Fn(&SubjectInfo) -> Arc<dyn Wrapper<T>> + Send + Sync>;

/// Configuration error surfaced at registration or resolution time.
///
/// Configuration problems fail fast: an unresolvable declaration is reported
/// before the base action could ever run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A declared behavior has no construction rule.
    UnknownBehavior {
        /// The unresolvable identifier
        behavior: BehaviorId,
        /// Subject type whose declaration referenced it
        subject: &'static str,
    },
    /// A declaration lists the same behavior more than once.
    DuplicateBehavior {
        /// The repeated identifier
        behavior: BehaviorId,
        /// Subject type whose declaration repeated it
        subject: &'static str,
    },
    /// The subject type was never registered.
    UndeclaredSubject {
        /// The missing subject type
        subject: &'static str,
    },
    /// The subject type already has a declaration.
    AlreadyDeclared {
        /// The conflicting subject type
        subject: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownBehavior { behavior, subject } => {
                write!(f, "no rule for behavior '{behavior}' declared on {subject}")
            }
            ConfigError::DuplicateBehavior { behavior, subject } => {
                write!(f, "behavior '{behavior}' declared twice on {subject}")
            }
            ConfigError::UndeclaredSubject { subject } => {
                write!(f, "no declaration registered for {subject}")
            }
            ConfigError::AlreadyDeclared { subject } => {
                write!(f, "{subject} already has a registered declaration")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rules mapping behavior identifiers to wrapper factories for one subject
/// type.
///
/// Each identifier maps to exactly one rule; registering an identifier twice
/// replaces the earlier rule. See
/// [`standard_rules`](crate::application::behaviors::standard_rules) for a
/// rule set covering the three reference behaviors.
pub struct RuleSet<T> {
    rules: HashMap<BehaviorId, WrapperFactory<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }
}

impl<T> RuleSet<T> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a construction rule for a behavior.
    pub fn with_rule(mut self, id: BehaviorId, factory: WrapperFactory<T>) -> Self {
        self.rules.insert(id, factory);
        self
    }

    /// Look up the rule for a behavior.
    pub fn rule(&self, id: &BehaviorId) -> Option<&WrapperFactory<T>> {
        self.rules.get(id)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&BehaviorId> = self.rules.keys().collect();
        ids.sort();
        f.debug_struct("RuleSet").field("behaviors", &ids).finish()
    }
}

/// Per-subject configuration plus its memoized resolution.
struct SubjectConfig<T> {
    info: SubjectInfo,
    declaration: Declaration,
    rules: RuleSet<T>,
    resolved: RwLock<Option<WrapperChain<T>>>,
}

impl<T: 'static> SubjectConfig<T> {
    fn resolve(&self) -> Result<WrapperChain<T>, ConfigError> {
        if let Some(chain) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(chain));
        }

        let mut slot = self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have resolved while we waited for the lock.
        if let Some(chain) = slot.as_ref() {
            return Ok(Arc::clone(chain));
        }

        let chain = self.build()?;
        *slot = Some(Arc::clone(&chain));
        Ok(chain)
    }

    fn build(&self) -> Result<WrapperChain<T>, ConfigError> {
        if let Some(duplicate) = self.declaration.first_duplicate() {
            return Err(ConfigError::DuplicateBehavior {
                behavior: duplicate.clone(),
                subject: self.info.name,
            });
        }

        let mut wrappers = Vec::with_capacity(self.declaration.len());
        for id in self.declaration.behaviors() {
            let factory = self.rules.rule(id).ok_or_else(|| ConfigError::UnknownBehavior {
                behavior: id.clone(),
                subject: self.info.name,
            })?;
            wrappers.push(factory(&self.info));
        }
        Ok(wrappers.into())
    }
}

/// Type-erased view of a subject entry, so the registry can hold entries for
/// heterogeneous subject types in one map.
trait AnySubject: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn invalidate(&self);
}

impl<T: 'static> AnySubject for SubjectConfig<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn invalidate(&self) {
        *self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Registry of behavior declarations, keyed by subject type.
///
/// Declarations are registered once at configuration time and resolved
/// lazily: the first [`resolve`](WrapperRegistry::resolve) for a subject type
/// runs the wrapper factories and caches the chain; later calls reuse it.
/// Concurrent first access performs a single resolution.
///
/// The registry is process-scoped state with an explicit lifecycle: create it
/// where the application wires its components, and use
/// [`reset`](WrapperRegistry::reset) or [`clear`](WrapperRegistry::clear) to
/// invalidate cached resolutions in tests.
///
/// # Example
/// ```
/// use action_chain::{Action, Declaration, RuleSet, WrapperRegistry};
/// use action_chain::standard_rules;
/// use action_chain::{SystemClock, TracingSink, TransactionLog};
/// use std::sync::Arc;
///
/// struct Transfer;
///
/// let registry = WrapperRegistry::new();
/// registry
///     .register::<Transfer>(
///         Declaration::standard(),
///         standard_rules(
///             Arc::new(TracingSink),
///             Arc::new(TransactionLog::new()),
///             Arc::new(SystemClock::new()),
///         ),
///     )
///     .unwrap();
///
/// let handler = registry
///     .compose(Action::from_fn(|_: &Transfer| Ok(())))
///     .unwrap();
/// handler.invoke(&Transfer).unwrap();
/// ```
#[derive(Default)]
pub struct WrapperRegistry {
    subjects: DashMap<TypeId, Box<dyn AnySubject>>,
}

impl WrapperRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration and rule set for subject type `T`.
    ///
    /// The display name used in log messages defaults to the type's full
    /// path; use [`register_named`](WrapperRegistry::register_named) to
    /// override it.
    ///
    /// # Errors
    /// Returns `ConfigError::AlreadyDeclared` if `T` is already registered.
    pub fn register<T: 'static>(
        &self,
        declaration: Declaration,
        rules: RuleSet<T>,
    ) -> Result<(), ConfigError> {
        self.register_named(type_name::<T>(), declaration, rules)
    }

    /// Register a declaration under an explicit display name.
    ///
    /// # Errors
    /// Returns `ConfigError::AlreadyDeclared` if `T` is already registered.
    pub fn register_named<T: 'static>(
        &self,
        name: &'static str,
        declaration: Declaration,
        rules: RuleSet<T>,
    ) -> Result<(), ConfigError> {
        use dashmap::mapref::entry::Entry;

        match self.subjects.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(ConfigError::AlreadyDeclared {
                subject: type_name::<T>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(SubjectConfig::<T> {
                    info: SubjectInfo { name },
                    declaration,
                    rules,
                    resolved: RwLock::new(None),
                }));
                Ok(())
            }
        }
    }

    /// Resolve the wrapper chain for subject type `T`, outermost first.
    ///
    /// The first call interprets the declaration and runs each behavior's
    /// factory; the result is memoized per subject type. Under concurrent
    /// first access only one resolution occurs.
    ///
    /// # Errors
    /// Fails fast with a `ConfigError` if `T` was never registered or its
    /// declaration is unresolvable; the chain (and therefore any base
    /// action) is never built from a bad declaration.
    pub fn resolve<T: 'static>(&self) -> Result<WrapperChain<T>, ConfigError> {
        let entry = self
            .subjects
            .get(&TypeId::of::<T>())
            .ok_or(ConfigError::UndeclaredSubject {
                subject: type_name::<T>(),
            })?;
        let config = entry
            .as_any()
            .downcast_ref::<SubjectConfig<T>>()
            .expect("subject entry matches its TypeId key");
        config.resolve()
    }

    /// Resolve `T`'s chain and fold it around `base`.
    ///
    /// Equivalent to [`resolve`](WrapperRegistry::resolve) followed by
    /// [`chain::compose`](crate::domain::chain::compose).
    ///
    /// # Errors
    /// Propagates the `ConfigError` from resolution.
    pub fn compose<T: 'static>(&self, base: Action<T>) -> Result<Action<T>, ConfigError> {
        let wrappers = self.resolve::<T>()?;
        Ok(chain::compose(base, &wrappers))
    }

    /// Check whether subject type `T` has a registered declaration.
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.subjects.contains_key(&TypeId::of::<T>())
    }

    /// Drop the memoized chain for subject type `T`.
    ///
    /// The declaration and rules stay registered; the next resolution runs
    /// the factories again. Intended for tests that need a fresh chain.
    pub fn reset<T: 'static>(&self) {
        if let Some(entry) = self.subjects.get(&TypeId::of::<T>()) {
            entry.invalidate();
        }
    }

    /// Drop every memoized chain, keeping all registrations.
    pub fn reset_all(&self) {
        for entry in self.subjects.iter() {
            entry.invalidate();
        }
    }

    /// Remove all registrations and cached chains.
    pub fn clear(&self) {
        self.subjects.clear();
    }

    /// Number of registered subject types.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Check whether no subject types are registered.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl fmt::Debug for WrapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperRegistry")
            .field("subjects", &self.subjects.len())
            .finish()
    }
}
