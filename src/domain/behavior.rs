//! Behavior identifiers and declarations.
//!
//! A [`BehaviorId`] names one cross-cutting behavior (logging, transaction,
//! timing, or a user-defined one). A [`Declaration`] attaches an ordered list
//! of behavior identifiers to a subject type, outermost first. Declarations
//! are plain data: they are interpreted by the registry at resolution time.

use std::borrow::Cow;
use std::fmt;

/// Identifier for a single cross-cutting behavior.
///
/// The three reference behaviors are available as constants; custom behaviors
/// use any identifier registered with a matching construction rule.
///
/// # Example
/// ```
/// use action_chain::BehaviorId;
///
/// let builtin = BehaviorId::LOGGING;
/// let custom = BehaviorId::new("audit");
/// assert_ne!(builtin, custom);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorId(Cow<'static, str>);

impl BehaviorId {
    /// Entry/exit/error logging around the unit of work.
    pub const LOGGING: BehaviorId = BehaviorId(Cow::Borrowed("logging"));

    /// Transactional scoping: begin before, commit on success, roll back on
    /// failure.
    pub const TRANSACTION: BehaviorId = BehaviorId(Cow::Borrowed("transaction"));

    /// Elapsed-time measurement around the unit of work.
    pub const PERFORMANCE: BehaviorId = BehaviorId(Cow::Borrowed("performance"));

    /// Create a behavior identifier from an arbitrary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Create a behavior identifier from a static string without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The identifier's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BehaviorId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

/// Ordered set of behaviors declared for a subject type.
///
/// Order is authoritative: the first declared behavior is the outermost
/// wrapper (its before-logic runs first, its after-logic last). Declarations
/// are fixed at configuration time; the registry interprets them once per
/// subject type and caches the result.
///
/// An empty declaration is valid and resolves to a chain that leaves the base
/// action unchanged. A declaration listing the same behavior twice is
/// malformed and is rejected at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    behaviors: Vec<BehaviorId>,
}

impl Declaration {
    /// Create a declaration from behaviors listed outermost first.
    pub fn new(behaviors: Vec<BehaviorId>) -> Self {
        Self { behaviors }
    }

    /// Declaration with no behaviors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three reference behaviors in their conventional order:
    /// logging around transaction around performance.
    pub fn standard() -> Self {
        Self::new(vec![
            BehaviorId::LOGGING,
            BehaviorId::TRANSACTION,
            BehaviorId::PERFORMANCE,
        ])
    }

    /// Declared behaviors, outermost first.
    pub fn behaviors(&self) -> &[BehaviorId] {
        &self.behaviors
    }

    /// Number of declared behaviors.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Check whether no behaviors are declared.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// First behavior that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<&BehaviorId> {
        self.behaviors
            .iter()
            .enumerate()
            .find_map(|(i, id)| self.behaviors[..i].contains(id).then_some(id))
    }
}

impl FromIterator<BehaviorId> for Declaration {
    fn from_iter<I: IntoIterator<Item = BehaviorId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
