//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Controllable clock for deterministic timing tests.
///
/// Time only moves when a test says so. Clones share the same underlying
/// time value, so a clone captured by a base action can advance the clock
/// that a timing behavior reads.
///
/// # Example
/// ```
/// use action_chain::infrastructure::mocks::MockClock;
/// use action_chain::Clock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::from_secs(3));
/// assert_eq!(clock.now(), start + Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock frozen at the given instant.
    pub fn new(start: Instant) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward by a duration.
    pub fn advance(&self, duration: Duration) {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += duration;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: Instant) {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
