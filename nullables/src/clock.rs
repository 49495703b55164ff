//! Nullable clock: deterministic time for testing.

use soulcheck_types::Timestamp;
use std::cell::Cell;

/// A deterministic session clock.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_ms: u64) -> Self {
        Self {
            current: Cell::new(initial_ms),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of milliseconds and return the new time.
    pub fn advance(&self, ms: u64) -> Timestamp {
        self.current.set(self.current.get() + ms);
        self.now()
    }

    /// Set the time to a specific value.
    pub fn set(&self, ms: u64) {
        self.current.set(ms);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::default();
        assert_eq!(clock.now(), Timestamp::ZERO);
        assert_eq!(clock.advance(150), Timestamp::new(150));
        assert_eq!(clock.now(), Timestamp::new(150));
        clock.set(10);
        assert_eq!(clock.now(), Timestamp::new(10));
    }
}
