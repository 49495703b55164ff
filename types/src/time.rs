//! Timestamp type used by the timer queue and the session driver.
//!
//! Timestamps are milliseconds on a monotonic, session-local clock. They start
//! at zero and carry no relation to wall-clock time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the session clock, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `millis`, saturating at `u64::MAX`.
    pub fn after(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_saturates() {
        assert_eq!(Timestamp::new(u64::MAX - 1).after(10).as_millis(), u64::MAX);
    }

    #[test]
    fn display_uses_millis() {
        assert_eq!(Timestamp::new(1500).to_string(), "1500ms");
    }
}
