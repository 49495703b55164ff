//! The scheduling capability consumed by the session driver.

use soulcheck_types::Timestamp;
use std::fmt;

/// Identifies one scheduled timer. Never reused within a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A timer whose deadline has been reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<K> {
    pub handle: TimerHandle,
    pub deadline: Timestamp,
    pub kind: K,
}

/// Schedule-after-delay and cancel-before-fire.
pub trait Scheduler<K> {
    /// Schedule `kind` to expire `delay_ms` after `now`.
    fn schedule(&mut self, now: Timestamp, delay_ms: u64, kind: K) -> TimerHandle;

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Deadline of the earliest pending timer.
    fn next_deadline(&mut self) -> Option<Timestamp>;

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers with equal deadlines come out in scheduling order.
    fn pop_expired(&mut self, now: Timestamp) -> Option<Expired<K>>;

    /// Number of timers scheduled and not yet fired or cancelled.
    fn pending(&self) -> usize;
}
