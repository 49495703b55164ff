//! A holder for at most one outstanding timer.

use soulcheck_types::Timestamp;

use crate::scheduler::{Scheduler, TimerHandle};

/// Owns the single in-flight timer of a sequencer.
///
/// Arming cancels whatever was armed before, and an expiry is only honoured if
/// its handle matches the armed one, so a stale timer can never drive a
/// transition.
#[derive(Debug)]
pub struct TimerSlot<K> {
    armed: Option<(TimerHandle, K)>,
}

impl<K: Clone> TimerSlot<K> {
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// Cancel any armed timer, then schedule `kind` after `delay_ms`.
    pub fn arm<S: Scheduler<K>>(
        &mut self,
        scheduler: &mut S,
        now: Timestamp,
        delay_ms: u64,
        kind: K,
    ) -> TimerHandle {
        self.disarm(scheduler);
        let handle = scheduler.schedule(now, delay_ms, kind.clone());
        self.armed = Some((handle, kind));
        handle
    }

    /// Cancel the armed timer, returning what it would have done.
    pub fn disarm<S: Scheduler<K>>(&mut self, scheduler: &mut S) -> Option<K> {
        let (handle, kind) = self.armed.take()?;
        scheduler.cancel(handle);
        Some(kind)
    }

    /// Accept an expiry. Returns the payload only if `handle` is the armed timer.
    pub fn claim(&mut self, handle: TimerHandle) -> Option<K> {
        match self.armed.take() {
            Some((armed, kind)) if armed == handle => Some(kind),
            other => {
                self.armed = other;
                None
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed_kind(&self) -> Option<&K> {
        self.armed.as_ref().map(|(_, kind)| kind)
    }
}

impl<K: Clone> Default for TimerSlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::TimerQueue;

    #[test]
    fn arming_twice_cancels_the_first() {
        let mut queue = TimerQueue::new();
        let mut slot = TimerSlot::new();
        let first = slot.arm(&mut queue, Timestamp::ZERO, 100, "tick");
        let second = slot.arm(&mut queue, Timestamp::ZERO, 500, "settle");

        assert_eq!(queue.pending(), 1);
        assert!(!queue.cancel(first));
        assert_eq!(slot.armed_kind(), Some(&"settle"));
        assert_eq!(slot.claim(second), Some("settle"));
        assert!(!slot.is_armed());
    }

    #[test]
    fn stale_handle_is_not_claimed() {
        let mut queue = TimerQueue::new();
        let mut slot = TimerSlot::new();
        let stale = slot.arm(&mut queue, Timestamp::ZERO, 100, 1);
        let current = slot.arm(&mut queue, Timestamp::ZERO, 100, 2);

        assert_eq!(slot.claim(stale), None);
        assert!(slot.is_armed());
        assert_eq!(slot.claim(current), Some(2));
    }

    #[test]
    fn disarm_leaves_nothing_pending() {
        let mut queue = TimerQueue::new();
        let mut slot = TimerSlot::new();
        slot.arm(&mut queue, Timestamp::ZERO, 100, ());
        assert_eq!(slot.disarm(&mut queue), Some(()));
        assert_eq!(slot.disarm(&mut queue), None);
        assert_eq!(queue.pending(), 0);
        assert!(queue.pop_expired(Timestamp::new(1000)).is_none());
    }
}
