//! Nullable scheduler: a real timer queue that records its traffic.

use std::cell::RefCell;
use std::rc::Rc;

use soulcheck_timer::{Expired, Scheduler, TimerHandle, TimerQueue};
use soulcheck_types::Timestamp;

#[derive(Clone, Debug, Default)]
pub struct SchedulerLog {
    pub scheduled: u64,
    pub cancelled: u64,
    pub fired: u64,
    /// Timers outstanding after the last operation.
    pub pending: usize,
    /// Highest number of timers ever outstanding at once.
    pub max_pending: usize,
}

/// Shared view of a [`SchedulerLog`]; survives the scheduler being dropped.
#[derive(Clone, Default)]
pub struct SchedulerProbe(Rc<RefCell<SchedulerLog>>);

impl SchedulerProbe {
    pub fn log(&self) -> SchedulerLog {
        self.0.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().pending
    }

    pub fn max_pending(&self) -> usize {
        self.0.borrow().max_pending
    }
}

/// Delegates to [`TimerQueue`] and records every call.
pub struct NullScheduler<K> {
    queue: TimerQueue<K>,
    probe: SchedulerProbe,
}

impl<K> NullScheduler<K> {
    pub fn new() -> Self {
        Self {
            queue: TimerQueue::new(),
            probe: SchedulerProbe::default(),
        }
    }

    pub fn probe(&self) -> SchedulerProbe {
        self.probe.clone()
    }

    fn sync_pending(&self) {
        let mut log = self.probe.0.borrow_mut();
        log.pending = self.queue.pending();
        log.max_pending = log.max_pending.max(log.pending);
    }
}

impl<K> Default for NullScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> for NullScheduler<K> {
    fn schedule(&mut self, now: Timestamp, delay_ms: u64, kind: K) -> TimerHandle {
        let handle = self.queue.schedule(now, delay_ms, kind);
        self.probe.0.borrow_mut().scheduled += 1;
        self.sync_pending();
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.queue.cancel(handle);
        if cancelled {
            self.probe.0.borrow_mut().cancelled += 1;
        }
        self.sync_pending();
        cancelled
    }

    fn next_deadline(&mut self) -> Option<Timestamp> {
        self.queue.next_deadline()
    }

    fn pop_expired(&mut self, now: Timestamp) -> Option<Expired<K>> {
        let expired = self.queue.pop_expired(now)?;
        self.probe.0.borrow_mut().fired += 1;
        self.sync_pending();
        Some(expired)
    }

    fn pending(&self) -> usize {
        self.queue.pending()
    }
}
