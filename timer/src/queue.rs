//! Deadline-ordered timer queue.
//!
//! A binary heap keyed on `(deadline, sequence)`. Cancellation is lazy: the
//! handle is dropped from the live set and the heap entry is skipped when it
//! reaches the top.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use soulcheck_types::Timestamp;

use crate::scheduler::{Expired, Scheduler, TimerHandle};

struct Entry<K> {
    deadline: Timestamp,
    /// Scheduling order; also the handle id.
    sequence: u64,
    kind: K,
}

impl<K> Eq for Entry<K> {}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl<K> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earliest deadline, then earliest sequence, wins.
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The production [`Scheduler`].
pub struct TimerQueue<K> {
    heap: BinaryHeap<Entry<K>>,
    live: HashSet<TimerHandle>,
    next_sequence: u64,
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_sequence: 0,
        }
    }

    /// Drop cancelled entries sitting at the top of the heap.
    fn purge_cancelled(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.live.contains(&TimerHandle::new(top.sequence)) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> for TimerQueue<K> {
    fn schedule(&mut self, now: Timestamp, delay_ms: u64, kind: K) -> TimerHandle {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let handle = TimerHandle::new(sequence);
        self.heap.push(Entry {
            deadline: now.after(delay_ms),
            sequence,
            kind,
        });
        self.live.insert(handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle)
    }

    fn next_deadline(&mut self) -> Option<Timestamp> {
        self.purge_cancelled();
        self.heap.peek().map(|entry| entry.deadline)
    }

    fn pop_expired(&mut self, now: Timestamp) -> Option<Expired<K>> {
        self.purge_cancelled();
        if self.heap.peek()?.deadline > now {
            return None;
        }
        let entry = self.heap.pop()?;
        let handle = TimerHandle::new(entry.sequence);
        self.live.remove(&handle);
        Some(Expired {
            handle,
            deadline: entry.deadline,
            kind: entry.kind,
        })
    }

    fn pending(&self) -> usize {
        self.live.len()
    }
}
