use proptest::prelude::*;

use soulcheck_timer::{Scheduler, TimerQueue};
use soulcheck_types::Timestamp;

proptest! {
    /// Expired timers come out with non-decreasing deadlines.
    #[test]
    fn expiry_order_is_monotone(delays in prop::collection::vec(0u64..10_000, 1..64)) {
        let mut queue = TimerQueue::new();
        for (i, delay) in delays.iter().enumerate() {
            queue.schedule(Timestamp::ZERO, *delay, i);
        }
        let mut last = Timestamp::ZERO;
        let mut fired = 0;
        while let Some(expired) = queue.pop_expired(Timestamp::new(10_000)) {
            prop_assert!(expired.deadline >= last);
            last = expired.deadline;
            fired += 1;
        }
        prop_assert_eq!(fired, delays.len());
        prop_assert_eq!(queue.pending(), 0);
    }

    /// Cancelled timers never fire; everything else does.
    #[test]
    fn cancelled_timers_are_skipped(
        delays in prop::collection::vec(0u64..1_000, 1..32),
        cancel_mask in prop::collection::vec(any::<bool>(), 32),
    ) {
        let mut queue = TimerQueue::new();
        let mut expected = Vec::new();
        for (i, delay) in delays.iter().enumerate() {
            let handle = queue.schedule(Timestamp::ZERO, *delay, i);
            if cancel_mask[i] {
                queue.cancel(handle);
            } else {
                expected.push(i);
            }
        }
        prop_assert_eq!(queue.pending(), expected.len());

        let mut fired: Vec<usize> = std::iter::from_fn(|| queue.pop_expired(Timestamp::new(1_000)))
            .map(|e| e.kind)
            .collect();
        fired.sort_unstable();
        prop_assert_eq!(fired, expected);
    }
}
