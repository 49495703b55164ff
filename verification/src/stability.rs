//! Per-phase stability progress.

use soulcheck_types::LivenessParams;

/// Result of one stability tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stability {
    /// Still accumulating; carries the new progress.
    Holding(u8),
    /// Reached 100%.
    Stable,
}

/// Accumulates a synthetic percentage, one fixed step per tick.
///
/// Progress never decreases except through [`reset`](Self::reset) and never
/// exceeds 100.
#[derive(Clone, Debug)]
pub struct StabilityTracker {
    progress: u8,
    step: u8,
}

impl StabilityTracker {
    pub fn new(step: u8) -> Self {
        Self { progress: 0, step }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_stable(&self) -> bool {
        self.progress >= LivenessParams::FULL_PROGRESS
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }

    pub fn tick(&mut self) -> Stability {
        self.progress = self
            .progress
            .saturating_add(self.step)
            .min(LivenessParams::FULL_PROGRESS);
        if self.is_stable() {
            Stability::Stable
        } else {
            Stability::Holding(self.progress)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_needs_25_ticks() {
        let mut tracker = StabilityTracker::new(4);
        for expected in 1..25u8 {
            assert_eq!(tracker.tick(), Stability::Holding(expected * 4));
        }
        assert_eq!(tracker.tick(), Stability::Stable);
        assert_eq!(tracker.progress(), 100);
    }

    #[test]
    fn progress_clamps_at_100() {
        let mut tracker = StabilityTracker::new(30);
        tracker.tick();
        tracker.tick();
        tracker.tick();
        assert_eq!(tracker.tick(), Stability::Stable);
        assert_eq!(tracker.progress(), 100);
        assert_eq!(tracker.tick(), Stability::Stable);
        assert_eq!(tracker.progress(), 100);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut tracker = StabilityTracker::new(50);
        tracker.tick();
        tracker.reset();
        assert_eq!(tracker.progress(), 0);
        assert!(!tracker.is_stable());
    }
}
