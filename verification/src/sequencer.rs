//! Ordered stepping through the phase plan.

use soulcheck_types::{PhasePlan, Pose};

/// Where the sequencer is in the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Not started, or reset after a rejected capture.
    Idle,
    /// Camera held; phase 0 starts when the warm-up expires.
    WarmingUp,
    /// Phase `i` is accumulating stability.
    PhaseActive(usize),
    /// Phase `completed` reached 100%; the next one starts after the settle delay.
    Settling { completed: usize },
    /// Every phase reached 100%.
    AllPhasesComplete,
}

/// What follows a completed phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseStep {
    Settle { next: usize },
    AllComplete,
}

/// Owns the phase plan and the current position in it.
///
/// Transitions only move forward one phase at a time; anything else is
/// refused by returning `None` and leaving the state untouched.
#[derive(Clone, Debug)]
pub struct PhaseSequencer {
    plan: PhasePlan,
    state: SequencerState,
}

impl PhaseSequencer {
    pub fn new(plan: PhasePlan) -> Self {
        Self {
            plan,
            state: SequencerState::Idle,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    /// 0-based index of the phase being shown.
    pub fn phase_index(&self) -> usize {
        match self.state {
            SequencerState::Idle | SequencerState::WarmingUp => 0,
            SequencerState::PhaseActive(i) => i,
            SequencerState::Settling { completed } => completed,
            SequencerState::AllPhasesComplete => self.plan.last_index(),
        }
    }

    /// Pose the user should be holding, if any.
    pub fn current_pose(&self) -> Option<&Pose> {
        match self.state {
            SequencerState::Idle | SequencerState::AllPhasesComplete => None,
            _ => self.plan.get(self.phase_index()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SequencerState::AllPhasesComplete
    }

    pub fn begin_warmup(&mut self) {
        self.state = SequencerState::WarmingUp;
    }

    /// Warm-up expired: start phase 0.
    pub fn start(&mut self) -> Option<usize> {
        match self.state {
            SequencerState::WarmingUp => {
                self.state = SequencerState::PhaseActive(0);
                Some(0)
            }
            _ => None,
        }
    }

    /// The active phase reached 100%.
    pub fn complete_phase(&mut self) -> Option<PhaseStep> {
        let SequencerState::PhaseActive(i) = self.state else {
            return None;
        };
        if i >= self.plan.last_index() {
            self.state = SequencerState::AllPhasesComplete;
            Some(PhaseStep::AllComplete)
        } else {
            self.state = SequencerState::Settling { completed: i };
            Some(PhaseStep::Settle { next: i + 1 })
        }
    }

    /// Settle delay expired: start the next phase.
    pub fn advance(&mut self) -> Option<usize> {
        let SequencerState::Settling { completed } = self.state else {
            return None;
        };
        let next = completed + 1;
        self.state = SequencerState::PhaseActive(next);
        Some(next)
    }

    pub fn reset(&mut self) {
        self.state = SequencerState::Idle;
    }
}
