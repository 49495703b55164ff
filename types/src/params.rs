//! Liveness timing parameters.
//!
//! Every value is expressed in session-clock milliseconds or progress points.
//! None of them is structural: the state machine is correct for any values that
//! pass [`LivenessParams::validate`].

use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// Timing and progress constants for one liveness session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessParams {
    // ── Camera ───────────────────────────────────────────────────────────
    /// Delay between camera acquisition and the start of phase 0, letting the
    /// capture stream stabilise. Default: 1500 ms.
    pub warmup_ms: u64,

    // ── Stability ────────────────────────────────────────────────────────
    /// Period of the stability tick while a phase is active. Default: 150 ms.
    pub tick_interval_ms: u64,

    /// Progress points added per tick. Default: 4 (25 ticks per phase).
    pub progress_step: u8,

    /// Pause between one phase reaching 100% and the next phase starting.
    /// Default: 500 ms.
    pub settle_delay_ms: u64,

    // ── Capture ──────────────────────────────────────────────────────────
    /// Simulated analysis time after a capture is accepted. Default: 4000 ms.
    pub analysis_ms: u64,
}

impl LivenessParams {
    /// Upper bound of the stability percentage.
    pub const FULL_PROGRESS: u8 = 100;

    /// Number of ticks a phase needs to go from 0 to 100.
    pub fn ticks_per_phase(&self) -> u64 {
        u64::from(Self::FULL_PROGRESS).div_ceil(u64::from(self.progress_step.max(1)))
    }

    /// Time from phase start to 100%.
    pub fn phase_duration_ms(&self) -> u64 {
        self.ticks_per_phase().saturating_mul(self.tick_interval_ms)
    }

    /// Time from camera acquisition until the capture gate opens for a plan of
    /// `phase_count` phases, assuming no interruption.
    pub fn time_to_gate_ms(&self, phase_count: usize) -> u64 {
        let n = phase_count as u64;
        self.warmup_ms
            .saturating_add(n.saturating_mul(self.phase_duration_ms()))
            .saturating_add(n.saturating_sub(1).saturating_mul(self.settle_delay_ms))
    }

    /// Reject values that would stall or overflow the tracker.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.tick_interval_ms == 0 {
            return Err(TypesError::InvalidParam {
                name: "tick_interval_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.progress_step == 0 || self.progress_step > Self::FULL_PROGRESS {
            return Err(TypesError::InvalidParam {
                name: "progress_step",
                reason: format!("must be within 1..=100, got {}", self.progress_step),
            });
        }
        Ok(())
    }
}

impl Default for LivenessParams {
    fn default() -> Self {
        Self {
            warmup_ms: 1500,
            tick_interval_ms: 150,
            progress_step: 4,
            settle_delay_ms: 500,
            analysis_ms: 4000,
        }
    }
}
