//! Pass/fail decision for a capture attempt.
//!
//! No analysis happens: the first attempt of every session is rejected and any
//! later attempt passes. The threshold is fixed at [`FORCED_FAILURES`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attempts that are rejected before one may pass.
pub const FORCED_FAILURES: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SilhouetteMismatch,
}

impl RejectReason {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SilhouetteMismatch => {
                "Biometric anomaly: silhouette mismatch. Please ensure only your face is visible."
            }
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SilhouetteMismatch => f.write_str("silhouette mismatch"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    Rejected(RejectReason),
    Verified,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutcomePolicy;

impl OutcomePolicy {
    /// Decide a capture given the number of attempts completed before it.
    pub fn decide(&self, attempt_count: u32) -> CaptureOutcome {
        if attempt_count < FORCED_FAILURES {
            CaptureOutcome::Rejected(RejectReason::SilhouetteMismatch)
        } else {
            CaptureOutcome::Verified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_is_rejected() {
        assert_eq!(
            OutcomePolicy.decide(0),
            CaptureOutcome::Rejected(RejectReason::SilhouetteMismatch)
        );
    }

    #[test]
    fn later_attempts_pass() {
        for attempts in 1..5 {
            assert_eq!(OutcomePolicy.decide(attempts), CaptureOutcome::Verified);
        }
    }
}
