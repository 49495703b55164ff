//! The verification session entity and its render snapshot.

use serde::Serialize;
use soulcheck_camera::CameraHandle;
use soulcheck_types::{LivenessParams, PhasePlan, SessionStatus, Timestamp};

use crate::error::VerificationError;
use crate::gate::CaptureGate;
use crate::sequencer::PhaseSequencer;
use crate::stability::StabilityTracker;

/// Prompt shown once every pose has been held.
pub const CAPTURE_PROMPT: &str = "Biometrics captured! Scanning...";

/// State of one onboarding verification attempt.
///
/// Mutated only by [`crate::machine::step`]; the camera slot is filled and
/// emptied by the orchestrator, which owns the device.
#[derive(Debug)]
pub struct VerificationSession {
    pub(crate) status: SessionStatus,
    pub(crate) sequencer: PhaseSequencer,
    pub(crate) tracker: StabilityTracker,
    pub(crate) attempt_count: u32,
    pub(crate) failure: Option<VerificationError>,
    pub(crate) verified_at: Option<Timestamp>,
    pub(crate) camera: Option<CameraHandle>,
}

impl VerificationSession {
    pub fn new(plan: PhasePlan, params: &LivenessParams) -> Self {
        Self {
            status: SessionStatus::Idle,
            sequencer: PhaseSequencer::new(plan),
            tracker: StabilityTracker::new(params.progress_step),
            attempt_count: 0,
            failure: None,
            verified_at: None,
            camera: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn phase_index(&self) -> usize {
        self.sequencer.phase_index()
    }

    pub fn phase_progress(&self) -> u8 {
        self.tracker.progress()
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn failure(&self) -> Option<&VerificationError> {
        self.failure.as_ref()
    }

    pub fn last_error(&self) -> Option<String> {
        self.failure.as_ref().map(VerificationError::user_message)
    }

    pub fn holds_camera(&self) -> bool {
        self.camera.is_some()
    }

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    pub fn tracker(&self) -> &StabilityTracker {
        &self.tracker
    }

    pub fn verified_at(&self) -> Option<Timestamp> {
        self.verified_at
    }

    /// Return to a fresh idle session. The camera slot is left for the
    /// orchestrator to release.
    pub(crate) fn reset(&mut self) {
        self.status = SessionStatus::Idle;
        self.sequencer.reset();
        self.tracker.reset();
        self.attempt_count = 0;
        self.failure = None;
        self.verified_at = None;
    }

    fn instruction(&self) -> Option<String> {
        match self.status {
            SessionStatus::Acquiring | SessionStatus::InProgress
                if !self.sequencer.is_complete() =>
            {
                self.sequencer
                    .current_pose()
                    .map(|pose| pose.instruction().to_string())
            }
            SessionStatus::InProgress | SessionStatus::Capturing => Some(CAPTURE_PROMPT.into()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            phase_index: self.phase_index(),
            phase_count: self.sequencer.plan().len(),
            phase_progress: self.phase_progress(),
            attempt_count: self.attempt_count,
            last_error: self.last_error(),
            instruction: self.instruction(),
            capture_ready: CaptureGate.is_open(self),
            submit_enabled: self.status.permits_submission(),
        }
    }
}

/// Observable fields for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub phase_index: usize,
    pub phase_count: usize,
    pub phase_progress: u8,
    pub attempt_count: u32,
    pub last_error: Option<String>,
    pub instruction: Option<String>,
    pub capture_ready: bool,
    pub submit_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = VerificationSession::new(PhasePlan::default(), &LivenessParams::default());
        let snap = session.snapshot();
        assert_eq!(snap.status, SessionStatus::Idle);
        assert_eq!(snap.phase_index, 0);
        assert_eq!(snap.phase_progress, 0);
        assert_eq!(snap.phase_count, 3);
        assert_eq!(snap.attempt_count, 0);
        assert_eq!(snap.last_error, None);
        assert_eq!(snap.instruction, None);
        assert!(!snap.capture_ready);
        assert!(!snap.submit_enabled);
    }
}
