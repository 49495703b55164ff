//! Events recorded by the orchestrator for the wizard to render.

use serde::Serialize;
use soulcheck_camera::AcquisitionError;
use soulcheck_types::{Pose, Timestamp};

use crate::outcome::RejectReason;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VerificationEvent {
    /// Camera stream is live; warm-up started.
    CameraAcquired,
    /// Acquisition failed; the session is `failed`.
    CameraDenied { error: AcquisitionError },
    PhaseStarted { index: usize, pose: Pose },
    PhaseCompleted { index: usize },
    /// All phases complete; capture is now accepted.
    GateOpened,
    CaptureStarted { attempt: u32 },
    CaptureRejected { attempt: u32, reason: RejectReason },
    Verified { attempts: u32 },
    Cancelled,
}

/// An event together with the session-clock time it happened at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    pub at: Timestamp,
    #[serde(flatten)]
    pub event: VerificationEvent,
}
