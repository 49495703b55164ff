//! Status of a verification session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The externally visible status of a liveness session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session running.
    #[default]
    Idle,
    /// Camera held; waiting for the stream to stabilise before phase 0.
    Acquiring,
    /// Phases are being stepped through.
    InProgress,
    /// A capture was accepted and is being analysed.
    Capturing,
    /// Terminal success.
    Verified,
    /// Acquisition failed or a capture was rejected; recoverable via retry.
    Failed,
}

impl SessionStatus {
    /// Whether a session in this status must be holding the camera.
    pub fn requires_camera(&self) -> bool {
        matches!(self, Self::Acquiring | Self::InProgress | Self::Capturing)
    }

    /// Whether profile submission may proceed.
    pub fn permits_submission(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::InProgress => "in_progress",
            Self::Capturing => "capturing",
            Self::Verified => "verified",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
