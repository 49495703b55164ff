use soulcheck_camera::AcquisitionError;
use soulcheck_types::{SessionStatus, TypesError};
use thiserror::Error;

use crate::outcome::RejectReason;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("camera acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("capture rejected: {0}")]
    CaptureRejected(RejectReason),

    #[error("cannot {action} while session is {status}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },

    #[error("a verification session is already running ({0})")]
    AlreadyActive(SessionStatus),

    #[error("session is already verified")]
    AlreadyVerified,

    #[error("session is not verified (status: {0})")]
    NotVerified(SessionStatus),

    #[error("invalid liveness parameters: {0}")]
    InvalidParams(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),
}

impl VerificationError {
    /// Text suitable for the failure banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Acquisition(err) => err.user_message().to_string(),
            Self::CaptureRejected(reason) => reason.user_message().to_string(),
            other => other.to_string(),
        }
    }
}
