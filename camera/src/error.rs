use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AcquisitionError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no capture device available: {0}")]
    DeviceUnavailable(String),

    #[error("camera is already held by stream {0}")]
    Busy(u64),
}

impl AcquisitionError {
    /// Message shown to the user when acquisition fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Camera access required for verification.",
            Self::DeviceUnavailable(_) => "No camera found. Connect a camera and try again.",
            Self::Busy(_) => "The camera is in use by another verification.",
        }
    }
}
