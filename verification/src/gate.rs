//! The capture precondition.

use soulcheck_types::SessionStatus;

use crate::error::VerificationError;
use crate::session::VerificationSession;

/// Open iff the final phase has reached 100% and no capture is already running.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureGate;

impl CaptureGate {
    pub fn is_open(&self, session: &VerificationSession) -> bool {
        session.status() == SessionStatus::InProgress
            && session.sequencer().is_complete()
            && session.tracker().is_stable()
    }

    pub fn check(&self, session: &VerificationSession) -> Result<(), VerificationError> {
        if self.is_open(session) {
            Ok(())
        } else {
            Err(VerificationError::InvalidTransition {
                action: "capture",
                status: session.status(),
            })
        }
    }
}
