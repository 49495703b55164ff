//! Evidence that a session reached `verified`.

use soulcheck_types::Timestamp;

/// Required by profile submission. Only this crate can construct one, and it
/// only does so for a verified session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedProof {
    attempts: u32,
    verified_at: Timestamp,
}

impl VerifiedProof {
    pub(crate) fn new(attempts: u32, verified_at: Timestamp) -> Self {
        Self {
            attempts,
            verified_at,
        }
    }

    /// Capture attempts made, including the successful one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn verified_at(&self) -> Timestamp {
        self.verified_at
    }
}
