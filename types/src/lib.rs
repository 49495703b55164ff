//! Fundamental types for the soulcheck liveness flow.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! virtual timestamps, timing parameters, the pose plan, and the session status enum.

pub mod error;
pub mod params;
pub mod pose;
pub mod state;
pub mod time;

pub use error::TypesError;
pub use params::LivenessParams;
pub use pose::{PhasePlan, Pose};
pub use state::SessionStatus;
pub use time::Timestamp;
