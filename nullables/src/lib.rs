//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of a liveness session (clock, camera, preview,
//! scheduler) are reached through traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be scripted programmatically (e.g. deny the camera)
//! - Record every interaction behind a cloneable probe, so assertions still
//!   work after the session that owned them has been dropped
//!
//! Usage: swap real implementations for nullables in tests.

pub mod camera;
pub mod clock;
pub mod scheduler;

pub use camera::{null_camera, CameraLog, CameraProbe, NullCaptureDevice, NullDisplaySink};
pub use clock::NullClock;
pub use scheduler::{NullScheduler, SchedulerLog, SchedulerProbe};
