//! Scripted onboarding wizard over a simulated camera.
//!
//! The binary in `main.rs` is a thin CLI over this library: it loads a
//! [`SimulatorConfig`], builds a [`LivenessOrchestrator`] around a
//! [`SimulatedCamera`], and runs the [`wizard`] either on virtual time or in
//! real time with tokio.
//!
//! [`LivenessOrchestrator`]: soulcheck_verification::LivenessOrchestrator

pub mod config;
pub mod device;
pub mod wizard;

pub use config::SimulatorConfig;
pub use device::{SimulatedCamera, TerminalPreview};
pub use wizard::{run_realtime, run_virtual, Pace, SessionReport, Wizard};
