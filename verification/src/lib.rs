//! Onboarding liveness verification.
//!
//! A session acquires the camera, steps the user through a fixed sequence of
//! poses, and only then accepts a capture:
//!
//! 1. **Warm-up**: the camera is held and the stream stabilises.
//! 2. **Phases**: each pose accumulates stability progress on a repeating tick
//!    until it reaches 100%, then the next pose starts after a settle delay.
//! 3. **Capture**: once every phase is complete the gate opens; a capture runs
//!    a fixed analysis delay and the outcome policy decides pass or fail.
//!
//! The transition logic lives in [`machine::step`], a pure function over
//! [`VerificationSession`]. [`LivenessOrchestrator`] executes its commands
//! against a camera and a scheduler and is what the onboarding wizard talks to.

pub mod config;
pub mod error;
pub mod event;
pub mod gate;
pub mod machine;
pub mod orchestrator;
pub mod outcome;
pub mod proof;
pub mod sequencer;
pub mod session;
pub mod stability;

pub use config::LivenessConfig;
pub use error::VerificationError;
pub use event::{RecordedEvent, VerificationEvent};
pub use gate::CaptureGate;
pub use machine::{Command, Input, TimerKind};
pub use orchestrator::LivenessOrchestrator;
pub use outcome::{CaptureOutcome, OutcomePolicy, RejectReason, FORCED_FAILURES};
pub use proof::VerifiedProof;
pub use sequencer::{PhaseSequencer, PhaseStep, SequencerState};
pub use session::{SessionSnapshot, VerificationSession};
pub use stability::{Stability, StabilityTracker};
