//! Camera resource for the liveness flow.
//!
//! The platform capture API and the preview surface are external collaborators,
//! reached through [`CaptureDevice`] and [`DisplaySink`]. [`CameraResource`]
//! pairs them: acquiring a stream also binds it to the sink, and releasing a
//! [`CameraHandle`] unbinds and stops it.

pub mod device;
pub mod error;
pub mod resource;
pub mod sink;

pub use device::{CaptureDevice, StreamId, VideoStream};
pub use error::AcquisitionError;
pub use resource::{CameraHandle, CameraResource};
pub use sink::DisplaySink;
