//! The platform capture API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AcquisitionError;

/// Identifies a live video stream handed out by a [`CaptureDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamId(pub u64);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream#{}", self.0)
    }
}

/// A live video stream. Deliberately not `Clone`: exactly one owner stops it.
#[derive(Debug, PartialEq, Eq)]
pub struct VideoStream {
    id: StreamId,
}

impl VideoStream {
    pub fn new(id: StreamId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> StreamId {
        self.id
    }
}

/// Source of video streams.
///
/// Implementations wrap the platform API (browser media devices, V4L2, a
/// simulated camera in tests).
pub trait CaptureDevice {
    /// Open a video stream, or report why none can be opened.
    fn request_video_stream(&mut self) -> Result<VideoStream, AcquisitionError>;

    /// Stop a stream previously returned by `request_video_stream`.
    fn stop_stream(&mut self, stream: VideoStream);
}
