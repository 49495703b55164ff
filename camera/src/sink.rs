//! The live preview surface.

use crate::device::VideoStream;

/// Accepts a stream for live preview while the camera is held.
pub trait DisplaySink {
    fn attach(&mut self, stream: &VideoStream);

    fn detach(&mut self, stream: &VideoStream);
}
