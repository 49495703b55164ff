//! Simulated camera hardware for the wizard.

use soulcheck_camera::{AcquisitionError, CaptureDevice, DisplaySink, StreamId, VideoStream};

/// Hands out numbered streams, or refuses permission when told to.
#[derive(Debug, Default)]
pub struct SimulatedCamera {
    deny: bool,
    next_stream: u64,
    open: usize,
}

impl SimulatedCamera {
    pub fn new(deny: bool) -> Self {
        Self {
            deny,
            next_stream: 1,
            open: 0,
        }
    }

    /// Streams opened and not yet stopped.
    pub fn open_streams(&self) -> usize {
        self.open
    }
}

impl CaptureDevice for SimulatedCamera {
    fn request_video_stream(&mut self) -> Result<VideoStream, AcquisitionError> {
        if self.deny {
            tracing::debug!("simulated user denied camera permission");
            return Err(AcquisitionError::PermissionDenied);
        }
        let id = StreamId(self.next_stream);
        self.next_stream += 1;
        self.open += 1;
        tracing::debug!(stream = %id, "simulated stream opened");
        Ok(VideoStream::new(id))
    }

    fn stop_stream(&mut self, stream: VideoStream) {
        self.open = self.open.saturating_sub(1);
        tracing::debug!(stream = %stream.id(), "simulated stream stopped");
    }
}

/// Stands in for the on-screen preview element.
#[derive(Debug, Default)]
pub struct TerminalPreview {
    showing: Option<StreamId>,
}

impl TerminalPreview {
    pub fn showing(&self) -> Option<StreamId> {
        self.showing
    }
}

impl DisplaySink for TerminalPreview {
    fn attach(&mut self, stream: &VideoStream) {
        self.showing = Some(stream.id());
    }

    fn detach(&mut self, stream: &VideoStream) {
        if self.showing == Some(stream.id()) {
            self.showing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulcheck_camera::CameraResource;

    #[test]
    fn preview_follows_stream() {
        let mut camera = CameraResource::new(SimulatedCamera::new(false), TerminalPreview::default());
        let mut handle = Some(camera.acquire().unwrap());
        assert_eq!(camera.sink().showing(), Some(StreamId(1)));
        assert_eq!(camera.device().open_streams(), 1);

        camera.release(&mut handle);
        assert_eq!(camera.sink().showing(), None);
        assert_eq!(camera.device().open_streams(), 0);
    }

    #[test]
    fn denied_camera() {
        let mut device = SimulatedCamera::new(true);
        assert_eq!(
            device.request_video_stream().unwrap_err(),
            AcquisitionError::PermissionDenied
        );
    }
}
