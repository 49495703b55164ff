//! Acquisition and release of the single camera.

use crate::device::{CaptureDevice, StreamId, VideoStream};
use crate::error::AcquisitionError;
use crate::sink::DisplaySink;

/// Ownership token for an acquired camera.
///
/// Not `Clone`. Only [`CameraResource::release`] consumes it, so a handle can
/// be released at most once.
#[derive(Debug)]
pub struct CameraHandle {
    stream: VideoStream,
}

impl CameraHandle {
    pub fn stream_id(&self) -> StreamId {
        self.stream.id()
    }
}

/// Pairs a capture device with a preview sink and tracks the held stream.
pub struct CameraResource<D, S> {
    device: D,
    sink: S,
    held: Option<StreamId>,
}

impl<D: CaptureDevice, S: DisplaySink> CameraResource<D, S> {
    pub fn new(device: D, sink: S) -> Self {
        Self {
            device,
            sink,
            held: None,
        }
    }

    /// Open a stream and bind it to the preview sink.
    ///
    /// Fails with [`AcquisitionError::Busy`] while a previous handle is still
    /// held; the caller must release it first.
    pub fn acquire(&mut self) -> Result<CameraHandle, AcquisitionError> {
        if let Some(id) = self.held {
            return Err(AcquisitionError::Busy(id.0));
        }
        let stream = self.device.request_video_stream()?;
        self.sink.attach(&stream);
        self.held = Some(stream.id());
        tracing::debug!(stream = %stream.id(), "camera acquired");
        Ok(CameraHandle { stream })
    }

    /// Release whatever handle `slot` holds. Idempotent: an empty slot is a no-op.
    ///
    /// Returns whether a handle was released.
    pub fn release(&mut self, slot: &mut Option<CameraHandle>) -> bool {
        let Some(handle) = slot.take() else {
            return false;
        };
        let id = handle.stream.id();
        self.sink.detach(&handle.stream);
        self.device.stop_stream(handle.stream);
        if self.held == Some(id) {
            self.held = None;
        }
        tracing::debug!(stream = %id, "camera released");
        true
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDevice {
        deny: bool,
        opened: u64,
        stopped: Vec<StreamId>,
    }

    impl CaptureDevice for CountingDevice {
        fn request_video_stream(&mut self) -> Result<VideoStream, AcquisitionError> {
            if self.deny {
                return Err(AcquisitionError::PermissionDenied);
            }
            self.opened += 1;
            Ok(VideoStream::new(StreamId(self.opened)))
        }

        fn stop_stream(&mut self, stream: VideoStream) {
            self.stopped.push(stream.id());
        }
    }

    #[derive(Default)]
    struct Preview {
        showing: Option<StreamId>,
    }

    impl DisplaySink for Preview {
        fn attach(&mut self, stream: &VideoStream) {
            self.showing = Some(stream.id());
        }

        fn detach(&mut self, _stream: &VideoStream) {
            self.showing = None;
        }
    }

    #[test]
    fn acquire_binds_sink() {
        let mut camera = CameraResource::new(CountingDevice::default(), Preview::default());
        let handle = camera.acquire().unwrap();
        assert_eq!(camera.sink().showing, Some(handle.stream_id()));
        assert!(camera.is_held());
    }

    #[test]
    fn release_is_idempotent() {
        let mut camera = CameraResource::new(CountingDevice::default(), Preview::default());
        let mut slot = Some(camera.acquire().unwrap());

        assert!(camera.release(&mut slot));
        assert!(!camera.release(&mut slot));
        assert_eq!(camera.device().stopped, vec![StreamId(1)]);
        assert_eq!(camera.sink().showing, None);
        assert!(!camera.is_held());
    }

    #[test]
    fn second_acquire_while_held_is_busy() {
        let mut camera = CameraResource::new(CountingDevice::default(), Preview::default());
        let _handle = camera.acquire().unwrap();
        assert_eq!(camera.acquire().unwrap_err(), AcquisitionError::Busy(1));
        assert_eq!(camera.device().opened, 1);
    }

    #[test]
    fn denied_acquire_holds_nothing() {
        let device = CountingDevice {
            deny: true,
            ..CountingDevice::default()
        };
        let mut camera = CameraResource::new(device, Preview::default());
        assert_eq!(camera.acquire().unwrap_err(), AcquisitionError::PermissionDenied);
        assert!(!camera.is_held());
        assert_eq!(camera.sink().showing, None);
    }
}
