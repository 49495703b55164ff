//! Nullable camera: scripted acquisition, recorded release.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use soulcheck_camera::{
    AcquisitionError, CameraResource, CaptureDevice, DisplaySink, StreamId, VideoStream,
};

/// Everything the device and sink were asked to do.
#[derive(Clone, Debug, Default)]
pub struct CameraLog {
    pub requests: u32,
    pub opened: Vec<StreamId>,
    pub stopped: Vec<StreamId>,
    pub attached: Vec<StreamId>,
    pub detached: Vec<StreamId>,
}

/// Shared view of a [`CameraLog`]; survives the device being dropped.
#[derive(Clone, Default)]
pub struct CameraProbe(Rc<RefCell<CameraLog>>);

impl CameraProbe {
    pub fn log(&self) -> CameraLog {
        self.0.borrow().clone()
    }

    /// Streams opened and not yet stopped.
    pub fn live_streams(&self) -> usize {
        let log = self.0.borrow();
        log.opened.len() - log.stopped.len()
    }

    pub fn stop_count(&self) -> usize {
        self.0.borrow().stopped.len()
    }

    pub fn request_count(&self) -> u32 {
        self.0.borrow().requests
    }
}

/// A capture device that opens numbered streams or fails as scripted.
pub struct NullCaptureDevice {
    deny_always: Option<AcquisitionError>,
    scripted_failures: VecDeque<AcquisitionError>,
    next_id: u64,
    probe: CameraProbe,
}

impl NullCaptureDevice {
    pub fn new(probe: CameraProbe) -> Self {
        Self {
            deny_always: None,
            scripted_failures: VecDeque::new(),
            next_id: 1,
            probe,
        }
    }

    /// Every request fails with `error`.
    pub fn denying(mut self, error: AcquisitionError) -> Self {
        self.deny_always = Some(error);
        self
    }

    /// The next request fails with `error`; later ones succeed.
    pub fn fail_next(&mut self, error: AcquisitionError) {
        self.scripted_failures.push_back(error);
    }

    /// Lift a `denying` script, e.g. after the user grants permission.
    pub fn allow(&mut self) {
        self.deny_always = None;
    }
}

impl CaptureDevice for NullCaptureDevice {
    fn request_video_stream(&mut self) -> Result<VideoStream, AcquisitionError> {
        self.probe.0.borrow_mut().requests += 1;
        if let Some(error) = self.scripted_failures.pop_front() {
            return Err(error);
        }
        if let Some(error) = &self.deny_always {
            return Err(error.clone());
        }
        let id = StreamId(self.next_id);
        self.next_id += 1;
        self.probe.0.borrow_mut().opened.push(id);
        Ok(VideoStream::new(id))
    }

    fn stop_stream(&mut self, stream: VideoStream) {
        self.probe.0.borrow_mut().stopped.push(stream.id());
    }
}

/// A preview sink that only records what it was shown.
pub struct NullDisplaySink {
    probe: CameraProbe,
}

impl NullDisplaySink {
    pub fn new(probe: CameraProbe) -> Self {
        Self { probe }
    }
}

impl DisplaySink for NullDisplaySink {
    fn attach(&mut self, stream: &VideoStream) {
        self.probe.0.borrow_mut().attached.push(stream.id());
    }

    fn detach(&mut self, stream: &VideoStream) {
        self.probe.0.borrow_mut().detached.push(stream.id());
    }
}

/// A camera resource backed by nullables, plus the probe observing it.
pub fn null_camera() -> (CameraResource<NullCaptureDevice, NullDisplaySink>, CameraProbe) {
    let probe = CameraProbe::default();
    let resource = CameraResource::new(
        NullCaptureDevice::new(probe.clone()),
        NullDisplaySink::new(probe.clone()),
    );
    (resource, probe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_failure_then_success() {
        let probe = CameraProbe::default();
        let mut device = NullCaptureDevice::new(probe.clone());
        device.fail_next(AcquisitionError::DeviceUnavailable("unplugged".into()));

        assert!(device.request_video_stream().is_err());
        let stream = device.request_video_stream().unwrap();
        assert_eq!(stream.id(), StreamId(1));
        assert_eq!(probe.request_count(), 2);
        assert_eq!(probe.live_streams(), 1);
    }

    #[test]
    fn resource_release_is_recorded() {
        let (mut camera, probe) = null_camera();
        let mut slot = Some(camera.acquire().unwrap());
        camera.release(&mut slot);
        camera.release(&mut slot);

        let log = probe.log();
        assert_eq!(log.attached, vec![StreamId(1)]);
        assert_eq!(log.detached, vec![StreamId(1)]);
        assert_eq!(probe.stop_count(), 1);
        assert_eq!(probe.live_streams(), 0);
    }

    #[test]
    fn denying_device_never_opens() {
        let probe = CameraProbe::default();
        let mut device =
            NullCaptureDevice::new(probe.clone()).denying(AcquisitionError::PermissionDenied);
        assert_eq!(
            device.request_video_stream().unwrap_err(),
            AcquisitionError::PermissionDenied
        );
        device.allow();
        assert!(device.request_video_stream().is_ok());
    }
}
