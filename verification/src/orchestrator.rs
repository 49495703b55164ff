//! Verification orchestrator: runs the state machine against a real camera
//! and scheduler, and is the surface the onboarding wizard talks to.

use std::collections::VecDeque;

use soulcheck_camera::{CameraResource, CaptureDevice, DisplaySink};
use soulcheck_timer::{Scheduler, TimerSlot};
use soulcheck_types::{LivenessParams, SessionStatus, Timestamp};

use crate::config::LivenessConfig;
use crate::error::VerificationError;
use crate::event::{RecordedEvent, VerificationEvent};
use crate::machine::{self, Command, Input, TimerKind};
use crate::proof::VerifiedProof;
use crate::session::{SessionSnapshot, VerificationSession};

type VerifiedCallback = Box<dyn FnOnce(&VerifiedProof)>;

/// Owns one [`VerificationSession`] together with the camera and the timer it
/// drives.
///
/// Time is supplied by the caller: every entry point takes the current
/// session-clock time, and [`advance_to`](Self::advance_to) fires the timers
/// that are due. Dropping the orchestrator cancels the outstanding timer and
/// releases the camera.
pub struct LivenessOrchestrator<D, K, S>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    params: LivenessParams,
    session: VerificationSession,
    camera: CameraResource<D, K>,
    scheduler: S,
    timer: TimerSlot<TimerKind>,
    now: Timestamp,
    pending_events: Vec<RecordedEvent>,
    on_verified: Option<VerifiedCallback>,
}

impl<D, K, S> LivenessOrchestrator<D, K, S>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    pub fn new(
        config: LivenessConfig,
        camera: CameraResource<D, K>,
        scheduler: S,
    ) -> Result<Self, VerificationError> {
        config.validate()?;
        let session = VerificationSession::new(config.phases, &config.timing);
        Ok(Self {
            params: config.timing,
            session,
            camera,
            scheduler,
            timer: TimerSlot::new(),
            now: Timestamp::ZERO,
            pending_events: Vec::new(),
            on_verified: None,
        })
    }

    /// Invoked exactly once, when the session reaches `verified`.
    pub fn with_on_verified(mut self, callback: impl FnOnce(&VerifiedProof) + 'static) -> Self {
        self.on_verified = Some(Box::new(callback));
        self
    }

    /// Acquire the camera and begin the warm-up.
    ///
    /// From `failed` this behaves like [`retry`](Self::retry). Refused while a
    /// session is running or after it has been verified.
    pub fn start(&mut self, now: Timestamp) -> Result<(), VerificationError> {
        self.clock(now);
        self.apply(Input::Start)?;
        tracing::info!(phases = self.session.sequencer().plan().len(), "liveness check started");
        Ok(())
    }

    /// Request a capture. Ignored unless the capture gate is open.
    ///
    /// Returns whether the capture was accepted.
    pub fn capture(&mut self, now: Timestamp) -> bool {
        self.clock(now);
        match self.apply(Input::Capture) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "capture request ignored");
                false
            }
        }
    }

    /// Leave `failed` and run the phase sequence again.
    ///
    /// Reuses the retained camera after a rejected capture; re-acquires it
    /// after an acquisition failure.
    pub fn retry(&mut self, now: Timestamp) -> Result<(), VerificationError> {
        self.clock(now);
        tracing::info!(attempts = self.session.attempt_count(), "retrying liveness check");
        self.apply(Input::Retry)
    }

    /// Tear the session down and return to a fresh idle session.
    ///
    /// Returns false when there was nothing to cancel (idle or verified).
    pub fn cancel(&mut self) -> bool {
        let before = self.session.status();
        if let Err(err) = self.apply(Input::Cancel) {
            tracing::warn!(%err, "cancel refused");
            return false;
        }
        !matches!(before, SessionStatus::Idle | SessionStatus::Verified)
    }

    /// Fire every timer due at or before `now`, in deadline order.
    ///
    /// Each transition runs at its timer's deadline, so follow-up timers are
    /// scheduled relative to that deadline rather than to `now`. Returns the
    /// number of timers fired.
    pub fn advance_to(&mut self, now: Timestamp) -> usize {
        let mut fired = 0;
        while let Some(expired) = self.scheduler.pop_expired(now) {
            let Some(kind) = self.timer.claim(expired.handle) else {
                tracing::debug!(handle = %expired.handle, "stale timer dropped");
                continue;
            };
            self.clock(expired.deadline);
            fired += 1;
            if let Err(err) = self.apply(Input::Timer(kind)) {
                tracing::warn!(%err, ?kind, "timer transition refused");
            }
        }
        self.clock(now);
        fired
    }

    /// Deadline of the outstanding timer, if any.
    pub fn next_deadline(&mut self) -> Option<Timestamp> {
        self.scheduler.next_deadline()
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn params(&self) -> &LivenessParams {
        &self.params
    }

    pub fn camera(&self) -> &CameraResource<D, K> {
        &self.camera
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Proof for the profile-submission step. Only available once verified.
    pub fn authorize_submission(&self) -> Result<VerifiedProof, VerificationError> {
        match (self.session.status(), self.session.verified_at()) {
            (SessionStatus::Verified, Some(at)) => {
                Ok(VerifiedProof::new(self.session.attempt_count(), at))
            }
            (status, _) => Err(VerificationError::NotVerified(status)),
        }
    }

    fn clock(&mut self, now: Timestamp) {
        self.now = self.now.max(now);
    }

    fn apply(&mut self, input: Input) -> Result<(), VerificationError> {
        let commands = machine::step(&mut self.session, input, &self.params, self.now)?;
        self.execute(commands)
    }

    fn execute(&mut self, commands: Vec<Command>) -> Result<(), VerificationError> {
        let mut queue: VecDeque<Command> = commands.into();
        let mut failure = None;

        while let Some(command) = queue.pop_front() {
            match command {
                Command::AcquireCamera => {
                    let followup = match self.camera.acquire() {
                        Ok(handle) => {
                            self.session.camera = Some(handle);
                            match machine::step(
                                &mut self.session,
                                Input::Acquired,
                                &self.params,
                                self.now,
                            ) {
                                Ok(commands) => commands,
                                Err(err) => {
                                    self.camera.release(&mut self.session.camera);
                                    return Err(err);
                                }
                            }
                        }
                        Err(error) => {
                            failure = Some(VerificationError::Acquisition(error.clone()));
                            machine::step(
                                &mut self.session,
                                Input::AcquireFailed(error),
                                &self.params,
                                self.now,
                            )?
                        }
                    };
                    queue.extend(followup);
                }
                Command::Schedule { delay_ms, kind } => {
                    self.timer
                        .arm(&mut self.scheduler, self.now, delay_ms, kind);
                }
                Command::CancelTimer => {
                    self.timer.disarm(&mut self.scheduler);
                }
                Command::ReleaseCamera => {
                    self.camera.release(&mut self.session.camera);
                }
                Command::Emit(event) => self.record(event),
                Command::NotifyVerified => self.notify_verified(),
            }
        }

        failure.map_or(Ok(()), Err)
    }

    fn record(&mut self, event: VerificationEvent) {
        match &event {
            VerificationEvent::CameraAcquired => {
                tracing::info!(at = %self.now, "camera acquired, warming up")
            }
            VerificationEvent::CameraDenied { error } => {
                tracing::warn!(at = %self.now, %error, "camera acquisition failed")
            }
            VerificationEvent::PhaseStarted { index, pose } => {
                tracing::debug!(at = %self.now, phase = index, %pose, "phase started")
            }
            VerificationEvent::PhaseCompleted { index } => {
                tracing::debug!(at = %self.now, phase = index, "phase stable")
            }
            VerificationEvent::GateOpened => {
                tracing::info!(at = %self.now, "all phases complete, capture enabled")
            }
            VerificationEvent::CaptureStarted { attempt } => {
                tracing::info!(at = %self.now, attempt, "capture accepted, analysing")
            }
            VerificationEvent::CaptureRejected { attempt, reason } => {
                tracing::warn!(at = %self.now, attempt, %reason, "capture rejected")
            }
            VerificationEvent::Verified { attempts } => {
                tracing::info!(at = %self.now, attempts, "liveness verified")
            }
            VerificationEvent::Cancelled => tracing::info!(at = %self.now, "session cancelled"),
        }
        self.pending_events.push(RecordedEvent {
            at: self.now,
            event,
        });
    }

    fn notify_verified(&mut self) {
        let Some(callback) = self.on_verified.take() else {
            return;
        };
        match self.authorize_submission() {
            Ok(proof) => callback(&proof),
            Err(err) => tracing::warn!(%err, "verified callback skipped"),
        }
    }
}

impl<D, K, S> Drop for LivenessOrchestrator<D, K, S>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    fn drop(&mut self) {
        let cancelled = self.timer.disarm(&mut self.scheduler);
        let released = self.camera.release(&mut self.session.camera);
        if cancelled.is_some() || released {
            tracing::debug!(status = %self.session.status(), "liveness session torn down");
        }
    }
}
