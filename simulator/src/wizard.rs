//! The scripted onboarding wizard.
//!
//! Plays the part of a cooperative user: start the check, hold each pose
//! until the capture button enables, capture, and retry after a rejection
//! until verified or out of attempts. Between actions it waits for the
//! orchestrator's next timer, either by jumping virtual time or by sleeping
//! on the tokio clock.

use std::time::Duration;

use anyhow::bail;
use serde::Serialize;
use soulcheck_camera::{CaptureDevice, DisplaySink};
use soulcheck_timer::Scheduler;
use soulcheck_types::{SessionStatus, Timestamp};
use soulcheck_verification::{
    LivenessOrchestrator, RecordedEvent, SessionSnapshot, TimerKind, VerificationError,
};
use tokio::time::Instant;

/// How the wizard waits for timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pace {
    /// Jump straight to each deadline.
    Virtual,
    /// Sleep until each deadline on the tokio clock.
    Realtime,
}

/// Outcome of one wizard run.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub status: SessionStatus,
    pub attempts: u32,
    pub verified_at: Option<Timestamp>,
    pub submission_unlocked: bool,
    pub last_error: Option<String>,
    pub elapsed_ms: u64,
    pub events: Vec<RecordedEvent>,
}

pub struct Wizard<D, K, S>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    orch: LivenessOrchestrator<D, K, S>,
    pace: Pace,
    origin: Instant,
    max_attempts: u32,
    events: Vec<RecordedEvent>,
}

impl<D, K, S> Wizard<D, K, S>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    pub fn new(orch: LivenessOrchestrator<D, K, S>, pace: Pace, max_attempts: u32) -> Self {
        Self {
            orch,
            pace,
            origin: Instant::now(),
            max_attempts,
            events: Vec::new(),
        }
    }

    /// Drive the session to `verified`, or to a terminal failure.
    ///
    /// A denied camera is a normal outcome and is reported, not returned as
    /// an error. Errors mean the session stalled or refused a scripted step.
    pub async fn run(mut self) -> anyhow::Result<SessionReport> {
        let started = self.now();
        match self.orch.start(started) {
            Ok(()) => self.collect(),
            Err(VerificationError::Acquisition(err)) => {
                tracing::warn!(%err, "wizard stopped, camera unavailable");
                self.collect();
                return Ok(self.report(started));
            }
            Err(err) => return Err(err.into()),
        }

        loop {
            self.run_until(|s| s.capture_ready).await?;
            let now = self.now();
            if !self.orch.capture(now) {
                bail!("capture refused with the gate open");
            }
            self.collect();

            self.run_until(|s| s.status != SessionStatus::Capturing).await?;
            let session = self.orch.session();
            match session.status() {
                SessionStatus::Failed if session.attempt_count() < self.max_attempts => {
                    tracing::info!(
                        attempts = session.attempt_count(),
                        max = self.max_attempts,
                        "capture rejected, retrying"
                    );
                    let now = self.now();
                    self.orch.retry(now)?;
                    self.collect();
                }
                _ => break,
            }
        }

        Ok(self.report(started))
    }

    /// Fire timers until `done` holds for the session snapshot.
    async fn run_until(&mut self, done: impl Fn(&SessionSnapshot) -> bool) -> anyhow::Result<()> {
        loop {
            let snapshot = self.orch.snapshot();
            if done(&snapshot) {
                return Ok(());
            }
            let Some(deadline) = self.orch.next_deadline() else {
                bail!("session stalled in {}", snapshot.status);
            };
            self.wait_until(deadline).await;
            let now = self.now().max(deadline);
            self.orch.advance_to(now);
            self.collect();
        }
    }

    async fn wait_until(&self, deadline: Timestamp) {
        if self.pace == Pace::Realtime {
            let at = self.origin + Duration::from_millis(deadline.as_millis());
            tokio::time::sleep_until(at).await;
        }
    }

    fn now(&self) -> Timestamp {
        match self.pace {
            Pace::Virtual => self.orch.now(),
            Pace::Realtime => {
                let elapsed = self.origin.elapsed().as_millis();
                Timestamp::new(u64::try_from(elapsed).unwrap_or(u64::MAX))
            }
        }
    }

    fn collect(&mut self) {
        self.events.extend(self.orch.drain_events());
    }

    fn report(&mut self, started: Timestamp) -> SessionReport {
        let snapshot = self.orch.snapshot();
        SessionReport {
            status: snapshot.status,
            attempts: snapshot.attempt_count,
            verified_at: self.orch.session().verified_at(),
            submission_unlocked: self.orch.authorize_submission().is_ok(),
            last_error: snapshot.last_error,
            elapsed_ms: started.elapsed_since(self.now()),
            events: std::mem::take(&mut self.events),
        }
    }
}

/// Run the wizard on virtual time. Completes without sleeping.
pub async fn run_virtual<D, K, S>(
    orch: LivenessOrchestrator<D, K, S>,
    max_attempts: u32,
) -> anyhow::Result<SessionReport>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    Wizard::new(orch, Pace::Virtual, max_attempts).run().await
}

/// Run the wizard in real time, sleeping until each timer is due.
pub async fn run_realtime<D, K, S>(
    orch: LivenessOrchestrator<D, K, S>,
    max_attempts: u32,
) -> anyhow::Result<SessionReport>
where
    D: CaptureDevice,
    K: DisplaySink,
    S: Scheduler<TimerKind>,
{
    Wizard::new(orch, Pace::Realtime, max_attempts).run().await
}
