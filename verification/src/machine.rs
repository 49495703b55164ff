//! The pure transition function.
//!
//! [`step`] applies one [`Input`] to a [`VerificationSession`] and returns the
//! [`Command`]s the orchestrator must carry out. It performs no I/O and reads
//! no clock, so every transition can be exercised directly.

use soulcheck_camera::AcquisitionError;
use soulcheck_types::{LivenessParams, SessionStatus, Timestamp};

use crate::error::VerificationError;
use crate::event::VerificationEvent;
use crate::gate::CaptureGate;
use crate::outcome::{CaptureOutcome, OutcomePolicy};
use crate::sequencer::PhaseStep;
use crate::session::VerificationSession;
use crate::stability::Stability;

/// The delayed transitions a session can have in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Warmup,
    Tick,
    Settle,
    Analysis,
}

#[derive(Debug)]
pub enum Input {
    Start,
    /// The orchestrator placed a fresh handle in the session's camera slot.
    Acquired,
    AcquireFailed(AcquisitionError),
    Timer(TimerKind),
    Capture,
    Retry,
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AcquireCamera,
    Schedule { delay_ms: u64, kind: TimerKind },
    CancelTimer,
    ReleaseCamera,
    Emit(VerificationEvent),
    NotifyVerified,
}

/// Apply `input` at session-clock time `now`.
pub fn step(
    session: &mut VerificationSession,
    input: Input,
    params: &LivenessParams,
    now: Timestamp,
) -> Result<Vec<Command>, VerificationError> {
    match input {
        Input::Start => start(session, params),
        Input::Acquired => acquired(session, params),
        Input::AcquireFailed(error) => Ok(acquire_failed(session, error)),
        Input::Timer(kind) => on_timer(session, kind, params, now),
        Input::Capture => capture(session, params),
        Input::Retry => retry(session, params),
        Input::Cancel => Ok(cancel(session)),
    }
}

fn invalid(action: &'static str, session: &VerificationSession) -> VerificationError {
    VerificationError::InvalidTransition {
        action,
        status: session.status,
    }
}

fn start(
    session: &mut VerificationSession,
    params: &LivenessParams,
) -> Result<Vec<Command>, VerificationError> {
    match session.status {
        SessionStatus::Idle => {
            session.failure = None;
            Ok(vec![Command::AcquireCamera])
        }
        SessionStatus::Failed => retry(session, params),
        SessionStatus::Verified => Err(VerificationError::AlreadyVerified),
        active => Err(VerificationError::AlreadyActive(active)),
    }
}

fn acquired(
    session: &mut VerificationSession,
    params: &LivenessParams,
) -> Result<Vec<Command>, VerificationError> {
    if !matches!(session.status, SessionStatus::Idle | SessionStatus::Failed)
        || session.camera.is_none()
    {
        return Err(invalid("accept a camera", session));
    }
    Ok(begin_warmup(session, params, Some(VerificationEvent::CameraAcquired)))
}

fn begin_warmup(
    session: &mut VerificationSession,
    params: &LivenessParams,
    announce: Option<VerificationEvent>,
) -> Vec<Command> {
    session.status = SessionStatus::Acquiring;
    session.failure = None;
    session.sequencer.begin_warmup();
    session.tracker.reset();

    let mut commands: Vec<Command> = announce.into_iter().map(Command::Emit).collect();
    commands.push(Command::Schedule {
        delay_ms: params.warmup_ms,
        kind: TimerKind::Warmup,
    });
    commands
}

fn acquire_failed(session: &mut VerificationSession, error: AcquisitionError) -> Vec<Command> {
    session.status = SessionStatus::Failed;
    session.sequencer.reset();
    session.tracker.reset();
    session.failure = Some(VerificationError::Acquisition(error.clone()));
    vec![Command::Emit(VerificationEvent::CameraDenied { error })]
}

fn on_timer(
    session: &mut VerificationSession,
    kind: TimerKind,
    params: &LivenessParams,
    now: Timestamp,
) -> Result<Vec<Command>, VerificationError> {
    match kind {
        TimerKind::Warmup => {
            if session.status != SessionStatus::Acquiring {
                return Err(invalid("start phases", session));
            }
            let index = session
                .sequencer
                .start()
                .ok_or_else(|| invalid("start phases", session))?;
            session.status = SessionStatus::InProgress;
            Ok(enter_phase(session, index, params))
        }
        TimerKind::Tick => {
            if session.status != SessionStatus::InProgress {
                return Err(invalid("tick", session));
            }
            let index = session.phase_index();
            match session.tracker.tick() {
                Stability::Holding(_) => Ok(vec![schedule_tick(params)]),
                Stability::Stable => {
                    let mut commands = vec![Command::Emit(VerificationEvent::PhaseCompleted {
                        index,
                    })];
                    match session.sequencer.complete_phase() {
                        Some(PhaseStep::Settle { .. }) => commands.push(Command::Schedule {
                            delay_ms: params.settle_delay_ms,
                            kind: TimerKind::Settle,
                        }),
                        Some(PhaseStep::AllComplete) => {
                            commands.push(Command::Emit(VerificationEvent::GateOpened))
                        }
                        None => return Err(invalid("complete a phase", session)),
                    }
                    Ok(commands)
                }
            }
        }
        TimerKind::Settle => {
            let index = session
                .sequencer
                .advance()
                .ok_or_else(|| invalid("advance phase", session))?;
            Ok(enter_phase(session, index, params))
        }
        TimerKind::Analysis => {
            if session.status != SessionStatus::Capturing {
                return Err(invalid("finish analysis", session));
            }
            Ok(finish_capture(session, now))
        }
    }
}

fn enter_phase(
    session: &mut VerificationSession,
    index: usize,
    params: &LivenessParams,
) -> Vec<Command> {
    session.tracker.reset();
    let mut commands = Vec::with_capacity(2);
    if let Some(pose) = session.sequencer.current_pose() {
        commands.push(Command::Emit(VerificationEvent::PhaseStarted {
            index,
            pose: pose.clone(),
        }));
    }
    commands.push(schedule_tick(params));
    commands
}

fn schedule_tick(params: &LivenessParams) -> Command {
    Command::Schedule {
        delay_ms: params.tick_interval_ms,
        kind: TimerKind::Tick,
    }
}

fn capture(
    session: &mut VerificationSession,
    params: &LivenessParams,
) -> Result<Vec<Command>, VerificationError> {
    CaptureGate.check(session)?;
    session.status = SessionStatus::Capturing;
    session.failure = None;
    Ok(vec![
        Command::Emit(VerificationEvent::CaptureStarted {
            attempt: session.attempt_count + 1,
        }),
        Command::Schedule {
            delay_ms: params.analysis_ms,
            kind: TimerKind::Analysis,
        },
    ])
}

fn finish_capture(session: &mut VerificationSession, now: Timestamp) -> Vec<Command> {
    let outcome = OutcomePolicy.decide(session.attempt_count);
    session.attempt_count += 1;
    let attempt = session.attempt_count;

    match outcome {
        CaptureOutcome::Rejected(reason) => {
            session.status = SessionStatus::Failed;
            session.failure = Some(VerificationError::CaptureRejected(reason));
            session.sequencer.reset();
            session.tracker.reset();
            vec![Command::Emit(VerificationEvent::CaptureRejected {
                attempt,
                reason,
            })]
        }
        CaptureOutcome::Verified => {
            session.status = SessionStatus::Verified;
            session.verified_at = Some(now);
            vec![
                Command::Emit(VerificationEvent::Verified { attempts: attempt }),
                Command::ReleaseCamera,
                Command::NotifyVerified,
            ]
        }
    }
}

fn retry(
    session: &mut VerificationSession,
    params: &LivenessParams,
) -> Result<Vec<Command>, VerificationError> {
    if session.status != SessionStatus::Failed {
        return Err(invalid("retry", session));
    }
    if session.camera.is_some() {
        return Ok(begin_warmup(session, params, None));
    }
    // failed without a camera: acquisition starts over
    session.failure = None;
    Ok(vec![Command::AcquireCamera])
}

fn cancel(session: &mut VerificationSession) -> Vec<Command> {
    if matches!(
        session.status,
        SessionStatus::Idle | SessionStatus::Verified
    ) {
        return Vec::new();
    }
    session.reset();
    vec![
        Command::CancelTimer,
        Command::ReleaseCamera,
        Command::Emit(VerificationEvent::Cancelled),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulcheck_types::PhasePlan;

    fn session() -> (VerificationSession, LivenessParams) {
        let params = LivenessParams::default();
        (VerificationSession::new(PhasePlan::default(), &params), params)
    }

    #[test]
    fn start_from_idle_requests_camera() {
        let (mut s, params) = session();
        let commands = step(&mut s, Input::Start, &params, Timestamp::ZERO).unwrap();
        assert_eq!(commands, vec![Command::AcquireCamera]);
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn acquire_failure_fails_without_phases() {
        let (mut s, params) = session();
        let commands = step(
            &mut s,
            Input::AcquireFailed(AcquisitionError::PermissionDenied),
            &params,
            Timestamp::ZERO,
        )
        .unwrap();

        assert_eq!(s.status(), SessionStatus::Failed);
        assert_eq!(s.phase_index(), 0);
        assert_eq!(
            s.last_error().as_deref(),
            Some("Camera access required for verification.")
        );
        assert!(commands
            .iter()
            .all(|c| !matches!(c, Command::Schedule { .. })));
    }

    #[test]
    fn acquired_without_handle_is_refused() {
        let (mut s, params) = session();
        let err = step(&mut s, Input::Acquired, &params, Timestamp::ZERO).unwrap_err();
        assert!(matches!(err, VerificationError::InvalidTransition { .. }));
    }

    #[test]
    fn capture_before_gate_is_invalid_and_changes_nothing() {
        let (mut s, params) = session();
        let err = step(&mut s, Input::Capture, &params, Timestamp::ZERO).unwrap_err();
        assert_eq!(
            err,
            VerificationError::InvalidTransition {
                action: "capture",
                status: SessionStatus::Idle
            }
        );
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn stray_tick_in_idle_is_invalid() {
        let (mut s, params) = session();
        assert!(step(&mut s, Input::Timer(TimerKind::Tick), &params, Timestamp::ZERO).is_err());
        assert_eq!(s.phase_progress(), 0);
    }

    #[test]
    fn cancel_in_idle_is_a_no_op() {
        let (mut s, params) = session();
        let commands = step(&mut s, Input::Cancel, &params, Timestamp::ZERO).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn retry_after_denial_requests_camera_again() {
        let (mut s, params) = session();
        step(
            &mut s,
            Input::AcquireFailed(AcquisitionError::PermissionDenied),
            &params,
            Timestamp::ZERO,
        )
        .unwrap();

        let commands = step(&mut s, Input::Retry, &params, Timestamp::ZERO).unwrap();
        assert_eq!(commands, vec![Command::AcquireCamera]);
        assert_eq!(s.status(), SessionStatus::Failed);
        assert_eq!(s.last_error(), None);
    }

    #[test]
    fn retry_outside_failed_is_invalid() {
        let (mut s, params) = session();
        assert!(matches!(
            step(&mut s, Input::Retry, &params, Timestamp::ZERO),
            Err(VerificationError::InvalidTransition { action: "retry", .. })
        ));
    }
}
