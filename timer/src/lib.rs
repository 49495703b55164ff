//! Cancellable timers for the liveness flow.
//!
//! Timers are one-shot and carry a payload `K` describing what should happen
//! when they expire. Nothing here invokes callbacks: the owner polls
//! [`Scheduler::pop_expired`] and dispatches the payload itself, which keeps the
//! state machine free of closures borrowing it.
//!
//! - [`TimerQueue`]: deadline-ordered queue, the production scheduler.
//! - [`TimerSlot`]: holds at most one outstanding timer, cancelling the previous
//!   one before arming a new one.

pub mod queue;
pub mod scheduler;
pub mod slot;

pub use queue::TimerQueue;
pub use scheduler::{Expired, Scheduler, TimerHandle};
pub use slot::TimerSlot;
