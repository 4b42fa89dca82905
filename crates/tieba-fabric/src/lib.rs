//! Cooperative event-loop fabric for the Tieba client core.
//!
//! Everything here is single-threaded and driven by an explicit virtual
//! clock: nothing sleeps, nothing blocks. The owner advances time and
//! receives the timers that came due, in due-time then FIFO order.
//!
//! - [`VirtualClock`] -- monotonic millisecond clock
//! - [`Scheduler`] -- timer queue of typed tasks
//! - [`Debounced`] / [`Throttled`] -- rate-limiting wrappers around callbacks
//! - [`Toaster`] -- transient notifications with an enter/show/leave cycle

pub mod clock;
pub mod error;
pub mod ratelimit;
pub mod scheduler;
pub mod toast;

pub use clock::VirtualClock;
pub use error::{FabricError, Result};
pub use ratelimit::{debounce, throttle, Debounced, Throttled};
pub use scheduler::{Scheduler, TimerId};
pub use toast::{NotificationSink, Toast, ToastChange, ToastPhase, ToastTiming, Toaster};
