use tieba_types::Timestamp;

use crate::scheduler::TimerId;

/// Errors produced by the event-loop fabric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FabricError {
    /// The clock was asked to move backwards.
    #[error("clock regression: now={now:?}, requested={requested:?}")]
    ClockRegression { now: Timestamp, requested: Timestamp },

    /// The timer already fired, was cancelled, or never existed.
    #[error("unknown timer: {0:?}")]
    UnknownTimer(TimerId),
}

/// Convenience alias used throughout the fabric crate.
pub type Result<T> = std::result::Result<T, FabricError>;
