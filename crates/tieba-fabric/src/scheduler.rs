use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use tieba_types::Timestamp;

use crate::clock::VirtualClock;
use crate::error::{FabricError, Result};

/// Handle of a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer queue over a [`VirtualClock`].
///
/// Tasks are plain values (usually an enum owned by the caller), not
/// closures: the owner pops them when they come due and dispatches them
/// itself. Timers due at the same instant fire in scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    clock: VirtualClock,
    queue: BTreeMap<(Timestamp, u64), T>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Run `task` once `delay` has elapsed on the clock.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let due = self.clock.now().plus(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
        debug!(timer = seq, due = due.millis, "timer scheduled");
        TimerId(seq)
    }

    /// Remove a pending timer and hand its task back.
    pub fn cancel(&mut self, id: TimerId) -> Result<T> {
        let key = self
            .queue
            .keys()
            .find(|(_, seq)| *seq == id.0)
            .copied()
            .ok_or(FabricError::UnknownTimer(id))?;
        self.queue.remove(&key).ok_or(FabricError::UnknownTimer(id))
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    ///
    /// Callers loop on this so that tasks scheduled while handling a timer
    /// are measured from the moment that timer fired, and still fire in the
    /// same pass if they fall before `until`.
    pub fn pop_due(&mut self, until: Timestamp) -> Option<T> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due.is_after(&until) {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        if due.is_after(&self.clock.now()) {
            self.move_clock(due);
        }
        Some(task)
    }

    /// Move the clock to `until` after all due timers were popped.
    pub fn settle_at(&mut self, until: Timestamp) {
        if until.is_after(&self.clock.now()) {
            self.move_clock(until);
        }
    }

    /// Advance by `by` and return every task that came due, in order.
    ///
    /// Convenient when handling a task never schedules another one.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let until = self.clock.now().plus(by);
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until) {
            fired.push(task);
        }
        self.settle_at(until);
        fired
    }

    fn move_clock(&mut self, to: Timestamp) {
        if let Err(e) = self.clock.advance_to(to) {
            warn!(error = %e, "scheduler clock refused to move");
        }
    }
}
