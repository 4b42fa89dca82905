use std::time::Duration;

use tieba_types::Timestamp;

use crate::error::{FabricError, Result};

/// Monotonic virtual clock.
///
/// Starts at a given instant (usually the wall clock at startup) and only
/// moves when the event loop moves it. It never goes backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualClock {
    now: Timestamp,
}

impl VirtualClock {
    pub fn starting_at(now: Timestamp) -> Self {
        Self { now }
    }

    /// A clock seeded from the current wall-clock time.
    pub fn from_wall_clock() -> Self {
        Self::starting_at(Timestamp::now())
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Move forward by `by`.
    pub fn advance(&mut self, by: Duration) -> Timestamp {
        self.now = self.now.plus(by);
        self.now
    }

    /// Move to `to`. Moving to the current instant is a no-op; moving to an
    /// earlier one is an error and leaves the clock unchanged.
    pub fn advance_to(&mut self, to: Timestamp) -> Result<Timestamp> {
        if to.is_before(&self.now) {
            return Err(FabricError::ClockRegression {
                now: self.now,
                requested: to,
            });
        }
        self.now = to;
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_forward() {
        let mut clock = VirtualClock::starting_at(Timestamp::from_millis(100));
        assert_eq!(clock.advance(Duration::from_millis(50)).millis, 150);
        assert_eq!(clock.now().millis, 150);
    }

    #[test]
    fn regression_is_rejected() {
        let mut clock = VirtualClock::starting_at(Timestamp::from_millis(100));
        let err = clock.advance_to(Timestamp::from_millis(99)).unwrap_err();
        assert!(matches!(err, FabricError::ClockRegression { .. }));
        assert_eq!(clock.now().millis, 100);
    }

    #[test]
    fn advance_to_same_instant_is_fine() {
        let mut clock = VirtualClock::starting_at(Timestamp::from_millis(100));
        assert!(clock.advance_to(Timestamp::from_millis(100)).is_ok());
    }

    #[test]
    fn wall_clock_seed_is_recent() {
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(VirtualClock::from_wall_clock().now().millis > 1_577_836_800_000);
    }
}
