//! Rate-limiting wrappers around callbacks.
//!
//! Both wrappers are driven by explicit instants from the event loop's
//! clock instead of owning timers, so they stay deterministic and can be
//! polled from whatever loop owns them.

use std::marker::PhantomData;
use std::time::Duration;

use tieba_types::Timestamp;

/// Wrap `f` so it runs only after calls have stopped for `wait`.
pub fn debounce<A, F: FnMut(A)>(wait: Duration, f: F) -> Debounced<A, F> {
    Debounced {
        wait,
        pending: None,
        f,
    }
}

/// Wrap `f` so it runs at most once per `limit`.
pub fn throttle<A, F: FnMut(A)>(limit: Duration, f: F) -> Throttled<A, F> {
    Throttled {
        limit,
        cooldown_until: None,
        f,
        _args: PhantomData,
    }
}

/// Trailing-edge debounce.
///
/// Every [`call`](Self::call) replaces the pending arguments and restarts
/// the quiet window. [`poll`](Self::poll) runs the callback once with the
/// latest arguments when the window has elapsed.
pub struct Debounced<A, F: FnMut(A)> {
    wait: Duration,
    pending: Option<(Timestamp, A)>,
    f: F,
}

impl<A, F: FnMut(A)> Debounced<A, F> {
    pub fn call(&mut self, now: Timestamp, args: A) {
        self.pending = Some((now.plus(self.wait), args));
    }

    /// Fire if the quiet window is over. Returns whether the callback ran.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match &self.pending {
            Some((due, _)) if !due.is_after(&now) => {}
            _ => return false,
        }
        match self.pending.take() {
            Some((_, args)) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    /// When the pending call will fire, if one is waiting.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Leading-edge throttle.
///
/// The first call runs immediately; later calls are dropped until `limit`
/// has passed since the last call that ran.
pub struct Throttled<A, F: FnMut(A)> {
    limit: Duration,
    cooldown_until: Option<Timestamp>,
    f: F,
    _args: PhantomData<fn(A)>,
}

impl<A, F: FnMut(A)> Throttled<A, F> {
    /// Returns whether the callback ran.
    pub fn call(&mut self, now: Timestamp, args: A) -> bool {
        if let Some(until) = self.cooldown_until {
            if now.is_before(&until) {
                return false;
            }
        }
        (self.f)(args);
        self.cooldown_until = Some(now.plus(self.limit));
        true
    }

    pub fn is_cooling_down(&self, now: Timestamp) -> bool {
        self.cooldown_until.is_some_and(|until| now.is_before(&until))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn debounce_fires_once_after_quiet_window() {
        let seen = RefCell::new(Vec::new());
        let mut d = debounce(Duration::from_millis(300), |q: &'static str| seen.borrow_mut().push(q));

        d.call(at(0), "t");
        d.call(at(100), "ti");
        d.call(at(250), "tie");
        assert!(!d.poll(at(500)));
        assert_eq!(d.deadline(), Some(at(550)));
        assert!(d.poll(at(550)));
        assert!(!d.poll(at(900)));

        assert_eq!(*seen.borrow(), vec!["tie"]);
    }

    #[test]
    fn debounce_idle_poll_does_nothing() {
        let mut count = 0;
        let mut d = debounce(Duration::from_millis(10), |_: ()| count += 1);
        assert!(!d.poll(at(1_000)));
        assert!(!d.is_pending());
        drop(d);
        assert_eq!(count, 0);
    }

    #[test]
    fn throttle_runs_first_call_and_drops_the_rest() {
        let seen = RefCell::new(Vec::new());
        let mut t = throttle(Duration::from_millis(100), |y: u32| seen.borrow_mut().push(y));

        assert!(t.call(at(0), 10));
        assert!(!t.call(at(50), 20));
        assert!(t.is_cooling_down(at(99)));
        assert!(!t.is_cooling_down(at(100)));
        assert!(t.call(at(100), 30));

        assert_eq!(*seen.borrow(), vec![10, 30]);
    }
}
