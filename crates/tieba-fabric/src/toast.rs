use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tieba_types::{Severity, Timestamp, ToastId};

use crate::clock::VirtualClock;
use crate::scheduler::Scheduler;

// ---------------------------------------------------------------------------
// NotificationSink
// ---------------------------------------------------------------------------

/// Fire-and-forget transient messages.
///
/// Implementations must not fail and must not deduplicate: notifying the
/// same message twice shows it twice.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Records notifications in order; useful wherever the visual cycle is
/// irrelevant.
impl NotificationSink for Vec<(String, Severity)> {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.push((message.to_string(), severity));
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Durations of the toast cycle, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastTiming {
    /// Delay before an entering toast slides in.
    pub enter_ms: u64,
    /// Time from creation until the toast starts leaving.
    pub visible_ms: u64,
    /// Length of the leave transition before removal.
    pub exit_ms: u64,
}

impl ToastTiming {
    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            enter_ms: 100,
            visible_ms: 3_000,
            exit_ms: 300,
        }
    }
}

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    pub created_at: Timestamp,
}

/// What happened to a toast, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastChange {
    Added {
        id: ToastId,
        message: String,
        severity: Severity,
    },
    Shown(ToastId),
    Leaving(ToastId),
    Removed(ToastId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastTask {
    Show(ToastId),
    Hide(ToastId),
    Remove(ToastId),
}

// ---------------------------------------------------------------------------
// Toaster
// ---------------------------------------------------------------------------

/// Stack of live toasts driven by its own timer queue.
///
/// A pushed toast is `Entering`, turns `Shown` after `enter`, `Leaving`
/// once `visible` has passed since it was pushed, and is removed `exit`
/// later. Every transition is queued as a [`ToastChange`] for the owner to
/// drain with [`Toaster::take_changes`].
#[derive(Debug)]
pub struct Toaster {
    timing: ToastTiming,
    timers: Scheduler<ToastTask>,
    live: Vec<Toast>,
    changes: Vec<ToastChange>,
    next_id: u64,
}

impl Toaster {
    pub fn new(timing: ToastTiming, clock: VirtualClock) -> Self {
        Self {
            timing,
            timers: Scheduler::new(clock),
            live: Vec::new(),
            changes: Vec::new(),
            next_id: 1,
        }
    }

    pub fn timing(&self) -> &ToastTiming {
        &self.timing
    }

    pub fn now(&self) -> Timestamp {
        self.timers.now()
    }

    /// Show a message. Never fails.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        let id = ToastId::new(self.next_id);
        self.next_id += 1;
        let message = message.into();
        debug!(toast = %id, %severity, message = %message, "toast pushed");

        self.live.push(Toast {
            id,
            message: message.clone(),
            severity,
            phase: ToastPhase::Entering,
            created_at: self.timers.now(),
        });
        self.changes.push(ToastChange::Added {
            id,
            message,
            severity,
        });
        self.timers.schedule(self.timing.enter(), ToastTask::Show(id));
        self.timers.schedule(self.timing.visible(), ToastTask::Hide(id));
        id
    }

    /// Run every toast transition due at or before `until`.
    pub fn advance_to(&mut self, until: Timestamp) {
        while let Some(task) = self.timers.pop_due(until) {
            self.run(task);
        }
        self.timers.settle_at(until);
    }

    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now().plus(by);
        self.advance_to(until);
    }

    /// Due time of the next transition.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.timers.next_due()
    }

    /// Drain the transitions recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<ToastChange> {
        std::mem::take(&mut self.changes)
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.live
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.live.iter().find(|t| t.id == id)
    }

    fn run(&mut self, task: ToastTask) {
        match task {
            ToastTask::Show(id) => {
                if self.set_phase(id, ToastPhase::Shown) {
                    self.changes.push(ToastChange::Shown(id));
                }
            }
            ToastTask::Hide(id) => {
                if self.set_phase(id, ToastPhase::Leaving) {
                    self.changes.push(ToastChange::Leaving(id));
                    self.timers.schedule(self.timing.exit(), ToastTask::Remove(id));
                }
            }
            ToastTask::Remove(id) => {
                let before = self.live.len();
                self.live.retain(|t| t.id != id);
                if self.live.len() < before {
                    debug!(toast = %id, "toast removed");
                    self.changes.push(ToastChange::Removed(id));
                }
            }
        }
    }

    /// Move a live toast forward to `phase`. Phases never go backwards, so a
    /// late `Show` on a toast that is already leaving does nothing.
    fn set_phase(&mut self, id: ToastId, phase: ToastPhase) -> bool {
        match self.live.iter_mut().find(|t| t.id == id) {
            Some(toast) if toast.phase < phase => {
                toast.phase = phase;
                true
            }
            _ => false,
        }
    }
}

impl NotificationSink for Toaster {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.push(message, severity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster() -> Toaster {
        Toaster::new(
            ToastTiming::default(),
            VirtualClock::starting_at(Timestamp::from_millis(10_000)),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn full_cycle_follows_timing() {
        let mut t = toaster();
        let id = t.push("Liked", Severity::Success);
        assert_eq!(t.get(id).unwrap().phase, ToastPhase::Entering);

        t.advance(ms(100));
        assert_eq!(t.get(id).unwrap().phase, ToastPhase::Shown);

        t.advance(ms(2_899));
        assert_eq!(t.get(id).unwrap().phase, ToastPhase::Shown);
        t.advance(ms(1));
        assert_eq!(t.get(id).unwrap().phase, ToastPhase::Leaving);

        t.advance(ms(299));
        assert!(t.get(id).is_some());
        t.advance(ms(1));
        assert!(t.get(id).is_none());

        assert_eq!(
            t.take_changes(),
            vec![
                ToastChange::Added {
                    id,
                    message: "Liked".into(),
                    severity: Severity::Success,
                },
                ToastChange::Shown(id),
                ToastChange::Leaving(id),
                ToastChange::Removed(id),
            ]
        );
        assert!(t.take_changes().is_empty());
    }

    #[test]
    fn one_big_step_runs_the_whole_cycle() {
        let mut t = toaster();
        t.push("x", Severity::Info);
        t.advance(ms(10_000));
        assert!(t.visible().is_empty());
        assert_eq!(t.take_changes().len(), 4);
        assert_eq!(t.now().millis, 20_000);
    }

    #[test]
    fn identical_messages_are_not_merged() {
        let mut t = toaster();
        let a = t.push("Comment posted", Severity::Success);
        let b = t.push("Comment posted", Severity::Success);
        assert_ne!(a, b);
        assert_eq!(t.visible().len(), 2);
    }

    #[test]
    fn staggered_toasts_leave_independently() {
        let mut t = toaster();
        let first = t.push("one", Severity::Info);
        t.advance(ms(1_000));
        let second = t.push("two", Severity::Error);
        t.advance(ms(2_300));
        assert!(t.get(first).is_none());
        assert_eq!(t.get(second).unwrap().phase, ToastPhase::Shown);
    }

    #[test]
    fn sink_trait_pushes_toasts() {
        let mut t = toaster();
        let sink: &mut dyn NotificationSink = &mut t;
        sink.notify("Saved", Severity::Success);
        assert_eq!(t.visible()[0].message, "Saved");
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut seen: Vec<(String, Severity)> = Vec::new();
        seen.notify("a", Severity::Info);
        seen.notify("a", Severity::Error);
        assert_eq!(
            seen,
            vec![("a".into(), Severity::Info), ("a".into(), Severity::Error)]
        );
    }

    #[test]
    fn late_show_never_revives_a_leaving_toast() {
        let mut t = Toaster::new(
            ToastTiming {
                enter_ms: 3_100,
                visible_ms: 3_000,
                exit_ms: 300,
            },
            VirtualClock::starting_at(Timestamp::from_millis(0)),
        );
        let id = t.push("Saved", Severity::Success);
        t.advance(ms(3_150));
        assert_eq!(t.get(id).unwrap().phase, ToastPhase::Leaving);

        t.advance(ms(1_000));
        assert!(t.get(id).is_none());
        let changes = t.take_changes();
        assert_eq!(changes.len(), 3);
        assert!(!changes.contains(&ToastChange::Shown(id)));
        assert_eq!(changes[1], ToastChange::Leaving(id));
        assert_eq!(changes[2], ToastChange::Removed(id));
    }

    #[test]
    fn partial_timing_config_uses_defaults() {
        let timing: ToastTiming = serde_json::from_str(r#"{"visible_ms": 5000}"#).unwrap();
        assert_eq!(timing.visible(), ms(5_000));
        assert_eq!(timing.enter(), ms(100));
    }
}
