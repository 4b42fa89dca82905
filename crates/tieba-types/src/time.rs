use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Millisecond instant on the client's clock.
///
/// The event loop runs on a virtual clock seeded from the wall clock, so a
/// `Timestamp` is comparable to real dates while still advancing only when
/// the loop advances it. Ordering is plain millisecond ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    /// Milliseconds since the UNIX epoch.
    pub millis: u64,
}

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Create a timestamp for the current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self { millis }
    }

    /// The epoch.
    pub const fn zero() -> Self {
        Self { millis: 0 }
    }

    /// A timestamp `delay` after this one.
    pub fn plus(&self, delay: Duration) -> Self {
        Self {
            millis: self.millis.saturating_add(delay.as_millis() as u64),
        }
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn saturating_since(&self, earlier: &Self) -> Duration {
        Duration::from_millis(self.millis.saturating_sub(earlier.millis))
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.millis as i64).unwrap_or_default()
    }

    /// Human label relative to `now`: "just now", "5 min ago", "3 h ago", or
    /// the calendar date for anything older than a day.
    pub fn relative_label(&self, now: &Self) -> String {
        let secs = now.saturating_since(self).as_secs();
        match secs {
            0..=59 => "just now".to_string(),
            60..=3599 => format!("{} min ago", secs / 60),
            3600..=86_399 => format!("{} h ago", secs / 3600),
            _ => self.to_datetime().format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().to_rfc3339())
    }
}
