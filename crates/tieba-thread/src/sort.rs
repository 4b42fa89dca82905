use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordering requested from the comment sort control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Chronological. Leaves the current order as it is.
    #[default]
    Time,
    /// Most liked first.
    Popularity,
}

impl SortKey {
    /// Map the sort control's value. `"hot"` selects popularity; anything
    /// else is treated as time.
    pub fn parse(value: &str) -> Self {
        match value {
            "hot" => Self::Popularity,
            _ => Self::Time,
        }
    }

    /// Label used in the confirmation toast.
    pub fn label(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
