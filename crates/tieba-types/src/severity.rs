use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Notification level of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Background color used when the toast is rendered.
    pub fn background(self) -> &'static str {
        match self {
            Self::Info => "#2196f3",
            Self::Success => "#4caf50",
            Self::Error => "#f44336",
        }
    }

    /// CSS class name, e.g. `toast-success`.
    pub fn class_name(self) -> String {
        format!("toast-{self}")
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

impl FromStr for Severity {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(TypeError::UnknownSeverity(other.to_string())),
        }
    }
}
