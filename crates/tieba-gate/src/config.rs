use serde::{Deserialize, Serialize};

/// Limits applied by the built-in field rules and the avatar check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Shortest accepted username, in characters.
    pub username_min: usize,
    /// Longest accepted username, in characters.
    pub username_max: usize,
    /// Shortest accepted password, in characters.
    pub password_min: usize,
    /// Largest accepted avatar upload, in bytes.
    pub avatar_max_bytes: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            username_min: 3,
            username_max: 20,
            password_min: 6,
            avatar_max_bytes: 5 * 1024 * 1024,
        }
    }
}
