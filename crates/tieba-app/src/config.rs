use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use tieba_fabric::ToastTiming;
use tieba_gate::ValidatorConfig;

use crate::error::AppResult;

/// Top-level client configuration.
///
/// Every section falls back to its defaults, so a TOML file only needs the
/// keys it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the file-backed preference store lives.
    pub preferences_path: PathBuf,
    pub timing: TimingConfig,
    pub validator: ValidatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_path: PathBuf::from("tieba-prefs.json"),
            timing: TimingConfig::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Simulated latencies, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Profile item removal (delete post/reply, unfavorite, unfollow).
    pub delete_ms: u64,
    pub settings_ms: u64,
    /// Login and registration round trip.
    pub auth_ms: u64,
    /// Pause between a successful login and the redirect home.
    pub redirect_ms: u64,
    pub toast: ToastTiming,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            delete_ms: 500,
            settings_ms: 1_000,
            auth_ms: 1_500,
            redirect_ms: 2_000,
            toast: ToastTiming::default(),
        }
    }
}

impl TimingConfig {
    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    pub fn settings(&self) -> Duration {
        Duration::from_millis(self.settings_ms)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn redirect(&self) -> Duration {
        Duration::from_millis(self.redirect_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = AppConfig::default();
        assert_eq!(c.timing.toast.visible_ms, 3_000);
        assert_eq!(c.timing.delete(), Duration::from_millis(500));
        assert_eq!(c.timing.auth_ms, 1_500);
        assert_eq!(c.validator.password_min, 6);
        assert_eq!(c.preferences_path, PathBuf::from("tieba-prefs.json"));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = AppConfig::from_toml_str(
            r#"
            preferences_path = "/tmp/prefs.json"

            [timing]
            auth_ms = 10

            [timing.toast]
            visible_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(c.timing.auth_ms, 10);
        assert_eq!(c.timing.settings_ms, 1_000);
        assert_eq!(c.timing.toast.visible_ms, 500);
        assert_eq!(c.timing.toast.exit_ms, 300);
        assert_eq!(c.preferences_path, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn rendered_config_parses_back() {
        let c = AppConfig::default();
        let text = c.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tieba.toml");
        std::fs::write(&path, "[validator]\nusername_max = 12\n").unwrap();
        let c = AppConfig::load(&path).unwrap();
        assert_eq!(c.validator.username_max, 12);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = AppConfig::from_toml_str("timing = 3").unwrap_err();
        assert!(matches!(err, crate::error::AppError::Config(_)));
    }
}
