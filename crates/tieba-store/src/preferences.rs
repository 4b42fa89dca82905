use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::traits::KvBackend;

/// JSON preference store over a [`KvBackend`].
///
/// Storage problems never reach the caller: a failed `set` or `remove` is a
/// no-op and a failed `get` yields `None`. Every swallowed failure is logged
/// at `warn` level.
pub struct PreferenceStore {
    backend: Box<dyn KvBackend>,
}

impl PreferenceStore {
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store `value` as JSON under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "preference value is not serializable");
                return;
            }
        };
        if let Err(e) = self.backend.set_item(key, &json) {
            warn!(key, error = %e, "local storage not available");
        }
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is absent, the backend fails, or the
    /// stored text does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "local storage not available");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored preference is not valid JSON");
                None
            }
        }
    }

    /// Delete the value under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            warn!(key, error = %e, "local storage not available");
        }
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        match self.backend.get_item(key) {
            Ok(raw) => raw.is_some(),
            Err(e) => {
                warn!(key, error = %e, "local storage not available");
                false
            }
        }
    }

    /// All stored keys; empty when the backend fails.
    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            warn!(error = %e, "local storage not available");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;
    use crate::memory::InMemoryBackend;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Layout {
        compact: bool,
        font_size: u8,
    }

    #[test]
    fn roundtrip_structured_value() {
        let prefs = PreferenceStore::new(InMemoryBackend::new());
        let layout = Layout {
            compact: true,
            font_size: 14,
        };
        prefs.set("layout", &layout);
        assert_eq!(prefs.get::<Layout>("layout"), Some(layout));
    }

    #[test]
    fn values_are_stored_as_json_text() {
        let backend = Arc::new(InMemoryBackend::new());
        let prefs = PreferenceStore::new(Arc::clone(&backend));
        prefs.set("currentUser", "alice");
        assert_eq!(
            backend.get_item("currentUser").unwrap().as_deref(),
            Some("\"alice\"")
        );
    }

    #[test]
    fn missing_key_is_none() {
        let prefs = PreferenceStore::new(InMemoryBackend::new());
        assert_eq!(prefs.get::<String>("nothing"), None);
        assert!(!prefs.contains("nothing"));
    }

    #[test]
    fn remove_deletes_value() {
        let prefs = PreferenceStore::new(InMemoryBackend::new());
        prefs.set("isLoggedIn", &true);
        assert!(prefs.contains("isLoggedIn"));
        prefs.remove("isLoggedIn");
        assert_eq!(prefs.get::<bool>("isLoggedIn"), None);
    }

    #[test]
    fn unavailable_backend_degrades_silently() {
        let prefs = PreferenceStore::new(InMemoryBackend::unavailable());
        prefs.set("k", &1);
        prefs.remove("k");
        assert_eq!(prefs.get::<i32>("k"), None);
        assert!(prefs.keys().is_empty());
    }

    /// Collects formatted log lines for one test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock poisoned").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("lock poisoned")).into_owned()
        }
    }

    #[test]
    fn contains_logs_backend_failure() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let prefs = PreferenceStore::new(InMemoryBackend::unavailable());
        let found = tracing::subscriber::with_default(subscriber, || prefs.contains("rememberMe"));

        assert!(!found);
        let out = logs.contents();
        assert!(out.contains("WARN"), "{out}");
        assert!(out.contains("local storage not available"), "{out}");
        assert!(out.contains("rememberMe"), "{out}");
    }

    #[test]
    fn quota_failure_is_a_no_op() {
        let backend = Arc::new(InMemoryBackend::with_quota(4));
        let prefs = PreferenceStore::new(Arc::clone(&backend));
        prefs.set("long-key", "long value");
        assert!(backend.is_empty());
        assert_eq!(prefs.get::<String>("long-key"), None);
    }

    #[test]
    fn undecodable_value_is_none() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_item("broken", "{not json").unwrap();
        let prefs = PreferenceStore::new(Arc::clone(&backend));
        assert_eq!(prefs.get::<String>("broken"), None);
        // The raw entry is still there; only decoding failed.
        assert!(prefs.contains("broken"));
    }

    #[test]
    fn type_mismatch_is_none() {
        let prefs = PreferenceStore::new(InMemoryBackend::new());
        prefs.set("count", &3);
        assert_eq!(prefs.get::<String>("count"), None);
        assert_eq!(prefs.get::<u32>("count"), Some(3));
    }
}
