use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvBackend;

/// In-memory, HashMap-based key-value backend.
///
/// Intended for tests and embedding. An optional byte quota (keys plus
/// values) and an availability switch let callers reproduce the failure
/// modes of a browser's local storage: quota exhaustion and storage being
/// disabled outright.
pub struct InMemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    available: AtomicBool,
}

impl InMemoryBackend {
    /// Create a new empty backend without a quota.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: None,
            available: AtomicBool::new(true),
        }
    }

    /// Create a backend that rejects writes once `limit` bytes are used.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::new()
        }
    }

    /// A backend whose every operation fails with [`StoreError::Unavailable`].
    pub fn unavailable() -> Self {
        let backend = Self::new();
        backend.set_available(false);
        backend
    }

    /// Toggle availability. While unavailable, all operations fail.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the backend holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Bytes used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .expect("lock poisoned")
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KvBackend for InMemoryBackend {
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_available()?;
        let mut map = self.entries.write().expect("lock poisoned");
        if let Some(limit) = self.quota {
            let current: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = current + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;
        self.entries.write().expect("lock poisoned").remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.ensure_available()?;
        let map = self.entries.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("entry_count", &self.len())
            .field("quota", &self.quota)
            .field("available", &self.available.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = InMemoryBackend::new();
        backend.set_item("theme", "\"dark\"").unwrap();
        assert_eq!(backend.get_item("theme").unwrap().as_deref(), Some("\"dark\""));

        backend.remove_item("theme").unwrap();
        assert_eq!(backend.get_item("theme").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let backend = InMemoryBackend::new();
        backend.remove_item("nope").unwrap();
    }

    #[test]
    fn overwrite_replaces_value() {
        let backend = InMemoryBackend::new();
        backend.set_item("k", "1").unwrap();
        backend.set_item("k", "2").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("2"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let backend = InMemoryBackend::with_quota(8);
        backend.set_item("ab", "cd").unwrap();
        let err = backend.set_item("key", "value").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 12, limit: 8 }));
        assert_eq!(backend.used_bytes(), 4);
    }

    #[test]
    fn quota_counts_replaced_entry_once() {
        let backend = InMemoryBackend::with_quota(6);
        backend.set_item("k", "12345").unwrap();
        backend.set_item("k", "54321").unwrap();
        assert_eq!(backend.used_bytes(), 6);
    }

    #[test]
    fn unavailable_fails_everything() {
        let backend = InMemoryBackend::unavailable();
        assert!(matches!(backend.set_item("k", "v"), Err(StoreError::Unavailable)));
        assert!(matches!(backend.get_item("k"), Err(StoreError::Unavailable)));
        assert!(matches!(backend.remove_item("k"), Err(StoreError::Unavailable)));
        assert!(matches!(backend.keys(), Err(StoreError::Unavailable)));
    }

    #[test]
    fn availability_can_be_restored() {
        let backend = InMemoryBackend::new();
        backend.set_item("k", "v").unwrap();
        backend.set_available(false);
        assert!(backend.get_item("k").is_err());
        backend.set_available(true);
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn keys_are_sorted() {
        let backend = InMemoryBackend::new();
        backend.set_item("b", "1").unwrap();
        backend.set_item("a", "2").unwrap();
        assert_eq!(backend.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
