use std::sync::Arc;

use crate::error::StoreResult;

/// Synchronous string key-value facility (the `localStorage` shape).
///
/// All implementations must satisfy these invariants:
/// - `get_item` after a successful `set_item` returns the stored value.
/// - `remove_item` of a missing key succeeds.
/// - Failures are reported, never silently ignored; tolerating them is the
///   caller's decision.
pub trait KvBackend: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Read the value under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Delete the value under `key`.
    fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

impl<T: KvBackend + ?Sized> KvBackend for Arc<T> {
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}

impl<T: KvBackend + ?Sized> KvBackend for Box<T> {
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}
