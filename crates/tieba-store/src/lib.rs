//! Key-value preference storage for the Tieba client core.
//!
//! The browser-side original keeps user preferences (login state, the
//! remembered user name, ...) in `localStorage`. This crate models that
//! facility as the [`KvBackend`] trait and layers a [`PreferenceStore`] on
//! top that serializes values as JSON and never lets a storage failure
//! escape.
//!
//! # Storage Backends
//!
//! - [`InMemoryBackend`] -- `HashMap`-based store for tests and embedding,
//!   with an optional byte quota and an availability switch
//! - [`FileBackend`] -- a single JSON document on disk; entries survive
//!   process restarts
//!
//! # Design Rules
//!
//! 1. Backends are synchronous and fallible; every error is returned.
//! 2. The preference store swallows backend errors: `set`/`remove` become
//!    no-ops and `get` returns `None`. Each swallowed error is logged.
//! 3. Values are opaque strings to the backend.

pub mod error;
pub mod file;
pub mod memory;
pub mod preferences;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
pub use preferences::PreferenceStore;
pub use traits::KvBackend;
