//! Application controller for the Tieba client core.
//!
//! Wires the domain crates together behind one event-driven [`App`]:
//! typed [`UiEvent`]s come in, [`RenderSignal`]s go out to a
//! [`RenderSurface`], and simulated backend calls run on the virtual clock
//! of `tieba-fabric`.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use tieba_app::{App, AppConfig, RecordingSurface, UiEvent};
//! use tieba_fabric::VirtualClock;
//! use tieba_store::{InMemoryBackend, PreferenceStore};
//!
//! let mut app = App::new(
//!     AppConfig::default(),
//!     PreferenceStore::new(InMemoryBackend::new()),
//!     VirtualClock::from_wall_clock(),
//!     RecordingSurface::new(),
//! );
//! app.dispatch(UiEvent::CommentSubmitted("first!".into()));
//! assert_eq!(app.thread().len(), 1);
//!
//! app.advance(Duration::from_secs(5));
//! assert!(app.is_idle());
//! ```

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod nav;
pub mod profile;
pub mod state;
pub mod surface;

pub use auth::AuthTab;
pub use config::{AppConfig, TimingConfig};
pub use controller::App;
pub use error::{AppError, AppResult};
pub use event::UiEvent;
pub use nav::{Page, Route};
pub use profile::{Collection, Profile, ProfileSection, UserProfile};
pub use state::{Button, NavbarStyle, UiState};
pub use surface::{RecordingSurface, RenderSignal, RenderSurface};

// Re-export the types events and signals are built from.
pub use tieba_gate::{AvatarFile, FormField};
pub use tieba_types::{CommentId, ItemId, Severity, Timestamp};
