//! Foundation types for the Tieba client core.
//!
//! This crate provides the identity, temporal, and classification types used
//! throughout the workspace. Every other `tieba-*` crate depends on
//! `tieba-types`.
//!
//! # Key Types
//!
//! - [`CommentId`] / [`ReplyId`] — stable arena indices for the comment store
//! - [`ItemId`] — server-assigned identifier of a profile item (post, reply, ...)
//! - [`ToastId`] — handle of a transient notification
//! - [`Timestamp`] — millisecond instant on the client's (virtual) clock
//! - [`Severity`] — notification level

pub mod error;
pub mod ids;
pub mod severity;
pub mod time;

pub use error::TypeError;
pub use ids::{CommentId, ItemId, ReplyId, ToastId};
pub use severity::Severity;
pub use time::Timestamp;

/// Display name used for content authored in the current session.
pub const SESSION_AUTHOR: &str = "current user";
