//! Comment thread logic for the Tieba client core.
//!
//! This crate owns the data behind a post-detail page:
//! - [`CommentStore`]: an arena of comments addressed by stable
//!   [`CommentId`]s, kept in a separate display order (newest first)
//! - nested [`Reply`] lists, append-only, owned by their comment
//! - the per-comment reply form toggle (at most one open form per comment)
//! - [`SortKey`] reordering
//! - [`PostReactions`]: like and collect state of the post itself
//!
//! [`CommentId`]: tieba_types::CommentId

pub mod comment;
pub mod error;
pub mod post;
pub mod sort;
pub mod store;

pub use comment::{Comment, Reply};
pub use error::{ThreadError, ThreadResult};
pub use post::{format_count, PostReactions};
pub use sort::SortKey;
pub use store::CommentStore;
