use serde::{Deserialize, Serialize};

use tieba_types::{CommentId, ReplyId, Timestamp};

/// A reply nested under a comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub author: String,
    pub text: String,
}

/// A top-level comment on a post.
///
/// Replies are owned by the comment and keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub created_at: Timestamp,
    pub like_count: u64,
    pub replies: Vec<Reply>,
}

impl Comment {
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// The likes badge as rendered next to the author, e.g. `👍 3`.
    pub fn likes_label(&self) -> String {
        format!("👍 {}", self.like_count)
    }
}
