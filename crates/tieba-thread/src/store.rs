use std::collections::HashSet;

use tracing::debug;

use tieba_gate::ValidationError;
use tieba_types::{CommentId, ReplyId, Timestamp, SESSION_AUTHOR};

use crate::comment::{Comment, Reply};
use crate::error::{ThreadError, ThreadResult};
use crate::sort::SortKey;

/// In-memory comment thread of one post.
///
/// Comments live in an arena indexed by [`CommentId`]; the display order is
/// a separate list of ids, so sorting and front insertion never invalidate
/// an id held by the caller.
#[derive(Debug, Default)]
pub struct CommentStore {
    slots: Vec<Comment>,
    order: Vec<CommentId>,
    open_forms: HashSet<CommentId>,
    next_reply: u32,
    displayed_count: u64,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comments held by the store.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The counter shown in the comments header.
    ///
    /// The page may render a total larger than the comments it loaded, so
    /// the counter is tracked apart from [`Self::len`].
    pub fn displayed_count(&self) -> u64 {
        self.displayed_count
    }

    /// Reset the header counter to the value rendered with the page.
    pub fn set_displayed_count(&mut self, count: u64) {
        self.displayed_count = count;
    }

    /// Load a comment that was already on the page. It goes to the end of
    /// the display order and counts towards the header.
    pub fn seed_comment(
        &mut self,
        author: impl Into<String>,
        text: impl Into<String>,
        created_at: Timestamp,
        like_count: u64,
    ) -> CommentId {
        let id = self.allocate(author.into(), text.into(), created_at, like_count);
        self.order.push(id);
        self.displayed_count += 1;
        id
    }

    /// Post a new comment from the current session.
    ///
    /// Fails with a validation error, leaving the store untouched, when the
    /// trimmed text is empty. Otherwise the comment goes to the front and
    /// the header counter grows by one.
    pub fn add_comment(&mut self, text: &str, now: Timestamp) -> ThreadResult<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText("comment").into());
        }
        let id = self.allocate(SESSION_AUTHOR.to_string(), text.to_string(), now, 0);
        self.order.insert(0, id);
        self.displayed_count += 1;
        debug!(comment = %id, "comment added");
        Ok(&self.slots[id.index()])
    }

    /// Add one like and return the new count.
    pub fn like_comment(&mut self, id: CommentId) -> ThreadResult<u64> {
        let comment = self.comment_mut(id)?;
        comment.like_count += 1;
        Ok(comment.like_count)
    }

    /// Reorder the display list and return the comments in the new order.
    ///
    /// [`SortKey::Popularity`] is a stable descending sort on likes.
    /// [`SortKey::Time`] keeps the current order.
    pub fn sort_comments(&mut self, key: SortKey) -> Vec<&Comment> {
        match key {
            SortKey::Popularity => {
                let slots = &self.slots;
                self.order
                    .sort_by(|a, b| slots[b.index()].like_count.cmp(&slots[a.index()].like_count));
            }
            SortKey::Time => {}
        }
        debug!(%key, "comments sorted");
        self.comments()
    }

    /// Comments in display order.
    pub fn comments(&self) -> Vec<&Comment> {
        self.order.iter().map(|id| &self.slots[id.index()]).collect()
    }

    /// Comment ids in display order.
    pub fn order(&self) -> &[CommentId] {
        &self.order
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.slots.get(id.index())
    }

    // ---- Replies ----

    /// Open the reply form of a comment if it is closed, close it if it is
    /// open. Returns whether the form is open now.
    pub fn toggle_reply_form(&mut self, id: CommentId) -> ThreadResult<bool> {
        self.comment_ref(id)?;
        let open = if self.open_forms.remove(&id) {
            false
        } else {
            self.open_forms.insert(id);
            true
        };
        debug!(comment = %id, open, "reply form toggled");
        Ok(open)
    }

    pub fn is_reply_form_open(&self, id: CommentId) -> bool {
        self.open_forms.contains(&id)
    }

    /// Close the reply form without posting anything.
    pub fn cancel_reply(&mut self, id: CommentId) -> ThreadResult<()> {
        self.comment_ref(id)?;
        self.open_forms.remove(&id);
        Ok(())
    }

    /// Input hint of the reply form, naming the comment's author.
    pub fn reply_placeholder(&self, id: CommentId) -> ThreadResult<String> {
        let comment = self.comment_ref(id)?;
        Ok(format!("Reply to @{}...", comment.author))
    }

    /// Append a reply from the current session and close the reply form.
    ///
    /// Blank text fails with a validation error; the comment and the form
    /// state are left as they were.
    pub fn add_reply(&mut self, id: CommentId, text: &str) -> ThreadResult<&Reply> {
        self.comment_ref(id)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText("reply").into());
        }

        self.next_reply += 1;
        let reply = Reply {
            id: ReplyId::new(self.next_reply),
            author: SESSION_AUTHOR.to_string(),
            text: text.to_string(),
        };
        self.open_forms.remove(&id);

        let replies = &mut self.slots[id.index()].replies;
        replies.push(reply);
        let position = replies.len() - 1;
        debug!(comment = %id, replies = replies.len(), "reply added");
        Ok(&replies[position])
    }

    // ---- Internals ----

    fn allocate(
        &mut self,
        author: String,
        text: String,
        created_at: Timestamp,
        like_count: u64,
    ) -> CommentId {
        let id = CommentId::new(self.slots.len() as u32);
        self.slots.push(Comment {
            id,
            author,
            text,
            created_at,
            like_count,
            replies: Vec::new(),
        });
        id
    }

    fn comment_ref(&self, id: CommentId) -> ThreadResult<&Comment> {
        self.slots.get(id.index()).ok_or(ThreadError::UnknownComment(id))
    }

    fn comment_mut(&mut self, id: CommentId) -> ThreadResult<&mut Comment> {
        self.slots
            .get_mut(id.index())
            .ok_or(ThreadError::UnknownComment(id))
    }
}
