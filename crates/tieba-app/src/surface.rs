use tieba_fabric::ToastChange;
use tieba_types::{CommentId, ItemId, ReplyId};

use crate::auth::AuthTab;
use crate::nav::Route;
use crate::profile::{Collection, ProfileSection};
use crate::state::{Button, NavbarStyle};

/// A change the page has to show.
///
/// Signals are emitted in the order the controller made the changes; a
/// surface applies them as element creations, removals and attribute
/// updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderSignal {
    // ---- Chrome ----
    NavMenu { open: bool },
    Navbar { style: NavbarStyle, hidden: bool },
    Navigate(Route),

    // ---- Post detail ----
    PostLikes { label: String },
    PostCollected { collected: bool },
    CommentInserted { id: CommentId, position: usize },
    CommentCount(u64),
    CommentInputCleared,
    CommentLikes { id: CommentId, label: String },
    CommentsReordered(Vec<CommentId>),
    ReplyFormOpened { comment: CommentId, placeholder: String },
    ReplyFormClosed { comment: CommentId },
    ReplyAppended { comment: CommentId, reply: ReplyId },

    // ---- Profile ----
    ProfileSection(ProfileSection),
    ItemRemoving { collection: Collection, id: ItemId },
    ItemRemoved { collection: Collection, id: ItemId },
    Stat { collection: Collection, value: u64 },
    UserDetails { username: String, bio: String },
    Avatar { data_url: String },

    // ---- Forms ----
    ButtonBusy { button: Button, label: String },
    ButtonRestored { button: Button },
    AuthTab(AuthTab),
    PasswordVisibility { field: String, visible: bool },
    FieldError { form: AuthTab, field: String, message: Option<String> },

    Toast(ToastChange),
}

/// Where render signals go.
pub trait RenderSurface {
    fn render(&mut self, signal: RenderSignal);
}

/// Keeps every signal in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    signals: Vec<RenderSignal>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> &[RenderSignal] {
        &self.signals
    }

    pub fn take(&mut self) -> Vec<RenderSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn contains(&self, signal: &RenderSignal) -> bool {
        self.signals.contains(signal)
    }

    /// Messages of every toast added so far.
    pub fn toast_messages(&self) -> Vec<&str> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                RenderSignal::Toast(ToastChange::Added { message, .. }) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, signal: RenderSignal) {
        self.signals.push(signal);
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn render(&mut self, signal: RenderSignal) {
        (**self).render(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order_and_drains() {
        let mut s = RecordingSurface::new();
        s.render(RenderSignal::NavMenu { open: true });
        s.render(RenderSignal::CommentCount(3));
        assert!(s.contains(&RenderSignal::CommentCount(3)));
        assert_eq!(s.take().len(), 2);
        assert!(s.signals().is_empty());
    }

    #[test]
    fn toast_messages_are_extracted() {
        let mut s = RecordingSurface::new();
        s.render(RenderSignal::Toast(ToastChange::Added {
            id: tieba_types::ToastId::new(1),
            message: "Liked".into(),
            severity: tieba_types::Severity::Info,
        }));
        s.render(RenderSignal::Toast(ToastChange::Removed(tieba_types::ToastId::new(1))));
        assert_eq!(s.toast_messages(), vec!["Liked"]);
    }
}
