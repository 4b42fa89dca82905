use tieba_gate::{AvatarFile, FormField};
use tieba_types::{CommentId, ItemId};

use crate::auth::AuthTab;
use crate::nav::Page;
use crate::profile::ProfileSection;

/// Everything the page can report to the controller.
///
/// Confirmation dialogs happen before an event is sent: a `DeletePost`
/// means the user already confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    PageEntered(Page),

    // ---- Chrome ----
    ToggleNav,
    NavLinkClicked,
    SearchSubmitted(String),
    TiebaClicked(String),
    PostClicked(Option<String>),
    /// Vertical scroll offset in pixels.
    Scrolled(u32),

    // ---- Post detail ----
    LikePost,
    ToggleCollect,
    SharePost,
    /// Raw value of the sort select (`time` or `hot`).
    SortChanged(String),
    /// Submit button or Ctrl+Enter in the comment box.
    CommentSubmitted(String),
    /// An editor tool button (emoji, image, ...), by name.
    CommentTool(String),
    LikeComment(CommentId),
    ShareComment(CommentId),
    ToggleReply(CommentId),
    ReplySubmitted { comment: CommentId, text: String },
    ReplyCancelled(CommentId),

    // ---- Profile ----
    ProfileMenuSelected(ProfileSection),
    DeletePost(ItemId),
    DeleteReply(ItemId),
    Unfavorite(ItemId),
    Unfollow(ItemId),
    SettingsSubmitted { username: String, bio: String },
    AvatarSelected(AvatarFile),

    // ---- Auth ----
    AuthTabSelected(AuthTab),
    TogglePasswordVisibility(String),
    FieldBlurred { form: AuthTab, field: FormField },
    FieldEdited { form: AuthTab, field: String },
    LoginSubmitted { fields: Vec<FormField>, remember_me: bool },
    RegisterSubmitted { fields: Vec<FormField> },
}
