use std::time::Duration;

use tracing::{debug, info};

use tieba_fabric::{NotificationSink, Scheduler, Toaster, VirtualClock};
use tieba_gate::{AvatarError, FieldError, FormField, FormValidator};
use tieba_store::PreferenceStore;
use tieba_thread::{CommentStore, PostReactions, SortKey};
use tieba_types::{CommentId, ItemId, Severity, Timestamp};

use crate::auth::{self, AuthTab, FormCheck};
use crate::config::AppConfig;
use crate::event::UiEvent;
use crate::nav::{Page, Route};
use crate::profile::{avatar_data_url, size_label, Collection, Profile};
use crate::state::{Button, UiState};
use crate::surface::{RenderSignal, RenderSurface};

/// Second half of a simulated call, run when its timer fires.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Task {
    FinishRemoval { collection: Collection, id: ItemId },
    FinishSettings { username: String, bio: String },
    FinishLogin { username: String, remember_me: bool },
    FinishRegister,
    Redirect(Route),
}

/// The client controller.
///
/// Owns all page state and every store, receives [`UiEvent`]s one at a
/// time, and reports what changed to its [`RenderSurface`]. Simulated
/// backend calls are timers on a virtual clock: nothing happens between
/// events unless the owner calls [`App::advance`].
///
/// No event handler returns an error. Bad input becomes a toast or an
/// inline field error, and storage failures are swallowed by the
/// preference store.
pub struct App<S: RenderSurface> {
    config: AppConfig,
    state: UiState,
    thread: CommentStore,
    post: PostReactions,
    profile: Profile,
    prefs: PreferenceStore,
    validator: FormValidator,
    toaster: Toaster,
    tasks: Scheduler<Task>,
    surface: S,
}

impl<S: RenderSurface> App<S> {
    pub fn new(config: AppConfig, prefs: PreferenceStore, clock: VirtualClock, surface: S) -> Self {
        let validator = FormValidator::with_default_rules(config.validator.clone());
        Self {
            toaster: Toaster::new(config.timing.toast, clock),
            tasks: Scheduler::new(clock),
            config,
            state: UiState::new(),
            thread: CommentStore::new(),
            post: PostReactions::default(),
            profile: Profile::default(),
            prefs,
            validator,
            surface,
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn thread(&self) -> &CommentStore {
        &self.thread
    }

    /// Mutable access for loading the comments rendered with the page.
    pub fn thread_mut(&mut self) -> &mut CommentStore {
        &mut self.thread
    }

    pub fn post(&self) -> &PostReactions {
        &self.post
    }

    pub fn set_post(&mut self, post: PostReactions) {
        self.post = post;
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn prefs(&self) -> &PreferenceStore {
        &self.prefs
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn now(&self) -> Timestamp {
        self.tasks.now()
    }

    /// Simulated calls still waiting for their timer.
    pub fn pending_calls(&self) -> usize {
        self.tasks.pending()
    }

    /// Whether no call and no toast is still in flight.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_idle() && self.toaster.next_due().is_none()
    }

    // ---- Time ----

    /// Let `by` pass on the virtual clock, running every timer that comes
    /// due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now().plus(by);
        self.advance_to(until);
    }

    pub fn advance_to(&mut self, until: Timestamp) {
        while let Some(due) = self.tasks.next_due().filter(|due| !due.is_after(&until)) {
            self.toaster.advance_to(due);
            self.flush_toasts();
            if let Some(task) = self.tasks.pop_due(until) {
                self.run_task(task);
                self.flush_toasts();
            }
        }
        self.tasks.settle_at(until);
        self.toaster.advance_to(until);
        self.flush_toasts();
    }

    /// Advance until every pending call and toast has finished.
    pub fn run_until_idle(&mut self) {
        loop {
            let next = match (self.tasks.next_due(), self.toaster.next_due()) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => break,
            };
            self.advance_to(next);
        }
    }

    /// Due time of the next timer of any kind.
    pub fn next_due(&self) -> Option<Timestamp> {
        match (self.tasks.next_due(), self.toaster.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ---- Events ----

    /// Handle one UI event.
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "dispatch");
        match event {
            UiEvent::PageEntered(page) => self.enter_page(page),

            UiEvent::ToggleNav => {
                self.state.nav_open = !self.state.nav_open;
                self.emit(RenderSignal::NavMenu {
                    open: self.state.nav_open,
                });
            }
            UiEvent::NavLinkClicked => {
                if self.state.nav_open {
                    self.state.nav_open = false;
                    self.emit(RenderSignal::NavMenu { open: false });
                }
            }
            UiEvent::SearchSubmitted(query) => {
                if let Some(route) = Route::search(&query) {
                    self.navigate(route);
                }
            }
            UiEvent::TiebaClicked(name) => self.navigate(Route::tieba(name)),
            UiEvent::PostClicked(id) => self.navigate(Route::post(id.as_deref())),
            UiEvent::Scrolled(y) => {
                if self.state.navbar.on_scroll(y) {
                    self.emit(RenderSignal::Navbar {
                        style: self.state.navbar.style,
                        hidden: self.state.navbar.hidden,
                    });
                }
            }

            UiEvent::LikePost => {
                self.post.like();
                self.emit(RenderSignal::PostLikes {
                    label: self.post.like_label(),
                });
                self.toast("Liked", Severity::Info);
            }
            UiEvent::ToggleCollect => {
                let collected = self.post.toggle_collect();
                self.emit(RenderSignal::PostCollected { collected });
                let message = if collected {
                    "Collected"
                } else {
                    "Removed from collection"
                };
                self.toast(message, Severity::Info);
            }
            UiEvent::SharePost => self.toast("Sharing is coming soon", Severity::Info),
            UiEvent::SortChanged(value) => self.sort_comments(SortKey::parse(&value)),
            UiEvent::CommentSubmitted(text) => self.submit_comment(&text),
            UiEvent::CommentTool(tool) => {
                self.toast(&format!("{tool} is coming soon"), Severity::Info)
            }
            UiEvent::LikeComment(id) => self.like_comment(id),
            UiEvent::ShareComment(_) => {
                self.toast("Comment sharing is coming soon", Severity::Info)
            }
            UiEvent::ToggleReply(id) => self.toggle_reply(id),
            UiEvent::ReplySubmitted { comment, text } => self.submit_reply(comment, &text),
            UiEvent::ReplyCancelled(id) => {
                if self.thread.is_reply_form_open(id) && self.thread.cancel_reply(id).is_ok() {
                    self.emit(RenderSignal::ReplyFormClosed { comment: id });
                }
            }

            UiEvent::ProfileMenuSelected(section) => {
                self.state.profile_section = section;
                self.emit(RenderSignal::ProfileSection(section));
            }
            UiEvent::DeletePost(id) => self.remove_item(Collection::Posts, id),
            UiEvent::DeleteReply(id) => self.remove_item(Collection::Replies, id),
            UiEvent::Unfavorite(id) => self.remove_item(Collection::Favorites, id),
            UiEvent::Unfollow(id) => self.remove_item(Collection::FollowedTiebas, id),
            UiEvent::SettingsSubmitted { username, bio } => {
                if self.begin_call(Button::SaveSettings) {
                    self.tasks.schedule(
                        self.config.timing.settings(),
                        Task::FinishSettings { username, bio },
                    );
                }
            }
            UiEvent::AvatarSelected(file) => match self.validator.validate_avatar(&file) {
                Ok(()) => {
                    let data_url = avatar_data_url(&file);
                    self.profile.user.avatar = Some(data_url.clone());
                    self.emit(RenderSignal::Avatar { data_url });
                    self.toast("Avatar updated", Severity::Success);
                }
                Err(AvatarError::NotAnImage(_)) => {
                    self.toast("Please choose an image file", Severity::Error)
                }
                Err(AvatarError::TooLarge { limit, .. }) => self.toast(
                    &format!("Image must be at most {}", size_label(limit)),
                    Severity::Error,
                ),
            },

            UiEvent::AuthTabSelected(tab) => self.select_tab(tab),
            UiEvent::TogglePasswordVisibility(field) => {
                let visible = self.state.toggle_password(&field);
                self.emit(RenderSignal::PasswordVisibility { field, visible });
            }
            UiEvent::FieldBlurred { form, field } => match self.validator.validate_field(&field) {
                Ok(()) => self.clear_field_error(form, &field.name),
                Err(error) => self.show_field_error(form, error),
            },
            UiEvent::FieldEdited { form, field } => self.clear_field_error(form, &field),
            UiEvent::LoginSubmitted {
                fields,
                remember_me,
            } => self.submit_login(&fields, remember_me),
            UiEvent::RegisterSubmitted { fields } => self.submit_registration(&fields),
        }
        self.flush_toasts();
    }

    // ---- Pages and chrome ----

    fn enter_page(&mut self, page: Page) {
        match &page {
            Page::Search { query: Some(query) } => {
                info!(page = page.name(), query = %query, "page initialised")
            }
            _ => info!(page = page.name(), "page initialised"),
        }
        self.state.page = Some(page);
    }

    fn navigate(&mut self, route: Route) {
        info!(url = %route, "redirect");
        self.emit(RenderSignal::Navigate(route));
    }

    // ---- Post detail ----

    fn sort_comments(&mut self, key: SortKey) {
        self.thread.sort_comments(key);
        self.emit(RenderSignal::CommentsReordered(self.thread.order().to_vec()));
        self.toast(&format!("Sorted by {}", key.label()), Severity::Info);
    }

    fn submit_comment(&mut self, text: &str) {
        let now = self.now();
        match self.thread.add_comment(text, now) {
            Ok(comment) => {
                let id = comment.id;
                self.emit(RenderSignal::CommentInserted { id, position: 0 });
                self.emit(RenderSignal::CommentCount(self.thread.displayed_count()));
                self.emit(RenderSignal::CommentInputCleared);
                self.toast("Comment posted", Severity::Info);
            }
            Err(e) => {
                debug!(error = %e, "comment rejected");
                self.toast("Please enter a comment", Severity::Info);
            }
        }
    }

    fn like_comment(&mut self, id: CommentId) {
        match self.thread.like_comment(id) {
            Ok(_) => {
                if let Some(comment) = self.thread.comment(id) {
                    let label = comment.likes_label();
                    self.emit(RenderSignal::CommentLikes { id, label });
                }
                self.toast("Liked", Severity::Info);
            }
            Err(e) => debug!(error = %e, "like ignored"),
        }
    }

    fn toggle_reply(&mut self, id: CommentId) {
        match self.thread.toggle_reply_form(id) {
            Ok(true) => {
                let placeholder = self.thread.reply_placeholder(id).unwrap_or_default();
                self.emit(RenderSignal::ReplyFormOpened {
                    comment: id,
                    placeholder,
                });
            }
            Ok(false) => self.emit(RenderSignal::ReplyFormClosed { comment: id }),
            Err(e) => debug!(error = %e, "reply toggle ignored"),
        }
    }

    fn submit_reply(&mut self, comment: CommentId, text: &str) {
        match self.thread.add_reply(comment, text) {
            Ok(reply) => {
                let reply = reply.id;
                self.emit(RenderSignal::ReplyAppended { comment, reply });
                self.emit(RenderSignal::ReplyFormClosed { comment });
                self.toast("Reply posted", Severity::Info);
            }
            // Blank replies are dropped without feedback; the form stays open.
            Err(e) => debug!(error = %e, "reply ignored"),
        }
    }

    // ---- Profile ----

    fn remove_item(&mut self, collection: Collection, id: ItemId) {
        if !self.profile.begin_removal(collection, &id) {
            debug!(?collection, item = %id, "nothing to remove");
            return;
        }
        self.emit(RenderSignal::ItemRemoving {
            collection,
            id: id.clone(),
        });
        self.tasks.schedule(
            self.config.timing.delete(),
            Task::FinishRemoval { collection, id },
        );
    }

    // ---- Auth ----

    fn select_tab(&mut self, tab: AuthTab) {
        self.state.auth_tab = tab;
        self.emit(RenderSignal::AuthTab(tab));
    }

    fn submit_login(&mut self, fields: &[FormField], remember_me: bool) {
        if self.state.is_busy(Button::Login) {
            return;
        }
        let check = auth::check_form(&self.validator, fields);
        if !self.apply_check(AuthTab::Login, check) {
            return;
        }
        let username = auth::submitted_username(fields);
        if self.begin_call(Button::Login) {
            self.tasks.schedule(
                self.config.timing.auth(),
                Task::FinishLogin {
                    username,
                    remember_me,
                },
            );
        }
    }

    fn submit_registration(&mut self, fields: &[FormField]) {
        if self.state.is_busy(Button::Register) {
            return;
        }
        let check = auth::check_registration(&self.validator, fields);
        if !self.apply_check(AuthTab::Register, check) {
            return;
        }
        if self.begin_call(Button::Register) {
            self.tasks
                .schedule(self.config.timing.auth(), Task::FinishRegister);
        }
    }

    /// Show the outcome of a form check inline. Returns whether it passed.
    fn apply_check(&mut self, form: AuthTab, check: FormCheck) -> bool {
        for field in &check.cleared {
            self.clear_field_error(form, field);
        }
        let ok = check.is_ok();
        for error in check.errors {
            self.show_field_error(form, error);
        }
        ok
    }

    fn show_field_error(&mut self, form: AuthTab, error: FieldError) {
        self.state
            .field_errors
            .insert((form, error.field.clone()), error.message.clone());
        self.emit(RenderSignal::FieldError {
            form,
            field: error.field,
            message: Some(error.message),
        });
    }

    fn clear_field_error(&mut self, form: AuthTab, field: &str) {
        if self
            .state
            .field_errors
            .remove(&(form, field.to_string()))
            .is_some()
        {
            self.emit(RenderSignal::FieldError {
                form,
                field: field.to_string(),
                message: None,
            });
        }
    }

    // ---- Simulated calls ----

    /// Put a button into its busy state. Returns false if it already was.
    fn begin_call(&mut self, button: Button) -> bool {
        if !self.state.set_busy(button) {
            return false;
        }
        self.emit(RenderSignal::ButtonBusy {
            button,
            label: button.busy_label().to_string(),
        });
        true
    }

    fn end_call(&mut self, button: Button) {
        if self.state.clear_busy(button) {
            self.emit(RenderSignal::ButtonRestored { button });
        }
    }

    fn run_task(&mut self, task: Task) {
        debug!(?task, at = self.now().millis, "timer fired");
        match task {
            Task::FinishRemoval { collection, id } => {
                if let Some(value) = self.profile.finish_removal(collection, &id) {
                    info!(?collection, item = %id, remaining = value, "item removed");
                    self.emit(RenderSignal::ItemRemoved {
                        collection,
                        id,
                    });
                    self.emit(RenderSignal::Stat { collection, value });
                    self.toast(collection.removed_message(), Severity::Success);
                }
            }
            Task::FinishSettings { username, bio } => {
                self.end_call(Button::SaveSettings);
                info!("settings saved");
                self.toast("Settings saved", Severity::Success);
                self.profile.user.apply_settings(&username, &bio);
                self.emit(RenderSignal::UserDetails {
                    username: self.profile.user.username.clone(),
                    bio: self.profile.user.bio.clone(),
                });
            }
            Task::FinishLogin {
                username,
                remember_me,
            } => {
                self.end_call(Button::Login);
                auth::remember_session(&self.prefs, &username, remember_me);
                self.toast("Signed in", Severity::Success);
                self.tasks
                    .schedule(self.config.timing.redirect(), Task::Redirect(Route::Index));
            }
            Task::FinishRegister => {
                self.end_call(Button::Register);
                info!("registration accepted");
                self.toast("Registered, please sign in", Severity::Success);
                self.select_tab(AuthTab::Login);
            }
            Task::Redirect(route) => self.navigate(route),
        }
    }

    // ---- Output ----

    fn toast(&mut self, message: &str, severity: Severity) {
        self.toaster.notify(message, severity);
    }

    fn flush_toasts(&mut self) {
        for change in self.toaster.take_changes() {
            self.surface.render(RenderSignal::Toast(change));
        }
    }

    fn emit(&mut self, signal: RenderSignal) {
        self.flush_toasts();
        self.surface.render(signal);
    }
}
