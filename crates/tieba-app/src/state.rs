use std::collections::{BTreeMap, BTreeSet};

use crate::auth::AuthTab;
use crate::nav::Page;
use crate::profile::ProfileSection;

/// Scroll offset past which the navbar turns solid.
pub const SOLID_NAVBAR_AFTER: u32 = 100;
/// Scroll offset past which scrolling down hides the navbar.
pub const HIDE_NAVBAR_AFTER: u32 = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavbarStyle {
    #[default]
    Translucent,
    Solid,
}

/// Navbar look, derived from the scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub style: NavbarStyle,
    pub hidden: bool,
    pub last_scroll_y: u32,
}

impl NavbarState {
    /// Update for a new scroll offset. Returns whether the look changed.
    pub fn on_scroll(&mut self, y: u32) -> bool {
        let style = if y > SOLID_NAVBAR_AFTER {
            NavbarStyle::Solid
        } else {
            NavbarStyle::Translucent
        };
        let hidden = y > self.last_scroll_y && y > HIDE_NAVBAR_AFTER;
        self.last_scroll_y = y;

        let changed = style != self.style || hidden != self.hidden;
        self.style = style;
        self.hidden = hidden;
        changed
    }
}

/// Buttons that show a busy label while a simulated call runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    SaveSettings,
    Login,
    Register,
}

impl Button {
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::SaveSettings => "Saving...",
            Self::Login => "Signing in...",
            Self::Register => "Signing up...",
        }
    }
}

/// All page state that is not owned by a domain store.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub page: Option<Page>,
    pub nav_open: bool,
    pub navbar: NavbarState,
    pub profile_section: ProfileSection,
    pub auth_tab: AuthTab,
    /// Password inputs currently shown in plain text.
    pub visible_passwords: BTreeSet<String>,
    /// Inline errors keyed by form and field name.
    pub field_errors: BTreeMap<(AuthTab, String), String>,
    busy: BTreeSet<Button>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, button: Button) -> bool {
        self.busy.contains(&button)
    }

    /// Mark a button busy. Returns false if it already was.
    pub(crate) fn set_busy(&mut self, button: Button) -> bool {
        self.busy.insert(button)
    }

    pub(crate) fn clear_busy(&mut self, button: Button) -> bool {
        self.busy.remove(&button)
    }

    pub fn field_error(&self, form: AuthTab, field: &str) -> Option<&str> {
        self.field_errors
            .get(&(form, field.to_string()))
            .map(String::as_str)
    }

    /// Flip a password input between masked and plain. Returns whether it
    /// is visible now.
    pub fn toggle_password(&mut self, field: &str) -> bool {
        if self.visible_passwords.remove(field) {
            false
        } else {
            self.visible_passwords.insert(field.to_string());
            true
        }
    }
}
