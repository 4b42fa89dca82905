use serde::{Deserialize, Serialize};
use tracing::info;

use tieba_gate::{find_field, names, FieldError, FormField, FormValidator};
use tieba_store::PreferenceStore;

/// Preference keys written by a successful login.
pub mod keys {
    pub const REMEMBER_ME: &str = "rememberMe";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const CURRENT_USER: &str = "currentUser";
}

/// The two forms of the auth page.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

/// Result of checking a submitted auth form.
///
/// `cleared` names the required fields that passed, so their stale inline
/// errors can be removed; `errors` holds the failures to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormCheck {
    pub cleared: Vec<String>,
    pub errors: Vec<FieldError>,
}

impl FormCheck {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run the required-field pass over a submitted form.
pub fn check_form(validator: &FormValidator, fields: &[FormField]) -> FormCheck {
    let errors = validator.validate_form(fields).err().unwrap_or_default();
    let cleared = fields
        .iter()
        .filter(|f| f.required && !errors.iter().any(|e| e.field == f.name))
        .map(|f| f.name.clone())
        .collect();
    FormCheck { cleared, errors }
}

/// Check a registration form: required fields first, then the password
/// confirmation, whose error lands on `confirm-password`.
pub fn check_registration(validator: &FormValidator, fields: &[FormField]) -> FormCheck {
    let mut check = check_form(validator, fields);
    if !check.is_ok() {
        return check;
    }
    if let Err(errors) = validator.validate_registration(fields) {
        check.cleared.retain(|name| !errors.iter().any(|e| &e.field == name));
        check.errors = errors;
    }
    check
}

/// Username submitted with a form, as typed.
pub fn submitted_username(fields: &[FormField]) -> String {
    find_field(fields, names::USERNAME)
        .map(|f| f.value.clone())
        .unwrap_or_default()
}

/// Persist a completed login. Storage failures are swallowed by the store.
pub fn remember_session(prefs: &PreferenceStore, username: &str, remember_me: bool) {
    if remember_me {
        prefs.set(keys::REMEMBER_ME, &true);
    }
    prefs.set(keys::IS_LOGGED_IN, &true);
    prefs.set(keys::CURRENT_USER, username);
    info!(username, remember_me, "login completed");
}

#[cfg(test)]
mod tests {
    use tieba_gate::FieldErrorKind;
    use tieba_store::InMemoryBackend;

    use super::*;

    fn login(username: &str, password: &str) -> Vec<FormField> {
        vec![
            FormField::required(names::USERNAME, username),
            FormField::required(names::PASSWORD, password),
        ]
    }

    #[test]
    fn valid_login_clears_every_required_field() {
        let check = check_form(&FormValidator::default(), &login("alice_1", "secret1"));
        assert!(check.is_ok());
        assert_eq!(check.cleared, vec!["username", "password"]);
    }

    #[test]
    fn failures_are_split_from_passes() {
        let check = check_form(&FormValidator::default(), &login("al", "secret1"));
        assert_eq!(check.errors.len(), 1);
        assert_eq!(check.errors[0].kind, FieldErrorKind::InvalidUsername);
        assert_eq!(check.cleared, vec!["password"]);
    }

    #[test]
    fn registration_mismatch_is_reported_on_confirmation() {
        let fields = vec![
            FormField::required(names::USERNAME, "alice_1"),
            FormField::required(names::EMAIL, "a@b.com"),
            FormField::required(names::PASSWORD, "abcdef"),
            FormField::required(names::CONFIRM_PASSWORD, "abcdee"),
        ];
        let check = check_registration(&FormValidator::default(), &fields);
        assert_eq!(check.errors.len(), 1);
        assert_eq!(check.errors[0].field, names::CONFIRM_PASSWORD);
        assert!(!check.cleared.iter().any(|f| f == names::CONFIRM_PASSWORD));
    }

    #[test]
    fn session_is_written_to_preferences() {
        let prefs = PreferenceStore::new(InMemoryBackend::new());
        remember_session(&prefs, "alice", false);
        assert_eq!(prefs.get::<bool>(keys::IS_LOGGED_IN), Some(true));
        assert_eq!(prefs.get::<String>(keys::CURRENT_USER).as_deref(), Some("alice"));
        assert!(!prefs.contains(keys::REMEMBER_ME));

        remember_session(&prefs, "alice", true);
        assert_eq!(prefs.get::<bool>(keys::REMEMBER_ME), Some(true));
    }

    #[test]
    fn unavailable_storage_does_not_break_login() {
        let prefs = PreferenceStore::new(InMemoryBackend::unavailable());
        remember_session(&prefs, "alice", true);
        assert_eq!(prefs.get::<bool>(keys::IS_LOGGED_IN), None);
    }

    #[test]
    fn username_is_read_from_fields() {
        assert_eq!(submitted_username(&login("bob", "x")), "bob");
        assert_eq!(submitted_username(&[]), "");
    }
}
