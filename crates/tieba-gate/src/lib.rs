//! Form validation pipeline for the Tieba client core.
//!
//! Every auth form submit and every field blur goes through a
//! [`FormValidator`]: a configurable pipeline of [`FieldRule`]s that yields
//! inline [`FieldError`]s. Registration adds a cross-field confirmation
//! check, and avatar uploads are checked against type and size limits.
//!
//! # Quick Start
//!
//! ```rust
//! use tieba_gate::{validate_field, FieldErrorKind, FormField};
//!
//! assert!(validate_field(&FormField::required("email", "a@b.com")).is_ok());
//!
//! let err = validate_field(&FormField::required("email", "abc")).unwrap_err();
//! assert_eq!(err.kind, FieldErrorKind::InvalidEmail);
//! ```
//!
//! # Rule precedence
//!
//! 1. required and empty
//! 2. email shape
//! 3. username length and charset
//! 4. password length
//!
//! The first failing rule wins for a field.

pub mod avatar;
pub mod config;
pub mod error;
pub mod field;
pub mod rule;
pub mod rules;
pub mod validator;

// Re-exports for convenience.
pub use avatar::AvatarFile;
pub use config::ValidatorConfig;
pub use error::{AvatarError, FieldError, FieldErrorKind, ValidationError};
pub use field::{find_field, names, FormField};
pub use rule::{FieldRule, RuleDecision};
pub use rules::{EmailRule, PasswordRule, RequiredRule, UsernameRule};
pub use validator::{validate_field, validate_form, FormValidator};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn registration(password: &str, confirm: &str) -> Vec<FormField> {
        vec![
            FormField::required(names::USERNAME, "valid_user1"),
            FormField::required(names::EMAIL, "user@example.com"),
            FormField::required(names::PASSWORD, password),
            FormField::required(names::CONFIRM_PASSWORD, confirm),
        ]
    }

    // -----------------------------------------------------------------------
    // Email
    // -----------------------------------------------------------------------

    #[test]
    fn email_shape() {
        assert!(validate_field(&FormField::required("email", "a@b.com")).is_ok());
        let err = validate_field(&FormField::required("email", "abc")).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::InvalidEmail);
        assert_eq!(err.field, "email");
    }

    #[test]
    fn optional_empty_email_passes() {
        assert!(validate_field(&FormField::optional("email", "")).is_ok());
    }

    // -----------------------------------------------------------------------
    // Username
    // -----------------------------------------------------------------------

    #[test]
    fn username_shape() {
        let err = validate_field(&FormField::required("username", "ab")).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::InvalidUsername);
        assert!(validate_field(&FormField::required("username", "valid_user1")).is_ok());
    }

    // -----------------------------------------------------------------------
    // Precedence
    // -----------------------------------------------------------------------

    #[test]
    fn required_beats_shape_rules() {
        let err = validate_field(&FormField::required("email", "   ")).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(err.message, "This field is required");
    }

    #[test]
    fn short_password() {
        let err = validate_field(&FormField::required("password", "abc")).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::PasswordTooShort);
        assert!(validate_field(&FormField::required("password", "abcdef")).is_ok());
    }

    // -----------------------------------------------------------------------
    // Form aggregation
    // -----------------------------------------------------------------------

    #[test]
    fn form_collects_every_failing_required_field() {
        let fields = vec![
            FormField::required("username", ""),
            FormField::required("password", "123"),
            FormField::required("email", "ok@example.com"),
        ];
        let errors = validate_form(&fields).unwrap_err();
        let failed: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(failed, vec!["username", "password"]);
    }

    #[test]
    fn form_skips_optional_fields() {
        let fields = vec![
            FormField::required("username", "valid_user1"),
            FormField::optional("email", "not-an-email"),
        ];
        assert!(validate_form(&fields).is_ok());
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn registration_mismatch_lands_on_confirmation() {
        let fields = registration("abcdef", "abcdee");
        let errors = FormValidator::default()
            .validate_registration(&fields)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, names::CONFIRM_PASSWORD);
        assert_eq!(errors[0].kind, FieldErrorKind::PasswordMismatch);
        // The submitted fields are left untouched.
        assert_eq!(fields, registration("abcdef", "abcdee"));
    }

    #[test]
    fn registration_matching_passwords_pass() {
        let fields = registration("abcdef", "abcdef");
        assert!(FormValidator::default().validate_registration(&fields).is_ok());
    }

    #[test]
    fn registration_reports_field_errors_before_mismatch() {
        let fields = registration("abc", "xyz");
        let errors = FormValidator::default()
            .validate_registration(&fields)
            .unwrap_err();
        assert_eq!(errors[0].kind, FieldErrorKind::PasswordTooShort);
    }

    // -----------------------------------------------------------------------
    // Error plumbing
    // -----------------------------------------------------------------------

    #[test]
    fn validation_error_exposes_field_errors() {
        let err = ValidationError::Form(vec![FieldError::new(
            "email",
            FieldErrorKind::InvalidEmail,
            "bad",
        )]);
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.to_string(), "1 field(s) failed validation");
        assert!(ValidationError::EmptyText("comment").field_errors().is_empty());
        assert_eq!(
            ValidationError::EmptyText("comment").to_string(),
            "comment must not be empty"
        );
    }

    proptest! {
        #[test]
        fn usernames_from_allowed_charset_pass(name in "[A-Za-z0-9_]{3,20}") {
            prop_assert!(validate_field(&FormField::required("username", name)).is_ok());
        }

        #[test]
        fn blank_required_values_always_fail(value in "[ \t\n]{0,8}") {
            let err = validate_field(&FormField::required("bio", value)).unwrap_err();
            prop_assert_eq!(err.kind, FieldErrorKind::Required);
        }
    }
}
