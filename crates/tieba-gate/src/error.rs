use std::fmt;

use serde::{Deserialize, Serialize};

/// Which rule rejected a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldErrorKind {
    /// A required field was left empty.
    Required,
    /// The email value is not `local@domain.tld` shaped.
    InvalidEmail,
    /// The username has a bad length or a character outside `[A-Za-z0-9_]`.
    InvalidUsername,
    /// The password is shorter than the configured minimum.
    PasswordTooShort,
    /// The confirmation does not repeat the password.
    PasswordMismatch,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid email",
            Self::InvalidUsername => "invalid username",
            Self::PasswordTooShort => "too short",
            Self::PasswordMismatch => "password mismatch",
        };
        f.write_str(s)
    }
}

/// A rejected field: the field name, the failing rule, and the inline
/// message shown next to the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

/// User-input shape violations.
///
/// Recovered locally: the submit is aborted and the problem is shown inline
/// or as a toast.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A free-text input (comment, reply) was blank after trimming.
    #[error("{0} must not be empty")]
    EmptyText(&'static str),

    /// A single field failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// One or more fields of a form failed.
    #[error("{} field(s) failed validation", .0.len())]
    Form(Vec<FieldError>),
}

impl ValidationError {
    /// The field errors carried by this error, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::EmptyText(_) => &[],
            Self::Field(e) => std::slice::from_ref(e),
            Self::Form(errors) => errors,
        }
    }
}

/// Rejected avatar uploads.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AvatarError {
    #[error("not an image file: {0}")]
    NotAnImage(String),

    #[error("image is {size} bytes, the limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}
