use serde::{Deserialize, Serialize};

/// Field names the built-in rules recognise.
pub mod names {
    pub const EMAIL: &str = "email";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm-password";
    pub const BIO: &str = "bio";
}

/// One input of a form, captured for a single validation pass.
///
/// Fields are transient: the caller rebuilds them from the current input
/// values every time it validates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    /// Inline error from the last pass, if any.
    pub error_message: Option<String>,
}

impl FormField {
    pub fn required(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: true,
            error_message: None,
        }
    }

    pub fn optional(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, value)
        }
    }

    /// The value with surrounding whitespace removed, as the rules see it.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Look up a field by name.
pub fn find_field<'a>(fields: &'a [FormField], name: &str) -> Option<&'a FormField> {
    fields.iter().find(|f| f.name == name)
}
