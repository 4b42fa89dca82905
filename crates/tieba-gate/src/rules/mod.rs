//! Built-in field rules, listed in evaluation order.

pub mod email;
pub mod password;
pub mod required;
pub mod username;

pub use email::EmailRule;
pub use password::PasswordRule;
pub use required::RequiredRule;
pub use username::UsernameRule;

/// Length as a browser counts it: UTF-16 code units, so characters outside
/// the Basic Multilingual Plane count twice.
pub(crate) fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}
