use crate::config::ValidatorConfig;
use crate::error::FieldErrorKind;
use crate::field::{names, FormField};
use crate::rule::{FieldRule, RuleDecision};
use crate::rules::text_len;

/// Checks length and charset of non-empty `username` fields.
///
/// Length is counted in UTF-16 code units. Allowed characters are ASCII letters,
/// digits and `_`.
pub struct UsernameRule;

impl FieldRule for UsernameRule {
    fn name(&self) -> &str {
        "username"
    }

    fn check(&self, field: &FormField, value: &str, config: &ValidatorConfig) -> RuleDecision {
        if field.name != names::USERNAME || value.is_empty() {
            return RuleDecision::Pass;
        }

        let len = text_len(value);
        if len < config.username_min || len > config.username_max {
            return RuleDecision::fail(
                FieldErrorKind::InvalidUsername,
                format!(
                    "Username must be {}-{} characters long",
                    config.username_min, config.username_max
                ),
            );
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return RuleDecision::fail(
                FieldErrorKind::InvalidUsername,
                "Username may only contain letters, digits and underscores",
            );
        }

        RuleDecision::Pass
    }
}
