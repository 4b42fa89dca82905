use crate::config::ValidatorConfig;
use crate::error::FieldErrorKind;
use crate::field::{names, FormField};
use crate::rule::{FieldRule, RuleDecision};
use crate::rules::text_len;

/// Enforces the minimum length of non-empty `password` fields.
pub struct PasswordRule;

impl FieldRule for PasswordRule {
    fn name(&self) -> &str {
        "password"
    }

    fn check(&self, field: &FormField, value: &str, config: &ValidatorConfig) -> RuleDecision {
        if field.name != names::PASSWORD || value.is_empty() {
            return RuleDecision::Pass;
        }
        if text_len(value) < config.password_min {
            return RuleDecision::fail(
                FieldErrorKind::PasswordTooShort,
                format!("Password must be at least {} characters", config.password_min),
            );
        }
        RuleDecision::Pass
    }
}
