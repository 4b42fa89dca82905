use std::sync::LazyLock;

use regex::Regex;

use crate::config::ValidatorConfig;
use crate::error::FieldErrorKind;
use crate::field::{names, FormField};
use crate::rule::{FieldRule, RuleDecision};

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Returns `true` if `value` looks like `local@domain.tld`.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Checks the shape of non-empty `email` fields.
pub struct EmailRule;

impl FieldRule for EmailRule {
    fn name(&self) -> &str {
        "email"
    }

    fn check(&self, field: &FormField, value: &str, _config: &ValidatorConfig) -> RuleDecision {
        if field.name != names::EMAIL || value.is_empty() {
            return RuleDecision::Pass;
        }
        if !is_email_shaped(value) {
            return RuleDecision::fail(
                FieldErrorKind::InvalidEmail,
                "Please enter a valid email address",
            );
        }
        RuleDecision::Pass
    }
}
