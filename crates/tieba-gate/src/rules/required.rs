use crate::config::ValidatorConfig;
use crate::error::FieldErrorKind;
use crate::field::FormField;
use crate::rule::{FieldRule, RuleDecision};

/// Rejects required fields that are empty after trimming.
pub struct RequiredRule;

impl FieldRule for RequiredRule {
    fn name(&self) -> &str {
        "required"
    }

    fn check(&self, field: &FormField, value: &str, _config: &ValidatorConfig) -> RuleDecision {
        if field.required && value.is_empty() {
            return RuleDecision::fail(FieldErrorKind::Required, "This field is required");
        }
        RuleDecision::Pass
    }
}
