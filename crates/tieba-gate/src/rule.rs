use crate::config::ValidatorConfig;
use crate::error::FieldErrorKind;
use crate::field::FormField;

/// The outcome of a single rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleDecision {
    /// The rule passed; proceed to the next rule.
    Pass,
    /// The rule failed; this is the field's error.
    Fail {
        kind: FieldErrorKind,
        message: String,
    },
}

impl RuleDecision {
    pub fn fail(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self::Fail {
            kind,
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A single check in the field validation pipeline.
///
/// Rules run in registration order and the first failure wins. Each rule
/// sees the trimmed value and decides for itself whether it applies (most
/// rules only look at one field name and skip empty values).
///
/// The trait is object-safe so rules can be stored in a
/// `Vec<Box<dyn FieldRule>>`.
pub trait FieldRule: Send + Sync {
    /// Short name used in logs (e.g., "required", "email").
    fn name(&self) -> &str;

    fn check(&self, field: &FormField, value: &str, config: &ValidatorConfig) -> RuleDecision;
}
