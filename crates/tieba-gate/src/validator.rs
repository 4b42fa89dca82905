use tracing::debug;

use crate::avatar::{check_avatar, AvatarFile};
use crate::config::ValidatorConfig;
use crate::error::{AvatarError, FieldError, FieldErrorKind};
use crate::field::{find_field, names, FormField};
use crate::rule::{FieldRule, RuleDecision};
use crate::rules::{EmailRule, PasswordRule, RequiredRule, UsernameRule};

// ---------------------------------------------------------------------------
// FormValidator
// ---------------------------------------------------------------------------

/// A configurable pipeline of field rules.
///
/// Every field runs through the rules in order; the pipeline is
/// **fail-fast** per field, so the first failing rule names the error.
pub struct FormValidator {
    rules: Vec<Box<dyn FieldRule>>,
    config: ValidatorConfig,
}

impl FormValidator {
    /// Create a validator with an empty pipeline.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Create a validator with the standard pipeline:
    /// Required -> Email -> Username -> Password
    pub fn with_default_rules(config: ValidatorConfig) -> Self {
        let mut validator = Self::new(config);
        validator.add_rule(Box::new(RequiredRule));
        validator.add_rule(Box::new(EmailRule));
        validator.add_rule(Box::new(UsernameRule));
        validator.add_rule(Box::new(PasswordRule));
        validator
    }

    /// Append a rule to the end of the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn FieldRule>) {
        self.rules.push(rule);
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Validate one field against the whole pipeline.
    pub fn validate_field(&self, field: &FormField) -> Result<(), FieldError> {
        let value = field.trimmed();
        for rule in &self.rules {
            if let RuleDecision::Fail { kind, message } = rule.check(field, value, &self.config) {
                debug!(field = %field.name, rule = rule.name(), "field rejected");
                return Err(FieldError::new(field.name.clone(), kind, message));
            }
        }
        Ok(())
    }

    /// Validate every required field and collect all failures.
    ///
    /// Optional fields are skipped here; they are only checked one at a time
    /// through [`Self::validate_field`] (e.g. when an input loses focus).
    pub fn validate_form(&self, fields: &[FormField]) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = fields
            .iter()
            .filter(|f| f.required)
            .filter_map(|f| self.validate_field(f).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a registration form: the per-field pass first, then the
    /// password confirmation.
    ///
    /// A mismatch is reported on the `confirm-password` field. The raw values
    /// are compared, so a confirmation that differs only in surrounding
    /// whitespace is a mismatch.
    pub fn validate_registration(&self, fields: &[FormField]) -> Result<(), Vec<FieldError>> {
        self.validate_form(fields)?;

        let password = find_field(fields, names::PASSWORD).map(|f| f.value.as_str());
        let confirm = find_field(fields, names::CONFIRM_PASSWORD).map(|f| f.value.as_str());
        if password.unwrap_or_default() != confirm.unwrap_or_default() {
            return Err(vec![FieldError::new(
                names::CONFIRM_PASSWORD,
                FieldErrorKind::PasswordMismatch,
                "Passwords do not match",
            )]);
        }
        Ok(())
    }

    /// Check an avatar upload against the configured size limit.
    pub fn validate_avatar(&self, file: &AvatarFile) -> Result<(), AvatarError> {
        check_avatar(file, self.config.avatar_max_bytes)
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::with_default_rules(ValidatorConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Free functions over the default pipeline
// ---------------------------------------------------------------------------

/// Validate one field with the default rules and limits.
pub fn validate_field(field: &FormField) -> Result<(), FieldError> {
    FormValidator::default().validate_field(field)
}

/// Validate the required fields of a form with the default rules and limits.
pub fn validate_form(fields: &[FormField]) -> Result<(), Vec<FieldError>> {
    FormValidator::default().validate_form(fields)
}
