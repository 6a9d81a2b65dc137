/// Inline validation for the campaign report form.
///
/// Each field is checked on blur and again, all together, on submit:
/// 1. **Required**: must contain non-whitespace text.
/// 2. **Budget**: a positive finite number.
/// 3. **Duration**: a positive whole number of days.
///
/// Submission is all-or-nothing: a single failing field blocks the request.
use thiserror::Error;

use crate::model::FormInput;

/// Aggregate banner shown when submission is blocked.
pub const FIX_ERRORS_MESSAGE: &str = "Please fix the validation errors before submitting.";

/// Validation behaviour for one named input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

/// Fields of the report form, in display order.
pub const REPORT_FORM_RULES: &[FieldRule] = &[
    FieldRule::required("campaign_name"),
    FieldRule::required("target_audience"),
    FieldRule::required("budget"),
    FieldRule::required("duration"),
    FieldRule::required("objectives"),
    FieldRule::optional("channels"),
    FieldRule::optional("current_metrics"),
];

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Budget must be a positive number")]
    InvalidBudget,
    #[error("Duration must be a positive whole number")]
    InvalidDuration,
}

/// Every failing field of a form, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fix the validation errors before submitting.")]
pub struct ValidationErrors {
    pub fields: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
    pub fn get(&self, name: &str) -> Option<&FieldError> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, e)| e)
    }
}

/// Check one value against its rule.
pub fn validate_field(rule: &FieldRule, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if rule.required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match rule.name {
        "budget" => check_budget(value),
        "duration" => check_duration(value),
        _ => Ok(()),
    }
}

fn check_budget(value: &str) -> Result<(), FieldError> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
        _ => Err(FieldError::InvalidBudget),
    }
}

fn check_duration(value: &str) -> Result<(), FieldError> {
    match value.parse::<i64>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(FieldError::InvalidDuration),
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Current values and inline errors of a form.
#[derive(Debug, Clone)]
pub struct FormState {
    rules: &'static [FieldRule],
    values: FormInput,
    errors: Vec<(&'static str, FieldError)>,
}

impl FormState {
    pub fn new(rules: &'static [FieldRule]) -> Self {
        Self {
            rules,
            values: FormInput::new(),
            errors: Vec::new(),
        }
    }

    pub fn report() -> Self {
        Self::new(REPORT_FORM_RULES)
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    pub fn values(&self) -> &FormInput {
        &self.values
    }

    /// Update a value. Typing clears the field's error immediately.
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.values.set(name, value);
        self.errors.retain(|(n, _)| *n != name);
    }

    /// Replace every value with a submitted form's.
    pub fn load(&mut self, input: &FormInput) {
        self.clear();
        for (name, value) in input.iter() {
            self.set_value(name, value);
        }
    }

    /// Validate one field as it loses focus and record the outcome.
    pub fn blur(&mut self, name: &str) -> Result<(), FieldError> {
        let Some(rule) = self.rules.iter().find(|r| r.name == name) else {
            return Ok(());
        };
        self.errors.retain(|(n, _)| *n != name);
        let outcome = validate_field(rule, self.values.get(name).unwrap_or(""));
        if let Err(error) = &outcome {
            self.errors.push((rule.name, error.clone()));
        }
        outcome
    }

    /// Validate every field, recording all errors.
    pub fn validate_all(&mut self) -> Result<(), ValidationErrors> {
        self.errors = self
            .rules
            .iter()
            .filter_map(|rule| {
                validate_field(rule, self.values.get(rule.name).unwrap_or(""))
                    .err()
                    .map(|e| (rule.name, e))
            })
            .collect();

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                fields: self.errors.clone(),
            })
        }
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|(n, _)| *n == name).map(|(_, e)| e)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    /// Drop recorded errors but keep the typed values.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::report()
    }
}
