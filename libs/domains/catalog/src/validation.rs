//! Validation failures reported at the API boundary.
//!
//! A [`ValidationFailure`] always carries every violation found in a payload,
//! never just the first one.

use serde::Serialize;
use strum::Display;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Kind of rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationCode {
    /// Required field is missing or null
    Required,
    /// Value has the wrong JSON type
    #[serde(rename = "type")]
    #[strum(serialize = "type")]
    InvalidType,
    /// Numeric bound not met
    Range,
    /// Malformed email address
    Email,
}

/// A single non-conforming field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Dotted path of the field, e.g. `price` or `items[0].quantity`
    pub field: String,
    pub code: ViolationCode,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ViolationCode::Required, "field is required")
    }
}

/// All violations found while validating one entity payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// Entity name the payload was checked against
    pub entity: String,
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(entity: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            entity: entity.into(),
            violations,
        }
    }

    /// Build a failure from `validator` derive output.
    ///
    /// Nested struct and list errors are flattened into dotted paths and the
    /// result is sorted by field so responses are stable.
    pub fn from_validator(entity: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut violations = Vec::new();
        flatten(errors, "", &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self::new(entity, violations)
    }

    /// Whether any violation targets `field`
    pub fn references(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(
            f,
            "{} payload is invalid: {}",
            self.entity,
            fields.join(", ")
        )
    }
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let code = match err.code.as_ref() {
                        "email" => ViolationCode::Email,
                        "required" => ViolationCode::Required,
                        _ => ViolationCode::Range,
                    };
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.to_string());
                    out.push(Violation::new(path.clone(), code, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &format!("{path}."), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}
