//! Field-level validation errors shared by principle and tactic drafts.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field (`title`, `principleId`, ...).
    pub field: String,
    pub message: String,
}

/// All violations found while validating one input.
///
/// Serializes as a plain JSON array of [`FieldError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-field failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `value` when nothing was recorded, `self` otherwise.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Whether any recorded error concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|err| format!("{}: {}", err.field, err.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid data: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Trims a required text field and enforces non-blank and max length.
///
/// Records an error and returns `None` on any violation.
pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    max_chars: Option<usize>,
) -> Option<String> {
    let Some(value) = value else {
        errors.push(field, "Required");
        return None;
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "Must not be empty");
        return None;
    }

    if let Some(max) = max_chars {
        if trimmed.chars().count() > max {
            errors.push(field, format!("Must be at most {max} characters"));
            return None;
        }
    }

    Some(trimmed.to_string())
}

/// Trims an optional text field, folding blank input into `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
