//! Field-level validation errors.

use core::fmt;

use serde::Serialize;

/// A payload failed schema or range validation.
///
/// `field` is a dotted path into the payload (`packages[1].price`) when the
/// offending field is known, or `body` when it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Path of the offending field.
    pub field: String,
    /// Human readable reason.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a validation error from a `serde_json` deserialization failure.
    ///
    /// `serde` reports missing fields as ``missing field `price` ``; the field
    /// name is lifted out so callers see which field to fix.
    #[must_use]
    pub fn from_serde(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        let field = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split_once('`'))
            .map_or_else(|| "body".to_owned(), |(name, _)| name.to_owned());
        Self { field, message }
    }

    /// Prefix the field path with a parent path.
    #[must_use]
    pub fn within(mut self, parent: &str) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Reject blank strings.
///
/// # Errors
///
/// Returns a `ValidationError` for `field` when `value` is empty after trimming.
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

/// Enforce a character-count range on a string.
///
/// # Errors
///
/// Returns a `ValidationError` for `field` when the trimmed length of `value`
/// falls outside `min..=max`.
pub fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}
