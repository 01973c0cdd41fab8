// Validation errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of check that produced a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value was nil or blank and presence was required
    PresenceMissing,
    /// The value length fell outside the accepted bounds
    LengthOutOfBounds,
    /// Another record of the same type already holds the value
    NotUnique,
    /// The value did not match the configured pattern
    FormatMismatch,
    /// The reachability fetch for the value failed
    Unreachable,
}

impl ErrorKind {
    /// Stable snake_case name, used in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PresenceMissing => "presence_missing",
            ErrorKind::LengthOutOfBounds => "length_out_of_bounds",
            ErrorKind::NotUnique => "not_unique",
            ErrorKind::FormatMismatch => "format_mismatch",
            ErrorKind::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Error message
    pub message: String,

    /// Check that failed
    pub kind: ErrorKind,

    /// Value that failed validation (optional)
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
            value: None,
        }
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Field name followed by the message, e.g. `Email can't be blank`
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(&self.field), self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The error collection owned by a record.
///
/// Failures are appended in the order checks run. The same field may
/// appear any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add an error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Remove every error
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Get errors for a specific field
    pub fn for_field(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Get errors of a specific kind
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.kind == kind).collect()
    }

    /// Iterate over all errors
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Human-readable messages, one per error
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::full_message).collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Programming errors caught when a validation is declared.
///
/// These never occur while a record is being validated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("at least one field name is required")]
    EmptyFieldList,

    #[error("uniqueness requested for `{field}` but the validation set has no store")]
    MissingStore { field: String },

    #[error("reachability check declared for `{field}` but the validation set has no fetcher")]
    MissingFetcher { field: String },

    #[error("option `{option}` is not supported by {validator} validations")]
    UnsupportedOption {
        option: &'static str,
        validator: &'static str,
    },
}

fn humanize(field: &str) -> String {
    let spaced = field.trim_end_matches("_id").replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
