//! Error types for the lead-capture SDK.

use std::fmt;

use thiserror::Error;

use crate::models::LeadField;

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: LeadField,
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: LeadField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violation found in a single submission, in field order.
///
/// Never empty when produced by [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, field: LeadField) -> Option<&FieldViolation> {
        self.0.iter().find(|v| v.field == field)
    }

    /// Human-readable messages, as returned in the `errors` array of a 400 response.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }
}

impl From<Vec<FieldViolation>> for ValidationErrors {
    fn from(v: Vec<FieldViolation>) -> Self {
        Self(v)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors surfaced to callers of [`crate::LeadCaptureClientV1`].
#[derive(Error, Debug, Clone)]
pub enum LeadError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Service-account credentials are missing or unusable.
    #[error("Server configuration error")]
    Configuration,

    /// The spreadsheet rejected or could not serve the request.
    #[error("Unable to access spreadsheet")]
    SpreadsheetAccess,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl LeadError {
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
