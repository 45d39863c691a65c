//! Domain errors for lead capture.

use std::fmt;

use lead_capture_sdk::{LeadError, ValidationErrors};
use thiserror::Error;

/// Coarse cause of a spreadsheet failure, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetErrorKind {
    /// Service-account credentials are missing, unparsable, or rejected.
    Credentials,
    /// The spreadsheet or range is unknown, or the account may not use it.
    SpreadsheetAccess,
    Unexpected,
}

impl fmt::Display for SheetErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SheetErrorKind::Credentials => "credentials",
            SheetErrorKind::SpreadsheetAccess => "spreadsheet access",
            SheetErrorKind::Unexpected => "unexpected",
        })
    }
}

/// Failure reported by a [`crate::domain::ports::LeadSheet`] adapter.
///
/// `message` is operator detail for logs; it never reaches a production client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct SheetError {
    pub kind: SheetErrorKind,
    pub message: String,
}

impl SheetError {
    pub fn new(kind: SheetErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::new(SheetErrorKind::Credentials, message)
    }

    pub fn spreadsheet_access(message: impl Into<String>) -> Self {
        Self::new(SheetErrorKind::SpreadsheetAccess, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(SheetErrorKind::Unexpected, message)
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<DomainError> for LeadError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(errors) => LeadError::Validation(errors),
            DomainError::Sheet(err) => match err.kind {
                SheetErrorKind::Credentials => LeadError::Configuration,
                SheetErrorKind::SpreadsheetAccess => LeadError::SpreadsheetAccess,
                SheetErrorKind::Unexpected => LeadError::Unexpected(err.message),
            },
        }
    }
}
