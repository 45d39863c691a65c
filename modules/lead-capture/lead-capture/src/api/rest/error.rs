use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lead_bootstrap::Environment;
use lead_capture_sdk::ValidationErrors;

use super::dto::{METHOD_NOT_ALLOWED_MESSAGE, MessageDto, NOT_AN_OBJECT_MESSAGE, SubmitFormFailure};
use crate::domain::error::{DomainError, SheetError, SheetErrorKind};

pub const CONFIGURATION_MESSAGE: &str = "Server configuration error. Please try again later.";
pub const SPREADSHEET_ACCESS_MESSAGE: &str =
    "Unable to access spreadsheet. Please try again later.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Whether 500 bodies may carry the internal error text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorExposure {
    pub include_detail: bool,
}

impl ErrorExposure {
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            include_detail: !environment.is_production(),
        }
    }
}

/// Map a domain error to the endpoint's JSON contract.
#[must_use]
pub fn domain_error_to_response(e: DomainError, exposure: ErrorExposure) -> Response {
    match e {
        DomainError::Validation(errors) => build_validation_response(&errors),
        DomainError::Sheet(err) => build_sheet_response(&err, exposure),
    }
}

fn build_validation_response(errors: &ValidationErrors) -> Response {
    tracing::debug!(errors = %errors, "submission failed validation");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmitFormFailure::validation(errors.messages())),
    )
        .into_response()
}

fn build_sheet_response(err: &SheetError, exposure: ErrorExposure) -> Response {
    let message = match err.kind {
        SheetErrorKind::Credentials => {
            tracing::error!(error = %err, "Google Sheets credentials problem");
            CONFIGURATION_MESSAGE
        }
        SheetErrorKind::SpreadsheetAccess => {
            tracing::error!(error = %err, "spreadsheet not accessible");
            SPREADSHEET_ACCESS_MESSAGE
        }
        SheetErrorKind::Unexpected => {
            tracing::error!(error = %err, "unexpected error while recording lead");
            UNEXPECTED_MESSAGE
        }
    };
    let detail = exposure.include_detail.then(|| err.message.clone());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmitFormFailure::internal(message, detail)),
    )
        .into_response()
}

/// 400 for a body that is not a JSON object.
#[must_use]
pub fn invalid_body_response(e: &serde_json::Error) -> Response {
    tracing::debug!(error = %e, "unreadable submission body");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmitFormFailure::validation(vec![NOT_AN_OBJECT_MESSAGE.to_owned()])),
    )
        .into_response()
}

#[must_use]
pub fn method_not_allowed_response() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MessageDto {
            message: METHOD_NOT_ALLOWED_MESSAGE.to_owned(),
        }),
    )
        .into_response()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn detail_is_hidden_in_production_only() {
        assert!(!ErrorExposure::for_environment(Environment::Production).include_detail);
        assert!(ErrorExposure::for_environment(Environment::Staging).include_detail);
        assert!(ErrorExposure::for_environment(Environment::Development).include_detail);
    }

    #[test]
    fn unconfigured_environment_hides_detail() {
        assert!(!ErrorExposure::for_environment(Environment::default()).include_detail);
        assert_eq!(
            ErrorExposure::for_environment(Environment::default()),
            ErrorExposure::default()
        );
    }

    #[test]
    fn sheet_errors_are_internal_server_errors() {
        for kind in [
            SheetErrorKind::Credentials,
            SheetErrorKind::SpreadsheetAccess,
            SheetErrorKind::Unexpected,
        ] {
            let resp = domain_error_to_response(
                DomainError::Sheet(SheetError::new(kind, "detail")),
                ErrorExposure::default(),
            );
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let resp = domain_error_to_response(
            DomainError::Validation(ValidationErrors::default()),
            ErrorExposure::default(),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
