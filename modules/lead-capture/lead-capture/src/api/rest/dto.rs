use lead_capture_sdk::{LeadSubmissionInput, SubmissionReceipt};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const NOT_AN_OBJECT_MESSAGE: &str = "Request body must be a JSON object";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "This endpoint only accepts POST requests";

/// Body of `POST /api/submit-form`.
///
/// Every field is optional and anything that is not a JSON string counts as
/// absent, so validation reports it like a missing field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub whatsapp: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub business_goals: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub service_type: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl SubmitFormRequest {
    /// Parse a raw body. Only a JSON object is accepted.
    ///
    /// # Errors
    /// Returns the serde error for malformed JSON, or a custom one when the
    /// document is not an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Err(serde::de::Error::custom(NOT_AN_OBJECT_MESSAGE)),
        }
    }
}

impl From<SubmitFormRequest> for LeadSubmissionInput {
    fn from(req: SubmitFormRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            whatsapp: req.whatsapp,
            business_goals: req.business_goals,
            service_type: req.service_type,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDataDto {
    pub submitted_at: String,
    pub rows_added: u64,
}

#[derive(Debug, Serialize)]
pub struct SubmitFormResponse {
    pub success: bool,
    pub message: String,
    pub data: SubmissionDataDto,
}

impl From<SubmissionReceipt> for SubmitFormResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_owned(),
            data: SubmissionDataDto {
                submitted_at: receipt.submitted_at,
                rows_added: receipt.rows_added,
            },
        }
    }
}

/// Failure body for 400 and 500 responses.
#[derive(Debug, Serialize)]
pub struct SubmitFormFailure {
    pub success: bool,
    pub message: String,
    /// Validation messages, 400 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Internal detail, 500 outside production only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitFormFailure {
    #[must_use]
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED_MESSAGE.to_owned(),
            errors: Some(errors),
            error: None,
        }
    }

    #[must_use]
    pub fn internal(message: &str, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            errors: None,
            error: detail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}
