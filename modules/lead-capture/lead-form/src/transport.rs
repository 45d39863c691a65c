use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Path of the submission endpoint, relative to the site origin.
pub const SUBMIT_FORM_PATH: &str = "/api/submit-form";

/// JSON body sent to the endpoint. Values go out as typed; the server normalizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormPayload {
    pub full_name: String,
    pub email: String,
    pub whatsapp: String,
    pub business_goals: String,
    pub service_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyData {
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub rows_added: u64,
}

/// What the endpoint answered, whatever the status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerReply {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub data: Option<ReplyData>,
}

impl ServerReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.success
    }

    /// Message to show the user, or `None` for a successful reply.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        if !(200..300).contains(&self.status) {
            if let Some(errors) = self.errors.as_ref().filter(|e| !e.is_empty()) {
                return Some(format!("Validation errors: {}", errors.join(", ")));
            }
            return Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("HTTP error! status: {}", self.status)),
            );
        }
        Some(
            self.message
                .clone()
                .unwrap_or_else(|| "Form submission failed".to_owned()),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unreadable response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
}

/// Sends one submission and returns the endpoint's reply.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn send(&self, payload: &SubmitFormPayload) -> Result<ServerReply, TransportError>;
}

/// [`FormTransport`] over HTTP. No timeout or retry beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpFormTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpFormTransport {
    /// # Errors
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}{SUBMIT_FORM_PATH}", base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormTransport for HttpFormTransport {
    async fn send(&self, payload: &SubmitFormPayload) -> Result<ServerReply, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(status, "submission reply received");

        let mut reply: ServerReply = response.json().await.map_err(|e| TransportError::Decode {
            status,
            message: e.to_string(),
        })?;
        reply.status = status;
        Ok(reply)
    }
}
