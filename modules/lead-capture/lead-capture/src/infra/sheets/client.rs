//! `spreadsheets.values` calls used by lead capture.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::credentials::ServiceAccountCredentials;
use super::token::TokenProvider;
use crate::config::LeadCaptureConfig;
use crate::domain::error::{SheetError, SheetErrorKind};
use crate::domain::ports::{AppendOutcome, LeadSheet, SheetConnector};

const RAW_INPUT: (&str, &str) = ("valueInputOption", "RAW");
const INSERT_ROWS: (&str, &str) = ("insertDataOption", "INSERT_ROWS");

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendValuesResponse {
    #[serde(default)]
    updates: Option<UpdateValuesResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_rows: Option<u64>,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

struct SheetEndpoints {
    header_range: String,
    header_url: String,
    append_url: String,
}

/// Google Sheets client for one spreadsheet.
///
/// Built once at startup. Missing or unusable credentials do not fail
/// construction; every [`SheetConnector::connect`] then reports them.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    endpoints: Arc<SheetEndpoints>,
    tokens: Result<TokenProvider, SheetError>,
}

impl GoogleSheetsClient {
    /// # Errors
    /// Returns an `Unexpected` [`SheetError`] if the HTTP client cannot be built.
    pub fn new(config: &LeadCaptureConfig) -> Result<Self, SheetError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SheetError::unexpected(format!("failed to build HTTP client: {e}")))?;

        let tokens = ServiceAccountCredentials::from_parts(
            config.client_email.as_deref(),
            config.private_key.as_ref(),
        )
        .map(|creds| TokenProvider::new(http.clone(), config.token_uri.clone(), creds));

        if let Err(e) = &tokens {
            warn!(error = %e, "Google Sheets credentials unavailable; submissions will fail");
        }

        Ok(Self {
            http,
            endpoints: Arc::new(SheetEndpoints::new(config)),
            tokens,
        })
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.tokens.is_ok()
    }
}

impl SheetEndpoints {
    fn new(config: &LeadCaptureConfig) -> Self {
        let base = format!(
            "{}/v4/spreadsheets/{}/values",
            config.sheets_base_url.trim_end_matches('/'),
            urlencoding::encode(&config.spreadsheet_id),
        );
        Self {
            header_range: config.header_range.clone(),
            header_url: format!("{base}/{}", urlencoding::encode(&config.header_range)),
            append_url: format!(
                "{base}/{}:append",
                urlencoding::encode(&config.append_range)
            ),
        }
    }
}

#[async_trait]
impl SheetConnector for GoogleSheetsClient {
    async fn connect(&self) -> Result<Box<dyn LeadSheet>, SheetError> {
        let tokens = self.tokens.as_ref().map_err(Clone::clone)?;
        let token = tokens.access_token().await?;
        Ok(Box::new(GoogleSheetSession {
            http: self.http.clone(),
            endpoints: Arc::clone(&self.endpoints),
            token,
        }))
    }
}

/// Authorized handle used for the calls of a single submission.
struct GoogleSheetSession {
    http: reqwest::Client,
    endpoints: Arc<SheetEndpoints>,
    token: SecretString,
}

impl GoogleSheetSession {
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        call: &str,
    ) -> Result<reqwest::Response, SheetError> {
        let response = request
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|e| SheetError::unexpected(format!("{call}: request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<GoogleErrorBody>(&body).map_or_else(
            |_| format!("{call}: HTTP {status}"),
            |b| match b.error.status {
                Some(s) => format!("{call}: HTTP {status} {s}: {}", b.error.message),
                None => format!("{call}: HTTP {status}: {}", b.error.message),
            },
        );
        Err(SheetError::new(classify_status(status), detail))
    }
}

fn classify_status(status: StatusCode) -> SheetErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => SheetErrorKind::Credentials,
        StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            SheetErrorKind::SpreadsheetAccess
        }
        _ => SheetErrorKind::Unexpected,
    }
}

#[async_trait]
impl LeadSheet for GoogleSheetSession {
    async fn read_header(&self) -> Result<Option<Vec<String>>, SheetError> {
        let response = self
            .send(self.http.get(&self.endpoints.header_url), "read header")
            .await?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::unexpected(format!("read header: malformed response: {e}")))?;

        let first = range
            .values
            .and_then(|rows| rows.into_iter().next())
            .filter(|row| !row.is_empty())
            .map(|row| row.into_iter().map(cell_text).collect());
        debug!(present = first.is_some(), "header row read");
        Ok(first)
    }

    async fn write_header(&self, header: &[&str]) -> Result<(), SheetError> {
        let body = json!({
            "range": self.endpoints.header_range,
            "majorDimension": "ROWS",
            "values": [header],
        });
        self.send(
            self.http
                .put(&self.endpoints.header_url)
                .query(&[RAW_INPUT])
                .json(&body),
            "write header",
        )
        .await?;
        Ok(())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<AppendOutcome, SheetError> {
        let body = json!({ "majorDimension": "ROWS", "values": [row] });
        let response = self
            .send(
                self.http
                    .post(&self.endpoints.append_url)
                    .query(&[RAW_INPUT, INSERT_ROWS])
                    .json(&body),
                "append row",
            )
            .await?;
        let appended: AppendValuesResponse = response
            .json()
            .await
            .map_err(|e| SheetError::unexpected(format!("append row: malformed response: {e}")))?;

        Ok(AppendOutcome {
            rows_added: appended.updates.and_then(|u| u.updated_rows).unwrap_or(0),
        })
    }
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::service::HEADER_ROW;
    use crate::test_support::TEST_KEY;
    use httpmock::prelude::*;

    const SHEET_PATH: &str = "/v4/spreadsheets/sheet-123/values/";
    const ROW: [&str; 6] = [
        "Jo Li",
        "jo@x.com",
        "+919876543210",
        "Need full automation",
        "automation",
        "03/07/2024, 03:04:05 PM",
    ];

    fn config(server: &MockServer) -> LeadCaptureConfig {
        LeadCaptureConfig {
            spreadsheet_id: "sheet-123".to_owned(),
            sheets_base_url: server.base_url(),
            token_uri: server.url("/token"),
            client_email: Some("svc@proj.iam.gserviceaccount.com".to_owned()),
            private_key: Some(SecretString::from(TEST_KEY.to_owned())),
            ..LeadCaptureConfig::default()
        }
    }

    fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({ "access_token": "ya29.test", "expires_in": 3600 }));
        })
    }

    async fn session(server: &MockServer) -> Box<dyn LeadSheet> {
        GoogleSheetsClient::new(&config(server))
            .unwrap()
            .connect()
            .await
            .unwrap()
    }

    #[test]
    fn endpoints_encode_ranges() {
        let endpoints = SheetEndpoints::new(&LeadCaptureConfig::default());
        assert_eq!(
            endpoints.header_url,
            concat!(
                "https://sheets.googleapis.com/v4/spreadsheets/",
                "1lwFo4LOcoExCIhxg9v399ctPPvB-AhylVjUsoEwSMVU/values/Sheet1%21A1%3AE1"
            )
        );
        assert!(endpoints.append_url.ends_with("/values/Sheet1%21A%3AF:append"));
    }

    #[test]
    fn statuses_are_classified() {
        let cases = [
            (StatusCode::UNAUTHORIZED, SheetErrorKind::Credentials),
            (StatusCode::FORBIDDEN, SheetErrorKind::SpreadsheetAccess),
            (StatusCode::NOT_FOUND, SheetErrorKind::SpreadsheetAccess),
            (StatusCode::BAD_REQUEST, SheetErrorKind::SpreadsheetAccess),
            (StatusCode::BAD_GATEWAY, SheetErrorKind::Unexpected),
        ];
        for (status, kind) in cases {
            assert_eq!(classify_status(status), kind, "{status}");
        }
    }

    #[tokio::test]
    async fn connect_without_credentials_is_a_credentials_error() {
        let server = MockServer::start();
        let cfg = LeadCaptureConfig {
            client_email: None,
            ..config(&server)
        };
        let client = GoogleSheetsClient::new(&cfg).unwrap();
        assert!(!client.has_credentials());

        let Err(err) = client.connect().await else {
            panic!("connect should fail without credentials");
        };
        assert_eq!(err.kind, SheetErrorKind::Credentials);
    }

    #[tokio::test]
    async fn read_header_returns_first_row() {
        let server = MockServer::start();
        mock_token(&server);
        let read = server.mock(|when, then| {
            when.method(GET)
                .path_includes(SHEET_PATH)
                .header("authorization", "Bearer ya29.test");
            then.status(200).json_body(json!({
                "range": "Sheet1!A1:E1",
                "majorDimension": "ROWS",
                "values": [HEADER_ROW]
            }));
        });

        let header = session(&server).await.read_header().await.unwrap().unwrap();

        assert_eq!(header.len(), 5);
        assert_eq!(header[0], "Full Name");
        read.assert();
    }

    #[tokio::test]
    async fn read_header_of_empty_range_is_none() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(GET).path_includes(SHEET_PATH);
            then.status(200)
                .json_body(json!({ "range": "Sheet1!A1:E1", "majorDimension": "ROWS" }));
        });

        assert_eq!(session(&server).await.read_header().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_header_puts_raw_values() {
        let server = MockServer::start();
        mock_token(&server);
        let write = server.mock(|when, then| {
            when.method(PUT)
                .path_includes(SHEET_PATH)
                .query_param("valueInputOption", "RAW")
                .body_includes("\"Choose Your Service\"");
            then.status(200).json_body(json!({ "updatedRows": 1 }));
        });

        session(&server)
            .await
            .write_header(&HEADER_ROW)
            .await
            .unwrap();

        write.assert();
    }

    #[tokio::test]
    async fn append_inserts_rows_and_reports_count() {
        let server = MockServer::start();
        mock_token(&server);
        let append = server.mock(|when, then| {
            when.method(POST)
                .path_includes(":append")
                .query_param("valueInputOption", "RAW")
                .query_param("insertDataOption", "INSERT_ROWS")
                .json_body(json!({ "majorDimension": "ROWS", "values": [ROW] }));
            then.status(200).json_body(json!({
                "spreadsheetId": "sheet-123",
                "updates": {
                    "updatedRange": "Sheet1!A2:F2",
                    "updatedRows": 1,
                    "updatedColumns": 6,
                    "updatedCells": 6
                }
            }));
        });

        let row = ROW.map(str::to_owned).to_vec();
        let outcome = session(&server).await.append_row(row).await.unwrap();

        assert_eq!(outcome.rows_added, 1);
        append.assert();
    }

    #[tokio::test]
    async fn append_without_updates_counts_zero_rows() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(POST).path_includes(":append");
            then.status(200)
                .json_body(json!({ "spreadsheetId": "sheet-123" }));
        });

        let outcome = session(&server)
            .await
            .append_row(vec!["x".to_owned()])
            .await
            .unwrap();
        assert_eq!(outcome.rows_added, 0);
    }

    #[tokio::test]
    async fn forbidden_sheet_is_a_spreadsheet_access_error() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(POST).path_includes(":append");
            then.status(403).json_body(json!({
                "error": {
                    "code": 403,
                    "message": "The caller does not have permission",
                    "status": "PERMISSION_DENIED"
                }
            }));
        });

        let err = session(&server)
            .await
            .append_row(vec!["x".to_owned()])
            .await
            .unwrap_err();

        assert_eq!(err.kind, SheetErrorKind::SpreadsheetAccess);
        assert!(err.message.contains("PERMISSION_DENIED"), "{}", err.message);
    }

    #[tokio::test]
    async fn server_error_is_unexpected() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(POST).path_includes(":append");
            then.status(503).body("upstream unavailable");
        });

        let err = session(&server)
            .await
            .append_row(vec!["x".to_owned()])
            .await
            .unwrap_err();
        assert_eq!(err.kind, SheetErrorKind::Unexpected);
    }

    #[tokio::test]
    async fn token_is_shared_across_sessions() {
        let server = MockServer::start();
        let token = mock_token(&server);
        let client = GoogleSheetsClient::new(&config(&server)).unwrap();

        for _ in 0..3 {
            let Ok(_session) = client.connect().await else {
                panic!("connect failed");
            };
        }

        token.assert_calls(1);
    }
}
