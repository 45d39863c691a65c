use secrecy::SecretString;
use serde::Deserialize;

pub const CLIENT_EMAIL_ENV: &str = "GOOGLE_SHEETS_CLIENT_EMAIL";
pub const PRIVATE_KEY_ENV: &str = "GOOGLE_SHEETS_PRIVATE_KEY";

/// Configuration for the `lead_capture` module
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeadCaptureConfig {
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    /// Range holding the column titles, read and written as one row.
    #[serde(default = "default_header_range")]
    pub header_range: String,
    /// Full-column range new rows are appended to.
    #[serde(default = "default_append_range")]
    pub append_range: String,
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Service-account email. Falls back to `GOOGLE_SHEETS_CLIENT_EMAIL`.
    #[serde(default)]
    pub client_email: Option<String>,
    /// PEM private key, `\n`-escaped or not. Falls back to `GOOGLE_SHEETS_PRIVATE_KEY`.
    #[serde(default)]
    pub private_key: Option<SecretString>,
}

impl Default for LeadCaptureConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            header_range: default_header_range(),
            append_range: default_append_range(),
            sheets_base_url: default_sheets_base_url(),
            token_uri: default_token_uri(),
            client_email: None,
            private_key: None,
        }
    }
}

impl LeadCaptureConfig {
    /// Fill unset credentials from the process environment.
    #[must_use]
    pub fn with_env_credentials(self) -> Self {
        self.with_credentials_from(|name| std::env::var(name).ok())
    }

    fn with_credentials_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.client_email.is_none() {
            self.client_email = lookup(CLIENT_EMAIL_ENV).filter(|v| !v.is_empty());
        }
        if self.private_key.is_none() {
            self.private_key = lookup(PRIVATE_KEY_ENV)
                .filter(|v| !v.is_empty())
                .map(SecretString::from);
        }
        self
    }
}

fn default_spreadsheet_id() -> String {
    "1lwFo4LOcoExCIhxg9v399ctPPvB-AhylVjUsoEwSMVU".to_owned()
}

fn default_header_range() -> String {
    "Sheet1!A1:E1".to_owned()
}

fn default_append_range() -> String {
    "Sheet1!A:F".to_owned()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_owned()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_owned()
}
