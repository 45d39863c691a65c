use std::fmt;

use jsonwebtoken::EncodingKey;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::error::SheetError;

/// OAuth scope granting read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Service-account identity with its RS256 signing key parsed once.
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    client_email: String,
    signing_key: EncodingKey,
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

impl ServiceAccountCredentials {
    /// Build credentials from the configured email and PEM key.
    ///
    /// Keys copied from a JSON key file into an env var usually carry literal
    /// `\n` sequences; those are turned back into newlines first.
    ///
    /// # Errors
    /// Returns a `Credentials` [`SheetError`] when either part is missing or the
    /// key is not a valid RSA private key.
    pub fn from_parts(
        client_email: Option<&str>,
        private_key: Option<&SecretString>,
    ) -> Result<Self, SheetError> {
        let client_email = client_email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| SheetError::credentials("service account client email is not set"))?;
        let private_key = private_key
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SheetError::credentials("service account private key is not set"))?;

        let pem = unescape_newlines(private_key);
        let signing_key = EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
            SheetError::credentials(format!("invalid service account private key: {e}"))
        })?;

        Ok(Self {
            client_email: client_email.to_owned(),
            signing_key,
        })
    }

    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub(crate) fn signing_key(&self) -> &EncodingKey {
        &self.signing_key
    }
}

fn unescape_newlines(raw: &str) -> String {
    raw.trim().replace("\\n", "\n")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::error::SheetErrorKind;
    use crate::test_support::TEST_KEY;

    fn parse(
        email: Option<&str>,
        key: Option<&str>,
    ) -> Result<ServiceAccountCredentials, SheetError> {
        let key = key.map(|k| SecretString::from(k.to_owned()));
        ServiceAccountCredentials::from_parts(email, key.as_ref())
    }

    #[test]
    fn parses_a_pem_key() {
        let creds = parse(Some("svc@proj.iam.gserviceaccount.com"), Some(TEST_KEY)).unwrap();
        assert_eq!(creds.client_email(), "svc@proj.iam.gserviceaccount.com");
    }

    #[test]
    fn parses_a_key_with_escaped_newlines() {
        let escaped = TEST_KEY.trim().replace('\n', "\\n");
        assert!(!escaped.contains('\n'));
        parse(Some("svc@x"), Some(&escaped)).unwrap();
    }

    #[test]
    fn missing_parts_are_credential_errors() {
        let err = parse(None, Some(TEST_KEY)).unwrap_err();
        assert_eq!(err.kind, SheetErrorKind::Credentials);
        assert!(err.message.contains("client email"));

        let err = parse(Some("svc@x"), None).unwrap_err();
        assert!(err.message.contains("private key"));

        let err = parse(Some("  "), Some(TEST_KEY)).unwrap_err();
        assert!(err.message.contains("client email"));
    }

    #[test]
    fn garbage_key_is_a_credential_error() {
        let err = parse(Some("svc@x"), Some("not a key")).unwrap_err();
        assert_eq!(err.kind, SheetErrorKind::Credentials);
    }

    #[test]
    fn debug_output_hides_the_key() {
        let creds = parse(Some("svc@x"), Some(TEST_KEY)).unwrap();
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("PRIVATE KEY"));
    }
}
