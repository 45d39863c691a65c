//! `OAuth2` JWT-bearer grant with a shared access-token cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use chrono::Utc;
use jsonwebtoken::{Algorithm, Header};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::credentials::{SHEETS_SCOPE, ServiceAccountCredentials};
use crate::domain::error::SheetError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;
/// A cached token is refreshed this long before it actually expires.
const REFRESH_SKEW: Duration = Duration::from_mins(1);

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

struct CachedToken {
    value: SecretString,
    refresh_at: Instant,
}

/// Hands out access tokens for one service account.
///
/// Reads are lock-free; a refresh is serialized so concurrent requests share
/// a single round-trip to the token endpoint.
pub struct TokenProvider {
    http: reqwest::Client,
    token_uri: String,
    credentials: ServiceAccountCredentials,
    cache: ArcSwapOption<CachedToken>,
    refresh_lock: Mutex<()>,
}

impl TokenProvider {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        token_uri: impl Into<String>,
        credentials: ServiceAccountCredentials,
    ) -> Self {
        Self {
            http,
            token_uri: token_uri.into(),
            credentials,
            cache: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// A valid access token, fetched only when the cached one is stale.
    ///
    /// # Errors
    /// Returns a `Credentials` [`SheetError`] when the assertion cannot be signed
    /// or the token endpoint refuses it.
    pub async fn access_token(&self) -> Result<SecretString, SheetError> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let fresh = self.fetch().await?;
        let value = fresh.value.clone();
        self.cache.store(Some(Arc::new(fresh)));
        Ok(value)
    }

    fn cached(&self) -> Option<SecretString> {
        self.cache
            .load_full()
            .filter(|t| Instant::now() < t.refresh_at)
            .map(|t| t.value.clone())
    }

    fn sign_assertion(&self) -> Result<String, SheetError> {
        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: self.credentials.client_email(),
            scope: SHEETS_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.credentials.signing_key(),
        )
        .map_err(|e| SheetError::credentials(format!("failed to sign token assertion: {e}")))
    }

    async fn fetch(&self) -> Result<CachedToken, SheetError> {
        let assertion = self.sign_assertion()?;
        debug!(token_uri = %self.token_uri, "requesting access token");

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SheetError::credentials(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
                |_| format!("HTTP {status}"),
                |e| match e.error_description {
                    Some(desc) => format!("HTTP {status}: {}: {desc}", e.error),
                    None => format!("HTTP {status}: {}", e.error),
                },
            );
            warn!(%status, "token endpoint rejected the assertion");
            return Err(SheetError::credentials(format!("token request failed: {reason}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetError::credentials(format!("malformed token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS));
        Ok(CachedToken {
            value: SecretString::from(token.access_token),
            refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_SKEW),
        })
    }
}
