use std::sync::Arc;

use axum::Router;
use lead_bootstrap::AppConfig;
use lead_capture_sdk::LeadCaptureClientV1;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::rest::error::ErrorExposure;
use crate::api::rest::routes::register_routes;
use crate::config::LeadCaptureConfig;
use crate::domain::service::Service;
use crate::infra::sheets::GoogleSheetsClient;
use crate::local_client::LocalClient;

/// Name of the module section in the application config.
pub const MODULE_NAME: &str = "lead_capture";

/// Lead capture module: the submission service plus its REST surface.
pub struct LeadCaptureModule {
    service: Arc<Service>,
    exposure: ErrorExposure,
}

impl LeadCaptureModule {
    #[must_use]
    pub fn new(service: Arc<Service>, exposure: ErrorExposure) -> Self {
        Self { service, exposure }
    }

    /// Wire the Google Sheets adapter from `modules.lead_capture.config`.
    ///
    /// Missing credentials are logged, not fatal: the endpoint stays up and
    /// answers submissions with a configuration error.
    ///
    /// # Errors
    /// Fails when the module section is malformed or the HTTP client cannot be built.
    pub fn from_app_config(app: &AppConfig) -> anyhow::Result<Self> {
        let cfg: LeadCaptureConfig = app.module_config_or_default(MODULE_NAME)?;
        let cfg = cfg.with_env_credentials();
        let sheets = GoogleSheetsClient::new(&cfg)?;

        info!(
            spreadsheet_id = %cfg.spreadsheet_id,
            header_range = %cfg.header_range,
            append_range = %cfg.append_range,
            credentials = sheets.has_credentials(),
            "lead capture module initialized"
        );

        Ok(Self::new(
            Arc::new(Service::new(Arc::new(sheets))),
            ErrorExposure::for_environment(app.server.environment),
        ))
    }

    /// Routes of this module, with request tracing.
    pub fn router(&self) -> Router {
        register_routes(Router::new(), Arc::clone(&self.service), self.exposure)
            .layer(TraceLayer::new_for_http())
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn LeadCaptureClientV1> {
        Arc::new(LocalClient::new(Arc::clone(&self.service)))
    }
}
