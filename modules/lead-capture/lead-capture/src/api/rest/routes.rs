use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use super::error::ErrorExposure;
use super::handlers;
use crate::domain::service::Service;

pub const SUBMIT_FORM_PATH: &str = "/api/submit-form";
pub const HEALTH_PATH: &str = "/health";

/// Mount the submission endpoint and the health check.
///
/// Any method other than POST on the submission path gets the endpoint's own
/// 405 body instead of axum's empty one.
pub fn register_routes(router: Router, service: Arc<Service>, exposure: ErrorExposure) -> Router {
    router
        .route(
            SUBMIT_FORM_PATH,
            post(handlers::submit_form).fallback(handlers::method_not_allowed),
        )
        .route(HEALTH_PATH, get(handlers::health))
        .layer(Extension(service))
        .layer(Extension(exposure))
}
