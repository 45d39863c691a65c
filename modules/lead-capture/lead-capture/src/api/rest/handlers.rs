use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use super::dto::{SubmitFormRequest, SubmitFormResponse};
use super::error::{
    ErrorExposure, domain_error_to_response, invalid_body_response, method_not_allowed_response,
};
use crate::domain::service::Service;

/// `POST /api/submit-form`
///
/// The body is read as bytes and parsed here so that a missing or wrong
/// content type gets the same treatment as any other unreadable body.
pub async fn submit_form(
    Extension(svc): Extension<Arc<Service>>,
    Extension(exposure): Extension<ErrorExposure>,
    body: Bytes,
) -> Response {
    let req = match SubmitFormRequest::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return invalid_body_response(&e),
    };

    match svc.submit(req.into()).await {
        Ok(receipt) => (StatusCode::OK, Json(SubmitFormResponse::from(receipt))).into_response(),
        Err(e) => domain_error_to_response(e, exposure),
    }
}

pub async fn method_not_allowed() -> Response {
    method_not_allowed_response()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
