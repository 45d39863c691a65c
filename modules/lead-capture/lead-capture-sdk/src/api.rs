//! `LeadCaptureClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::LeadError;
use crate::models::{LeadSubmissionInput, SubmissionReceipt};

/// Public API trait for the lead-capture module (Version 1).
///
/// Implemented in-process by the module's local client; the REST endpoint
/// is a thin adapter over the same service.
#[async_trait]
pub trait LeadCaptureClientV1: Send + Sync {
    /// Validate, normalize and record one lead.
    ///
    /// Returns [`LeadError::Validation`] without touching the sheet when any
    /// field fails its rule.
    async fn submit(&self, input: LeadSubmissionInput) -> Result<SubmissionReceipt, LeadError>;
}
