//! Lead Capture SDK
//!
//! This crate provides the public API for the lead-capture module:
//! - `LeadCaptureClientV1` trait for in-process callers
//! - Model types (`LeadSubmissionInput`, `LeadSubmission`, `ServiceType`)
//! - The validation rule set shared by the submission endpoint and the form controller
//! - Error types (`LeadError`, `ValidationErrors`, `FieldViolation`)
//!
//! Rules live in [`validation`] only. Both the authoritative endpoint and the
//! interactive form call into it, so a lead accepted by one is accepted by the other.

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;
pub mod validation;

#[cfg(test)]
mod validation_test;

pub use api::LeadCaptureClientV1;
pub use errors::{FieldViolation, LeadError, ValidationErrors};
pub use models::{
    LeadField, LeadSubmission, LeadSubmissionInput, ServiceOption, ServiceType, SubmissionReceipt,
};
pub use validation::validate;
