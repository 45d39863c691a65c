//! Lead Capture Module Implementation
//!
//! Validates lead submissions and appends them to a Google Sheet. The public
//! API is defined in `lead-capture-sdk` and re-exported here.

#![forbid(unsafe_code)]

pub use lead_capture_sdk::{LeadCaptureClientV1, LeadError, LeadSubmissionInput, SubmissionReceipt};

pub mod module;
pub use module::{LeadCaptureModule, MODULE_NAME};

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
