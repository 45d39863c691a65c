//! Field rules for a lead submission.
//!
//! Each `check_*` function takes the raw value, decides whether it passes and
//! returns the normalized value. Callers pick their own wording from the
//! [`RuleFailure`]; [`validate`] uses the endpoint wording.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{FieldViolation, ValidationErrors};
use crate::models::{LeadField, LeadSubmission, LeadSubmissionInput, ServiceType};

pub const FULL_NAME_MIN_CHARS: usize = 2;
pub const BUSINESS_GOALS_MIN_CHARS: usize = 10;
pub const SERVICE_TYPE_MIN_CHARS: usize = 2;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic")
});
// International form only: no leading zero, optional `+`, at most 16 ASCII digits.
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static WHATSAPP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("static regex should not panic")
});

/// Why a single field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFailure {
    /// Absent, or empty after trimming.
    Missing,
    /// Present but does not satisfy the rule.
    Invalid,
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Matches after removing every whitespace character, so `+1 415 555 1234` passes.
#[must_use]
pub fn is_valid_whatsapp(number: &str) -> bool {
    let compact: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    WHATSAPP_REGEX.is_match(&compact)
}

fn non_empty(raw: Option<&str>) -> Result<&str, RuleFailure> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RuleFailure::Missing),
    }
}

fn min_chars(value: &str, min: usize) -> Result<(), RuleFailure> {
    if value.chars().count() < min {
        Err(RuleFailure::Invalid)
    } else {
        Ok(())
    }
}

/// # Errors
/// Returns [`RuleFailure`] when the trimmed name is shorter than two characters.
pub fn check_full_name(raw: Option<&str>) -> Result<String, RuleFailure> {
    let v = non_empty(raw)?;
    min_chars(v, FULL_NAME_MIN_CHARS)?;
    Ok(v.to_owned())
}

/// # Errors
/// Returns [`RuleFailure`] when the value is not shaped like `local@domain.tld`.
pub fn check_email(raw: Option<&str>) -> Result<String, RuleFailure> {
    let v = non_empty(raw)?;
    if !is_valid_email(v) {
        return Err(RuleFailure::Invalid);
    }
    Ok(v.to_lowercase())
}

/// # Errors
/// Returns [`RuleFailure`] when the number has a leading zero, non-digits, or more than 16 digits.
pub fn check_whatsapp(raw: Option<&str>) -> Result<String, RuleFailure> {
    let v = non_empty(raw)?;
    if !is_valid_whatsapp(v) {
        return Err(RuleFailure::Invalid);
    }
    Ok(v.to_owned())
}

/// # Errors
/// Returns [`RuleFailure`] when fewer than ten characters remain after trimming.
pub fn check_business_goals(raw: Option<&str>) -> Result<String, RuleFailure> {
    let v = non_empty(raw)?;
    min_chars(v, BUSINESS_GOALS_MIN_CHARS)?;
    Ok(v.to_owned())
}

/// # Errors
/// Returns [`RuleFailure`] when no service is selected or the id is unknown.
pub fn check_service_type(raw: Option<&str>) -> Result<ServiceType, RuleFailure> {
    let v = non_empty(raw)?;
    min_chars(v, SERVICE_TYPE_MIN_CHARS)?;
    v.parse().map_err(|_| RuleFailure::Invalid)
}

/// Endpoint wording for a failed field. The form has its own, friendlier set.
#[must_use]
pub fn endpoint_message(field: LeadField) -> &'static str {
    match field {
        LeadField::FullName => "Full name must be at least 2 characters long",
        LeadField::Email => "Please provide a valid email address",
        LeadField::Whatsapp => "Please provide a valid WhatsApp number",
        LeadField::BusinessGoals => "Business goals must be at least 10 characters long",
        LeadField::ServiceType => "Please select a service type",
    }
}

/// Run a single field's rule, discarding the normalized value.
///
/// # Errors
/// Returns the [`RuleFailure`] of the field's rule.
pub fn check_field(field: LeadField, raw: Option<&str>) -> Result<(), RuleFailure> {
    match field {
        LeadField::FullName => check_full_name(raw).map(drop),
        LeadField::Email => check_email(raw).map(drop),
        LeadField::Whatsapp => check_whatsapp(raw).map(drop),
        LeadField::BusinessGoals => check_business_goals(raw).map(drop),
        LeadField::ServiceType => check_service_type(raw).map(drop),
    }
}

/// Validate every field and build the normalized lead.
///
/// All five rules run; the error lists every failing field in column order.
///
/// # Errors
/// Returns [`ValidationErrors`] when at least one field fails.
pub fn validate(input: &LeadSubmissionInput) -> Result<LeadSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut record = |field: LeadField| {
        errors.push(FieldViolation::new(field, endpoint_message(field)));
    };

    let full_name = check_full_name(input.full_name.as_deref())
        .map_err(|_| record(LeadField::FullName))
        .ok();
    let email = check_email(input.email.as_deref())
        .map_err(|_| record(LeadField::Email))
        .ok();
    let whatsapp = check_whatsapp(input.whatsapp.as_deref())
        .map_err(|_| record(LeadField::Whatsapp))
        .ok();
    let business_goals = check_business_goals(input.business_goals.as_deref())
        .map_err(|_| record(LeadField::BusinessGoals))
        .ok();
    let service_type = check_service_type(input.service_type.as_deref())
        .map_err(|_| record(LeadField::ServiceType))
        .ok();

    match (full_name, email, whatsapp, business_goals, service_type) {
        (
            Some(full_name),
            Some(email),
            Some(whatsapp),
            Some(business_goals),
            Some(service_type),
        ) => Ok(LeadSubmission {
            full_name,
            email,
            whatsapp,
            business_goals,
            service_type,
        }),
        _ => Err(errors),
    }
}
