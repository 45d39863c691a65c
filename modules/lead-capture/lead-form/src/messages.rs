//! Wording shown next to form fields.

use lead_capture_sdk::LeadField;
use lead_capture_sdk::validation::RuleFailure;

/// Shown when the request never produced a usable reply.
pub const GENERIC_SUBMIT_ERROR: &str = "An unexpected error occurred. Please try again.";

#[must_use]
pub fn field_message(field: LeadField, failure: RuleFailure) -> &'static str {
    match (field, failure) {
        (LeadField::FullName, RuleFailure::Missing) => "Please enter your full name.",
        (LeadField::FullName, RuleFailure::Invalid) => {
            "Full name must be at least 2 characters long."
        }
        (LeadField::Email, _) => "Please enter a valid email address.",
        (LeadField::Whatsapp, RuleFailure::Missing) => "Please enter your WhatsApp number.",
        (LeadField::Whatsapp, RuleFailure::Invalid) => {
            "Please enter a valid WhatsApp number (must start with 1-9, not 0)."
        }
        (LeadField::BusinessGoals, RuleFailure::Missing) => {
            "Tell us about your goals and challenges."
        }
        (LeadField::BusinessGoals, RuleFailure::Invalid) => {
            "Please provide at least 10 characters describing your goals and challenges."
        }
        (LeadField::ServiceType, RuleFailure::Missing) => "Please select a service type.",
        (LeadField::ServiceType, RuleFailure::Invalid) => "Please select a valid service type.",
    }
}
