#![allow(clippy::unwrap_used, clippy::expect_used, clippy::non_ascii_literal)]

use crate::models::{LeadField, LeadSubmissionInput, ServiceType};
use crate::validation::*;

fn valid_input() -> LeadSubmissionInput {
    LeadSubmissionInput {
        full_name: Some("Jo Li".to_owned()),
        email: Some("JO@X.COM ".to_owned()),
        whatsapp: Some("+919876543210".to_owned()),
        business_goals: Some("Need full automation".to_owned()),
        service_type: Some("automation".to_owned()),
    }
}

#[test]
fn valid_input_is_normalized() {
    let mut input = valid_input();
    input.full_name = Some("  Jo Li  ".to_owned());
    input.business_goals = Some("\tNeed full automation\n".to_owned());

    let lead = validate(&input).unwrap();

    assert_eq!(lead.full_name, "Jo Li");
    assert_eq!(lead.email, "jo@x.com");
    assert_eq!(lead.whatsapp, "+919876543210");
    assert_eq!(lead.business_goals, "Need full automation");
    assert_eq!(lead.service_type, ServiceType::Automation);
}

#[test]
fn whatsapp_accepts_international_and_plain_numbers() {
    assert!(is_valid_whatsapp("+14155551234"));
    assert!(is_valid_whatsapp("4155551234"));
    assert!(is_valid_whatsapp("+1 415 555 1234"));
    assert!(is_valid_whatsapp("7"));
}

#[test]
fn whatsapp_rejects_leading_zero_letters_and_overlong() {
    assert!(!is_valid_whatsapp("0123456"));
    assert!(!is_valid_whatsapp("0099"));
    assert!(!is_valid_whatsapp("abc123"));
    assert!(!is_valid_whatsapp("+"));
    assert!(!is_valid_whatsapp("++14155551234"));
    // 17 digits
    assert!(!is_valid_whatsapp("12345678901234567"));
    assert!(is_valid_whatsapp("1234567890123456"));
}

#[test]
fn whatsapp_rejects_non_ascii_digits() {
    // Arabic-Indic: +1 4155
    let arabic_indic = "+1\u{0664}\u{0661}\u{0665}\u{0665}";
    // Fullwidth: 1 415
    let fullwidth = "1\u{FF14}\u{FF11}\u{FF15}";
    assert!(!is_valid_whatsapp(arabic_indic));
    assert!(!is_valid_whatsapp(fullwidth));
    assert_eq!(
        check_whatsapp(Some(arabic_indic)),
        Err(RuleFailure::Invalid)
    );
}

#[test]
fn whatsapp_is_stored_trimmed_with_inner_spaces_kept() {
    let stored = check_whatsapp(Some("  +1 415 555 1234 ")).unwrap();
    assert_eq!(stored, "+1 415 555 1234");
}

#[test]
fn business_goals_boundary_is_ten_chars() {
    assert_eq!(
        check_business_goals(Some("0123456789")).unwrap(),
        "0123456789"
    );
    assert_eq!(
        check_business_goals(Some("012345678")),
        Err(RuleFailure::Invalid)
    );
    // surrounding whitespace does not count
    assert_eq!(
        check_business_goals(Some("   012345678   ")),
        Err(RuleFailure::Invalid)
    );
}

#[test]
fn lengths_count_characters_not_bytes() {
    assert!(check_full_name(Some("Zé")).is_ok());
    assert_eq!(check_full_name(Some("é")), Err(RuleFailure::Invalid));
}

#[test]
fn email_shape() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email(" a@b.co "));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.d"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a@@b.co"));
}

#[test]
fn missing_and_blank_are_reported_as_missing() {
    assert_eq!(check_full_name(None), Err(RuleFailure::Missing));
    assert_eq!(check_email(Some("   ")), Err(RuleFailure::Missing));
    assert_eq!(check_service_type(Some("")), Err(RuleFailure::Missing));
}

#[test]
fn service_type_must_be_a_known_option() {
    assert_eq!(
        check_service_type(Some(" Visual ")),
        Ok(ServiceType::Visual)
    );
    assert_eq!(check_service_type(Some("both")), Ok(ServiceType::Both));
    assert_eq!(check_service_type(Some("x")), Err(RuleFailure::Invalid));
    assert_eq!(
        check_service_type(Some("consulting")),
        Err(RuleFailure::Invalid)
    );
}

#[test]
fn every_failing_field_is_reported_in_order() {
    let input = LeadSubmissionInput {
        full_name: Some("J".to_owned()),
        email: None,
        whatsapp: Some("0099".to_owned()),
        business_goals: Some("short".to_owned()),
        service_type: Some(String::new()),
    };

    let errors = validate(&input).unwrap_err();
    let fields: Vec<LeadField> = errors.iter().map(|v| v.field).collect();

    assert_eq!(fields, LeadField::ALL.to_vec());
    assert_eq!(
        errors.messages(),
        vec![
            "Full name must be at least 2 characters long",
            "Please provide a valid email address",
            "Please provide a valid WhatsApp number",
            "Business goals must be at least 10 characters long",
            "Please select a service type",
        ]
    );
}

#[test]
fn single_bad_field_rejects_whole_submission() {
    let mut input = valid_input();
    input.whatsapp = Some("0099".to_owned());

    let errors = validate(&input).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors.messages()[0].contains("WhatsApp"));
}

#[test]
fn check_field_matches_validate() {
    let input = valid_input();
    for field in LeadField::ALL {
        assert!(check_field(field, input.get(field)).is_ok(), "{field}");
    }
}
