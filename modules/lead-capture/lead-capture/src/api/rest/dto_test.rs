use serde_json::json;

use super::dto::*;
use lead_capture_sdk::{LeadSubmissionInput, SubmissionReceipt};

#[test]
fn request_reads_camel_case_fields() {
    let body = concat!(
        r#"{"fullName":"Jo Li","email":"jo@x.com","whatsapp":"+1","#,
        r#""businessGoals":"grow","serviceType":"both"}"#
    );
    let req = SubmitFormRequest::from_slice(body.as_bytes()).unwrap();
    let input = LeadSubmissionInput::from(req);
    assert_eq!(input.full_name.as_deref(), Some("Jo Li"));
    assert_eq!(input.business_goals.as_deref(), Some("grow"));
    assert_eq!(input.service_type.as_deref(), Some("both"));
}

#[test]
fn non_string_fields_are_treated_as_absent() {
    let body = concat!(
        r#"{"fullName":42,"email":null,"whatsapp":["+1"],"#,
        r#""businessGoals":{"a":1},"serviceType":true}"#
    );
    let req = SubmitFormRequest::from_slice(body.as_bytes()).unwrap();
    let input = LeadSubmissionInput::from(req);
    assert_eq!(input, LeadSubmissionInput::default());
}

#[test]
fn unknown_fields_are_ignored() {
    let req = SubmitFormRequest::from_slice(br#"{"fullName":"Jo","utm":"x"}"#).unwrap();
    assert_eq!(req.full_name.as_deref(), Some("Jo"));
}

#[test]
fn only_objects_are_accepted() {
    let bodies: [&[u8]; 5] = [b"[1,2]", b"\"text\"", b"null", b"{not json", b""];
    for body in bodies {
        assert!(SubmitFormRequest::from_slice(body).is_err(), "{body:?}");
    }
}

#[test]
fn success_body_shape() {
    let body = serde_json::to_value(SubmitFormResponse::from(SubmissionReceipt {
        submitted_at: "03/07/2024, 03:04:05 PM".to_owned(),
        rows_added: 1,
    }))
    .unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Form submitted successfully",
            "data": { "submittedAt": "03/07/2024, 03:04:05 PM", "rowsAdded": 1 }
        })
    );
}

#[test]
fn failure_bodies_omit_empty_parts() {
    let failure = SubmitFormFailure::validation(vec!["bad".to_owned()]);
    let body = serde_json::to_value(failure).unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "message": "Validation failed", "errors": ["bad"] })
    );

    let body = serde_json::to_value(SubmitFormFailure::internal("try later", None)).unwrap();
    assert_eq!(body, json!({ "success": false, "message": "try later" }));
}
