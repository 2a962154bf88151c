use super::common::*;
use serde_json::{json, Value};

use crate::workflows::contact::domain::{ContactFormInput, Field, SubmissionVariant};
use crate::workflows::contact::validation::{
    FormValidator, INVALID_FORM_TYPE_MESSAGE, REQUIRED_MESSAGE,
};

#[test]
fn valid_job_seeker_yields_matching_variant() {
    let submission = FormValidator::new()
        .validate(&job_seeker_input())
        .expect("payload is valid");

    match submission {
        SubmissionVariant::JobSeeker(ref seeker) => {
            assert_eq!(seeker.full_name, "Jana Nováková");
            assert_eq!(seeker.phone_number, "+420777123456");
            assert_eq!(seeker.email, "jana@example.com");
            assert_eq!(seeker.suggestion, "I am looking for warehouse work in Prague.");
            assert!(seeker.agree_to_privacy);
        }
        other => panic!("expected job seeker submission, got {other:?}"),
    }
    assert_eq!(submission.company_name(), None);
}

#[test]
fn valid_employer_yields_company_name() {
    let submission = FormValidator::new()
        .validate(&employer_input())
        .expect("payload is valid");

    assert_eq!(submission.company_name(), Some("Sklady Praha s.r.o."));
    assert_eq!(submission.full_name(), "Petr Svoboda");
}

#[test]
fn each_single_violation_names_its_field() {
    let cases: Vec<(Field, Value)> = vec![
        (Field::FullName, json!("J")),
        (Field::PhoneNumber, json!("77712345")),
        (Field::Email, json!("jana.example.com")),
        (Field::Email, json!("jana@localhost")),
        (Field::Email, json!("jana@example")),
        (Field::Email, json!("jana!x@example.com")),
        (Field::Email, json!("a@[127.0.0.1]")),
        (Field::Email, json!(".jana@example.com")),
        (Field::CompanyName, json!("S")),
        (Field::Suggestion, json!("Hire me")),
        (Field::AgreeToPrivacy, json!(false)),
    ];

    for (field, value) in cases {
        let input = employer_input().with(field, value);
        let errors = FormValidator::new()
            .validate(&input)
            .expect_err("single violation must fail");
        assert!(errors.contains(field), "{field} missing from {errors}");
        assert_eq!(errors.len(), 1, "only {field} should fail: {errors}");
    }
}

#[test]
fn all_violations_are_reported_in_one_pass() {
    let input = ContactFormInput::new()
        .with(Field::FormType, "employer")
        .with(Field::FullName, "P")
        .with(Field::Email, "not-an-email")
        .with(Field::Suggestion, "short")
        .with(Field::AgreeToPrivacy, false);

    let errors = FormValidator::new()
        .validate(&input)
        .expect_err("payload is invalid");

    for field in [
        Field::FullName,
        Field::PhoneNumber,
        Field::Email,
        Field::CompanyName,
        Field::Suggestion,
        Field::AgreeToPrivacy,
    ] {
        assert!(errors.contains(field), "{field} missing from {errors}");
    }
    assert_eq!(errors.first(Field::PhoneNumber), Some(REQUIRED_MESSAGE));
    assert_eq!(errors.first(Field::CompanyName), Some(REQUIRED_MESSAGE));
}

#[test]
fn job_seeker_does_not_require_company_name() {
    let mut input = job_seeker_input();
    input.remove(Field::CompanyName);
    assert!(FormValidator::new().validate(&input).is_ok());
}

#[test]
fn job_seeker_ignores_company_name_and_extra_fields() {
    let input = ContactFormInput::from_value(json!({
        "formType": "jobSeeker",
        "fullName": "Jana Nováková",
        "phoneNumber": "+420777123456",
        "email": "jana@example.com",
        "companyName": "X",
        "suggestion": "I am looking for warehouse work in Prague.",
        "agreeToPrivacy": true,
        "utm_source": "newsletter",
    }))
    .expect("object payload");

    let submission = FormValidator::new()
        .validate(&input)
        .expect("extra fields are ignored");
    assert_eq!(submission.company_name(), None);
}

#[test]
fn employer_without_company_name_fails_on_company_name() {
    let mut input = employer_input();
    input.remove(Field::CompanyName);

    let errors = FormValidator::new()
        .validate(&input)
        .expect_err("company name is required");
    assert!(errors.contains(Field::CompanyName));
    assert_eq!(errors.len(), 1);
}

#[test]
fn privacy_refusal_always_fails() {
    for input in [job_seeker_input(), employer_input()] {
        let input = input.with(Field::AgreeToPrivacy, false);
        let errors = FormValidator::new()
            .validate(&input)
            .expect_err("privacy must be accepted");
        assert_eq!(
            errors.first(Field::AgreeToPrivacy),
            Some("You must agree to the Privacy Policy")
        );
    }

    let mut missing = job_seeker_input();
    missing.remove(Field::AgreeToPrivacy);
    let errors = FormValidator::new()
        .validate(&missing)
        .expect_err("absent consent fails");
    assert!(errors.contains(Field::AgreeToPrivacy));
}

#[test]
fn unknown_form_type_is_reported_on_discriminator_only() {
    let input = job_seeker_input().with(Field::FormType, "student");
    let errors = FormValidator::new()
        .validate(&input)
        .expect_err("unknown discriminator");
    assert_eq!(errors.first(Field::FormType), Some(INVALID_FORM_TYPE_MESSAGE));
    assert_eq!(errors.len(), 1);

    let mut missing = job_seeker_input();
    missing.remove(Field::FormType);
    assert!(FormValidator::new()
        .validate(&missing)
        .expect_err("missing discriminator")
        .contains(Field::FormType));
}

#[test]
fn validation_is_idempotent() {
    let validator = FormValidator::new();
    let input = employer_input();
    let first = validator.validate(&input).expect("valid");
    let second = validator.validate(&input).expect("valid");
    assert_eq!(first, second);
    assert_eq!(input, employer_input());
}
