use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

use super::domain::{
    ContactFormInput, EmployerSubmission, Field, FormType, JobSeekerSubmission, SubmissionVariant,
};

pub const REQUIRED_MESSAGE: &str = "Required";
pub const EXPECTED_STRING_MESSAGE: &str = "Expected string";
pub const EXPECTED_BOOLEAN_MESSAGE: &str = "Expected boolean";
pub const INVALID_FORM_TYPE_MESSAGE: &str =
    "Invalid discriminator value. Expected 'jobSeeker' | 'employer'";

// Local part must end on a non-dot; domain needs at least one label and a 2+ letter TLD.
static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("compile email regex")
});

/// Constraint attached to a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    MinLength(u64),
    Email,
    MustAgree,
}

impl Rule {
    fn for_field(field: Field) -> Option<Rule> {
        match field {
            Field::FullName | Field::CompanyName => Some(Rule::MinLength(2)),
            Field::PhoneNumber => Some(Rule::MinLength(9)),
            Field::Suggestion => Some(Rule::MinLength(10)),
            Field::Email => Some(Rule::Email),
            Field::AgreeToPrivacy => Some(Rule::MustAgree),
            Field::FormType => None,
        }
    }
}

fn violation_message(field: Field) -> &'static str {
    match field {
        Field::FullName => "Full name must be at least 2 characters",
        Field::PhoneNumber => "Please enter a valid phone number",
        Field::Email => "Please enter a valid email address",
        Field::CompanyName => "Company name must be at least 2 characters",
        Field::Suggestion => "Suggestion must be at least 10 characters",
        Field::AgreeToPrivacy => "You must agree to the Privacy Policy",
        Field::FormType => INVALID_FORM_TYPE_MESSAGE,
    }
}

/// Field-level violations keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn clear_field(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> Option<&[String]> {
        self.errors.get(&field).map(Vec::as_slice)
    }

    /// First message for a field, which is what a form renders under the input.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, messages) in &self.errors {
            map.serialize_entry(field.as_str(), messages)?;
        }
        map.end()
    }
}

/// Schema for the two contact form variants.
///
/// The same routine backs interactive feedback (`check_field`) and the
/// authoritative server-side pass (`validate`), so the two cannot drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the discriminator, if it names a known schema.
    pub fn form_type(&self, input: &ContactFormInput) -> Result<FormType, String> {
        match input.get(Field::FormType) {
            Some(Value::String(raw)) => {
                FormType::from_wire(raw).ok_or_else(|| INVALID_FORM_TYPE_MESSAGE.to_string())
            }
            _ => Err(INVALID_FORM_TYPE_MESSAGE.to_string()),
        }
    }

    /// Check one field of the given form type, stopping at the first violation.
    pub fn check_field(
        &self,
        form_type: FormType,
        field: Field,
        value: Option<&Value>,
    ) -> Option<String> {
        if field == Field::FormType {
            return match value {
                Some(Value::String(raw)) if FormType::from_wire(raw).is_some() => None,
                _ => Some(INVALID_FORM_TYPE_MESSAGE.to_string()),
            };
        }

        // Fields outside the selected schema are ignored.
        if !form_type.fields().contains(&field) {
            return None;
        }

        let rule = Rule::for_field(field)?;
        let value = match value {
            None | Some(Value::Null) => return Some(REQUIRED_MESSAGE.to_string()),
            Some(value) => value,
        };

        match rule {
            Rule::MustAgree => match value {
                Value::Bool(true) => None,
                Value::Bool(false) => Some(violation_message(field).to_string()),
                _ => Some(EXPECTED_BOOLEAN_MESSAGE.to_string()),
            },
            Rule::MinLength(min) => match value {
                Value::String(text) => {
                    if utf16_len(text) >= min {
                        None
                    } else {
                        Some(violation_message(field).to_string())
                    }
                }
                _ => Some(EXPECTED_STRING_MESSAGE.to_string()),
            },
            Rule::Email => match value {
                Value::String(text) => {
                    if is_email_address(text) {
                        None
                    } else {
                        Some(violation_message(field).to_string())
                    }
                }
                _ => Some(EXPECTED_STRING_MESSAGE.to_string()),
            },
        }
    }

    /// Validate a full payload, reporting every failing field in one pass.
    pub fn validate(&self, input: &ContactFormInput) -> Result<SubmissionVariant, FieldErrors> {
        let form_type = match self.form_type(input) {
            Ok(form_type) => form_type,
            Err(message) => {
                let mut errors = FieldErrors::new();
                errors.push(Field::FormType, message);
                return Err(errors);
            }
        };

        let mut errors = FieldErrors::new();
        for field in form_type.fields() {
            if let Some(message) = self.check_field(form_type, *field, input.get(*field)) {
                errors.push(*field, message);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(build_variant(form_type, input))
    }
}

/// Length in UTF-16 code units, which is what browsers report for input values.
fn utf16_len(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

fn is_email_address(text: &str) -> bool {
    text.validate_email()
        && !text.starts_with('.')
        && !text.contains("..")
        && EMAIL_ADDRESS.is_match(text)
}

fn text(input: &ContactFormInput, field: Field) -> String {
    input
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Only called once every field of `form_type` has passed its rule.
fn build_variant(form_type: FormType, input: &ContactFormInput) -> SubmissionVariant {
    let agree_to_privacy = matches!(input.get(Field::AgreeToPrivacy), Some(Value::Bool(true)));
    match form_type {
        FormType::JobSeeker => SubmissionVariant::JobSeeker(JobSeekerSubmission {
            full_name: text(input, Field::FullName),
            phone_number: text(input, Field::PhoneNumber),
            email: text(input, Field::Email),
            suggestion: text(input, Field::Suggestion),
            agree_to_privacy,
        }),
        FormType::Employer => SubmissionVariant::Employer(EmployerSubmission {
            full_name: text(input, Field::FullName),
            phone_number: text(input, Field::PhoneNumber),
            email: text(input, Field::Email),
            company_name: text(input, Field::CompanyName),
            suggestion: text(input, Field::Suggestion),
            agree_to_privacy,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn length_counts_utf16_code_units() {
        let validator = FormValidator::new();
        let value = json!("Žo");
        assert_eq!(
            validator.check_field(FormType::JobSeeker, Field::FullName, Some(&value)),
            None
        );

        let value = json!("Ž");
        assert!(validator
            .check_field(FormType::JobSeeker, Field::FullName, Some(&value))
            .is_some());

        // One astral-plane character is a surrogate pair, so it clears a minimum of two.
        let value = json!("😀");
        assert_eq!(
            validator.check_field(FormType::JobSeeker, Field::FullName, Some(&value)),
            None
        );
    }

    #[test]
    fn email_requires_dotted_domain_and_plain_local_part() {
        for address in [
            "jana@example.com",
            "jana.novakova+jobs@mail.example.cz",
            "o'neil@example.co.uk",
        ] {
            assert!(is_email_address(address), "{address} should be accepted");
        }

        for address in [
            "jana@localhost",
            "jana@example",
            "jana!x@example.com",
            "a@[127.0.0.1]",
            ".jana@example.com",
            "jana..novakova@example.com",
            "jana.@example.com",
            "jana@example.c0m",
        ] {
            assert!(!is_email_address(address), "{address} should be rejected");
        }
    }

    #[test]
    fn company_name_is_ignored_for_job_seekers() {
        let validator = FormValidator::new();
        assert_eq!(
            validator.check_field(FormType::JobSeeker, Field::CompanyName, None),
            None
        );
        assert_eq!(
            validator
                .check_field(FormType::Employer, Field::CompanyName, None)
                .as_deref(),
            Some(REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn wrong_json_types_are_reported() {
        let validator = FormValidator::new();
        let number = json!(777123456);
        assert_eq!(
            validator
                .check_field(FormType::JobSeeker, Field::PhoneNumber, Some(&number))
                .as_deref(),
            Some(EXPECTED_STRING_MESSAGE)
        );

        let text = json!("true");
        assert_eq!(
            validator
                .check_field(FormType::JobSeeker, Field::AgreeToPrivacy, Some(&text))
                .as_deref(),
            Some(EXPECTED_BOOLEAN_MESSAGE)
        );
    }

    #[test]
    fn field_errors_serialize_by_wire_name() {
        let mut errors = FieldErrors::new();
        errors.push(Field::CompanyName, "Required");
        errors.push(Field::AgreeToPrivacy, "You must agree to the Privacy Policy");

        let value = serde_json::to_value(&errors).expect("errors serialize");
        assert_eq!(
            value,
            json!({
                "companyName": ["Required"],
                "agreeToPrivacy": ["You must agree to the Privacy Policy"],
            })
        );
        assert_eq!(errors.first(Field::CompanyName), Some("Required"));
    }
}
