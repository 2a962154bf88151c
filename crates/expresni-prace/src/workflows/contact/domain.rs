use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator selecting which contact form schema applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormType {
    JobSeeker,
    Employer,
}

impl FormType {
    /// Parse the wire discriminator (`jobSeeker` | `employer`).
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "jobSeeker" => Some(Self::JobSeeker),
            "employer" => Some(Self::Employer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::JobSeeker => "jobSeeker",
            FormType::Employer => "employer",
        }
    }

    /// Human label shown in the notification body.
    pub fn label(&self) -> &'static str {
        match self {
            FormType::JobSeeker => "Looking for a Job",
            FormType::Employer => "Request Personnel",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            FormType::JobSeeker => "New Job Application",
            FormType::Employer => "New Personnel Request",
        }
    }

    /// Fields the schema for this form type inspects, in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            FormType::JobSeeker => &[
                Field::FullName,
                Field::PhoneNumber,
                Field::Email,
                Field::Suggestion,
                Field::AgreeToPrivacy,
            ],
            FormType::Employer => &[
                Field::FullName,
                Field::PhoneNumber,
                Field::Email,
                Field::CompanyName,
                Field::Suggestion,
                Field::AgreeToPrivacy,
            ],
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire-level field names of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FormType,
    FullName,
    PhoneNumber,
    Email,
    CompanyName,
    Suggestion,
    AgreeToPrivacy,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FormType => "formType",
            Field::FullName => "fullName",
            Field::PhoneNumber => "phoneNumber",
            Field::Email => "email",
            Field::CompanyName => "companyName",
            Field::Suggestion => "suggestion",
            Field::AgreeToPrivacy => "agreeToPrivacy",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Looking for a job" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerSubmission {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub suggestion: String,
    pub agree_to_privacy: bool,
}

/// "Request personnel" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSubmission {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub company_name: String,
    pub suggestion: String,
    pub agree_to_privacy: bool,
}

/// Validated contact payload for one of the two form shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formType", rename_all = "camelCase")]
pub enum SubmissionVariant {
    JobSeeker(JobSeekerSubmission),
    Employer(EmployerSubmission),
}

impl SubmissionVariant {
    pub fn form_type(&self) -> FormType {
        match self {
            SubmissionVariant::JobSeeker(_) => FormType::JobSeeker,
            SubmissionVariant::Employer(_) => FormType::Employer,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            SubmissionVariant::JobSeeker(s) => &s.full_name,
            SubmissionVariant::Employer(s) => &s.full_name,
        }
    }

    pub fn phone_number(&self) -> &str {
        match self {
            SubmissionVariant::JobSeeker(s) => &s.phone_number,
            SubmissionVariant::Employer(s) => &s.phone_number,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            SubmissionVariant::JobSeeker(s) => &s.email,
            SubmissionVariant::Employer(s) => &s.email,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match self {
            SubmissionVariant::JobSeeker(_) => None,
            SubmissionVariant::Employer(s) => Some(&s.company_name),
        }
    }

    pub fn suggestion(&self) -> &str {
        match self {
            SubmissionVariant::JobSeeker(s) => &s.suggestion,
            SubmissionVariant::Employer(s) => &s.suggestion,
        }
    }

    pub fn agree_to_privacy(&self) -> bool {
        match self {
            SubmissionVariant::JobSeeker(s) => s.agree_to_privacy,
            SubmissionVariant::Employer(s) => s.agree_to_privacy,
        }
    }
}

/// Raw, untrusted contact payload keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactFormInput(Map<String, Value>);

impl ContactFormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only JSON objects; anything else has no field structure to validate.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: impl Into<Value>) {
        self.0.insert(field.as_str().to_string(), value.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.0.remove(field.as_str())
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.as_str())
    }
}

impl From<Map<String, Value>> for ContactFormInput {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<&SubmissionVariant> for ContactFormInput {
    fn from(value: &SubmissionVariant) -> Self {
        let mut input = ContactFormInput::new()
            .with(Field::FormType, value.form_type().as_str())
            .with(Field::FullName, value.full_name())
            .with(Field::PhoneNumber, value.phone_number())
            .with(Field::Email, value.email())
            .with(Field::Suggestion, value.suggestion())
            .with(Field::AgreeToPrivacy, value.agree_to_privacy());
        if let Some(company) = value.company_name() {
            input.insert(Field::CompanyName, company);
        }
        input
    }
}
