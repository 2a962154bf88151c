//! Producer-side form state with interactive, per-field feedback.

use serde_json::Value;

use super::domain::{ContactFormInput, Field, FormType};
use super::validation::{FieldErrors, FormValidator};

/// Values and errors for one in-progress contact form.
#[derive(Debug, Clone)]
pub struct ContactFormDraft {
    validator: FormValidator,
    form_type: FormType,
    values: ContactFormInput,
    errors: FieldErrors,
}

impl Default for ContactFormDraft {
    fn default() -> Self {
        Self::new(FormType::JobSeeker)
    }
}

impl ContactFormDraft {
    pub fn new(form_type: FormType) -> Self {
        Self {
            validator: FormValidator::new(),
            form_type,
            values: blank_values(form_type),
            errors: FieldErrors::new(),
        }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.first(field)
    }

    pub fn value(&self, field: Field) -> Option<&Value> {
        self.values.get(field)
    }

    /// Update a text field and refresh only that field's error.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Option<&str> {
        self.set_value(field, Value::String(value.into()))
    }

    pub fn set_agree_to_privacy(&mut self, agreed: bool) -> Option<&str> {
        self.set_value(Field::AgreeToPrivacy, Value::Bool(agreed))
    }

    fn set_value(&mut self, field: Field, value: Value) -> Option<&str> {
        if field == Field::FormType {
            return self.error(field);
        }

        self.errors.clear_field(field);
        if let Some(message) = self
            .validator
            .check_field(self.form_type, field, Some(&value))
        {
            self.errors.push(field, message);
        }
        self.values.insert(field, value);
        self.error(field)
    }

    /// Switching forms clears every entered value and error.
    pub fn switch_form_type(&mut self, form_type: FormType) {
        self.form_type = form_type;
        self.values = blank_values(form_type);
        self.errors.clear();
    }

    /// Full validation pass before transmission; returns the payload to send.
    pub fn submit(&mut self) -> Result<ContactFormInput, FieldErrors> {
        match self.validator.validate(&self.values) {
            Ok(submission) => {
                self.errors.clear();
                Ok(ContactFormInput::from(&submission))
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Clear the form after a successful send, keeping the selected form type.
    pub fn reset_after_success(&mut self) {
        self.switch_form_type(self.form_type);
    }
}

fn blank_values(form_type: FormType) -> ContactFormInput {
    ContactFormInput::new()
        .with(Field::FormType, form_type.as_str())
        .with(Field::AgreeToPrivacy, false)
}
