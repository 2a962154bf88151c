use askama::Template;
use serde::Serialize;

use super::domain::SubmissionVariant;

/// Sender and recipients for contact notifications; never derived from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailEnvelope {
    pub from: String,
    pub to: Vec<String>,
}

/// Provider-agnostic notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: String,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to render contact notification: {0}")]
pub struct RenderError(#[from] askama::Error);

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtml<'a> {
    heading: &'a str,
    form_label: &'a str,
    full_name: &'a str,
    phone_number: &'a str,
    email: &'a str,
    company_name: Option<&'a str>,
    suggestion_lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct ContactNotificationText<'a> {
    heading: &'a str,
    form_label: &'a str,
    full_name: &'a str,
    phone_number: &'a str,
    email: &'a str,
    company_name: Option<&'a str>,
    suggestion: &'a str,
}

pub fn subject_for(submission: &SubmissionVariant) -> String {
    match submission {
        SubmissionVariant::JobSeeker(s) => format!("Job Application from {}", s.full_name),
        SubmissionVariant::Employer(s) => format!(
            "Personnel Request from {} ({})",
            s.full_name, s.company_name
        ),
    }
}

/// Render the notification sent to the agency for one submission.
pub fn render_notification(
    submission: &SubmissionVariant,
    envelope: &MailEnvelope,
) -> Result<NotificationMessage, RenderError> {
    let form_type = submission.form_type();

    let html = ContactNotificationHtml {
        heading: form_type.heading(),
        form_label: form_type.label(),
        full_name: submission.full_name(),
        phone_number: submission.phone_number(),
        email: submission.email(),
        company_name: submission.company_name(),
        suggestion_lines: submission.suggestion().split('\n').collect(),
    }
    .render()?;

    let text = ContactNotificationText {
        heading: form_type.heading(),
        form_label: form_type.label(),
        full_name: submission.full_name(),
        phone_number: submission.phone_number(),
        email: submission.email(),
        company_name: submission.company_name(),
        suggestion: submission.suggestion(),
    }
    .render()?;

    Ok(NotificationMessage {
        from: envelope.from.clone(),
        to: envelope.to.clone(),
        subject: subject_for(submission),
        html,
        text,
        reply_to: submission.email().to_string(),
    })
}
