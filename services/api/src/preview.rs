use crate::infra::read_submission;
use clap::Args;
use expresni_prace::config::AppConfig;
use expresni_prace::error::AppError;
use expresni_prace::workflows::contact::{
    render_notification, FormValidator, MailEnvelope, NotificationMessage, SubmissionVariant,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SubmissionFileArgs {
    /// Path to a JSON file shaped like the POST /api/contact body
    #[arg(long)]
    pub(crate) file: PathBuf,
}

/// Printable summary of a rendered notification.
#[derive(Debug, Serialize)]
pub(crate) struct NotificationPreview {
    pub(crate) from: String,
    pub(crate) to: Vec<String>,
    pub(crate) reply_to: String,
    pub(crate) subject: String,
    pub(crate) text: String,
}

impl From<NotificationMessage> for NotificationPreview {
    fn from(message: NotificationMessage) -> Self {
        Self {
            from: message.from,
            to: message.to,
            reply_to: message.reply_to,
            subject: message.subject,
            text: message.text,
        }
    }
}

pub(crate) fn run_validate(args: SubmissionFileArgs) -> Result<(), AppError> {
    let submission = validate_file(&args)?;
    println!("Submission is valid ({})", submission.form_type().label());
    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}

pub(crate) fn run_preview(args: SubmissionFileArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let submission = validate_file(&args)?;
    let preview = preview_notification(&submission, &config.mail.envelope())?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

fn validate_file(args: &SubmissionFileArgs) -> Result<SubmissionVariant, AppError> {
    let input = read_submission(&args.file)?;
    FormValidator::new().validate(&input).map_err(|errors| {
        for field in errors.fields() {
            if let Some(message) = errors.first(field) {
                println!("- {field}: {message}");
            }
        }
        AppError::InvalidSubmission(errors)
    })
}

pub(crate) fn preview_notification(
    submission: &SubmissionVariant,
    envelope: &MailEnvelope,
) -> Result<NotificationPreview, AppError> {
    let message = render_notification(submission, envelope)?;
    Ok(NotificationPreview::from(message))
}
