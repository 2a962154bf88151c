use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::domain::{ContactFormInput, SubmissionVariant};
use super::message::{render_notification, MailEnvelope, RenderError};
use super::provider::{DeliveryId, EmailProvider, ProviderError};
use super::validation::{FieldErrors, FormValidator};

/// Successful hand-off to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DeliveryId>,
}

/// Failure after a submission has passed validation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("email provider is not configured")]
    ServiceUnavailable,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("delivery failed: {0}")]
    DeliveryFailed(#[source] ProviderError),
}

/// Turns validated submissions into exactly one provider send attempt.
pub struct SubmissionDispatcher<P> {
    provider: Option<Arc<P>>,
    envelope: MailEnvelope,
}

impl<P> SubmissionDispatcher<P>
where
    P: EmailProvider + 'static,
{
    /// `provider` is `None` when no credential is configured; dispatch then
    /// refuses to run instead of calling out.
    pub fn new(provider: Option<Arc<P>>, envelope: MailEnvelope) -> Self {
        Self { provider, envelope }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn envelope(&self) -> &MailEnvelope {
        &self.envelope
    }

    pub async fn dispatch(
        &self,
        submission: &SubmissionVariant,
    ) -> Result<DeliveryReceipt, DispatchError> {
        let Some(provider) = self.provider.as_ref() else {
            error!(
                form_type = %submission.form_type(),
                "RESEND_API_KEY is not configured; contact notification not sent"
            );
            return Err(DispatchError::ServiceUnavailable);
        };

        let message = render_notification(submission, &self.envelope)?;

        match provider.send(&message).await {
            Ok(id) => {
                info!(
                    form_type = %submission.form_type(),
                    delivery_id = id.as_ref().map(|id| id.0.as_str()).unwrap_or("none"),
                    "contact notification sent"
                );
                Ok(DeliveryReceipt { id })
            }
            Err(err) => {
                error!(
                    form_type = %submission.form_type(),
                    error = %err,
                    "email provider failed to deliver contact notification"
                );
                Err(DispatchError::DeliveryFailed(err))
            }
        }
    }
}

/// Error surfaced by `ContactService::submit`.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("invalid form data: {0}")]
    Rejected(FieldErrors),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Trust-boundary entry point: validate, then dispatch.
pub struct ContactService<P> {
    validator: FormValidator,
    dispatcher: SubmissionDispatcher<P>,
}

impl<P> ContactService<P>
where
    P: EmailProvider + 'static,
{
    pub fn new(provider: Option<Arc<P>>, envelope: MailEnvelope) -> Self {
        Self::with_dispatcher(SubmissionDispatcher::new(provider, envelope))
    }

    pub fn with_dispatcher(dispatcher: SubmissionDispatcher<P>) -> Self {
        Self {
            validator: FormValidator::new(),
            dispatcher,
        }
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn dispatcher(&self) -> &SubmissionDispatcher<P> {
        &self.dispatcher
    }

    /// Re-validate a raw payload and, only if it passes, dispatch it.
    pub async fn submit(
        &self,
        input: &ContactFormInput,
    ) -> Result<DeliveryReceipt, SubmissionError> {
        let submission = self.validator.validate(input).map_err(|errors| {
            info!(fields = %errors, "contact submission rejected by validation");
            SubmissionError::Rejected(errors)
        })?;

        Ok(self.dispatcher.dispatch(&submission).await?)
    }
}
