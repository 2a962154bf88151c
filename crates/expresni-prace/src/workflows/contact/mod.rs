//! Contact submission pipeline: form validation, notification rendering and
//! delivery through a transactional email provider.

pub mod dispatcher;
pub mod domain;
pub mod form;
pub mod message;
pub mod provider;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use dispatcher::{
    ContactService, DeliveryReceipt, DispatchError, SubmissionDispatcher, SubmissionError,
};
pub use domain::{
    ContactFormInput, EmployerSubmission, Field, FormType, JobSeekerSubmission, SubmissionVariant,
};
pub use form::ContactFormDraft;
pub use message::{render_notification, MailEnvelope, NotificationMessage, RenderError};
pub use provider::{DeliveryId, EmailProvider, ProviderError, ResendProvider};
pub use router::{contact_router, CONTACT_BODY_LIMIT, CONTACT_PATH};
pub use validation::{FieldErrors, FormValidator};
