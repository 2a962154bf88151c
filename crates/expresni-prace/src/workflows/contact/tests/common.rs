use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::contact::domain::{ContactFormInput, Field};
use crate::workflows::contact::message::{MailEnvelope, NotificationMessage};
use crate::workflows::contact::provider::{DeliveryId, EmailProvider, ProviderError};
use crate::workflows::contact::{contact_router, ContactService};

pub(super) const PROVIDER_SECRET: &str = "domain example.com is not verified (key re_live_123)";

pub(super) fn envelope() -> MailEnvelope {
    MailEnvelope {
        from: "Contact Form <event@expresni-prace.com>".to_string(),
        to: vec!["expresni.prace@gmail.com".to_string()],
    }
}

pub(super) fn job_seeker_input() -> ContactFormInput {
    ContactFormInput::new()
        .with(Field::FormType, "jobSeeker")
        .with(Field::FullName, "Jana Nováková")
        .with(Field::PhoneNumber, "+420777123456")
        .with(Field::Email, "jana@example.com")
        .with(
            Field::Suggestion,
            "I am looking for warehouse work in Prague.",
        )
        .with(Field::AgreeToPrivacy, true)
}

pub(super) fn employer_input() -> ContactFormInput {
    ContactFormInput::new()
        .with(Field::FormType, "employer")
        .with(Field::FullName, "Petr Svoboda")
        .with(Field::PhoneNumber, "+420602111222")
        .with(Field::Email, "petr@sklady.cz")
        .with(Field::CompanyName, "Sklady Praha s.r.o.")
        .with(
            Field::Suggestion,
            "We need five forklift operators for night shifts.",
        )
        .with(Field::AgreeToPrivacy, true)
}

pub(super) fn employer_payload_without_company() -> Value {
    json!({
        "formType": "employer",
        "fullName": "Petr Svoboda",
        "phoneNumber": "+420602111222",
        "email": "petr@sklady.cz",
        "suggestion": "We need five forklift operators for night shifts.",
        "agreeToPrivacy": true,
    })
}

/// Provider stand-in that records every message it is asked to send.
#[derive(Default)]
pub(super) struct RecordingProvider {
    sent: Mutex<Vec<NotificationMessage>>,
}

impl RecordingProvider {
    pub(super) fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().expect("provider mutex poisoned").clone()
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<Option<DeliveryId>, ProviderError> {
        let mut guard = self.sent.lock().expect("provider mutex poisoned");
        guard.push(message.clone());
        Ok(Some(DeliveryId(format!("msg-{:03}", guard.len()))))
    }
}

/// Provider stand-in that always rejects and counts attempts.
#[derive(Default)]
pub(super) struct FailingProvider {
    attempts: AtomicUsize,
}

impl FailingProvider {
    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailProvider for FailingProvider {
    async fn send(
        &self,
        _message: &NotificationMessage,
    ) -> Result<Option<DeliveryId>, ProviderError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Rejected {
            status: 403,
            name: "validation_error".to_string(),
            message: PROVIDER_SECRET.to_string(),
        })
    }
}

pub(super) fn recording_service() -> (Arc<ContactService<RecordingProvider>>, Arc<RecordingProvider>) {
    let provider = Arc::new(RecordingProvider::default());
    let service = Arc::new(ContactService::new(Some(provider.clone()), envelope()));
    (service, provider)
}

pub(super) fn unconfigured_service() -> Arc<ContactService<RecordingProvider>> {
    Arc::new(ContactService::new(None, envelope()))
}

pub(super) fn failing_service() -> (Arc<ContactService<FailingProvider>>, Arc<FailingProvider>) {
    let provider = Arc::new(FailingProvider::default());
    let service = Arc::new(ContactService::new(Some(provider.clone()), envelope()));
    (service, provider)
}

pub(super) fn router_for<P>(service: Arc<ContactService<P>>) -> axum::Router
where
    P: EmailProvider + 'static,
{
    contact_router(service)
}

pub(super) fn post_contact(body: impl Into<axum::body::Body>) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/contact")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
