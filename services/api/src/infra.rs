use expresni_prace::config::MailConfig;
use expresni_prace::error::AppError;
use expresni_prace::workflows::contact::{ContactFormInput, ContactService, ResendProvider};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the contact pipeline; a missing API key leaves delivery disabled.
pub(crate) fn contact_service(
    mail: &MailConfig,
) -> Result<Arc<ContactService<ResendProvider>>, AppError> {
    let provider = match mail.api_key.as_deref() {
        Some(api_key) => Some(Arc::new(ResendProvider::new(
            api_key,
            &mail.api_base_url,
            mail.timeout,
        )?)),
        None => {
            warn!(
                "RESEND_API_KEY is not defined; contact submissions will fail until it is configured"
            );
            None
        }
    };

    Ok(Arc::new(ContactService::new(provider, mail.envelope())))
}

pub(crate) fn read_submission(path: &Path) -> Result<ContactFormInput, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    ContactFormInput::from_value(value).ok_or_else(|| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} does not contain a JSON object", path.display()),
        ))
    })
}
