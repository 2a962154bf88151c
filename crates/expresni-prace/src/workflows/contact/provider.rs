use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::NotificationMessage;

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Opaque identifier returned by the provider for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(pub String);

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability to hand a rendered notification to a transactional email service.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Returns `Ok(None)` when the provider accepted the message without an id.
    async fn send(&self, message: &NotificationMessage)
        -> Result<Option<DeliveryId>, ProviderError>;
}

/// Failure reported by (or while talking to) the email provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("email provider transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider rejected message ({status}): {name}: {message}")]
    Rejected {
        status: u16,
        name: String,
        message: String,
    },
    #[error("email provider returned an unreadable response: {0}")]
    MalformedResponse(String),
}

/// Client for the Resend `POST /emails` API.
#[derive(Debug, Clone)]
pub struct ResendProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct ResendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ResendProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<Option<DeliveryId>, ProviderError> {
        let request = ResendEmailRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
            reply_to: &message.reply_to,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ResendErrorResponse>(&body).ok();
            let (name, message) = match detail {
                Some(detail) => (
                    detail.name.unwrap_or_else(|| "unknown_error".to_string()),
                    detail.message.unwrap_or_else(|| body.clone()),
                ),
                None => ("unknown_error".to_string(), body.clone()),
            };
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                name,
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let parsed: ResendEmailResponse = serde_json::from_str(&body)
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;
        Ok(parsed.id.map(DeliveryId))
    }
}
