use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::error;

use super::dispatcher::{ContactService, DispatchError, SubmissionError};
use super::domain::ContactFormInput;
use super::provider::EmailProvider;

pub const CONTACT_PATH: &str = "/api/contact";
/// Upper bound on a contact submission body; larger bodies get the generic 500.
pub const CONTACT_BODY_LIMIT: usize = 64 * 1024;

const SENT_MESSAGE: &str = "Email sent successfully";
const INVALID_FORM_MESSAGE: &str = "Invalid form data";
const NOT_CONFIGURED_MESSAGE: &str = "Email service not configured. Please contact administrator.";
const DELIVERY_FAILED_MESSAGE: &str = "Failed to send email";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Router exposing the contact submission endpoint.
pub fn contact_router<P>(service: Arc<ContactService<P>>) -> Router
where
    P: EmailProvider + 'static,
{
    Router::new()
        .route(CONTACT_PATH, post(submit_handler::<P>))
        .layer(DefaultBodyLimit::max(CONTACT_BODY_LIMIT))
        .with_state(service)
}

pub(crate) async fn submit_handler<P>(
    State(service): State<Arc<ContactService<P>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    P: EmailProvider + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "contact submission body could not be read");
            return internal_error();
        }
    };

    let input = match serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(ContactFormInput::from_value)
    {
        Some(input) => input,
        None => {
            error!(bytes = body.len(), "contact submission body is not a JSON object");
            return internal_error();
        }
    };

    match service.submit(&input).await {
        Ok(receipt) => {
            let mut payload = json!({ "message": SENT_MESSAGE });
            if let Some(id) = receipt.id {
                payload["id"] = json!(id.0);
            }
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Rejected(errors)) => {
            let payload = json!({
                "error": INVALID_FORM_MESSAGE,
                "details": errors,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Dispatch(DispatchError::ServiceUnavailable)) => {
            let payload = json!({ "error": NOT_CONFIGURED_MESSAGE });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Dispatch(DispatchError::DeliveryFailed(_))) => {
            let payload = json!({ "error": DELIVERY_FAILED_MESSAGE });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Dispatch(other)) => {
            error!(error = %other, "contact submission failed");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    let payload = json!({ "error": INTERNAL_ERROR_MESSAGE });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
