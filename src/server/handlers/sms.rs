//! SMS webhook handler.
//!
//! The SMS provider posts each inbound message as a form. The message is
//! queued for the printer worker and acknowledged immediately with an empty
//! TwiML document, so the provider sends no reply to the sender.

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::super::state::AppState;
use super::{ApiError, api_error};
use crate::message::{SmsMessage, WebhookForm};

/// Empty TwiML response.
pub const EMPTY_TWIML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

/// Handle POST /sms - enqueue an inbound message for printing.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WebhookForm>,
) -> Result<impl IntoResponse, ApiError> {
    let message = SmsMessage::from_webhook_form(form);
    let body = message
        .to_queue_body()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    state.queue.send(body).await.map_err(|_| {
        warn!("print queue is closed, dropping message");
        api_error(StatusCode::SERVICE_UNAVAILABLE, "Print queue is not running")
    })?;

    info!(from = %message.from, "queued message");
    Ok(([(header::CONTENT_TYPE, "text/xml")], EMPTY_TWIML))
}
