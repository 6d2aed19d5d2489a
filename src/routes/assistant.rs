//! Assistant route — canned study-help replies.

use axum::http::StatusCode;
use axum::response::{Json, Response};
use serde::Serialize;
use tracing::{debug, error};

use super::{ErrorBody, Payload, PayloadRejection};
use crate::services::assistant::{self, AssistantError, AssistantRequest, FALLBACK_ERROR_REPLY, Link};

/// Replies are always produced locally; no model provider is involved.
const PROVIDER: &str = "fallback";

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub success: bool,
    pub reply: String,
    pub links: Vec<Link>,
    pub provider: &'static str,
}

/// `POST /api/assistant` — answer a free-text message.
pub async fn ask_assistant(body: Result<Payload<AssistantRequest>, PayloadRejection>) -> Result<Json<AssistantResponse>, Response> {
    let Payload(req) = body.map_err(|rejection| {
        error!(error = %rejection, "assistant body rejected");
        internal_error()
    })?;

    debug!(
        user_role = %req.user_role,
        action = req.action.as_deref().unwrap_or(""),
        history_len = req.history.len(),
        has_text = req.text.is_some(),
        has_notes = req.relevant_notes.is_some(),
        "assistant request"
    );
    let reply = assistant::respond(&req).map_err(assistant_error_response)?;

    Ok(Json(AssistantResponse { success: true, reply: reply.text, links: reply.links, provider: PROVIDER }))
}

pub(crate) fn assistant_error_response(err: AssistantError) -> Response {
    match err {
        AssistantError::MissingMessage => ErrorBody::new("Message is required", "Please provide a message to the assistant")
            .into_response_with(StatusCode::BAD_REQUEST),
    }
}

fn internal_error() -> Response {
    ErrorBody {
        reply: Some(FALLBACK_ERROR_REPLY),
        ..ErrorBody::new("Failed to process request", "The AI assistant encountered an error")
    }
    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
