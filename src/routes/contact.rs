//! Contact form route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Response};
use serde::Serialize;
use tracing::error;

use super::{ErrorBody, Payload, PayloadRejection};
use crate::services::contact::{self, ContactError, ContactForm, MIN_MESSAGE_WORDS};
use crate::state::AppState;

const ACCEPTED_MESSAGE: &str = "Thank you for your message. We will get back to you soon!";

#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: &'static str,
    pub data: ContactReceipt,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub message_id: i64,
    pub word_count: usize,
}

/// `POST /api/contact` — validate and record a contact message.
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Payload<ContactForm>, PayloadRejection>,
) -> Result<Json<ContactAccepted>, Response> {
    let Payload(form) = body.map_err(|rejection| {
        error!(error = %rejection, "contact form body rejected");
        internal_error()
    })?;

    let submission = contact::submit(state.submissions.as_ref(), &form).map_err(contact_error_response)?;

    Ok(Json(ContactAccepted {
        success: true,
        message: ACCEPTED_MESSAGE,
        data: ContactReceipt { message_id: submission.id, word_count: submission.word_count },
    }))
}

pub(crate) fn contact_error_response(err: ContactError) -> Response {
    match err {
        ContactError::MissingFields => ErrorBody::new("All fields are required", "Please provide name, email, and message")
            .into_response_with(StatusCode::BAD_REQUEST),
        ContactError::InvalidEmail => ErrorBody::new("Invalid email format", "Please provide a valid email address")
            .into_response_with(StatusCode::BAD_REQUEST),
        ContactError::MessageTooShort { word_count } => ErrorBody::new(
            "Message too short",
            format!("Message must contain at least {MIN_MESSAGE_WORDS} words. Current: {word_count} words"),
        )
        .into_response_with(StatusCode::BAD_REQUEST),
        ContactError::Store(e) => {
            error!(error = %e, "contact form error");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    ErrorBody::new("Internal server error", "Something went wrong while processing your message")
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
