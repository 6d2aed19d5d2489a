//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API endpoints and the static study-tracker
//! pages under a single Axum router. API routes live under `/api`; every
//! other path is resolved against the public directory and 404s when the
//! file is absent.

pub mod assistant;
pub mod contact;

use std::path::Path;

use axum::Router;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/assistant", post(assistant::ask_assistant))
        .with_state(state)
}

/// Full application: API routes + static pages from `public_dir`.
pub fn app(state: AppState, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = ServeDir::new(public_dir).append_index_html_on_directories(true);

    api_routes(state)
        .route_service("/register", ServeFile::new(public_dir.join("register.html")))
        .fallback_service(pages)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// `GET /api/health` — liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "message": "Server is running" }))
}

// =============================================================================
// SHARED RESPONSE HELPERS
// =============================================================================

/// Error body shared by the API endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
    /// User-facing fallback text; only the assistant sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<&'static str>,
}

impl ErrorBody {
    pub(crate) fn new(error: &'static str, details: impl Into<String>) -> Self {
        Self { error, details: details.into(), reply: None }
    }

    pub(crate) fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// REQUEST BODY EXTRACTOR
// =============================================================================

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body accepted as JSON or as an HTML form post. A request with
/// neither content type is read as an empty body so the field checks report
/// what is missing.
pub struct Payload<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum PayloadRejection {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => rejection.into_response(),
            Self::Form(rejection) => rejection.into_response(),
        }
    }
}

fn is_form_post(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form_post(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(T::default())),
            Err(rejection) => Err(rejection.into()),
        }
    }
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
