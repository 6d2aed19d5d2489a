use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::routes::app;
use crate::routes::test_helpers::{post_form, post_json, post_raw, post_with_type, send};
use crate::state::test_helpers::{BrokenStore, test_app_state, words};

fn no_pages() -> std::path::PathBuf {
    std::env::temp_dir().join("studytrack-no-pages")
}

#[tokio::test]
async fn valid_submission_is_accepted_and_logged() {
    let (state, log) = test_app_state();
    let body = json!({ "name": "Ada", "email": "ada@example.com", "message": words(24) });
    let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], ACCEPTED_MESSAGE);
    assert_eq!(json["data"]["wordCount"], 24);

    let entries = log.snapshot().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(json["data"]["messageId"], entries[0].id);
    assert_eq!(entries[0].name, "Ada");
}

#[tokio::test]
async fn missing_fields_is_bad_request() {
    let (state, log) = test_app_state();
    let body = json!({ "name": "Ada", "message": words(24) });
    let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "All fields are required");
    assert_eq!(json["details"], "Please provide name, email, and message");
    assert!(log.snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_email_is_bad_request() {
    let (state, _log) = test_app_state();
    let body = json!({ "name": "Ada", "email": "not-an-email", "message": words(24) });
    let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid email format");
}

#[tokio::test]
async fn short_message_reports_word_count() {
    let (state, _log) = test_app_state();
    let body = json!({ "name": "Ada", "email": "a@b.co", "message": words(7) });
    let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Message too short");
    assert_eq!(json["details"], "Message must contain at least 20 words. Current: 7 words");
}

#[tokio::test]
async fn body_with_unknown_content_type_reads_as_empty() {
    let (state, _log) = test_app_state();
    let req = post_with_type("/api/contact", "text/plain", "name=Ada");
    let (status, json) = send(app(state, &no_pages()), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn malformed_json_is_internal_error() {
    let (state, _log) = test_app_state();
    let (status, json) = send(app(state, &no_pages()), post_raw("/api/contact", "{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["details"], "Something went wrong while processing your message");
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let state = AppState::new(Arc::new(BrokenStore));
    let body = json!({ "name": "Ada", "email": "a@b.co", "message": words(20) });
    let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(json.get("reply").is_none());
}

#[test]
fn store_error_maps_to_500() {
    let resp = contact_error_response(ContactError::Store(crate::state::StoreError::Poisoned));
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn validation_errors_map_to_400() {
    for err in [
        ContactError::MissingFields,
        ContactError::InvalidEmail,
        ContactError::MessageTooShort { word_count: 3 },
    ] {
        assert_eq!(contact_error_response(err).status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn non_string_fields_are_bad_request() {
    for value in [json!(123), json!(false), json!(0), serde_json::Value::Null] {
        let (state, log) = test_app_state();
        let body = json!({ "name": value.clone(), "email": "a@b.co", "message": words(24) });
        let (status, json) = send(app(state, &no_pages()), post_json("/api/contact", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "name = {value}");
        assert_eq!(json["error"], "All fields are required");
        assert!(log.snapshot().unwrap().is_empty());
    }
}

#[tokio::test]
async fn form_encoded_submission_is_accepted() {
    let (state, log) = test_app_state();
    let message = words(24).replace(' ', "+");
    let body = format!("name=Ada&email=a%40b.co&message={message}");
    let (status, json) = send(app(state, &no_pages()), post_form("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["wordCount"], 24);

    let entries = log.snapshot().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].email, "a@b.co");
    assert_eq!(entries[0].message, words(24));
}

#[tokio::test]
async fn form_encoded_submission_is_still_validated() {
    let (state, _log) = test_app_state();
    let (status, json) =
        send(app(state, &no_pages()), post_form("/api/contact", "name=Ada&email=nope&message=hi")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid email format");
}
