//! Contact form service — validate a submission and append it to the log.
//!
//! Rules run in order and the first failure wins: presence of all three
//! fields, email shape, then a minimum word count for the message.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::state::{ContactSubmission, NewSubmission, StoreError, SubmissionStore};

pub const MIN_MESSAGE_WORDS: usize = 20;

// =============================================================================
// TYPES
// =============================================================================

/// Raw contact form fields as received from the client. Fields are kept
/// untyped so a number, boolean or null reads as a missing field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub message: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("name, email and message are required")]
    MissingFields,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("message too short: {word_count} words")]
    MessageTooShort { word_count: usize },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// VALIDATION
// =============================================================================

/// The ECMAScript `\s` class. Unlike `char::is_whitespace` it includes U+FEFF
/// and excludes U+0085.
#[must_use]
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Count whitespace-delimited, non-empty tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split(is_js_whitespace).filter(|t| !t.is_empty()).count()
}

/// Shape-only email check: `local@domain.tld` with no whitespace or extra
/// `@`, and at least one dot in the domain with characters on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let forbidden = |c: char| is_js_whitespace(c) || c == '@';
    if local.is_empty() || local.contains(forbidden) || domain.contains(forbidden) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn present(field: Option<&Value>) -> Option<&str> {
    match field {
        Some(Value::String(v)) if !v.is_empty() => Some(v),
        _ => None,
    }
}

/// Run the validation rules without touching the log.
///
/// # Errors
///
/// Returns the first rule the form violates.
pub fn validate(form: &ContactForm) -> Result<NewSubmission, ContactError> {
    let (Some(name), Some(email), Some(message)) =
        (present(form.name.as_ref()), present(form.email.as_ref()), present(form.message.as_ref()))
    else {
        return Err(ContactError::MissingFields);
    };

    if !is_valid_email(email) {
        return Err(ContactError::InvalidEmail);
    }

    let word_count = count_words(message);
    if word_count < MIN_MESSAGE_WORDS {
        return Err(ContactError::MessageTooShort { word_count });
    }

    Ok(NewSubmission {
        name: name.to_owned(),
        email: email.to_owned(),
        message: message.to_owned(),
        word_count,
    })
}

// =============================================================================
// SUBMIT
// =============================================================================

/// Validate the form and append the accepted entry to the store.
///
/// # Errors
///
/// Returns a validation error, or `ContactError::Store` if the store fails.
pub fn submit(store: &dyn SubmissionStore, form: &ContactForm) -> Result<ContactSubmission, ContactError> {
    let entry = validate(form)?;
    let submission = store.append(entry)?;
    info!(submission = ?submission, "new contact message received");
    Ok(submission)
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
