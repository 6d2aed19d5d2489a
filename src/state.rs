//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the contact submission store behind the `SubmissionStore`
//! trait so handlers can be exercised against any implementation. The
//! default store is an append-only, process-lifetime log; entries are lost
//! on restart.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

// =============================================================================
// CONTACT SUBMISSION
// =============================================================================

/// An accepted contact-form entry. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Creation time in epoch milliseconds, bumped to stay strictly increasing.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub word_count: usize,
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub word_count: usize,
}

// =============================================================================
// SUBMISSION STORE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission log lock poisoned")]
    Poisoned,
}

/// Append-only storage for accepted contact submissions.
pub trait SubmissionStore: Send + Sync {
    /// Assign an id and timestamp, then append. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage is unusable.
    fn append(&self, entry: NewSubmission) -> Result<ContactSubmission, StoreError>;
}

/// In-memory submission log. Appends are serialized by a mutex so
/// concurrent requests never lose entries.
#[derive(Default)]
pub struct MemorySubmissionLog {
    entries: Mutex<Vec<ContactSubmission>>,
}

impl MemorySubmissionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn append_at(&self, entry: NewSubmission, now: DateTime<Utc>) -> Result<ContactSubmission, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let last_id = entries.last().map_or(i64::MIN, |s| s.id);
        let id = now.timestamp_millis().max(last_id.saturating_add(1));

        let submission = ContactSubmission {
            id,
            name: entry.name,
            email: entry.email,
            message: entry.message,
            created_at: now,
            word_count: entry.word_count,
        };
        entries.push(submission.clone());
        Ok(submission)
    }
}

impl SubmissionStore for MemorySubmissionLog {
    fn append(&self, entry: NewSubmission) -> Result<ContactSubmission, StoreError> {
        self.append_at(entry, Utc::now())
    }
}

#[cfg(test)]
impl MemorySubmissionLog {
    /// All stored submissions in append order.
    pub fn snapshot(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionStore>,
}

impl AppState {
    #[must_use]
    pub fn new(submissions: Arc<dyn SubmissionStore>) -> Self {
        Self { submissions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(MemorySubmissionLog::new()))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
