//! Storage error types.

use derive_more::Error;
use tracing::instrument;

/// Storage failure, naming the slot involved when there is one.
#[derive(Debug, Clone, Error)]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
    /// Key of the slot being read, written or cleared.
    pub slot: Option<String>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            slot: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Records the slot the failed operation was working on.
    pub fn on_slot(mut self, key: &str) -> Self {
        self.slot = Some(key.to_string());
        self
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.slot {
            Some(key) => write!(
                f,
                "Store error on slot '{}': {} at {}:{}",
                key, self.message, self.file, self.line
            ),
            None => write!(f, "Store error: {} at {}:{}", self.message, self.file, self.line),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}
