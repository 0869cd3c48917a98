// Error types for the journal client.
// Covers API failures, storage and cache failures, and configuration errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when a screen fails to load and nothing better is known.
pub const FALLBACK_LOAD_MESSAGE: &str = "Failed to load";

/// Message shown when sign-in fails without a server-provided reason.
pub const FALLBACK_LOGIN_MESSAGE: &str = "Sign-in failed";

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Authentication failed: session expired or token rejected")]
    Unauthorized,

    #[error("Request rejected with HTTP {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JournalError {
    /// Message suitable for an inline error line on screen.
    ///
    /// Server-provided details win; transport and session failures get a
    /// fixed message; everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            JournalError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            JournalError::NetworkUnavailable(_) => {
                "Network unavailable, press r to retry".to_string()
            }
            JournalError::Unauthorized => "Session ended, please sign in again".to_string(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;

/// Failures of the underlying key-value medium.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage quota exceeded while writing {key} ({needed} bytes over)")]
    QuotaExceeded { key: String, needed: usize },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cache failures. Always recovered inside the cache store, only logged.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache write for {key} dropped: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("cache entry {key} is unreadable: {reason}")]
    ReadCorrupt { key: String, reason: String },
}
