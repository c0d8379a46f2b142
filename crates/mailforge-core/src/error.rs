//! Error types for the send service.

use thiserror::Error;

/// Errors that can occur while preparing or submitting a message.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failed; the underlying error is passed through untouched.
    #[error("SMTP error: {0}")]
    Smtp(#[from] mailforge_smtp::Error),

    /// Message building failed (attachment I/O, address validation).
    #[error("Message error: {0}")]
    Mime(#[from] mailforge_mime::Error),

    /// Credential (de)serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
