//! Error types for message-building operations.

use std::io;

/// Result type alias for message-building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message-building error types.
///
/// The encoder itself is total and never fails; errors surface only from the
/// model operations that touch the filesystem and from the decoding helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading an attachment file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Base64 decode error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}
