//! Persisted account credentials.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Credentials for an outbound mail account.
///
/// Persisted as JSON; consumed only by the transport, never by the
/// encoder. The password is redacted from `Debug` output so the struct can
/// be logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Sender email address, doubling as the AUTH username.
    pub address: String,
    /// SMTP server hostname.
    pub hostname: String,
    /// Display name for the sender.
    pub name: String,
    /// Account password.
    pub password: String,
    /// SMTP server port.
    pub port: u16,
}

impl Credentials {
    /// Parses credentials from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let credentials = Self::from_json(&json)?;
        debug!(hostname = %credentials.hostname, "loaded credentials");
        Ok(credentials)
    }

    /// Returns the transport target as `hostname:port`.
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .field("hostname", &self.hostname)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    fn sample() -> Credentials {
        Credentials {
            address: "sender@example.com".to_string(),
            hostname: "smtp.example.com".to_string(),
            name: "Sender".to_string(),
            password: "hunter2".to_string(),
            port: 587,
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let credentials = sample();
        let json = serde_json::to_string(&credentials).unwrap();
        let parsed = Credentials::from_json(&json).unwrap();
        assert_eq!(parsed, credentials);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "address": "sender@example.com",
            "hostname": "smtp.example.com",
            "name": "Sender",
            "password": "hunter2",
            "port": 587
        }"#;

        let credentials = Credentials::from_json(json).unwrap();
        assert_eq!(credentials.address, "sender@example.com");
        assert_eq!(credentials.port, 587);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(Credentials::from_json("{not json").is_err());
    }

    #[test]
    fn test_server_address() {
        assert_eq!(sample().server_address(), "smtp.example.com:587");
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
