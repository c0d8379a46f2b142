//! Custom message headers.

use std::fmt;

/// A single key/value header.
///
/// Headers live in an ordered sequence on the message; duplicate keys are
/// permitted and preserved in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Header field name.
    pub key: String,
    /// Header field value.
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_display() {
        let header = Header::new("X-Mailer", "mailforge");
        assert_eq!(header.to_string(), "X-Mailer: mailforge");
    }
}
