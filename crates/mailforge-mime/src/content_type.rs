//! Body content types and attachment media type lookup.

use std::fmt;

/// Fallback media type for attachments with an unrecognized extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type of the primary message body.
///
/// The two types the encoder is normally asked for are enumerated; anything
/// else is carried through verbatim as [`BodyContentType::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum BodyContentType {
    /// `text/plain`.
    Plain,
    /// `text/html`.
    Html,
    /// Any other MIME type string, emitted as-is.
    Other(String),
}

impl BodyContentType {
    /// Returns the MIME type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "text/plain",
            Self::Html => "text/html",
            Self::Other(s) => s,
        }
    }
}

impl Default for BodyContentType {
    fn default() -> Self {
        Self::Plain
    }
}

impl fmt::Display for BodyContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BodyContentType {
    fn from(s: &str) -> Self {
        match s {
            "text/plain" => Self::Plain,
            "text/html" => Self::Html,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for BodyContentType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text/plain" => Self::Plain,
            "text/html" => Self::Html,
            _ => Self::Other(s),
        }
    }
}

impl From<BodyContentType> for String {
    fn from(ct: BodyContentType) -> Self {
        match ct {
            BodyContentType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Looks up the media type for an attachment from its filename extension.
///
/// Unknown or missing extensions fall back to [`OCTET_STREAM`].
#[must_use]
pub fn content_type_for_filename(filename: &str) -> &'static str {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
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

    #[test]
    fn test_recognized_types() {
        assert_eq!(BodyContentType::from("text/plain"), BodyContentType::Plain);
        assert_eq!(BodyContentType::from("text/html"), BodyContentType::Html);
        assert_eq!(BodyContentType::Plain.as_str(), "text/plain");
        assert_eq!(BodyContentType::Html.as_str(), "text/html");
    }

    #[test]
    fn test_open_fallback() {
        let ct = BodyContentType::from("application/json");
        assert_eq!(ct, BodyContentType::Other("application/json".to_string()));
        assert_eq!(ct.as_str(), "application/json");
    }

    #[test]
    fn test_default_is_plain() {
        assert_eq!(BodyContentType::default(), BodyContentType::Plain);
    }

    #[test]
    fn test_display() {
        assert_eq!(BodyContentType::Html.to_string(), "text/html");
    }

    #[test]
    fn test_lookup_known_extensions() {
        assert_eq!(content_type_for_filename("report.pdf"), "application/pdf");
        assert_eq!(content_type_for_filename("photo.png"), "image/png");
        assert_eq!(content_type_for_filename("notes.txt"), "text/plain");
    }

    #[test]
    fn test_lookup_unknown_extension() {
        assert_eq!(content_type_for_filename("data.qqq"), OCTET_STREAM);
    }

    #[test]
    fn test_lookup_no_extension() {
        assert_eq!(content_type_for_filename("Makefile"), OCTET_STREAM);
    }
}
