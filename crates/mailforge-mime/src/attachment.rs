//! Message attachments.

use crate::error::Result;
use std::path::Path;

/// A file or in-memory attachment.
///
/// Owned exclusively by the [`Message`](crate::Message) holding it; the
/// filename doubles as the lookup key within the message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Displayed name and lookup key.
    pub filename: String,
    /// Raw content bytes.
    pub content: Vec<u8>,
    /// Embed as a nested message body instead of a downloadable file.
    pub inline: bool,
}

impl Attachment {
    /// Creates an attachment from an in-memory buffer.
    #[must_use]
    pub fn from_bytes(filename: impl Into<String>, content: Vec<u8>, inline: bool) -> Self {
        Self {
            filename: filename.into(),
            content,
            inline,
        }
    }

    /// Creates an attachment by reading a file fully into memory.
    ///
    /// The final path segment becomes the attachment filename.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>, inline: bool) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            filename,
            content,
            inline,
        })
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

    #[test]
    fn test_from_bytes() {
        let attachment = Attachment::from_bytes("data.bin", vec![1, 2, 3], false);
        assert_eq!(attachment.filename, "data.bin");
        assert_eq!(attachment.content, vec![1, 2, 3]);
        assert!(!attachment.inline);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("mailforge_attachment_test.txt");
        std::fs::write(&path, b"file content").unwrap();

        let attachment = Attachment::from_file(&path, false).unwrap();
        assert_eq!(attachment.filename, "mailforge_attachment_test.txt");
        assert_eq!(attachment.content, b"file content");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_file_missing() {
        let result = Attachment::from_file("/nonexistent/path/report.pdf", false);
        assert!(result.is_err());
    }
}
