//! The outbound message model.

use crate::address::Mailbox;
use crate::attachment::Attachment;
use crate::content_type::BodyContentType;
use crate::error::Result;
use crate::header::Header;
use std::path::Path;

/// An outbound email message.
///
/// Holds the message's fields and attachment set; populated by the caller and
/// handed to [`encoder::encode`](crate::encoder::encode) for serialization.
/// Attachments are keyed by filename and kept in insertion order; adding an
/// attachment under an existing filename replaces that entry in place.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Sender mailbox.
    pub from: Mailbox,
    /// Primary recipient addresses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub to: Vec<String>,
    /// Carbon-copy addresses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cc: Vec<String>,
    /// Blind-carbon-copy addresses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bcc: Vec<String>,
    /// Reply-To address, emitted only when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reply_to: Option<String>,
    /// Subject line (may contain non-ASCII).
    pub subject: String,
    /// Primary body text.
    pub body: String,
    /// Content type of the primary body.
    #[cfg_attr(feature = "serde", serde(default))]
    pub body_content_type: BodyContentType,
    /// Custom headers, in insertion order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub headers: Vec<Header>,
    #[cfg_attr(feature = "serde", serde(default))]
    attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new message with a sender, subject and body.
    #[must_use]
    pub fn new(from: Mailbox, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            subject: subject.into(),
            body: body.into(),
            body_content_type: BodyContentType::default(),
            headers: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, recipient: impl Into<String>) -> Self {
        self.cc.push(recipient.into());
        self
    }

    /// Adds a BCC recipient.
    #[must_use]
    pub fn bcc(mut self, recipient: impl Into<String>) -> Self {
        self.bcc.push(recipient.into());
        self
    }

    /// Sets the Reply-To address.
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Sets the body content type.
    #[must_use]
    pub fn body_content_type(mut self, content_type: impl Into<BodyContentType>) -> Self {
        self.body_content_type = content_type.into();
        self
    }

    /// Adds an attachment, replacing any existing entry with the same
    /// filename in place.
    pub fn attach(&mut self, attachment: Attachment) {
        match self
            .attachments
            .iter_mut()
            .find(|existing| existing.filename == attachment.filename)
        {
            Some(slot) => *slot = attachment,
            None => self.attachments.push(attachment),
        }
    }

    /// Adds an attachment from an in-memory buffer.
    ///
    /// Always succeeds; the filename is not validated.
    pub fn attach_bytes(&mut self, filename: impl Into<String>, content: Vec<u8>, inline: bool) {
        self.attach(Attachment::from_bytes(filename, content, inline));
    }

    /// Adds an attachment by reading a file fully into memory.
    ///
    /// The final path segment becomes the attachment filename.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; the message is left
    /// unchanged in that case.
    pub fn attach_file(&mut self, path: impl AsRef<Path>, inline: bool) -> Result<()> {
        let attachment = Attachment::from_file(path, inline)?;
        self.attach(attachment);
        Ok(())
    }

    /// Looks up an attachment by filename.
    #[must_use]
    pub fn attachment(&self, filename: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|attachment| attachment.filename == filename)
    }

    /// Returns the attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Appends a custom header and returns it.
    ///
    /// Duplicate keys are neither checked nor merged.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> Header {
        let header = Header::new(key, value);
        self.headers.push(header.clone());
        header
    }

    /// Returns all recipients: `to`, then `cc`, then `bcc`.
    ///
    /// Duplicates and order are preserved; the message itself is not touched.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        let mut recipients =
            Vec::with_capacity(self.to.len() + self.cc.len() + self.bcc.len());
        recipients.extend_from_slice(&self.to);
        recipients.extend_from_slice(&self.cc);
        recipients.extend_from_slice(&self.bcc);
        recipients
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

    fn sample() -> Message {
        let from = Mailbox::new("sender@example.com").unwrap();
        Message::new(from, "Subject", "Body")
    }

    #[test]
    fn test_recipients_concatenation_order() {
        let message = sample()
            .to("a@example.com")
            .to("b@example.com")
            .cc("c@example.com")
            .bcc("d@example.com");

        assert_eq!(
            message.recipients(),
            vec![
                "a@example.com",
                "b@example.com",
                "c@example.com",
                "d@example.com"
            ]
        );
    }

    #[test]
    fn test_recipients_preserves_duplicates() {
        let message = sample().to("a@example.com").cc("a@example.com");
        assert_eq!(message.recipients().len(), 2);
    }

    #[test]
    fn test_recipients_does_not_mutate_to() {
        let message = sample().to("a@example.com").cc("c@example.com");
        let _ = message.recipients();
        assert_eq!(message.to, vec!["a@example.com"]);
        assert_eq!(message.cc, vec!["c@example.com"]);
    }

    #[test]
    fn test_recipients_empty_groups() {
        assert!(sample().recipients().is_empty());

        let message = sample().bcc("d@example.com");
        assert_eq!(message.recipients(), vec!["d@example.com"]);
    }

    #[test]
    fn test_attach_replaces_same_filename() {
        let mut message = sample();
        message.attach_bytes("report.pdf", vec![1, 1, 1], false);
        message.attach_bytes("other.txt", vec![9], false);
        message.attach_bytes("report.pdf", vec![2, 2], false);

        assert_eq!(message.attachments().len(), 2);
        assert_eq!(message.attachment("report.pdf").unwrap().content, vec![2, 2]);
        // Replacement keeps the original slot, so output order is stable
        assert_eq!(message.attachments()[0].filename, "report.pdf");
        assert_eq!(message.attachments()[1].filename, "other.txt");
    }

    #[test]
    fn test_attach_file_missing_leaves_message_unchanged() {
        let mut message = sample();
        assert!(message.attach_file("/nonexistent/file.bin", false).is_err());
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn test_add_header_keeps_duplicates_in_order() {
        let mut message = sample();
        let first = message.add_header("X-Tag", "one");
        message.add_header("X-Other", "value");
        message.add_header("X-Tag", "two");

        assert_eq!(first.key, "X-Tag");
        assert_eq!(message.headers.len(), 3);
        assert_eq!(message.headers[0].value, "one");
        assert_eq!(message.headers[2].value, "two");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "from": {"name": "Sender", "address": "sender@example.com"},
            "to": ["recipient@example.com"],
            "subject": "Hello",
            "body": "World",
            "body_content_type": "text/html"
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.from.to_string(), "Sender <sender@example.com>");
        assert_eq!(message.to, vec!["recipient@example.com"]);
        assert_eq!(message.body_content_type, BodyContentType::Html);
        assert!(message.attachments().is_empty());
    }
}
