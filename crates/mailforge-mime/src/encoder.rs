//! Wire encoding of an outbound message.
//!
//! Serializes a [`Message`] into an RFC 5322 byte stream: headers with
//! RFC 2047 encoded words, an optional `multipart/mixed` body with one part
//! per attachment, and base64 transfer encoding for non-inline attachments.
//!
//! Encoding is total: malformed input yields a malformed message, never an
//! error.

use crate::content_type::content_type_for_filename;
use crate::encoding::{encode_base64_wrapped, encode_word};
use crate::message::Message;
use chrono::{DateTime, FixedOffset, Local};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::fmt::Write as _;

/// `Date` header format: RFC 1123 with a numeric zone.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Length of the generated multipart boundary token.
const BOUNDARY_LEN: usize = 28;

/// Encodes a message into its wire form, dated now.
#[must_use]
pub fn encode(message: &Message) -> Vec<u8> {
    encode_with_date(message, Local::now().fixed_offset())
}

/// Encodes a message into its wire form with an explicit `Date` header value.
///
/// The multipart boundary is still freshly generated per call; tests that
/// need it can recover it from the `boundary=` parameter in the output.
#[must_use]
pub fn encode_with_date(message: &Message, date: DateTime<FixedOffset>) -> Vec<u8> {
    let boundary = generate_boundary();
    let mut out = String::new();

    let _ = write!(out, "From: {}\r\n", message.from);
    let _ = write!(out, "Date: {}\r\n", date.format(DATE_FORMAT));
    let _ = write!(out, "To: {}\r\n", message.to.join(","));

    if !message.cc.is_empty() {
        let _ = write!(out, "CC: {}\r\n", message.cc.join(","));
    }

    let _ = write!(out, "Subject: {}\r\n", encode_word(&message.subject));

    if let Some(reply_to) = &message.reply_to {
        if !reply_to.is_empty() {
            let _ = write!(out, "Reply-To: {reply_to}\r\n");
        }
    }

    out.push_str("MIME-Version: 1.0\r\n");

    for header in &message.headers {
        let _ = write!(out, "{}: {}\r\n", header.key, header.value);
    }

    let attachments = message.attachments();
    if !attachments.is_empty() {
        let _ = write!(out, "Content-Type: multipart/mixed; boundary={boundary}\r\n");
        let _ = write!(out, "\r\n--{boundary}\r\n");
    }

    // Primary body part. Without attachments its Content-Type directly
    // continues the header block.
    let _ = write!(
        out,
        "Content-Type: {}; charset=utf-8\r\n\r\n",
        message.body_content_type
    );
    out.push_str(&message.body);
    out.push_str("\r\n");

    let mut bytes = out.into_bytes();

    for attachment in attachments {
        let mut section = String::new();
        let _ = write!(section, "\r\n\r\n--{boundary}\r\n");

        if attachment.inline {
            section.push_str("Content-Type: message/rfc822\r\n");
            let _ = write!(
                section,
                "Content-Disposition: inline; filename=\"{}\"\r\n\r\n",
                attachment.filename
            );
            bytes.extend_from_slice(section.as_bytes());
            // Nested message content goes out verbatim, no transfer encoding
            bytes.extend_from_slice(&attachment.content);
        } else {
            let _ = write!(
                section,
                "Content-Type: {}\r\n",
                content_type_for_filename(&attachment.filename)
            );
            section.push_str("Content-Transfer-Encoding: base64\r\n");
            let _ = write!(
                section,
                "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
                encode_word(&attachment.filename)
            );
            section.push_str(&encode_base64_wrapped(&attachment.content));
            bytes.extend_from_slice(section.as_bytes());
        }

        bytes.extend_from_slice(format!("\r\n--{boundary}").as_bytes());
    }

    if !attachments.is_empty() {
        // The separator after the last attachment becomes the terminator
        bytes.extend_from_slice(b"--");
    }

    bytes
}

/// Generates a fresh multipart boundary token.
///
/// Random per message so the delimiter cannot collide with attachment
/// content that happens to contain a previously seen token.
fn generate_boundary() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
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
    use crate::address::Mailbox;
    use crate::encoding::decode_base64;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 4, 12, 30, 0)
            .unwrap()
    }

    fn simple_message() -> Message {
        let from = Mailbox::new("a@x.com").unwrap();
        Message::new(from, "Hi", "hello").to("b@y.com")
    }

    fn encode_to_string(message: &Message) -> String {
        String::from_utf8(encode_with_date(message, fixed_date())).unwrap()
    }

    /// Recovers the generated boundary from the multipart header.
    fn boundary_of(output: &str) -> String {
        let start = output.find("boundary=").unwrap() + "boundary=".len();
        output[start..]
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect()
    }

    /// Extracts the wrapped base64 payload of the first non-inline section.
    fn base64_payload(output: &str) -> String {
        let start = output.find("Content-Transfer-Encoding: base64").unwrap();
        let section = &output[start..];
        let payload = &section[section.find("\r\n\r\n").unwrap() + 4..];
        payload[..payload.find("\r\n--").unwrap()].to_string()
    }

    fn decode_payload(payload: &str) -> Vec<u8> {
        let joined: String = payload.lines().collect();
        decode_base64(&joined).unwrap()
    }

    #[test]
    fn test_simple_message_scenario() {
        let output = encode_to_string(&simple_message());

        assert!(output.contains("From: a@x.com\r\n"));
        assert!(output.contains("To: b@y.com\r\n"));
        assert!(output.contains("Subject: =?UTF-8?B?SGk=?=\r\n"));
        assert!(output.contains("Content-Type: text/plain; charset=utf-8\r\n\r\nhello\r\n"));
        assert!(!output.contains("boundary="));
        assert!(!output.contains("--"));
    }

    #[test]
    fn test_date_header_uses_injected_time() {
        let output = encode_to_string(&simple_message());
        assert!(output.contains("Date: Sat, 04 May 2024 12:30:00 +0000\r\n"));
    }

    #[test]
    fn test_exactly_one_mime_version_and_subject() {
        let mut message = simple_message();
        message.subject = "Héllo ✓".to_string();
        let output = encode_to_string(&message);

        assert_eq!(output.matches("MIME-Version: 1.0\r\n").count(), 1);

        let subjects: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("Subject: "))
            .collect();
        assert_eq!(subjects.len(), 1);

        let value = subjects[0].strip_prefix("Subject: ").unwrap();
        let inner = value
            .strip_prefix("=?UTF-8?B?")
            .unwrap()
            .strip_suffix("?=")
            .unwrap();
        assert_eq!(decode_base64(inner).unwrap(), "Héllo ✓".as_bytes());
    }

    #[test]
    fn test_to_emitted_even_when_empty() {
        let from = Mailbox::new("a@x.com").unwrap();
        let message = Message::new(from, "s", "b");
        let output = encode_to_string(&message);
        assert!(output.contains("To: \r\n"));
    }

    #[test]
    fn test_cc_only_when_nonempty() {
        let output = encode_to_string(&simple_message());
        assert!(!output.contains("CC:"));

        let message = simple_message().cc("c@z.com").cc("d@z.com");
        let output = encode_to_string(&message);
        assert!(output.contains("CC: c@z.com,d@z.com\r\n"));
    }

    #[test]
    fn test_bcc_never_emitted_as_header() {
        let message = simple_message().bcc("hidden@z.com");
        let output = encode_to_string(&message);
        assert!(!output.contains("hidden@z.com"));
    }

    #[test]
    fn test_reply_to_only_when_set_and_nonempty() {
        let output = encode_to_string(&simple_message());
        assert!(!output.contains("Reply-To:"));

        let mut message = simple_message();
        message.reply_to = Some(String::new());
        assert!(!encode_to_string(&message).contains("Reply-To:"));

        let message = simple_message().reply_to("replies@x.com");
        assert!(encode_to_string(&message).contains("Reply-To: replies@x.com\r\n"));
    }

    #[test]
    fn test_from_display_name() {
        let from = Mailbox::with_name("Alice", "a@x.com").unwrap();
        let message = Message::new(from, "s", "b");
        let output = encode_to_string(&message);
        assert!(output.contains("From: Alice <a@x.com>\r\n"));
    }

    #[test]
    fn test_custom_headers_in_insertion_order() {
        let mut message = simple_message();
        message.add_header("X-First", "1");
        message.add_header("X-Second", "2");
        let output = encode_to_string(&message);

        let first = output.find("X-First: 1\r\n").unwrap();
        let second = output.find("X-Second: 2\r\n").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_multipart_structure() {
        let mut message = simple_message();
        message.attach_bytes("report.pdf", vec![0x25, 0x50, 0x44, 0x46], false);
        let output = encode_to_string(&message);
        let boundary = boundary_of(&output);

        assert_eq!(boundary.len(), 28);
        assert!(output.contains(&format!(
            "Content-Type: multipart/mixed; boundary={boundary}\r\n"
        )));
        assert!(output.contains(&format!("\r\n--{boundary}\r\n")));
        assert!(output.ends_with(&format!("\r\n--{boundary}--")));
    }

    #[test]
    fn test_attachment_base64_roundtrip() {
        let content: Vec<u8> = (0u8..=255).cycle().take(500).collect();
        let mut message = simple_message();
        message.attach_bytes("data.bin", content.clone(), false);
        let output = encode_to_string(&message);

        let payload = base64_payload(&output);
        for line in payload.lines() {
            assert!(line.len() <= 76);
        }
        assert_eq!(decode_payload(&payload), content);
    }

    #[test]
    fn test_empty_attachment() {
        let mut message = simple_message();
        message.attach_bytes("empty.bin", Vec::new(), false);
        let output = encode_to_string(&message);

        assert!(decode_payload(&base64_payload(&output)).is_empty());
        let boundary = boundary_of(&output);
        assert!(output.ends_with(&format!("\r\n--{boundary}--")));
    }

    #[test]
    fn test_attachment_headers() {
        let mut message = simple_message();
        message.attach_bytes("photo.png", vec![0x89, 0x50], false);
        let output = encode_to_string(&message);

        assert!(output.contains("Content-Type: image/png\r\n"));
        assert!(output.contains("Content-Transfer-Encoding: base64\r\n"));
        assert!(output.contains(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n",
            encode_word("photo.png")
        )));
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let mut message = simple_message();
        message.attach_bytes("blob.zzz", vec![1], false);
        let output = encode_to_string(&message);
        assert!(output.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn test_inline_attachment_verbatim() {
        let nested = b"From: n@x.com\r\n\r\nnested body".to_vec();
        let mut message = simple_message();
        message.attach_bytes("nested.eml", nested, true);
        let output = encode_to_string(&message);

        assert!(output.contains("Content-Type: message/rfc822\r\n"));
        assert!(output.contains("Content-Disposition: inline; filename=\"nested.eml\"\r\n"));
        // Raw bytes, not base64
        assert!(output.contains("nested body"));
        assert!(!output.contains("Content-Transfer-Encoding"));
    }

    #[test]
    fn test_attachments_in_insertion_order() {
        let mut message = simple_message();
        message.attach_bytes("first.txt", vec![1], false);
        message.attach_bytes("second.txt", vec![2], false);
        let output = encode_to_string(&message);

        let first = output.find(&encode_word("first.txt")).unwrap();
        let second = output.find(&encode_word("second.txt")).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_boundary_fresh_per_encode() {
        let mut message = simple_message();
        message.attach_bytes("a.txt", vec![1], false);

        let first = boundary_of(&encode_to_string(&message));
        let second = boundary_of(&encode_to_string(&message));
        assert_ne!(first, second);
    }

    #[test]
    fn test_body_content_type_passthrough() {
        let mut message = simple_message();
        message.body_content_type = "application/json".into();
        message.body = "{}".to_string();
        let output = encode_to_string(&message);
        assert!(output.contains("Content-Type: application/json; charset=utf-8\r\n\r\n{}\r\n"));
    }
}
