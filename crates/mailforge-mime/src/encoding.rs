//! MIME encoding utilities.
//!
//! Base64 transfer encoding (plain and hard-wrapped) and RFC 2047 encoded
//! words for header values.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length for base64-encoded attachment bodies.
const WRAP_WIDTH: usize = 76;

/// Encodes data as Base64 (standard alphabet, with padding).
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Encodes data as Base64 hard-wrapped for transfer.
///
/// A line break is inserted after every 76 encoded characters, including
/// after a final full group, so no line ever exceeds 76 characters.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + 2 * (encoded.len() / WRAP_WIDTH));

    for (i, ch) in encoded.chars().enumerate() {
        wrapped.push(ch);
        if (i + 1) % WRAP_WIDTH == 0 {
            wrapped.push_str("\r\n");
        }
    }

    wrapped
}

/// Encodes a header value as an RFC 2047 encoded word.
///
/// Format: `=?UTF-8?B?<base64>?=`. The value is always B-encoded, ASCII or
/// not, so header emission never has to branch on content.
#[must_use]
pub fn encode_word(text: &str) -> String {
    let encoded = encode_base64(text.as_bytes());
    format!("=?UTF-8?B?{encoded}?=")
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
    use proptest::prelude::*;

    fn unwrap_and_decode(wrapped: &str) -> Vec<u8> {
        let joined: String = wrapped.lines().collect();
        decode_base64(&joined).unwrap()
    }

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_wrapped_lines_never_exceed_width() {
        let data: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
        let wrapped = encode_base64_wrapped(&data);

        for line in wrapped.lines() {
            assert!(line.len() <= 76, "line too long: {}", line.len());
        }
        assert_eq!(unwrap_and_decode(&wrapped), data);
    }

    #[test]
    fn test_wrapped_empty_input() {
        assert_eq!(encode_base64_wrapped(b""), "");
    }

    #[test]
    fn test_wrapped_exact_multiple_of_width() {
        // 57 raw bytes encode to exactly 76 characters
        let data = vec![0xAB; 57];
        let wrapped = encode_base64_wrapped(&data);

        assert!(wrapped.ends_with("\r\n"));
        assert_eq!(wrapped.lines().next().unwrap().len(), 76);
        assert_eq!(unwrap_and_decode(&wrapped), data);
    }

    #[test]
    fn test_wrapped_all_byte_values() {
        let data: Vec<u8> = (0u8..=255).collect();
        let wrapped = encode_base64_wrapped(&data);
        assert_eq!(unwrap_and_decode(&wrapped), data);
    }

    #[test]
    fn test_encode_word_ascii_still_encoded() {
        assert_eq!(encode_word("Hi"), "=?UTF-8?B?SGk=?=");
    }

    #[test]
    fn test_encode_word_non_ascii() {
        let word = encode_word("Héllo");
        assert!(word.starts_with("=?UTF-8?B?"));
        assert!(word.ends_with("?="));
        assert_eq!(decode_base64(&word[10..word.len() - 2]).unwrap(), "Héllo".as_bytes());
    }

    proptest! {
        #[test]
        fn test_wrap_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let wrapped = encode_base64_wrapped(&data);
            prop_assert_eq!(unwrap_and_decode(&wrapped), data);
            for line in wrapped.lines() {
                prop_assert!(line.len() <= 76);
            }
        }
    }
}
