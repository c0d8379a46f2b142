//! # mailforge-mime
//!
//! Message model and wire encoder for outbound email.
//!
//! ## Features
//!
//! - **Message model**: sender, recipients, subject, body, custom headers
//!   and a filename-keyed attachment set
//! - **Wire encoding**: RFC 5322 headers, RFC 2047 encoded words,
//!   `multipart/mixed` bodies per RFC 2046, base64 transfer encoding
//! - **Attachments**: from files or in-memory buffers, downloadable or
//!   inline
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailforge_mime::{Mailbox, Message, encoder};
//!
//! let from = Mailbox::with_name("Sender", "sender@example.com")?;
//! let mut message = Message::new(from, "Test Message", "Hello, World!")
//!     .to("recipient@example.com");
//!
//! message.attach_file("document.pdf", false)?;
//!
//! let bytes = encoder::encode(&message);
//! ```
//!
//! The encoder is total: it never fails, and incomplete input simply yields
//! a semantically incomplete message. Transport is out of scope — the
//! returned bytes are handed as-is to an SMTP sender.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod attachment;
mod content_type;
mod error;
mod header;
mod message;

pub mod encoder;
pub mod encoding;

pub use address::{Address, Mailbox};
pub use attachment::Attachment;
pub use content_type::{BodyContentType, OCTET_STREAM, content_type_for_filename};
pub use error::{Error, Result};
pub use header::Header;
pub use message::Message;
