//! # mailforge-smtp
//!
//! A thin SMTP sender implementing the client side of RFC 5321.
//!
//! The crate drives one sequential dialog per message — greeting, EHLO,
//! optional TLS (implicit on 465 or STARTTLS when advertised), AUTH PLAIN,
//! MAIL FROM, RCPT TO, DATA, QUIT — and forwards the already-encoded
//! message bytes unchanged apart from DATA-phase framing (CRLF
//! normalization and dot-stuffing). There is no connection pooling, no
//! retry and no interpretation of failures: every error propagates to the
//! caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailforge_smtp::send_message;
//!
//! #[tokio::main]
//! async fn main() -> mailforge_smtp::Result<()> {
//!     let message = b"Subject: Test\r\n\r\nHello, World!\r\n";
//!
//!     send_message(
//!         "smtp.example.com",
//!         587,
//!         "user@example.com",
//!         "password",
//!         "sender@example.com",
//!         &["recipient@example.com".to_string()],
//!         message,
//!     )
//!     .await
//! }
//! ```
//!
//! The step-by-step [`Client`] is available for callers that need to drive
//! the dialog themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod client;
mod command;
mod connection;
mod error;
mod reply;

pub use address::Address;
pub use client::{Client, dot_stuff, send_message};
pub use command::Command;
pub use connection::{SmtpStream, connect, connect_tls};
pub use error::{Error, Result};
pub use reply::{Reply, ReplyCode};
