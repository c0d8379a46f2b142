//! # mailforge-core
//!
//! Credential handling and the high-level send path for mailforge.
//!
//! This crate glues the two lower layers together: a [`Message`] built with
//! `mailforge-mime` is encoded to its wire form and submitted through
//! `mailforge-smtp` using stored [`Credentials`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailforge_core::{Credentials, send};
//! use mailforge_mime::{Mailbox, Message};
//!
//! #[tokio::main]
//! async fn main() -> mailforge_core::Result<()> {
//!     let credentials = Credentials::from_json_file("credentials.json")?;
//!
//!     let from = Mailbox::with_name(&credentials.name, &credentials.address)?;
//!     let mut message = Message::new(from, "Monthly report", "See attachment.")
//!         .to("recipient@example.com");
//!     message.attach_file("report.pdf", false)?;
//!
//!     send(&credentials, &message).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod credentials;
mod error;
mod send;

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use send::send;

pub use mailforge_mime::{Attachment, BodyContentType, Header, Mailbox, Message};
