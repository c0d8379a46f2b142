//! High-level send service.

use crate::credentials::Credentials;
use crate::error::Result;
use mailforge_mime::{Message, encoder};
use tracing::debug;

/// Encodes a message and submits it through the SMTP transport.
///
/// The encoder output and the aggregated recipients (`to`, then `cc`, then
/// `bcc`) are handed to the transport as-is; transport failures come back
/// unmodified inside [`Error::Smtp`](crate::Error::Smtp).
///
/// # Errors
///
/// Returns an error if the SMTP dialog fails at any step.
pub async fn send(credentials: &Credentials, message: &Message) -> Result<()> {
    let recipients = message.recipients();
    let bytes = encoder::encode(message);

    debug!(
        server = %credentials.server_address(),
        recipients = recipients.len(),
        bytes = bytes.len(),
        "submitting message"
    );

    mailforge_smtp::send_message(
        &credentials.hostname,
        credentials.port,
        &credentials.address,
        &credentials.password,
        message.from.address.as_str(),
        &recipients,
        &bytes,
    )
    .await?;

    Ok(())
}
