//! Sequential SMTP client.
//!
//! A thin wrapper over one connection: greeting, EHLO, optional TLS
//! upgrade, AUTH PLAIN, envelope, DATA, QUIT, strictly in that order. No
//! connection pooling, no retries; failures surface to the caller as-is.

use crate::address::Address;
use crate::command::Command;
use crate::connection::{self, SmtpStream};
use crate::error::{Error, Result};
use crate::reply::{Reply, ReplyCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

/// Default port for implicit TLS.
const SMTPS_PORT: u16 = 465;

/// SMTP client over a single connection.
#[derive(Debug)]
pub struct Client {
    stream: SmtpStream,
}

impl Client {
    /// Connects over plain TCP and consumes the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or the greeting is not 220.
    pub async fn connect(hostname: &str, port: u16) -> Result<Self> {
        let mut stream = connection::connect(hostname, port).await?;
        Self::expect_greeting(&mut stream).await?;
        debug!(hostname, port, "connected");
        Ok(Self { stream })
    }

    /// Connects over implicit TLS and consumes the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, handshake or greeting fails.
    pub async fn connect_tls(hostname: &str, port: u16) -> Result<Self> {
        let mut stream = connection::connect_tls(hostname, port).await?;
        Self::expect_greeting(&mut stream).await?;
        debug!(hostname, port, "connected over TLS");
        Ok(Self { stream })
    }

    async fn expect_greeting(stream: &mut SmtpStream) -> Result<()> {
        let reply = stream.read_reply().await?;
        if reply.code != ReplyCode::SERVICE_READY {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }
        Ok(())
    }

    async fn command(&mut self, command: &Command) -> Result<Reply> {
        self.stream.write_all(&command.serialize()).await?;
        self.stream.read_reply().await
    }

    async fn checked(&mut self, command: &Command) -> Result<Reply> {
        let reply = self.command(command).await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }
        Ok(reply)
    }

    /// Sends EHLO and returns the reply carrying the advertised extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the greeting.
    pub async fn ehlo(&mut self, hostname: &str) -> Result<Reply> {
        self.checked(&Command::Ehlo {
            hostname: hostname.to_string(),
        })
        .await
    }

    /// Upgrades the connection with STARTTLS and re-sends EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if STARTTLS is rejected or the handshake fails.
    pub async fn starttls(mut self, hostname: &str) -> Result<Self> {
        let reply = self.command(&Command::StartTls).await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.stream = self.stream.upgrade_to_tls(hostname).await?;
        self.ehlo(hostname).await?;
        Ok(self)
    }

    /// Authenticates with AUTH PLAIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials.
    pub async fn auth_plain(&mut self, username: &str, password: &str) -> Result<()> {
        let token = STANDARD.encode(format!("\0{username}\0{password}"));
        self.checked(&Command::AuthPlain { token }).await?;
        debug!(username, "authenticated");
        Ok(())
    }

    /// Starts a mail transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(&mut self, from: &Address) -> Result<()> {
        self.checked(&Command::MailFrom { from: from.clone() }).await?;
        Ok(())
    }

    /// Adds a recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(&mut self, to: &Address) -> Result<()> {
        self.checked(&Command::RcptTo { to: to.clone() }).await?;
        Ok(())
    }

    /// Sends the message content and completes the transaction.
    ///
    /// The message is passed through dot-stuffing and CRLF normalization;
    /// the terminating `.` line is appended here.
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses DATA or rejects the message.
    pub async fn send_data(&mut self, message: &[u8]) -> Result<()> {
        let reply = self.command(&Command::Data).await?;
        if reply.code != ReplyCode::START_DATA {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.stream.write_all(&dot_stuff(message)).await?;
        self.stream.write_all(b".\r\n").await?;

        let reply = self.stream.read_reply().await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        debug!(bytes = message.len(), "message accepted");
        Ok(())
    }

    /// Sends QUIT and closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub async fn quit(mut self) -> Result<()> {
        let reply = self.command(&Command::Quit).await?;
        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }
        Ok(())
    }
}

/// Prepares message bytes for the DATA phase.
///
/// Line endings are normalized to CRLF and lines starting with `.` get the
/// dot doubled per RFC 5321 §4.5.2. The terminating `.` line is not added
/// here.
#[must_use]
pub fn dot_stuff(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + 2);

    for line in message.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if line.first() == Some(&b'.') {
            out.push(b'.');
        }

        out.extend_from_slice(line);
        out.extend_from_slice(b"\r\n");
    }

    out
}

/// Sends a complete message in one call.
///
/// Connects to `hostname:port` (implicit TLS on 465, otherwise plain with a
/// STARTTLS upgrade when the server advertises it), authenticates when a
/// username is non-empty, submits the envelope and message, and quits. The
/// message bytes are forwarded as-is apart from DATA-phase framing.
///
/// # Errors
///
/// Returns an error on connection, authentication, envelope or data
/// failure; recipients and message are never partially retried.
pub async fn send_message(
    hostname: &str,
    port: u16,
    username: &str,
    password: &str,
    from: &str,
    recipients: &[String],
    message: &[u8],
) -> Result<()> {
    let from = Address::new(from)?;
    let recipients = recipients
        .iter()
        .map(|recipient| Address::new(recipient.as_str()))
        .collect::<Result<Vec<_>>>()?;

    let mut client = if port == SMTPS_PORT {
        let mut client = Client::connect_tls(hostname, port).await?;
        client.ehlo(hostname).await?;
        client
    } else {
        let mut client = Client::connect(hostname, port).await?;
        let reply = client.ehlo(hostname).await?;
        if reply.advertises("STARTTLS") {
            client.starttls(hostname).await?
        } else {
            client
        }
    };

    if !username.is_empty() {
        client.auth_plain(username, password).await?;
    }

    client.mail_from(&from).await?;
    for recipient in &recipients {
        client.rcpt_to(recipient).await?;
    }

    client.send_data(message).await?;
    client.quit().await
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
    fn test_dot_stuff_doubles_leading_dots() {
        let stuffed = dot_stuff(b"first\r\n.hidden\r\nlast");
        assert_eq!(stuffed, b"first\r\n..hidden\r\nlast\r\n");
    }

    #[test]
    fn test_dot_stuff_normalizes_bare_lf() {
        let stuffed = dot_stuff(b"one\ntwo");
        assert_eq!(stuffed, b"one\r\ntwo\r\n");
    }

    #[test]
    fn test_dot_stuff_empty_message() {
        assert_eq!(dot_stuff(b""), b"\r\n");
    }

    #[test]
    fn test_dot_stuff_lone_dot_line() {
        let stuffed = dot_stuff(b"a\r\n.\r\nb");
        assert_eq!(stuffed, b"a\r\n..\r\nb\r\n");
    }

    #[tokio::test]
    async fn test_full_dialog_against_loopback_server() {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Scripted server: one canned reply per client command, collecting
        // the DATA body for inspection.
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = stream.into_split();
            let mut lines = BufReader::new(read_half).lines();

            write_half.write_all(b"220 test ESMTP\r\n").await.unwrap();

            let ehlo = lines.next_line().await.unwrap().unwrap();
            assert!(ehlo.starts_with("EHLO "));
            write_half
                .write_all(b"250-test\r\n250 AUTH PLAIN\r\n")
                .await
                .unwrap();

            let auth = lines.next_line().await.unwrap().unwrap();
            assert!(auth.starts_with("AUTH PLAIN "));
            write_half.write_all(b"235 ok\r\n").await.unwrap();

            assert_eq!(
                lines.next_line().await.unwrap().unwrap(),
                "MAIL FROM:<a@x.com>"
            );
            write_half.write_all(b"250 ok\r\n").await.unwrap();

            assert_eq!(lines.next_line().await.unwrap().unwrap(), "RCPT TO:<b@y.com>");
            write_half.write_all(b"250 ok\r\n").await.unwrap();

            assert_eq!(lines.next_line().await.unwrap().unwrap(), "DATA");
            write_half.write_all(b"354 go ahead\r\n").await.unwrap();

            let mut body = Vec::new();
            loop {
                let line = lines.next_line().await.unwrap().unwrap();
                if line == "." {
                    break;
                }
                body.push(line);
            }
            write_half.write_all(b"250 queued\r\n").await.unwrap();

            assert_eq!(lines.next_line().await.unwrap().unwrap(), "QUIT");
            write_half.write_all(b"221 bye\r\n").await.unwrap();

            body
        });

        let mut client = Client::connect("127.0.0.1", port).await.unwrap();
        let reply = client.ehlo("localhost").await.unwrap();
        assert!(reply.advertises("AUTH"));

        client.auth_plain("user", "pass").await.unwrap();
        client
            .mail_from(&Address::new("a@x.com").unwrap())
            .await
            .unwrap();
        client
            .rcpt_to(&Address::new("b@y.com").unwrap())
            .await
            .unwrap();
        client.send_data(b"hello\r\n.dotted").await.unwrap();
        client.quit().await.unwrap();

        let body = server.await.unwrap();
        assert_eq!(body, vec!["hello".to_string(), "..dotted".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_recipient_surfaces_code() {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = stream.into_split();
            let mut lines = BufReader::new(read_half).lines();

            write_half.write_all(b"220 test ESMTP\r\n").await.unwrap();
            let _ = lines.next_line().await.unwrap();
            write_half.write_all(b"250 test\r\n").await.unwrap();
            let _ = lines.next_line().await.unwrap();
            write_half.write_all(b"250 ok\r\n").await.unwrap();
            let _ = lines.next_line().await.unwrap();
            write_half
                .write_all(b"550 no such user\r\n")
                .await
                .unwrap();
        });

        let mut client = Client::connect("127.0.0.1", port).await.unwrap();
        client.ehlo("localhost").await.unwrap();
        client
            .mail_from(&Address::new("a@x.com").unwrap())
            .await
            .unwrap();

        let err = client
            .rcpt_to(&Address::new("nobody@y.com").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Smtp { code: 550, .. }));
        assert!(err.is_permanent());
    }
}
