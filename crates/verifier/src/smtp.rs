//! Minimal SMTP client for RCPT TO probing.
//!
//! Speaks just enough of RFC 5321 to ask a mail exchanger whether it would
//! accept delivery for an address, then disconnects without sending
//! anything. No STARTTLS, no auth: this is a read-only probe, not a real
//! mail transfer agent.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

#[derive(Error, Debug)]
pub enum SmtpError {
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("timed out talking to {0}")]
    Timeout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a `RCPT TO` probe against one MX host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcptOutcome {
    /// Reply code in `[200, 400)`.
    Accepted,
    /// Reply code in `[400, 600)`, including greylisting and policy
    /// rejections alike — an RCPT probe gets no second chance to
    /// distinguish them.
    Rejected,
}

/// Open a connection to `host:25`, run EHLO/HELO, `MAIL FROM`, `RCPT TO` for
/// `rcpt`, then `QUIT`. Returns the final reply code's class.
pub async fn probe_rcpt(
    host: &str,
    rcpt: &str,
    mail_from: &str,
    helo_name: &str,
    session_timeout: Duration,
) -> Result<RcptOutcome, SmtpError> {
    timeout(session_timeout, run_session(host, rcpt, mail_from, helo_name))
        .await
        .map_err(|_| SmtpError::Timeout(host.to_string()))?
}

async fn run_session(
    host: &str,
    rcpt: &str,
    mail_from: &str,
    helo_name: &str,
) -> Result<RcptOutcome, SmtpError> {
    let stream = TcpStream::connect((host, 25))
        .await
        .map_err(|source| SmtpError::Connect {
            host: host.to_string(),
            source,
        })?;
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    read_reply(&mut reader).await?;

    send_line(&mut writer, &format!("EHLO {helo_name}")).await?;
    let ehlo_reply = read_reply(&mut reader).await?;
    if ehlo_reply.code >= 500 {
        send_line(&mut writer, &format!("HELO {helo_name}")).await?;
        read_reply(&mut reader).await?;
    }

    send_line(&mut writer, &format!("MAIL FROM:<{mail_from}>")).await?;
    let mail_reply = read_reply(&mut reader).await?;
    if mail_reply.code >= 400 {
        let _ = send_line(&mut writer, "QUIT").await;
        return Ok(reply_outcome(mail_reply.code));
    }

    send_line(&mut writer, &format!("RCPT TO:<{rcpt}>")).await?;
    let rcpt_reply = read_reply(&mut reader).await?;

    let _ = send_line(&mut writer, "QUIT").await;

    Ok(reply_outcome(rcpt_reply.code))
}

struct Reply {
    code: u16,
}

fn reply_outcome(code: u16) -> RcptOutcome {
    match code {
        200..=399 => RcptOutcome::Accepted,
        _ => RcptOutcome::Rejected,
    }
}

async fn send_line(
    writer: &mut (impl AsyncWriteExt + Unpin),
    line: &str,
) -> Result<(), std::io::Error> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await
}

/// Read one SMTP reply, following multi-line continuations (`250-` prefix).
async fn read_reply(
    reader: &mut (impl AsyncBufReadExt + Unpin),
) -> Result<Reply, std::io::Error> {
    let mut last_code = 0u16;
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Ok(Reply { code: last_code });
        }
        let code: u16 = line.get(0..3).and_then(|s| s.parse().ok()).unwrap_or(0);
        last_code = code;
        let continues = line.as_bytes().get(3) == Some(&b'-');
        if !continues {
            return Ok(Reply { code });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_outcome_classes() {
        assert_eq!(reply_outcome(250), RcptOutcome::Accepted);
        assert_eq!(reply_outcome(354), RcptOutcome::Accepted);
        assert_eq!(reply_outcome(450), RcptOutcome::Rejected);
        assert_eq!(reply_outcome(550), RcptOutcome::Rejected);
    }
}
