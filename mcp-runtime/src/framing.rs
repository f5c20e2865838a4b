use std::io;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// How a message arrived on the wire. Replies go out the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One JSON document per line.
    Line,
    /// `Content-Length` headers, a blank line, then the body.
    ContentLength,
}

/// One raw message body plus the framing it arrived in.
#[derive(Debug)]
pub struct Frame {
    pub payload: Vec<u8>,
    pub framing: Framing,
}

/// Read the next message. `Ok(None)` on clean end of input.
///
/// Blank lines between messages are skipped. A line starting with a
/// `Content-Length` header switches to header mode for that message only.
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            if content_length.is_none() {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Unexpected EOF while reading MCP headers",
            ));
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if content_length.is_some() {
            if trimmed.is_empty() {
                break;
            }
            continue;
        }

        if trimmed.trim().is_empty() {
            continue;
        }

        match header_content_length(trimmed)? {
            Some(len) => content_length = Some(len),
            None => {
                return Ok(Some(Frame {
                    payload: trimmed.as_bytes().to_vec(),
                    framing: Framing::Line,
                }));
            }
        }
    }

    let content_length = content_length.unwrap_or_default();
    let mut payload = vec![0_u8; content_length];
    reader.read_exact(&mut payload).await?;
    Ok(Some(Frame {
        payload,
        framing: Framing::ContentLength,
    }))
}

fn header_content_length(line: &str) -> io::Result<Option<usize>> {
    let Some((name, value)) = line.split_once(':') else {
        return Ok(None);
    };
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return Ok(None);
    }
    value.trim().parse::<usize>().map(Some).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidData, "Invalid Content-Length header")
    })
}

pub async fn write_frame<W>(writer: &mut W, value: &Value, framing: Framing) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(value).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to serialize JSON: {e}"),
        )
    })?;
    match framing {
        Framing::Line => {
            writer.write_all(&body).await?;
            writer.write_all(b"\n").await?;
        }
        Framing::ContentLength => {
            let header = format!(
                "Content-Length: {}\r\nContent-Type: application/json\r\n\r\n",
                body.len()
            );
            writer.write_all(header.as_bytes()).await?;
            writer.write_all(&body).await?;
        }
    }
    writer.flush().await
}
