//! Protocol codec
//!
//! Command encoding, the accumulating read buffer, and the recursive
//! reply decoder.
//!
//! Replies arrive as arbitrary chunks from the transport; the
//! [`ReadBuffer`] accumulates them and only hands out complete lines or
//! complete length-prefixed payloads. Decoding therefore never observes
//! a partial reply: it blocks, refilling from the source, until a full
//! reply is assembled or the stream errors.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

use super::{Arg, Reply};
use crate::error::{RedwireError, Result};

/// Line terminator for every protocol frame
pub const CRLF: &[u8] = b"\r\n";

/// Refill chunk size for the read buffer
const RECV_CHUNK: usize = 4096;

/// Maximum bulk payload size (512 MB, same as the server's own limit)
const MAX_BULK_SIZE: i64 = 512 * 1024 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command as an array of bulk strings
///
/// Format: `*<argc>\r\n` then `$<len>\r\n<bytes>\r\n` per argument, in
/// caller order, command name first.
pub fn encode_command(args: Vec<Arg>) -> Result<Bytes> {
    if args.is_empty() {
        return Err(RedwireError::Protocol(
            "cannot encode an empty command".to_string(),
        ));
    }

    let payloads: Vec<Bytes> = args.into_iter().map(Arg::into_bytes).collect();

    // Headers are short; 16 bytes per argument covers "$<len>\r\n" and
    // the trailing CRLF for any realistic length.
    let mut buf = BytesMut::with_capacity(
        16 + payloads.iter().map(|p| p.len() + 16).sum::<usize>(),
    );
    buf.extend_from_slice(format!("*{}\r\n", payloads.len()).as_bytes());
    for payload in &payloads {
        buf.extend_from_slice(format!("${}\r\n", payload.len()).as_bytes());
        buf.extend_from_slice(payload);
        buf.extend_from_slice(CRLF);
    }

    Ok(buf.freeze())
}

// =============================================================================
// Read Buffer
// =============================================================================

/// Accumulating byte queue layered over a raw receive source
///
/// Bytes are appended by refills and consumed front-to-back. The source
/// is any [`Read`]; in production it is the connection's transport.
#[derive(Debug, Default)]
pub struct ReadBuffer {
    buf: BytesMut,
}

impl ReadBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(RECV_CHUNK),
        }
    }

    /// Number of buffered bytes not yet consumed
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Pull one chunk from the source.
    ///
    /// End-of-stream mid-reply means the peer closed the connection;
    /// that is a fatal transport condition, never "no data yet".
    fn fill<R: Read>(&mut self, src: &mut R) -> Result<()> {
        let mut chunk = [0u8; RECV_CHUNK];
        let n = src.read(&mut chunk)?;
        if n == 0 {
            return Err(RedwireError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed by peer mid-reply",
            )));
        }
        self.buf.extend_from_slice(&chunk[..n]);
        Ok(())
    }

    /// Read the bytes preceding the next CRLF, consuming line and
    /// delimiter. Refills until a delimiter appears.
    pub fn read_line<R: Read>(&mut self, src: &mut R) -> Result<Bytes> {
        loop {
            if let Some(i) = find_crlf(&self.buf) {
                let mut line = self.buf.split_to(i + CRLF.len());
                line.truncate(i);
                return Ok(line.freeze());
            }
            self.fill(src)?;
        }
    }

    /// Read exactly `n` payload bytes plus the CRLF trailer, consuming
    /// `n + 2`. A non-CRLF trailer indicates a desynchronized stream.
    pub fn read_exact<R: Read>(&mut self, src: &mut R, n: usize) -> Result<Bytes> {
        while self.buf.len() < n + CRLF.len() {
            self.fill(src)?;
        }
        let mut payload = self.buf.split_to(n + CRLF.len());
        let trailer = payload.split_off(n);
        if trailer[..] != *CRLF {
            return Err(RedwireError::Protocol(format!(
                "bulk payload not terminated by CRLF (got {:02x?})",
                &trailer[..]
            )));
        }
        Ok(payload.freeze())
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode one complete reply, refilling from `src` as needed
///
/// The first byte of each line is the type tag; aggregate replies
/// recurse, one level per nesting level of the server's reply.
pub fn decode_reply<R: Read>(buf: &mut ReadBuffer, src: &mut R) -> Result<Reply> {
    let line = buf.read_line(src)?;
    if line.is_empty() {
        return Err(RedwireError::Protocol("empty reply line".to_string()));
    }

    let (tag, payload) = (line[0], &line[1..]);
    match tag {
        b'+' => Ok(Reply::Status(decode_line_text(payload)?)),
        b'-' => Ok(Reply::Error(decode_line_text(payload)?)),
        b':' => Ok(Reply::Integer(parse_int(payload)?)),
        b'$' => {
            let len = parse_int(payload)?;
            match len {
                -1 => Ok(Reply::Bulk(None)),
                0..=MAX_BULK_SIZE => {
                    Ok(Reply::Bulk(Some(buf.read_exact(src, len as usize)?)))
                }
                _ => Err(RedwireError::Protocol(format!(
                    "invalid bulk string length: {}",
                    len
                ))),
            }
        }
        b'*' => {
            let count = parse_int(payload)?;
            match count {
                -1 => Ok(Reply::Array(None)),
                0.. => {
                    let mut items = Vec::with_capacity(count.min(1024) as usize);
                    for _ in 0..count {
                        items.push(decode_reply(buf, src)?);
                    }
                    Ok(Reply::Array(Some(items)))
                }
                _ => Err(RedwireError::Protocol(format!(
                    "invalid array count: {}",
                    count
                ))),
            }
        }
        other => Err(RedwireError::Protocol(format!(
            "unrecognized reply tag: {:#04x}",
            other
        ))),
    }
}

/// Status and error lines are protocol-level text, always UTF-8
fn decode_line_text(payload: &[u8]) -> Result<String> {
    std::str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|e| RedwireError::Protocol(format!("reply line is not valid UTF-8: {}", e)))
}

fn parse_int(payload: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| RedwireError::Protocol(format!("reply line is not valid UTF-8: {}", e)))?;
    text.parse::<i64>().map_err(|_| {
        RedwireError::Protocol(format!("invalid integer payload: {:?}", text))
    })
}
