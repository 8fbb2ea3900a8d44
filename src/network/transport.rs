//! TCP transport
//!
//! Owns the connected stream handle. Provides reliable full-buffer send
//! and raw chunked receive; framing lives a layer up in the protocol
//! module.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use crate::config::Config;
use crate::error::{RedwireError, Result};

/// A connected byte stream
///
/// `close` is idempotent; any I/O after close fails with a transport
/// error rather than touching a stale handle.
#[derive(Debug)]
pub struct Transport {
    stream: Option<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Transport {
    /// Establish a stream connection per the config
    ///
    /// Fails with [`RedwireError::Connection`] if the endpoint is
    /// unreachable.
    pub fn connect(config: &Config) -> Result<Self> {
        let stream = TcpStream::connect((config.host.as_str(), config.port))
            .map_err(RedwireError::Connection)?;

        if config.nodelay {
            stream.set_nodelay(true)?;
        }
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream: Some(stream),
            peer_addr,
        })
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or_else(|| {
            RedwireError::Transport(io::Error::new(
                io::ErrorKind::NotConnected,
                "transport is closed",
            ))
        })
    }

    /// Write the entire buffer, looping on partial writes
    ///
    /// A single underlying write is not guaranteed to consume the whole
    /// buffer; keep going until every byte is accepted.
    pub fn send(&mut self, buf: &[u8]) -> Result<()> {
        let stream = self.stream()?;
        let mut written = 0;
        while written < buf.len() {
            let n = stream.write(&buf[written..])?;
            if n == 0 {
                return Err(RedwireError::Transport(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "stream stopped accepting bytes mid-write",
                )));
            }
            written += n;
        }
        stream.flush()?;
        Ok(())
    }

    /// Receive up to `buf.len()` bytes
    ///
    /// Returns the number of bytes read; `Ok(0)` signals end-of-stream,
    /// which callers must treat as the peer closing the connection.
    pub fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.stream()?.read(buf)?)
    }

    /// Release the handle; idempotent
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("Closed connection to {}", self.peer_addr);
        }
    }

    /// Peer address string for logging
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

// The decoder refills through `Read`, which also lets tests drive it
// from any in-memory source.
impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stream.as_mut() {
            Some(stream) => stream.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "transport is closed",
            )),
        }
    }
}
