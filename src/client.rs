//! Client connection
//!
//! Composes the command encoder, the transport, and the reply decoder
//! into a single synchronous request/response primitive. Every typed
//! command method in [`crate::commands`] is a one-line projection over
//! [`Connection::command`].

use bytes::Bytes;

use crate::config::Config;
use crate::error::{RedwireError, Result};
use crate::network::Transport;
use crate::protocol::{decode_reply, encode_command, Arg, Encoding, ReadBuffer, Reply, Value};

/// A synchronous connection to a RESP key/value server
///
/// ## Concurrency Model
///
/// Fully blocking, exactly one request outstanding at a time: `send`
/// blocks until the request is written, decoding blocks until the full
/// reply is assembled. `&mut self` on every operation enforces the
/// idle/awaiting-reply cycle; share across threads only behind external
/// mutual exclusion, or better, give each caller its own connection.
#[derive(Debug)]
pub struct Connection {
    /// Write side of the exchange
    transport: Transport,

    /// Bytes received but not yet consumed by the decoder
    buf: ReadBuffer,

    /// Bulk payload decoding, fixed at construction
    encoding: Option<Encoding>,
}

impl Connection {
    /// Connect with default settings (UTF-8 text decoding)
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Self::connect_with(Config::builder().host(host).port(port).build())
    }

    /// Connect with full configuration
    pub fn connect_with(config: Config) -> Result<Self> {
        let transport = Transport::connect(&config)?;
        Ok(Self {
            transport,
            buf: ReadBuffer::new(),
            encoding: config.encoding,
        })
    }

    /// Issue one command and decode its reply
    ///
    /// Arguments are normalized to their canonical byte form, encoded
    /// as an array of bulk strings, and sent as one buffer; then exactly
    /// one reply is decoded. A server error reply becomes
    /// [`RedwireError::Server`] and leaves the connection usable for
    /// further commands.
    pub fn command<I, A>(&mut self, args: I) -> Result<Reply>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        tracing::trace!("Dispatching command: {:?}", args.first());

        let request = encode_command(args)?;
        self.transport.send(&request)?;

        match decode_reply(&mut self.buf, &mut self.transport) {
            Ok(Reply::Error(text)) => Err(RedwireError::Server(text)),
            Ok(reply) => Ok(reply),
            Err(e) => {
                if e.is_fatal() {
                    tracing::warn!("Connection to {} failed: {}", self.transport.peer_addr(), e);
                }
                Err(e)
            }
        }
    }

    /// Close the connection; idempotent
    ///
    /// There is no finalizer-based cleanup beyond the OS reclaiming the
    /// handle; callers close explicitly.
    pub fn close(&mut self) {
        self.transport.close();
    }

    /// Project a bulk payload through this connection's encoding
    pub(crate) fn value(&self, payload: Bytes) -> Result<Value> {
        Value::from_bulk(payload, self.encoding)
    }
}
