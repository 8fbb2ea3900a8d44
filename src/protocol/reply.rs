//! Reply values
//!
//! Typed representation of every reply shape the protocol can carry,
//! plus the projections the command catalog builds on.

use std::fmt;

use bytes::Bytes;

use crate::error::{RedwireError, Result};

/// Text decoding applied to bulk payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
}

/// A decoded server reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `+` one-line status, e.g. "OK"
    Status(String),

    /// `-` server-generated error text.
    /// Converted to [`RedwireError::Server`] at dispatch; callers of
    /// `command` never see this variant as a normal result.
    Error(String),

    /// `:` signed 64-bit integer
    Integer(i64),

    /// `$` length-prefixed payload; `None` is the nil bulk string,
    /// distinct from an empty one
    Bulk(Option<Bytes>),

    /// `*` ordered aggregate of replies; `None` is the nil array
    Array(Option<Vec<Reply>>),
}

impl Reply {
    /// Short name of the reply shape, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Error(_) => "error",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Array(_) => "array",
        }
    }

    /// Extract an integer reply
    pub fn into_integer(self) -> Result<i64> {
        match self {
            Reply::Integer(i) => Ok(i),
            other => Err(unexpected("integer", &other)),
        }
    }

    /// Extract a bulk reply; `None` for the nil bulk string
    pub fn into_bulk(self) -> Result<Option<Bytes>> {
        match self {
            Reply::Bulk(payload) => Ok(payload),
            other => Err(unexpected("bulk string", &other)),
        }
    }

    /// Extract an array reply; `None` for the nil array
    pub fn into_array(self) -> Result<Option<Vec<Reply>>> {
        match self {
            Reply::Array(items) => Ok(items),
            other => Err(unexpected("array", &other)),
        }
    }

    /// Assert a specific status reply, e.g. "OK"
    pub fn expect_status(self, expected: &str) -> Result<()> {
        match self {
            Reply::Status(s) if s == expected => Ok(()),
            Reply::Status(s) => Err(RedwireError::UnexpectedReply(format!(
                "expected status {:?}, got {:?}",
                expected, s
            ))),
            other => Err(unexpected("status", &other)),
        }
    }
}

fn unexpected(wanted: &str, got: &Reply) -> RedwireError {
    RedwireError::UnexpectedReply(format!("expected {}, got {}", wanted, got.type_name()))
}

/// A bulk payload projected through the connection's encoding
///
/// Text connections yield `Value::Text`; binary connections yield
/// `Value::Bytes` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Bytes(Bytes),
}

impl Value {
    /// Project a bulk payload per the given encoding.
    /// Invalid text on a decoding connection is a protocol error.
    pub(crate) fn from_bulk(payload: Bytes, encoding: Option<Encoding>) -> Result<Value> {
        match encoding {
            Some(Encoding::Utf8) => match String::from_utf8(payload.to_vec()) {
                Ok(s) => Ok(Value::Text(s)),
                Err(e) => Err(RedwireError::Protocol(format!(
                    "bulk payload is not valid UTF-8: {}",
                    e
                ))),
            },
            None => Ok(Value::Bytes(payload)),
        }
    }

    /// The underlying bytes, regardless of projection
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Text(s) => s.as_bytes(),
            Value::Bytes(b) => b,
        }
    }

    /// The decoded text, if this connection decodes text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Bytes(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&[u8]> for Value {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}
