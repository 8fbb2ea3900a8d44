//! Command arguments
//!
//! A single discriminated union for everything callers may pass as a
//! command argument. Normalization to the canonical wire bytes happens
//! here, once, rather than in every convenience method.

use bytes::Bytes;

/// One argument of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// UTF-8 text, sent as its byte representation
    Text(String),

    /// Integer, sent as its decimal ASCII form
    Int(i64),

    /// Raw bytes, sent verbatim
    Bytes(Bytes),
}

impl Arg {
    /// Canonical byte form used on the wire
    pub fn into_bytes(self) -> Bytes {
        match self {
            Arg::Text(s) => Bytes::from(s),
            Arg::Int(i) => Bytes::from(i.to_string()),
            Arg::Bytes(b) => b,
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Int(i)
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg::Bytes(b)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(b))
    }
}
