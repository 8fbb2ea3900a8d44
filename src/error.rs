//! Error types for redwire
//!
//! Provides a unified error type for all client operations.
//!
//! The error kinds are deliberately disjoint: transport failures and
//! framing violations are fatal to the connection, while server error
//! replies and projection mismatches leave it usable.

use thiserror::Error;

/// Result type alias using RedwireError
pub type Result<T> = std::result::Result<T, RedwireError>;

/// Unified error type for redwire operations
#[derive(Debug, Error)]
pub enum RedwireError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    /// The endpoint could not be reached at connect time
    #[error("connection failed: {0}")]
    Connection(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// The underlying stream failed to read or write, including an
    /// unexpected end-of-stream mid-reply. Fatal to the connection.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// A reply violated framing expectations. The stream is
    /// desynchronized and the connection must be discarded.
    #[error("protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    /// The server returned an error reply. The connection remains
    /// usable for further commands.
    #[error("server error: {0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Projection Errors
    // -------------------------------------------------------------------------
    /// A removal command matched nothing
    #[error("value not found")]
    NotFound,

    /// A well-framed reply did not match the shape the issuing
    /// operation expects
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

impl RedwireError {
    /// Whether the connection must be discarded after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RedwireError::Connection(_) | RedwireError::Transport(_) | RedwireError::Protocol(_)
        )
    }
}
