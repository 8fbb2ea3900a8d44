//! # redwire
//!
//! A minimal synchronous Redis client speaking the RESP wire protocol:
//! - Length-prefixed request encoding (array of bulk strings)
//! - Buffered reply decoding over partial reads
//! - One-shot request/response dispatch with a typed command catalog
//!
//! ## Architecture Overview
//!
//! ```text
//! caller arguments
//!        │
//!        ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │  Command Encoder │─────▶│    Transport     │────▶ (network)
//! └──────────────────┘ send │   (TcpStream)    │
//!                           └────────┬─────────┘
//!                                    │ recv
//!                           ┌────────▼─────────┐
//!                           │   Read Buffer    │
//!                           └────────┬─────────┘
//!                                    │
//!                           ┌────────▼─────────┐
//!                           │  Reply Decoder   │────▶ typed result / error
//!                           └──────────────────┘
//! ```
//!
//! One request is outstanding per connection at a time; there is no
//! pipelining, pooling, or reconnection. Give each concurrent caller
//! its own [`Connection`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;
pub mod client;

mod commands;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Connection;
pub use config::Config;
pub use error::{RedwireError, Result};
pub use protocol::{Arg, Encoding, Reply, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
