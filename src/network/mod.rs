//! Network Module
//!
//! Blocking TCP transport for the client connection.

mod transport;

pub use transport::Transport;
