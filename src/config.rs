//! Configuration for redwire connections
//!
//! Centralized connection settings with sensible defaults.

use std::time::Duration;

use crate::protocol::Encoding;

/// Settings for establishing a [`Connection`](crate::Connection)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Server hostname or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Decoding Configuration
    // -------------------------------------------------------------------------
    /// Text decoding applied to bulk payloads.
    /// `None` returns raw bytes; fixed for the connection's lifetime.
    pub encoding: Option<Encoding>,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Read timeout; `None` blocks indefinitely.
    /// An expired timeout surfaces as a transport error.
    pub read_timeout: Option<Duration>,

    /// Write timeout; `None` blocks indefinitely
    pub write_timeout: Option<Duration>,

    /// Disable Nagle's algorithm for low latency
    pub nodelay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            encoding: Some(Encoding::Utf8),
            read_timeout: None,
            write_timeout: None,
            nodelay: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server hostname or address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the text decoding applied to bulk payloads
    pub fn encoding(mut self, encoding: Option<Encoding>) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Return bulk payloads as raw bytes
    pub fn binary(mut self) -> Self {
        self.config.encoding = None;
        self
    }

    /// Set the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Set the write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = Some(timeout);
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
