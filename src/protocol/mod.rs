//! Protocol Module
//!
//! Implements the RESP wire protocol: request encoding, buffered reply
//! decoding, and the typed reply values both sides of the exchange use.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! *<argc>\r\n                    array header
//! $<len>\r\n<bytes>\r\n          one bulk string per argument
//! ```
//!
//! ### Reply Format
//! One tag byte starts each reply line:
//! - `+` Status   - `+OK\r\n`
//! - `-` Error    - `-ERR unknown command\r\n`
//! - `:` Integer  - `:1000\r\n`
//! - `$` Bulk     - `$5\r\nhello\r\n` (`$-1\r\n` is nil)
//! - `*` Array    - `*2\r\n...` (`*-1\r\n` is a nil array)

mod command;
mod reply;
mod codec;

pub use command::Arg;
pub use reply::{Encoding, Reply, Value};
pub use codec::{decode_reply, encode_command, ReadBuffer, CRLF};
