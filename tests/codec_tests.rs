//! Codec Tests
//!
//! Wire-format tests for command encoding and reply decoding.

use std::io::{Cursor, Read};

use bytes::Bytes;
use redwire::protocol::{decode_reply, encode_command, Arg, ReadBuffer, Reply};
use redwire::RedwireError;

/// Read source handing out at most `chunk` bytes per call, mimicking
/// arbitrary network fragmentation.
struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    fn new(data: &[u8], chunk: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn decode_contiguous(data: &[u8]) -> redwire::Result<Reply> {
    let mut buf = ReadBuffer::new();
    let mut src = Cursor::new(data.to_vec());
    decode_reply(&mut buf, &mut src)
}

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_set_wire_format() {
    let encoded =
        encode_command(vec![Arg::from("SET"), Arg::from("foo"), Arg::from("bar")]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n");
}

#[test]
fn test_encode_integer_argument() {
    let encoded =
        encode_command(vec![Arg::from("INCRBY"), Arg::from("n"), Arg::Int(42)]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$6\r\nINCRBY\r\n$1\r\nn\r\n$2\r\n42\r\n");
}

#[test]
fn test_encode_negative_integer_argument() {
    let encoded = encode_command(vec![Arg::from("INCRBY"), Arg::from("n"), Arg::Int(-7)]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$6\r\nINCRBY\r\n$1\r\nn\r\n$2\r\n-7\r\n");
}

#[test]
fn test_encode_binary_argument_with_embedded_crlf() {
    // Bulk strings are length-prefixed, so delimiter bytes inside a
    // payload must pass through untouched.
    let encoded = encode_command(vec![Arg::from("SET"), Arg::from("k"), Arg::from(&b"a\r\nb"[..])])
        .unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$4\r\na\r\nb\r\n");
}

#[test]
fn test_encode_empty_payload() {
    let encoded = encode_command(vec![Arg::from("SET"), Arg::from("k"), Arg::from("")]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$0\r\n\r\n");
}

#[test]
fn test_encode_empty_command_rejected() {
    let result = encode_command(Vec::new());
    assert!(matches!(result, Err(RedwireError::Protocol(_))));
}

// =============================================================================
// Reply Decoding Tests
// =============================================================================

#[test]
fn test_decode_status() {
    let reply = decode_contiguous(b"+OK\r\n").unwrap();
    assert_eq!(reply, Reply::Status("OK".to_string()));
}

#[test]
fn test_decode_error() {
    // The decoder surfaces `-` as a Reply variant; conversion to a
    // failure happens at dispatch.
    let reply = decode_contiguous(b"-ERR wrong type\r\n").unwrap();
    assert_eq!(reply, Reply::Error("ERR wrong type".to_string()));
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode_contiguous(b":1000\r\n").unwrap(), Reply::Integer(1000));
    assert_eq!(decode_contiguous(b":-42\r\n").unwrap(), Reply::Integer(-42));
    assert_eq!(decode_contiguous(b":0\r\n").unwrap(), Reply::Integer(0));
}

#[test]
fn test_decode_bulk_string() {
    let reply = decode_contiguous(b"$5\r\nhello\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(Bytes::from_static(b"hello"))));
}

#[test]
fn test_decode_bulk_with_embedded_crlf() {
    let reply = decode_contiguous(b"$4\r\na\r\nb\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(Bytes::from_static(b"a\r\nb"))));
}

#[test]
fn test_nil_bulk_distinct_from_empty_bulk() {
    assert_eq!(decode_contiguous(b"$-1\r\n").unwrap(), Reply::Bulk(None));
    assert_eq!(
        decode_contiguous(b"$0\r\n\r\n").unwrap(),
        Reply::Bulk(Some(Bytes::new()))
    );
}

#[test]
fn test_decode_empty_array() {
    assert_eq!(
        decode_contiguous(b"*0\r\n").unwrap(),
        Reply::Array(Some(Vec::new()))
    );
}

#[test]
fn test_decode_nil_array() {
    assert_eq!(decode_contiguous(b"*-1\r\n").unwrap(), Reply::Array(None));
}

#[test]
fn test_decode_nested_mixed_array() {
    let data = b"*3\r\n:1\r\n$3\r\nfoo\r\n*2\r\n+OK\r\n$-1\r\n";
    let reply = decode_contiguous(data).unwrap();
    assert_eq!(
        reply,
        Reply::Array(Some(vec![
            Reply::Integer(1),
            Reply::Bulk(Some(Bytes::from_static(b"foo"))),
            Reply::Array(Some(vec![
                Reply::Status("OK".to_string()),
                Reply::Bulk(None),
            ])),
        ]))
    );
}

#[test]
fn test_decode_sequential_replies_share_buffer() {
    let mut buf = ReadBuffer::new();
    let mut src = Cursor::new(b"+OK\r\n:5\r\n$3\r\nbar\r\n".to_vec());

    assert_eq!(
        decode_reply(&mut buf, &mut src).unwrap(),
        Reply::Status("OK".to_string())
    );
    assert_eq!(decode_reply(&mut buf, &mut src).unwrap(), Reply::Integer(5));
    assert_eq!(
        decode_reply(&mut buf, &mut src).unwrap(),
        Reply::Bulk(Some(Bytes::from_static(b"bar")))
    );
}

// =============================================================================
// Partial Read Assembly Tests
// =============================================================================

#[test]
fn test_partial_read_assembly_matches_contiguous() {
    let data = b"*3\r\n:1\r\n$3\r\nfoo\r\n*2\r\n+OK\r\n$-1\r\n";
    let expected = decode_contiguous(data).unwrap();

    // Down to one byte per recv, splitting every delimiter in half
    for chunk in [1, 2, 3, 7, 1024] {
        let mut buf = ReadBuffer::new();
        let mut src = ChunkedReader::new(data, chunk);
        let reply = decode_reply(&mut buf, &mut src).unwrap();
        assert_eq!(reply, expected, "chunk size {}", chunk);
    }
}

#[test]
fn test_read_line_across_chunk_boundaries() {
    let mut buf = ReadBuffer::new();
    let mut src = ChunkedReader::new(b"hello\r\nworld\r\n", 1);

    assert_eq!(&buf.read_line(&mut src).unwrap()[..], b"hello");
    assert_eq!(&buf.read_line(&mut src).unwrap()[..], b"world");
}

#[test]
fn test_read_exact_across_chunk_boundaries() {
    let mut buf = ReadBuffer::new();
    let mut src = ChunkedReader::new(b"hello\r\n", 2);

    assert_eq!(&buf.read_exact(&mut src, 5).unwrap()[..], b"hello");
    assert!(buf.is_empty());
}

// =============================================================================
// Framing Error Tests
// =============================================================================

#[test]
fn test_unrecognized_tag_is_protocol_error() {
    let result = decode_contiguous(b"!boom\r\n");
    assert!(matches!(result, Err(RedwireError::Protocol(_))));
}

#[test]
fn test_bad_integer_payload_is_protocol_error() {
    let result = decode_contiguous(b":abc\r\n");
    assert!(matches!(result, Err(RedwireError::Protocol(_))));
}

#[test]
fn test_bad_bulk_length_is_protocol_error() {
    let result = decode_contiguous(b"$-2\r\n");
    assert!(matches!(result, Err(RedwireError::Protocol(_))));
}

#[test]
fn test_missing_crlf_after_bulk_is_protocol_error() {
    // Five payload-and-trailer bytes are available, but the trailer is
    // not CRLF: the stream is desynchronized.
    let result = decode_contiguous(b"$3\r\nfooXY");
    assert!(matches!(result, Err(RedwireError::Protocol(_))));
}

#[test]
fn test_eof_mid_reply_is_transport_error() {
    let result = decode_contiguous(b"$10\r\nabc");
    match result {
        Err(e @ RedwireError::Transport(_)) => assert!(e.is_fatal()),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn test_eof_mid_line_is_transport_error() {
    let result = decode_contiguous(b"+OK");
    assert!(matches!(result, Err(RedwireError::Transport(_))));
}
