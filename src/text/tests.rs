//! Tests for line and null terminated string reads

#![expect(
    clippy::indexing_slicing,
    clippy::unwrap_used,
    reason = "Okay in tests"
)]

use super::*;
use crate::source::ReadSource;
use crate::test_support::Trickle;

fn open(data: &[u8]) -> Stream<ReadSource<&[u8]>> {
    Stream::new(ReadSource::new(data))
}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

#[test]
fn test_line_len() {
    assert_eq!(Line::Eof.len(), 0);
    assert!(Line::Eof.is_empty());
    assert_eq!(Line::Complete(3).len(), 3);
    assert!(Line::Complete(0).is_empty());
    assert_eq!(Line::Truncated(7).len(), 7);
}

// -----------------------------------------------------------------------------
// Stream::read_line
// -----------------------------------------------------------------------------

#[test]
fn test_read_line_crlf() {
    let mut stream = open(b"abc\r\ndef");
    let mut buf = [0xFFu8; 4];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf, b"abc\0");

    // The \n of the CRLF pair was consumed too
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf, b"def\0");
}

#[test]
fn test_read_line_lf() {
    let mut stream = open(b"abc\ndef");
    let mut buf = [0u8; 8];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf[..4], b"abc\0");
    assert_eq!(stream.tell(), 4);
}

#[test]
fn test_read_line_lone_cr() {
    let mut stream = open(b"a\rb\r");
    let mut buf = [0u8; 8];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(1));
    assert_eq!(stream.peek_byte().unwrap(), Some(b'b'));
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(1));
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
}

#[test]
fn test_read_line_cr_across_pulls() {
    // The peek after \r has to pull a new window
    let mut stream = Stream::new(Trickle { data: b"x\r\ny" });
    let mut buf = [0u8; 8];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(1));
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(1));
    assert_eq!(&buf[..2], b"y\0");
}

#[test]
fn test_read_line_eof() {
    let mut stream = open(b"");
    let mut buf = [0xFFu8; 4];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
    assert_eq!(buf[0], 0);
}

#[test]
fn test_read_line_unterminated() {
    let mut stream = open(b"x");
    let mut buf = [0u8; 4];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(1));
    assert_eq!(&buf[..2], b"x\0");
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
}

#[test]
fn test_read_line_empty_line_is_not_eof() {
    let mut stream = open(b"\n\r\n");
    let mut buf = [0u8; 4];

    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(0));
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(0));
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
}

#[test]
fn test_read_line_truncated() {
    let mut stream = open(b"abcdef\n");
    let mut buf = [0xFFu8; 4];

    // Room for three bytes and the terminator
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Truncated(3));
    assert_eq!(&buf, b"abc\0");

    // The rest of the line stays in the stream
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf, b"def\0");
}

#[test]
fn test_read_line_exact_fit() {
    let mut stream = open(b"abc\r\ndef\n");
    let mut buf = [0xFFu8; 4];

    // The terminator right after a full destination still completes the line
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf, b"abc\0");
    assert_eq!(stream.tell(), 5);

    // So the next call starts on the following line, not an empty one
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    assert_eq!(&buf, b"def\0");
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
}

#[test]
fn test_read_line_tiny_buffers() {
    let mut stream = open(b"abc");

    // A single byte only fits the terminator
    let mut buf = [0xFFu8; 1];
    assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Truncated(0));
    assert_eq!(buf, [0]);

    // An empty destination writes nothing
    assert_eq!(stream.read_line(&mut []).unwrap(), Line::Truncated(0));

    // Nothing was consumed
    assert_eq!(stream.tell(), 0);
}

// -----------------------------------------------------------------------------
// Stream::read_string
// -----------------------------------------------------------------------------

#[test]
fn test_read_string() {
    let mut stream = open(b"a\0rest");
    let mut buf = [0u8; 2];

    assert_eq!(stream.read_string(&mut buf).unwrap(), b"a");
    assert_eq!(buf, *b"a\0");
    assert_eq!(stream.tell(), 2);
}

#[test]
fn test_read_string_empty() {
    let mut stream = open(b"\0");
    let mut buf = [0xFFu8; 1];

    assert_eq!(stream.read_string(&mut buf).unwrap(), b"");
    assert_eq!(buf, [0]);
}

#[test]
fn test_read_string_overrun() {
    let mut stream = open(b"ab\0");
    let mut buf = [0u8; 2];

    assert!(matches!(
        stream.read_string(&mut buf),
        Err(Error::BufferOverrun)
    ));

    // A zero sized destination cannot even hold the terminator
    let mut stream = open(b"\0");
    assert!(matches!(
        stream.read_string(&mut []),
        Err(Error::BufferOverrun)
    ));
}

#[test]
fn test_read_string_eof() {
    let mut stream = open(b"abc");
    let mut buf = [0u8; 8];

    assert!(matches!(
        stream.read_string(&mut buf),
        Err(Error::UnexpectedEof { .. })
    ));
}
