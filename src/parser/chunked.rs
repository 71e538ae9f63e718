//! Chunked transfer-encoding decoder (spec §4.B).

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{ParseError, ParseErrorKind};
use crate::limits::Limits;
use crate::scanner::{read_line_checked, trim_ows};

fn parse_chunk_size_line(line: &[u8]) -> Result<u64, ()> {
  let truncated = match line.iter().position(|&b| b == b';') {
    Some(p) => line.get(..p).unwrap_or(&[]),
    None => line,
  };
  let trimmed = trim_ows(truncated);
  if trimmed.is_empty() {
    return Err(());
  }
  let mut size: u64 = 0;
  for &b in trimmed {
    let digit = match b {
      b'0'..=b'9' => b - b'0',
      b'a'..=b'f' => b - b'a' + 10,
      b'A'..=b'F' => b - b'A' + 10,
      _ => return Err(()),
    };
    size = size.checked_mul(16).ok_or(())?;
    size = size.checked_add(u64::from(digit)).ok_or(())?;
  }
  Ok(size)
}

fn strip_terminator(buf: &[u8], lenient: bool) -> Option<&[u8]> {
  if buf.first() == Some(&b'\r') && buf.get(1) == Some(&b'\n') {
    return buf.get(2..);
  }
  if buf.first() == Some(&b'\n') {
    return buf.get(1..);
  }
  if lenient && buf.first() == Some(&b'\r') {
    return buf.get(1..);
  }
  None
}

/// Decode a chunked body, fatally on any deviation from the wire format.
///
/// `line` is the 1-indexed line the decoder starts on; it is advanced past
/// every chunk-size and chunk-terminator line consumed, so callers can
/// continue counting lines in whatever follows (there is none, per spec:
/// the terminating `\r\n\r\n` is not required to be consumed).
///
/// # Errors
///
/// Returns [`ParseErrorKind::ChunkedInvalidSize`] when a chunk-size line is
/// not a valid hex integer, [`ParseErrorKind::ChunkedTruncated`] when a
/// chunk declares more data than remains, or
/// [`ParseErrorKind::MissingLineTerminator`] when a line isn't CRLF/LF
/// terminated.
pub fn decode_strict(mut buf: &[u8], line: &mut usize, limits: &Limits) -> Result<Vec<u8>, ParseError> {
  let mut output = Vec::new();
  loop {
    let size_line_no = *line;
    let Some((size_line, rest)) = read_line_checked(buf, false) else {
      return Err(ParseError::new(ParseErrorKind::MissingLineTerminator, size_line_no));
    };
    buf = rest;
    *line += 1;

    let chunk_size =
      parse_chunk_size_line(size_line).map_err(|()| ParseError::new(ParseErrorKind::ChunkedInvalidSize, size_line_no))?;
    if chunk_size == 0 {
      return Ok(output);
    }
    let chunk_len = usize::try_from(chunk_size).unwrap_or(usize::MAX);
    if chunk_len > buf.len() || chunk_len > limits.max_chunk_size {
      return Err(ParseError::new(ParseErrorKind::ChunkedTruncated, *line));
    }

    output.extend_from_slice(buf.get(..chunk_len).unwrap_or(&[]));
    buf = buf.get(chunk_len..).unwrap_or(&[]);

    let term_line_no = *line;
    match strip_terminator(buf, false) {
      Some(after_term) => {
        buf = after_term;
        *line += 1;
      },
      None => return Err(ParseError::new(ParseErrorKind::MissingLineTerminator, term_line_no)),
    }
  }
}

/// Decode a chunked body, never failing.
///
/// On any deviation — invalid size, truncated chunk, missing terminator —
/// decoding stops and the entire buffer passed to this call is returned
/// unmodified as `Err`, so the caller can use it as the body and report
/// `partial=true` (spec §4.B "Failure semantics").
pub fn decode_lenient(buf: &[u8], limits: &Limits) -> Result<Vec<u8>, Vec<u8>> {
  let original = buf;
  let mut cur = buf;
  let mut output = Vec::new();
  loop {
    let Some((size_line, rest)) = read_line_checked(cur, true) else {
      return Err(original.to_vec());
    };
    cur = rest;

    let Ok(chunk_size) = parse_chunk_size_line(size_line) else {
      return Err(original.to_vec());
    };
    if chunk_size == 0 {
      return Ok(output);
    }
    let chunk_len = usize::try_from(chunk_size).unwrap_or(usize::MAX);
    if chunk_len > cur.len() || chunk_len > limits.max_chunk_size {
      return Err(original.to_vec());
    }

    output.extend_from_slice(cur.get(..chunk_len).unwrap_or(&[]));
    cur = cur.get(chunk_len..).unwrap_or(&[]);

    match strip_terminator(cur, true) {
      Some(after_term) => cur = after_term,
      None => return Err(original.to_vec()),
    }
  }
}
