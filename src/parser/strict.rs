//! The strict parser (spec §4.C): RFC 9112, any deviation is a hard error.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{ParseError, ParseErrorKind};
use crate::headers::Headers;
use crate::limits::Limits;
use crate::message::{Request, Response, body_or_none};
use crate::parser::{chunked, normalize};
use crate::scanner::{Cursor, contains_fold, intern_header_name, intern_method, intern_reason, intern_version, trim_ows};

/// Parse a complete HTTP/1.1 request.
///
/// # Errors
///
/// See the module-level error taxonomy in `crate::error`: any deviation
/// from RFC 9112 — malformed start line, whitespace before a header
/// colon, a truncated or malformed body — is returned as a
/// [`ParseError`] carrying the 1-indexed line it was detected on.
pub fn parse_request(buf: &[u8], limits: &Limits) -> Result<Request, ParseError> {
  if buf.is_empty() {
    return Err(ParseError::new(ParseErrorKind::MissingStartLine, 1));
  }
  let mut cursor = Cursor::new(buf);
  let start_line_no = cursor.line();
  let start_line = cursor.read_line(false);

  let parts: Vec<&[u8]> = start_line.split(|&b| b == b' ').collect();
  let [method_tok, path_tok, version_tok] = parts.as_slice() else {
    return Err(ParseError::new(ParseErrorKind::MalformedStartLine, start_line_no));
  };
  if method_tok.is_empty() || path_tok.is_empty() {
    return Err(ParseError::new(ParseErrorKind::MalformedStartLine, start_line_no));
  }

  let method = intern_method(method_tok);
  let path = String::from_utf8_lossy(path_tok).into_owned();
  let version = intern_version(version_tok);

  let mut headers = Headers::new();
  parse_headers(&mut cursor, &mut headers)?;

  let body = parse_body(&mut cursor, &mut headers, limits)?;

  Ok(Request {
    method,
    path,
    version,
    headers,
    scheme: None,
    body,
  })
}

/// Parse a complete HTTP/1.1 response.
///
/// # Errors
///
/// Same error taxonomy as [`parse_request`], plus
/// [`ParseErrorKind::InvalidStatusCode`] when the status-line's second
/// token is not a non-negative decimal integer.
pub fn parse_response(buf: &[u8], limits: &Limits) -> Result<Response, ParseError> {
  if buf.is_empty() {
    return Err(ParseError::new(ParseErrorKind::MissingStartLine, 1));
  }
  let mut cursor = Cursor::new(buf);
  let start_line_no = cursor.line();
  let start_line = cursor.read_line(false);

  let Some(first_sp) = start_line.iter().position(|&b| b == b' ') else {
    return Err(ParseError::new(ParseErrorKind::MalformedStartLine, start_line_no));
  };
  let version_tok = start_line.get(..first_sp).unwrap_or(&[]);
  let rest = start_line.get(first_sp + 1..).unwrap_or(&[]);
  if rest.is_empty() {
    return Err(ParseError::new(ParseErrorKind::MalformedStartLine, start_line_no));
  }

  let (code_tok, reason_tok) = match rest.iter().position(|&b| b == b' ') {
    Some(p) => (rest.get(..p).unwrap_or(&[]), rest.get(p + 1..).unwrap_or(&[])),
    None => (rest, &[][..]),
  };

  let code_str = core::str::from_utf8(code_tok).map_err(|_| ParseError::new(ParseErrorKind::InvalidStatusCode, start_line_no))?;
  let status_code: u16 = code_str
    .parse()
    .map_err(|_| ParseError::new(ParseErrorKind::InvalidStatusCode, start_line_no))?;

  let version = intern_version(version_tok);
  let reason = intern_reason(reason_tok);

  let mut headers = Headers::new();
  parse_headers(&mut cursor, &mut headers)?;

  let body = parse_body(&mut cursor, &mut headers, limits)?;

  Ok(Response {
    version,
    status_code,
    reason,
    headers,
    body,
  })
}

/// Parse the header section, stopping at the first empty line.
fn parse_headers(cursor: &mut Cursor<'_>, headers: &mut Headers) -> Result<(), ParseError> {
  loop {
    let line_no = cursor.line();
    let line = cursor.read_line(false);
    if line.is_empty() {
      return Ok(());
    }

    let Some(colon) = line.iter().position(|&b| b == b':') else {
      return Err(ParseError::new(ParseErrorKind::MalformedHeader, line_no));
    };
    let name_tok = line.get(..colon).unwrap_or(&[]);
    if name_tok.last().is_some_and(|&b| b == b' ' || b == b'\t') {
      return Err(ParseError::new(ParseErrorKind::WhitespaceBeforeColon, line_no));
    }

    let mut value = trim_ows(line.get(colon + 1..).unwrap_or(&[])).to_vec();

    while matches!(cursor.remaining().first(), Some(&b' ' | &b'\t')) {
      let continuation = cursor.read_line(false);
      let trimmed = trim_ows(continuation);
      value.push(b' ');
      value.extend_from_slice(trimmed);
    }

    let name = intern_header_name(name_tok);
    headers.add(name, String::from_utf8_lossy(&value).into_owned());
  }
}

/// Determine and read the body per spec §4.C's ordering: chunked, then
/// Content-Length, then connection-close.
fn parse_body(cursor: &mut Cursor<'_>, headers: &mut Headers, limits: &Limits) -> Result<Option<Vec<u8>>, ParseError> {
  let is_chunked = headers
    .values("Transfer-Encoding")
    .any(|v| contains_fold(v.as_bytes(), b"chunked"));

  if is_chunked {
    let mut line = cursor.line();
    let decoded = chunked::decode_strict(cursor.remaining(), &mut line, limits)?;
    normalize::apply(headers, decoded.len());
    return Ok(body_or_none(decoded));
  }

  if let Some(content_length) = headers.get("Content-Length")
    && let Ok(declared_len) = content_length.parse::<u64>() {
      let body_len = usize::try_from(declared_len).unwrap_or(usize::MAX);
      let remaining = cursor.remaining();
      if body_len > remaining.len() {
        return Err(ParseError::new(ParseErrorKind::BodyTruncated, cursor.line()));
      }
      let body = remaining.get(..body_len).unwrap_or(&[]).to_vec();
      cursor.advance(body_len);
      return Ok(body_or_none(body));
    }

  let body = cursor.remaining().to_vec();
  cursor.advance(body.len());
  Ok(body_or_none(body))
}
