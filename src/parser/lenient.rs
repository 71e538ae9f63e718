//! The lenient parser (spec §4.E): a recovery-oriented variant of the
//! strict parser that never fails, collecting warnings instead.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::headers::Headers;
use crate::limits::Limits;
use crate::message::{Message, ParseResult, Request, Response, body_or_none};
use crate::parser::{chunked, normalize};
use crate::scanner::{Cursor, contains_fold, intern_header_name, intern_method, intern_reason, intern_version, trim_ows};

/// Parse a request, never failing. Problems become warnings on the
/// returned [`ParseResult`], and `partial` is set when the message is
/// structurally incomplete.
#[must_use]
pub fn parse_request(buf: &[u8], limits: &Limits) -> ParseResult {
  let mut result = ParseResult::new();
  if buf.is_empty() {
    result.warn("empty input");
    result.partial = true;
    return result;
  }

  let mut cursor = Cursor::new(buf);
  let start_line_no = cursor.line();
  let start_line = cursor.read_line(true);

  let fields = split_fields(start_line);
  let (method_tok, path_tok, version_tok) = match fields.as_slice() {
    [] => {
      result.warn_at(start_line_no, "malformed request line");
      (&b""[..], &b"/"[..], &b"HTTP/1.1"[..])
    },
    [m] => {
      result.warn_at(start_line_no, "malformed request line");
      (*m, &b"/"[..], &b"HTTP/1.1"[..])
    },
    [m, p] => {
      result.warn_at(start_line_no, "malformed request line");
      (*m, *p, &b"HTTP/1.1"[..])
    },
    [m, p, v] => (*m, *p, *v),
    [m, p, v, ..] => {
      result.warn_at(start_line_no, "malformed request line: too many fields");
      (*m, *p, *v)
    },
  };

  let method = intern_method(method_tok);
  let version = intern_version(version_tok);
  let raw_path = String::from_utf8_lossy(path_tok).into_owned();

  let mut headers = Headers::new();
  let (path, scheme) = normalize_request_target(&raw_path, &mut headers, &mut result, start_line_no);

  skip_stray_blank_line(&mut cursor, &mut result);
  parse_headers(&mut cursor, &mut headers, &mut result);
  let body = read_body(&mut cursor, &mut headers, limits, &mut result);

  result.message = Some(Message::Request(Request {
    method,
    path,
    version,
    headers,
    scheme,
    body,
  }));
  result
}

/// Parse a response, never failing.
#[must_use]
pub fn parse_response(buf: &[u8], limits: &Limits) -> ParseResult {
  let mut result = ParseResult::new();
  if buf.is_empty() {
    result.warn("empty input");
    result.partial = true;
    return result;
  }

  let mut cursor = Cursor::new(buf);
  let start_line_no = cursor.line();
  let start_line = cursor.read_line(true);

  let (version_tok, code_tok, reason_tok) = match start_line.iter().position(|&b| b == b' ') {
    None => {
      if start_line.is_empty() {
        result.warn_at(start_line_no, "malformed status line");
        (&b"HTTP/1.1"[..], &b""[..], &b""[..])
      } else {
        result.warn_at(start_line_no, "malformed status line");
        (start_line, &b""[..], &b""[..])
      }
    },
    Some(p1) => {
      let version_tok = start_line.get(..p1).unwrap_or(&[]);
      let rest = start_line.get(p1 + 1..).unwrap_or(&[]);
      match rest.iter().position(|&b| b == b' ') {
        Some(p2) => (version_tok, rest.get(..p2).unwrap_or(&[]), rest.get(p2 + 1..).unwrap_or(&[])),
        None => (version_tok, rest, &b""[..]),
      }
    },
  };

  let version = intern_version(version_tok);
  let status_code = if code_tok.is_empty() {
    result.warn_at(start_line_no, "invalid status code");
    0
  } else if let Some(code) = core::str::from_utf8(code_tok).ok().and_then(|s| s.parse::<u16>().ok()) { code } else {
    result.warn_at(start_line_no, "invalid status code");
    0
  };
  let reason = intern_reason(reason_tok);

  let mut headers = Headers::new();
  skip_stray_blank_line(&mut cursor, &mut result);
  parse_headers(&mut cursor, &mut headers, &mut result);
  let body = read_body(&mut cursor, &mut headers, limits, &mut result);

  result.message = Some(Message::Response(Response {
    version,
    status_code,
    reason,
    headers,
    body,
  }));
  result
}

/// Split a start line on single spaces, compacting runs of spaces so that
/// the field count reflects whitespace-separated tokens rather than raw
/// delimiter count.
fn split_fields(line: &[u8]) -> Vec<&[u8]> {
  line.split(|&b| b == b' ').filter(|f| !f.is_empty()).collect()
}

fn skip_stray_blank_line(cursor: &mut Cursor<'_>, result: &mut ParseResult) {
  if matches!(cursor.remaining().first(), Some(&b'\r' | &b'\n')) {
    let line_no = cursor.line();
    cursor.read_line(true);
    result.warn_at(line_no, "stray blank line");
  }
}

fn parse_headers(cursor: &mut Cursor<'_>, headers: &mut Headers, result: &mut ParseResult) {
  loop {
    if cursor.is_empty() {
      return;
    }
    let line_no = cursor.line();
    let line = cursor.read_line(true);
    if line.is_empty() {
      return;
    }

    let trimmed_line = trim_ows(line);
    if trimmed_line.first() == Some(&b'[')
      && let Some(authority) = parse_ipv6_host_line(trimmed_line)
    {
      headers.add(Cow::Borrowed("Host"), authority);
      result.warn_at(line_no, "missing colon, inferred Host from IPv6 literal");
      continue;
    }

    if let Some(colon) = line.iter().position(|&b| b == b':') {
      let name_raw = line.get(..colon).unwrap_or(&[]);
      let had_ws_before_colon = name_raw.last().is_some_and(|&b| b == b' ' || b == b'\t');
      let key = trim_ows(name_raw);
      if had_ws_before_colon {
        result.warn_at(line_no, "whitespace before colon");
      }

      let mut value = trim_ows(line.get(colon + 1..).unwrap_or(&[])).to_vec();
      while matches!(cursor.remaining().first(), Some(&b' ' | &b'\t')) {
        let continuation = cursor.read_line(true);
        value.push(b' ');
        value.extend_from_slice(trim_ows(continuation));
      }

      if cr3_applies(key, &value) {
        let host = format!("{}:{}", String::from_utf8_lossy(key), String::from_utf8_lossy(&value));
        headers.add(Cow::Borrowed("Host"), host);
        result.warn_at(line_no, "bare host:port line reinterpreted as Host header");
      } else {
        headers.add(intern_header_name(key), String::from_utf8_lossy(&value).into_owned());
      }
    } else {
      if is_hostname_like(trimmed_line) {
        headers.add(Cow::Borrowed("Host"), String::from_utf8_lossy(trimmed_line).into_owned());
        result.warn_at(line_no, "missing colon, inferred Host from bare hostname");
        continue;
      }
      result.warn_at(line_no, "malformed header");
    }
  }
}

/// CR-3: a bare `host:port` line gets misparsed by ordinary `Key: Value`
/// splitting; undo that when the key looks like a hostname and the value
/// is a bare decimal port.
fn cr3_applies(key: &[u8], value: &[u8]) -> bool {
  (looks_like_hostname_key(key) || looks_like_single_label_host(key)) && is_ascii_decimal(value)
}

fn looks_like_hostname_key(key: &[u8]) -> bool {
  !key.is_empty()
    && key.contains(&b'.')
    && key.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
}

fn looks_like_single_label_host(key: &[u8]) -> bool {
  !key.is_empty() && key.iter().all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn is_ascii_decimal(value: &[u8]) -> bool {
  !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

/// `b` non-empty; first byte alphanumeric; optional `:<digits>` suffix;
/// the host portion contains only `[a-zA-Z0-9.-]`; must contain a `.` or
/// have a port suffix.
fn is_hostname_like(b: &[u8]) -> bool {
  if b.is_empty() || !b.first().is_some_and(u8::is_ascii_alphanumeric) {
    return false;
  }
  let (host_part, has_port) = match b.iter().rposition(|&c| c == b':') {
    Some(pos) => {
      let port = b.get(pos + 1..).unwrap_or(&[]);
      if port.is_empty() || !port.iter().all(u8::is_ascii_digit) {
        return false;
      }
      (b.get(..pos).unwrap_or(&[]), true)
    },
    None => (b, false),
  };
  if host_part.is_empty() || !host_part.iter().all(|&c| c.is_ascii_alphanumeric() || c == b'.' || c == b'-') {
    return false;
  }
  has_port || host_part.contains(&b'.')
}

/// Accepts exactly `[...]` or `[...]:digits`, the bracketed segment
/// containing at least one `:`. Returns the reconstructed authority.
fn parse_ipv6_host_line(line: &[u8]) -> Option<String> {
  if line.first() != Some(&b'[') {
    return None;
  }
  let close = line.iter().position(|&b| b == b']')?;
  let inside = line.get(1..close)?;
  if !inside.contains(&b':') {
    return None;
  }
  let after = line.get(close + 1..).unwrap_or(&[]);
  let inside_str = String::from_utf8_lossy(inside);
  if after.is_empty() {
    return Some(format!("[{inside_str}]"));
  }
  if after.first() == Some(&b':') {
    let port = after.get(1..)?;
    if !port.is_empty() && port.iter().all(u8::is_ascii_digit) {
      return Some(format!("[{inside_str}]:{}", String::from_utf8_lossy(port)));
    }
  }
  None
}

/// Normalize a request-target: absolute-form, IPv6-bracket-prefixed, or a
/// bare `host[:port]/path` line, hoisting out the implied authority and
/// (for absolute-form) the scheme. Returns the normalized path and scheme.
fn normalize_request_target(raw: &str, headers: &mut Headers, result: &mut ParseResult, line_no: usize) -> (String, Option<String>) {
  let bytes = raw.as_bytes();

  for (prefix, scheme) in [("https://", "https"), ("http://", "http")] {
    if let Some(rest) = raw.strip_prefix(prefix) {
      let (authority_raw, path) = match rest.find('/') {
        Some(p) => (rest.get(..p).unwrap_or(""), rest.get(p..).unwrap_or("/")),
        None => (rest, "/"),
      };
      let authority = strip_userinfo(authority_raw);
      result.warn_at(line_no, "absolute-form request-target");
      if !authority.is_empty() && !headers.contains("Host") {
        headers.prepend(Cow::Borrowed("Host"), String::from(authority));
      }
      return (String::from(path), Some(String::from(scheme)));
    }
  }

  if bytes.first() == Some(&b'[')
    && let Some(close) = bytes.iter().position(|&b| b == b']')
    && bytes.get(1..close).is_some_and(|inside| inside.contains(&b':'))
  {
    let after = bytes.get(close + 1..).unwrap_or(&[]);
    let (port_end, has_port) = match after.first() {
      Some(&b':') => {
        let digits_end = after.iter().skip(1).take_while(|&&b| b.is_ascii_digit()).count();
        (1 + digits_end, digits_end > 0)
      },
      _ => (0, false),
    };
    let _ = has_port;
    let remainder = after.get(port_end..).unwrap_or(&[]);
    if remainder.first() == Some(&b'/') {
      let authority_end = close + 1 + port_end;
      let authority = String::from_utf8_lossy(bytes.get(..authority_end).unwrap_or(&[])).into_owned();
      let path = String::from_utf8_lossy(remainder).into_owned();
      if !headers.contains("Host") {
        headers.prepend(Cow::Borrowed("Host"), authority);
      }
      return (path, None);
    }
  }

  if bytes.first().is_some_and(u8::is_ascii_alphanumeric)
    && let Some(slash) = bytes.iter().position(|&b| b == b'/')
  {
    let authority_raw = bytes.get(..slash).unwrap_or(&[]);
    if is_hostname_like(authority_raw) {
      let authority = String::from_utf8_lossy(authority_raw).into_owned();
      let path = String::from_utf8_lossy(bytes.get(slash..).unwrap_or(b"/")).into_owned();
      if !headers.contains("Host") {
        headers.prepend(Cow::Borrowed("Host"), authority);
      }
      return (path, None);
    }
  }

  (String::from(raw), None)
}

fn strip_userinfo(authority: &str) -> &str {
  authority.rfind('@').map_or(authority, |pos| authority.get(pos + 1..).unwrap_or(authority))
}

fn read_body(cursor: &mut Cursor<'_>, headers: &mut Headers, limits: &Limits, result: &mut ParseResult) -> Option<Vec<u8>> {
  let is_chunked = headers
    .values("Transfer-Encoding")
    .any(|v| contains_fold(v.as_bytes(), b"chunked"));

  if is_chunked {
    return match chunked::decode_lenient(cursor.remaining(), limits) {
      Ok(decoded) => {
        normalize::apply(headers, decoded.len());
        body_or_none(decoded)
      },
      Err(raw) => {
        result.warn("chunked decode failed, returning raw remaining bytes");
        result.partial = true;
        body_or_none(raw)
      },
    };
  }

  let remaining = cursor.remaining().to_vec();
  cursor.advance(remaining.len());
  if let Some(declared) = headers.get("Content-Length").and_then(|v| v.parse::<usize>().ok()) {
    let actual = remaining.len();
    match actual.cmp(&declared) {
      core::cmp::Ordering::Less => {
        result.warn(format!("content-length mismatch: declared {declared}, got {actual}"));
        result.partial = true;
      },
      core::cmp::Ordering::Greater => {
        result.warn(format!("content-length mismatch: declared {declared}, got {actual}"));
      },
      core::cmp::Ordering::Equal => {},
    }
  }
  body_or_none(remaining)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
  use super::*;
  use alloc::vec;

  fn limits() -> Limits {
    Limits::default()
  }

  fn request_of(result: &ParseResult) -> &Request {
    match result.message.as_ref().expect("message") {
      Message::Request(r) => r,
      Message::Response(_) => panic!("expected request"),
    }
  }

  #[test]
  fn whitespace_before_colon_becomes_warning() {
    let result = parse_request(b"GET / HTTP/1.1\r\nHost : example.com\r\n\r\n", &limits());
    let req = request_of(&result);
    assert_eq!(req.headers.get("host"), Some("example.com"));
    assert!(result.warnings.iter().any(|w| w.contains("whitespace before colon")));
  }

  #[test]
  fn absolute_form_with_stray_blank_line() {
    let result = parse_request(
      b"POST https://example.com:8080/api/users HTTP/1.1\r\n\r\nContent-Type: application/json\r\nContent-Length: 5\r\n\r\nhello",
      &limits(),
    );
    let req = request_of(&result);
    assert_eq!(req.path, "/api/users");
    assert_eq!(req.scheme.as_deref(), Some("https"));
    assert_eq!(req.headers.get("host"), Some("example.com:8080"));
    assert_eq!(req.headers.get("content-type"), Some("application/json"));
    assert_eq!(req.body.as_deref(), Some(b"hello".as_slice()));
    assert!(result.warnings.iter().any(|w| w.contains("absolute-form")));
    assert!(result.warnings.iter().any(|w| w.contains("stray blank line")));
  }

  #[test]
  fn bare_host_port_cr3() {
    let result = parse_request(b"POST /api HTTP/1.1\r\nexample.com:8080\r\nContent-Type: application/json\r\n\r\n{}", &limits());
    let req = request_of(&result);
    assert_eq!(req.headers.get("host"), Some("example.com:8080"));
    assert_eq!(req.headers.get("content-type"), Some("application/json"));
    assert!(result.warnings.iter().any(|w| w.contains("bare host:port")));
  }

  #[test]
  fn truncated_body_sets_partial() {
    let result = parse_request(b"POST / HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort", &limits());
    let req = request_of(&result);
    assert_eq!(req.body.as_deref(), Some(b"short".as_slice()));
    assert!(result.partial);
    assert!(result.warnings.iter().any(|w| w.contains("content-length mismatch")));
  }

  #[test]
  fn longer_than_declared_is_not_partial() {
    let result = parse_request(b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nhello", &limits());
    assert!(!result.partial);
    assert!(result.warnings.iter().any(|w| w.contains("content-length mismatch")));
  }

  #[test]
  fn never_fails_on_empty_input() {
    let result = parse_request(b"", &limits());
    assert!(result.message.is_none());
    assert!(result.partial);
    assert_eq!(result.warnings, vec![String::from("empty input")]);
  }

  #[test]
  fn missing_version_defaults() {
    let result = parse_request(b"GET /\r\nHost: example.com\r\n\r\n", &limits());
    let req = request_of(&result);
    assert_eq!(req.version.as_ref(), "HTTP/1.1");
    assert!(result.warnings.iter().any(|w| w.contains("malformed request line")));
  }

  #[test]
  fn status_line_missing_reason() {
    let result = parse_response(b"HTTP/1.1 204\r\n\r\n", &limits());
    match result.message.unwrap() {
      Message::Response(resp) => {
        assert_eq!(resp.status_code, 204);
        assert_eq!(resp.reason.as_ref(), "");
      },
      Message::Request(_) => panic!("expected response"),
    }
  }

  #[test]
  fn invalid_status_code_defaults_to_zero() {
    let result = parse_response(b"HTTP/1.1 notanumber\r\n\r\n", &limits());
    match result.message.unwrap() {
      Message::Response(resp) => assert_eq!(resp.status_code, 0),
      Message::Request(_) => panic!("expected response"),
    }
    assert!(result.warnings.iter().any(|w| w.contains("invalid status code")));
  }

  #[test]
  fn ipv6_bare_host_line_inferred() {
    let result = parse_request(b"GET / HTTP/1.1\r\n[::1]:8080\r\n\r\n", &limits());
    let req = request_of(&result);
    assert_eq!(req.headers.get("host"), Some("[::1]:8080"));
  }

  #[test]
  fn malformed_header_without_colon_is_skipped() {
    let result = parse_request(b"GET / HTTP/1.1\r\n!!!not a header!!!\r\n\r\n", &limits());
    assert!(result.warnings.iter().any(|w| w.contains("malformed header")));
  }

  #[test]
  fn chunked_body_lenient_success_normalizes() {
    let result = parse_response(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n", &limits());
    match result.message.unwrap() {
      Message::Response(resp) => {
        assert_eq!(resp.body.as_deref(), Some(b"hello".as_slice()));
        assert_eq!(resp.headers.get("content-length"), Some("5"));
        assert!(!resp.headers.contains("transfer-encoding"));
      },
      Message::Request(_) => panic!("expected response"),
    }
  }

  #[test]
  fn chunked_decode_failure_is_partial() {
    let result = parse_response(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nzzz\r\nhello", &limits());
    assert!(result.partial);
  }
}
