//! Integration tests for the strict parser against the concrete scenarios
//! and universal invariants of the wire format.

use httpwire::parser::strict;
use httpwire::{Limits, ParseErrorKind};

fn limits() -> Limits {
  Limits::default()
}

#[test]
fn s1_simple_request() {
  let req = strict::parse_request(b"GET /api/users HTTP/1.1\r\nHost: example.com\r\n\r\n", &limits()).expect("parse");
  assert_eq!(req.method.as_ref(), "GET");
  assert_eq!(req.path, "/api/users");
  assert_eq!(req.version.as_ref(), "HTTP/1.1");
  assert_eq!(req.headers.len(), 1);
  assert_eq!(req.headers.get("Host"), Some("example.com"));
  assert_eq!(req.body, None);
}

#[test]
fn s2_chunked_response_normalized() {
  let resp = strict::parse_response(
    b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n",
    &limits(),
  )
  .expect("parse");
  assert_eq!(resp.body.as_deref(), Some(b"hello".as_slice()));
  assert!(!resp.headers.contains("Transfer-Encoding"));
  assert_eq!(resp.headers.get("Content-Length"), Some("5"));
}

#[test]
fn s3_whitespace_before_colon_is_an_error() {
  let err = strict::parse_request(b"GET / HTTP/1.1\r\nHost : example.com\r\n\r\n", &limits()).unwrap_err();
  assert_eq!(err.kind, ParseErrorKind::WhitespaceBeforeColon);
  assert_eq!(err.line, 2);
}

#[test]
fn s9_truncated_body_is_an_error() {
  let err = strict::parse_request(b"POST / HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort", &limits()).unwrap_err();
  assert_eq!(err.kind, ParseErrorKind::BodyTruncated);
}

#[test]
fn roundtrip_preserves_method_path_version_and_header_count() {
  let raw = b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 4\r\n\r\ntest";
  let first = strict::parse_request(raw, &limits()).expect("parse");
  let marshaled = format!(
    "{} {} {}\r\n{}\r\n\r\n{}",
    first.method,
    first.path,
    first.version,
    first
      .headers
      .iter()
      .map(|h| format!("{}: {}", h.name, h.value))
      .collect::<Vec<_>>()
      .join("\r\n"),
    first.body.as_deref().map(|b| String::from_utf8_lossy(b).into_owned()).unwrap_or_default(),
  );
  let second = strict::parse_request(marshaled.as_bytes(), &limits()).expect("reparse");
  assert_eq!(first.method, second.method);
  assert_eq!(first.path, second.path);
  assert_eq!(first.version, second.version);
  assert_eq!(first.headers.len(), second.headers.len());
}

#[test]
fn never_panics_on_arbitrary_short_inputs() {
  let probes: &[&[u8]] = &[
    b"",
    b"\r\n",
    b"\0\0\0",
    b"GET",
    b"GET ",
    b"GET / ",
    b"GET / HTTP/1.1",
    b"GET / HTTP/1.1\r\n",
    b":\r\n\r\n",
    b"GET / HTTP/1.1\r\n:\r\n\r\n",
    b"GET / HTTP/1.1\r\nContent-Length: -1\r\n\r\n",
  ];
  for probe in probes {
    let _ = strict::parse_request(probe, &limits());
    let _ = strict::parse_response(probe, &limits());
  }
}

#[test]
fn obs_fold_continuation_joins_with_single_space() {
  let req = strict::parse_request(b"GET / HTTP/1.1\r\nX-Long: first\r\n second\r\n\r\n", &limits()).expect("parse");
  assert_eq!(req.headers.get("X-Long"), Some("first second"));
}

#[test]
fn missing_colon_is_a_malformed_header_error() {
  let err = strict::parse_request(b"GET / HTTP/1.1\r\nNotAHeader\r\n\r\n", &limits()).unwrap_err();
  assert_eq!(err.kind, ParseErrorKind::MalformedHeader);
}

#[test]
fn non_numeric_status_code_is_an_error() {
  let err = strict::parse_response(b"HTTP/1.1 OK Fine\r\n\r\n", &limits()).unwrap_err();
  assert_eq!(err.kind, ParseErrorKind::InvalidStatusCode);
}
