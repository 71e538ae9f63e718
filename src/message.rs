//! The shared data model (spec §3): `Request`, `Response`, and the
//! `ParseResult` wrapper the lenient parser and curl translator return.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::headers::Headers;

/// A parsed (or synthesized, for the curl translator) HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
  /// The request method. Interned when it matches a common verb.
  pub method: Cow<'static, str>,
  /// The request-target in origin-form (`/path[?query]`). Absolute-form
  /// targets are normalized to this during lenient parsing and curl
  /// translation, with the authority hoisted into `scheme`/the `Host`
  /// header.
  pub path: String,
  /// The protocol-version string, e.g. `HTTP/1.1`. Interned when common.
  pub version: Cow<'static, str>,
  /// Header fields in wire order.
  pub headers: Headers,
  /// The scheme hoisted out of an absolute-form target, if any. Only the
  /// lenient parser and curl translator ever populate this; the strict
  /// parser leaves it `None`.
  pub scheme: Option<String>,
  /// Body bytes, if the message had one.
  pub body: Option<Vec<u8>>,
}

impl Request {
  /// A request with an empty method and root path, defaults used by the
  /// lenient parser when the request-line is missing entirely.
  #[must_use]
  pub fn empty() -> Self {
    Self {
      method: Cow::Borrowed(""),
      path: String::from("/"),
      version: Cow::Borrowed("HTTP/1.1"),
      headers: Headers::new(),
      scheme: None,
      body: None,
    }
  }
}

/// A parsed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
  /// The protocol-version string, e.g. `HTTP/1.1`. Interned when common.
  pub version: Cow<'static, str>,
  /// The numeric status code. The lenient parser substitutes `0` when the
  /// status-line's second token does not parse as a decimal integer.
  pub status_code: u16,
  /// The reason phrase. May be empty.
  pub reason: Cow<'static, str>,
  /// Header fields in wire order.
  pub headers: Headers,
  /// Body bytes, if the message had one.
  pub body: Option<Vec<u8>>,
}

impl Response {
  /// A response with version defaulted to HTTP/1.1, status 0, and an empty
  /// reason, used by the lenient parser when the status-line is missing
  /// entirely.
  #[must_use]
  pub const fn empty() -> Self {
    Self {
      version: Cow::Borrowed("HTTP/1.1"),
      status_code: 0,
      reason: Cow::Borrowed(""),
      headers: Headers::new(),
      body: None,
    }
  }
}

/// Either a request or a response, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
  /// A parsed or synthesized request.
  Request(Request),
  /// A parsed response.
  Response(Response),
}

/// The result of a lenient parse or a curl translation: at most one
/// message, a sequence of warnings, and a flag marking structural
/// incompleteness.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
  /// The parsed message, or `None` if nothing could be recovered (e.g.
  /// empty input, or a curl command with no URL).
  pub message: Option<Message>,
  /// Human-readable warnings, in the order they were encountered. Each is
  /// either unadorned or prefixed `"line N: "`.
  pub warnings: Vec<String>,
  /// Set when the message is structurally incomplete: empty input, a body
  /// shorter than its declared Content-Length, a chunked decode that failed
  /// partway, or (curl) a missing URL or unclosed quote.
  pub partial: bool,
}

impl ParseResult {
  /// An empty result with no message and no warnings, not yet partial.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a warning.
  pub fn warn(&mut self, message: impl Into<String>) {
    self.warnings.push(message.into());
  }

  /// Append a warning tagged with the 1-indexed line it was detected on.
  pub fn warn_at(&mut self, line: usize, message: &str) {
    self.warnings.push(alloc::format!("line {line}: {message}"));
  }
}

/// Convert body bytes to `None` if empty (spec §4.B: "empty bodies are
/// reported as 'no body' rather than a zero-length buffer").
#[must_use]
pub(crate) fn body_or_none(body: Vec<u8>) -> Option<Vec<u8>> {
  if body.is_empty() { None } else { Some(body) }
}
