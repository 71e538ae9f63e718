use core::fmt;

/// The kind of failure the strict parser encountered.
///
/// Each variant corresponds to one row of the error taxonomy: a deviation
/// that the strict path treats as fatal and the lenient path
/// (`crate::parser::lenient`) instead turns into a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
  /// The input was empty or the start line could not be read at all.
  MissingStartLine,
  /// The request-line or status-line did not have the expected field count.
  MalformedStartLine,
  /// The status-line's second token did not parse as a decimal integer.
  InvalidStatusCode,
  /// Whitespace appeared between a header field-name and its colon.
  WhitespaceBeforeColon,
  /// A header line had no colon and was not recognized as anything else.
  MalformedHeader,
  /// `Content-Length` declared more bytes than remained in the buffer.
  BodyTruncated,
  /// A chunk-size line was not a valid hexadecimal integer.
  ChunkedInvalidSize,
  /// A chunk declared more data than remained in the buffer.
  ChunkedTruncated,
  /// A line was not terminated by CRLF, LF, or (lenient only) bare CR.
  MissingLineTerminator,
}

impl fmt::Display for ParseErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingStartLine => write!(f, "missing start line"),
      Self::MalformedStartLine => write!(f, "malformed start line"),
      Self::InvalidStatusCode => write!(f, "invalid status code"),
      Self::WhitespaceBeforeColon => write!(f, "whitespace before colon"),
      Self::MalformedHeader => write!(f, "malformed header"),
      Self::BodyTruncated => write!(f, "body truncated"),
      Self::ChunkedInvalidSize => write!(f, "invalid chunk size"),
      Self::ChunkedTruncated => write!(f, "chunk data truncated"),
      Self::MissingLineTerminator => write!(f, "missing line terminator"),
    }
  }
}

/// A strict-path parse failure, tagged with the 1-indexed line on which it
/// was detected.
///
/// Line numbers are counted by [`crate::scanner::read_line`]: every
/// CRLF/LF/bare-CR consumed increments the counter, including empty lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
  /// What went wrong.
  pub kind: ParseErrorKind,
  /// The 1-indexed line on which `kind` was detected.
  pub line: usize,
}

impl ParseError {
  /// Construct an error at the given 1-indexed line.
  #[must_use]
  pub const fn new(kind: ParseErrorKind, line: usize) -> Self {
    Self { kind, line }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: {}", self.line, self.kind)
  }
}
