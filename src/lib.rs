//! # httpwire
//!
//! **Strict and lenient HTTP/1.1 wire parsing, plus a curl(1) translator**
//!
//! httpwire parses HTTP/1.1 requests and responses from raw bytes per RFC
//! 9112, with two complementary disciplines over the same [`Request`] /
//! [`Response`] data model:
//!
//! - [`parser::strict`] rejects any deviation from the standard as a
//!   [`ParseError`] carrying the line it was detected on.
//! - [`parser::lenient`] never fails: it extracts as much as it can from
//!   human-edited or partially corrupt input, reporting problems as
//!   warnings on a [`ParseResult`] instead.
//!
//! A third front-end, [`curl::translate`], accepts an arbitrary curl(1)
//! command line and synthesizes the equivalent HTTP request.
//!
//! It is `no_std` (with `alloc`): no global state, no I/O, a function takes
//! a buffer and returns a value.
//!
//! ## Quick start
//!
//! ```
//! use httpwire::{Limits, parser::strict};
//!
//! let req = strict::parse_request(b"GET /api/users HTTP/1.1\r\nHost: example.com\r\n\r\n", &Limits::default())?;
//! assert_eq!(req.method.as_ref(), "GET");
//! assert_eq!(req.path, "/api/users");
//! # Ok::<(), httpwire::ParseError>(())
//! ```
//!
//! ## Lenient recovery
//!
//! ```
//! use httpwire::{Limits, parser::lenient};
//!
//! let result = lenient::parse_request(b"GET / HTTP/1.1\r\nHost : example.com\r\n\r\n", &Limits::default());
//! assert!(result.warnings.iter().any(|w| w.contains("whitespace before colon")));
//! ```
//!
//! ## curl translation
//!
//! ```
//! use httpwire::curl;
//!
//! let result = curl::translate(r#"curl -X POST https://example.com/api -d '{"x":1}'"#);
//! assert!(result.message.is_some());
//! ```

#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(
  clippy::unwrap_used,
  clippy::expect_used,
  clippy::panic,
  clippy::panic_in_result_fn,
  clippy::indexing_slicing,
  clippy::integer_division,
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_precision_loss,
  clippy::shadow_unrelated,
  clippy::shadow_reuse,
  clippy::shadow_same,
  clippy::wildcard_imports,
  dead_code
)]
#![warn(
  missing_docs,
  clippy::pedantic,
  clippy::nursery,
  clippy::missing_errors_doc,
  clippy::missing_panics_doc
)]
#![allow(
  clippy::inline_always,
  clippy::similar_names,
  clippy::too_many_lines,
  clippy::too_many_arguments,
  clippy::type_complexity,
  clippy::ptr_as_ptr
)]

extern crate alloc;

/// curl(1) command-line translation (spec §4.F–§4.I).
pub mod curl;
/// Strict-path parse errors.
pub mod error;
/// The header collection (spec §3).
pub mod headers;
/// Ceilings guarding the parsers against pathological input.
pub mod limits;
/// The shared data model: `Request`, `Response`, `ParseResult`.
pub mod message;
/// The strict and lenient HTTP/1.1 parsers.
pub mod parser;
/// Byte-level scanning primitives and string interning.
pub mod scanner;

mod util;

pub use error::{ParseError, ParseErrorKind};
pub use headers::{Header, Headers};
pub use limits::Limits;
pub use message::{Message, ParseResult, Request, Response};
