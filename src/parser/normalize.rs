//! Header normalization after a successful chunked decode (spec §4.D).

extern crate alloc;

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use crate::headers::Headers;
use crate::scanner::{contains_fold, eq_fold, split_comma, trim_ows};

/// Strip the `chunked` token from every `Transfer-Encoding` value and
/// replace (or insert) `Content-Length` with `decoded_len`.
///
/// Applied only when the message declared chunked encoding and decoding
/// succeeded; callers that reach this function unconditionally apply it.
pub fn apply(headers: &mut Headers, decoded_len: usize) {
  let mut rebuilt = Headers::new();
  let mut saw_content_length = false;

  for header in headers.iter() {
    if eq_fold(header.name.as_bytes(), b"Transfer-Encoding") {
      if let Some(reduced) = strip_chunked_token(&header.value) {
        rebuilt.add(header.name.clone(), reduced);
      }
      continue;
    }
    if eq_fold(header.name.as_bytes(), b"Content-Length") {
      if !saw_content_length {
        rebuilt.add(Cow::Borrowed("Content-Length"), format!("{decoded_len}"));
        saw_content_length = true;
      }
      continue;
    }
    rebuilt.add(header.name.clone(), header.value.clone());
  }

  if !saw_content_length {
    rebuilt.add(Cow::Borrowed("Content-Length"), format!("{decoded_len}"));
  }

  *headers = rebuilt;
}

/// Remove every `chunked` (case-insensitive) token from a comma-separated
/// Transfer-Encoding value, trimming each surviving token and rejoining
/// with `", "`. Returns `None` if nothing would remain.
fn strip_chunked_token(value: &str) -> Option<String> {
  if !contains_fold(value.as_bytes(), b"chunked") {
    return Some(String::from(value));
  }
  let tokens: alloc::vec::Vec<String> = split_comma(value.as_bytes())
    .into_iter()
    .map(trim_ows)
    .filter(|t| !eq_fold(t, b"chunked"))
    .map(|t| String::from_utf8_lossy(t).into_owned())
    .collect();
  if tokens.is_empty() {
    None
  } else {
    Some(tokens.join(", "))
  }
}
