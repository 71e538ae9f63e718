//! Small standalone helpers shared by the curl translator.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

/// Percent-encode a string for use in URLs.
///
/// Encodes all characters except unreserved characters (A-Z, a-z, 0-9, -, _, ., ~).
#[must_use]
pub fn percent_encode(input: &str) -> String {
  let mut result = String::new();
  for byte in input.bytes() {
    match byte {
      b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
        result.push(byte as char);
      },
      _ => {
        result.push('%');
        let _ = write!(result, "{byte:02X}");
      },
    }
  }
  result
}

/// Encode a `user[:password]` credentials string as a `Basic`
/// `Authorization` header value. Used wherever the caller already has the
/// literal credentials string in hand (curl's `-u` argument, a URL's
/// userinfo segment) rather than separate user/password fields.
#[must_use]
pub fn basic_auth_raw(credentials: &str) -> String {
  use base64::Engine as _;
  let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
  let mut out = String::with_capacity(6 + encoded.len());
  out.push_str("Basic ");
  out.push_str(&encoded);
  out
}
