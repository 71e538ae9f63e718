//! Compound short-flag expansion (spec §4.G).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Flags that consume the rest of a compound token as an inline argument.
const ARG_CONSUMING: [char; 12] = ['X', 'H', 'd', 'F', 'u', 'o', 'A', 'e', 'm', 'w', 'x', 'b'];

/// Expand every compound short flag (`-sXPOST`) in a token sequence into
/// its constituent flags (`-s -X POST`).
#[must_use]
pub fn expand(tokens: &[String]) -> Vec<String> {
  let mut out = Vec::with_capacity(tokens.len());
  for tok in tokens {
    out.extend(expand_one(tok));
  }
  out
}

fn expand_one(tok: &str) -> Vec<String> {
  let chars: Vec<char> = tok.chars().collect();
  if chars.len() <= 2 || chars.first() != Some(&'-') || chars.get(1) == Some(&'-') || chars.get(1) == Some(&'#') {
    return alloc::vec![String::from(tok)];
  }

  let mut out = Vec::new();
  let mut i = 1;
  while let Some(&c) = chars.get(i) {
    out.push(format!("-{c}"));
    if ARG_CONSUMING.contains(&c) {
      let rest: String = chars.get(i + 1..).unwrap_or(&[]).iter().collect();
      if !rest.is_empty() {
        out.push(rest);
      }
      return out;
    }
    i += 1;
  }
  out
}
