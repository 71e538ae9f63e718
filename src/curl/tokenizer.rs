//! Shell tokenization with quoting (spec §4.F).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// A tokenization failure: an unterminated single or double quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnclosedQuote;

enum State {
  Idle,
  Single,
  Double,
}

/// Replace backslash-newline line continuations with a single space, then
/// drop blank lines, `#`-comment lines, and Markdown `---`-style separator
/// lines, rejoining the survivors with a space.
#[must_use]
pub fn preprocess(raw: &str) -> String {
  let mut continued = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c == '\\' {
      match chars.peek() {
        Some('\r') => {
          chars.next();
          if chars.peek() == Some(&'\n') {
            chars.next();
          }
          continued.push(' ');
          continue;
        },
        Some('\n') => {
          chars.next();
          continued.push(' ');
          continue;
        },
        _ => {},
      }
    }
    continued.push(c);
  }

  let mut out = String::with_capacity(continued.len());
  for line in continued.lines() {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || (!trimmed.is_empty() && trimmed.chars().all(|c| c == '-')) {
      continue;
    }
    if !out.is_empty() {
      out.push(' ');
    }
    out.push_str(trimmed);
  }
  out
}

/// Split a preprocessed command line into shell-style tokens.
///
/// # Errors
///
/// Returns [`UnclosedQuote`] if a single or double quote is never closed.
pub fn shell_split(input: &str) -> Result<Vec<String>, UnclosedQuote> {
  let chars: Vec<char> = input.chars().collect();
  let mut tokens = Vec::new();
  let mut current: Option<String> = None;
  let mut state = State::Idle;
  let mut i = 0;

  while let Some(&c) = chars.get(i) {
    match state {
      State::Idle => match c {
        ' ' | '\t' => {
          if let Some(tok) = current.take() {
            tokens.push(tok);
          }
          i += 1;
        },
        '\'' => {
          current.get_or_insert_with(String::new);
          state = State::Single;
          i += 1;
        },
        '"' => {
          current.get_or_insert_with(String::new);
          state = State::Double;
          i += 1;
        },
        '\\' => {
          i += 1;
          if let Some(&next) = chars.get(i) {
            current.get_or_insert_with(String::new).push(next);
            i += 1;
          }
        },
        _ => {
          current.get_or_insert_with(String::new).push(c);
          i += 1;
        },
      },
      State::Single => {
        if c == '\'' {
          state = State::Idle;
        } else {
          current.get_or_insert_with(String::new).push(c);
        }
        i += 1;
      },
      State::Double => {
        if c == '"' {
          state = State::Idle;
          i += 1;
        } else if c == '\\' {
          match chars.get(i + 1) {
            Some('"') => {
              current.get_or_insert_with(String::new).push('"');
              i += 2;
            },
            Some('\\') => {
              current.get_or_insert_with(String::new).push('\\');
              i += 2;
            },
            Some('$') => {
              current.get_or_insert_with(String::new).push('$');
              i += 2;
            },
            Some('`') => {
              current.get_or_insert_with(String::new).push('`');
              i += 2;
            },
            Some('\n') => {
              i += 2;
            },
            Some(&other) => {
              let tok = current.get_or_insert_with(String::new);
              tok.push('\\');
              tok.push(other);
              i += 2;
            },
            None => {
              current.get_or_insert_with(String::new).push('\\');
              i += 1;
            },
          }
        } else {
          current.get_or_insert_with(String::new).push(c);
          i += 1;
        }
      },
    }
  }

  if matches!(state, State::Idle) {
    if let Some(tok) = current.take() {
      tokens.push(tok);
    }
    Ok(tokens)
  } else {
    Err(UnclosedQuote)
  }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn splits_on_plain_whitespace() {
    assert_eq!(shell_split("curl -X POST url").unwrap(), vec!["curl", "-X", "POST", "url"]);
  }

  #[test]
  fn single_quotes_are_literal() {
    assert_eq!(shell_split(r#"curl -d '{"x":1}'"#).unwrap(), vec!["curl", "-d", r#"{"x":1}"#]);
  }

  #[test]
  fn double_quote_escapes() {
    assert_eq!(shell_split(r#""a\"b\$c""#).unwrap(), vec![r#"a"b$c"#]);
  }

  #[test]
  fn unrecognized_double_quote_escape_preserved() {
    assert_eq!(shell_split(r#""a\nb""#).unwrap(), vec![r"a\nb"]);
  }

  #[test]
  fn outside_quotes_backslash_collapses() {
    assert_eq!(shell_split(r"a\ b").unwrap(), vec!["a b"]);
  }

  #[test]
  fn trailing_backslash_dropped() {
    assert_eq!(shell_split(r"abc\").unwrap(), vec!["abc"]);
  }

  #[test]
  fn empty_quotes_produce_empty_token() {
    assert_eq!(shell_split(r#"-H """#).unwrap(), vec!["-H", ""]);
  }

  #[test]
  fn unclosed_single_quote_errors() {
    assert!(shell_split("curl 'unterminated").is_err());
  }

  #[test]
  fn unclosed_double_quote_errors() {
    assert!(shell_split(r#"curl "unterminated"#).is_err());
  }

  #[test]
  fn preprocess_joins_line_continuations() {
    assert_eq!(preprocess("curl\\\n-X POST"), "curl -X POST");
  }

  #[test]
  fn preprocess_drops_comments_and_separators() {
    assert_eq!(preprocess("# a comment\ncurl url\n---\n"), "curl url");
  }
}
