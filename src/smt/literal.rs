//! SMT-LIB 2.6 literal rendering

use crate::error::{OracleError, Result};
use std::fmt::Write;

/// Largest code point an SMT-LIB 2.6 string character can take
pub const MAX_CODE_POINT: u32 = 0x2FFFF;

/// Fail with [`OracleError::Configuration`] if `word` holds a character
/// above [`MAX_CODE_POINT`], which no string literal can express.
pub fn check_representable(word: &str) -> Result<()> {
    match word.chars().find(|&c| c as u32 > MAX_CODE_POINT) {
        Some(c) => Err(OracleError::Configuration(format!(
            "word `{word}` contains U+{:04X}, outside the SMT-LIB string alphabet",
            c as u32
        ))),
        None => Ok(()),
    }
}

/// Render a string literal.
///
/// Quotes are doubled. Backslashes, control characters and anything outside
/// printable ASCII use the `\u{..}` escape so no solver has to guess at the
/// source encoding. Characters above [`MAX_CODE_POINT`] have no escape; see
/// [`check_representable`].
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\"\""),
            ' '..='~' if c != '\\' => out.push(c),
            _ => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Render an integer literal. SMT-LIB numerals are unsigned, so negatives
/// are written as `(- n)`.
pub fn int_literal(value: i64) -> String {
    if value < 0 {
        format!("(- {})", value.unsigned_abs())
    } else {
        value.to_string()
    }
}
