//! Backslash escape decoding
//!
//! Tcl's word substitution recognizes a small table of single-character
//! escapes. Octal, hex, and unicode escape forms are deliberately not
//! supported and fail fast rather than silently mis-decoding.

use crate::cursor::Cursor;
use crate::interp::TclError;

/// Decode one escape sequence. The cursor must point at the backslash.
///
/// Consumes exactly two characters (backslash plus the escape character)
/// on success. A lone backslash at end of input decodes to nothing.
pub fn decode_escape(cursor: &mut Cursor) -> Result<String, TclError> {
    let decoded = match cursor.peek(1) {
        Some('a') => "\x07".to_string(),
        Some('b') => "\x08".to_string(),
        Some('f') => "\x0c".to_string(),
        Some('n') => "\n".to_string(),
        Some('r') => "\r".to_string(),
        Some('t') => "\t".to_string(),
        Some('v') => "\x0b".to_string(),
        Some('\\') => "\\".to_string(),
        Some('0'..='7') => return Err(TclError::UnsupportedEscape("octal")),
        Some('x') => return Err(TclError::UnsupportedEscape("hex")),
        Some('u') => return Err(TclError::UnsupportedEscape("unicode")),
        Some(c) => c.to_string(),
        None => String::new(),
    };
    cursor.advance(2);
    Ok(decoded)
}
