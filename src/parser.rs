//! Command and word parsing
//!
//! One command is split into words according to Tcl's substitution rules.
//! The parser cannot be separated from evaluation: a `[...]` embedded
//! command has to be dispatched while the enclosing word is still being
//! parsed, so every parsing routine that performs substitution takes the
//! interpreter alongside the cursor and may re-enter it.
//!
//! Three word forms share the substitution rules but differ in
//! termination and literal handling:
//! - unquoted words stop at whitespace or `;` and substitute everything
//! - quoted words run to the closing `"` and substitute everything
//! - braced words run to the matching `}` and substitute nothing

use crate::cursor::Cursor;
use crate::escape::decode_escape;
use crate::interp::{Interp, TclError};

/// Parse a single command into its words, performing variable and
/// command interpolation. Consumes leading whitespace and comments.
///
/// When `embedded` is true the command starts at an opening `[` and a
/// closing `]` terminates it; this is how `[...]` substitution finds its
/// end. The returned word list may be empty, e.g. for a blank line.
pub fn parse_command(
    interp: &mut Interp,
    cursor: &mut Cursor,
    embedded: bool,
) -> Result<Vec<String>, TclError> {
    let mut words = Vec::new();

    if embedded {
        cursor.advance(1); // opening bracket
    }

    consume_whitespace(cursor);
    while cursor.peek(0) == Some('#') {
        consume_comment(cursor);
        consume_whitespace(cursor);
    }

    while let Some(c) = cursor.peek(0) {
        match c {
            // A semicolon or newline ends the command.
            ';' | '\n' => {
                cursor.advance(1);
                return Ok(words);
            }
            '"' => words.push(parse_quoted_word(interp, cursor)?),
            '{' => words.push(parse_braced_word(cursor)?),
            ']' if embedded => {
                cursor.advance(1);
                return Ok(words);
            }
            c if c.is_whitespace() => cursor.advance(1),
            _ => words.push(parse_unquoted_word(interp, cursor, embedded)?),
        }
    }
    Ok(words)
}

/// Parse an unquoted word. Stops without consuming at whitespace or `;`,
/// and at `]` when `stop_at_close_bracket` is set (an embedded command's
/// terminator must be left for `parse_command` to see).
pub fn parse_unquoted_word(
    interp: &mut Interp,
    cursor: &mut Cursor,
    stop_at_close_bracket: bool,
) -> Result<String, TclError> {
    let mut result = String::new();
    while let Some(c) = cursor.peek(0) {
        match c {
            c if c.is_whitespace() => return Ok(result),
            ';' => return Ok(result),
            '\\' => result.push_str(&decode_escape(cursor)?),
            '$' => result.push_str(&parse_and_resolve_variable(interp, cursor)?),
            '[' => {
                let words = parse_command(interp, cursor, true)?;
                result.push_str(&interp.dispatch(words)?);
            }
            ']' if stop_at_close_bracket => return Ok(result),
            _ => {
                result.push(c);
                cursor.advance(1);
            }
        }
    }
    Ok(result)
}

/// Parse a quoted word. The cursor must point at the opening quote.
/// Performs the same substitutions as an unquoted word; only a closing
/// `"` terminates it.
pub fn parse_quoted_word(interp: &mut Interp, cursor: &mut Cursor) -> Result<String, TclError> {
    cursor.advance(1); // opening quote
    let mut result = String::new();
    while let Some(c) = cursor.peek(0) {
        match c {
            '"' => {
                cursor.advance(1);
                return Ok(result);
            }
            '\\' => result.push_str(&decode_escape(cursor)?),
            '$' => result.push_str(&parse_and_resolve_variable(interp, cursor)?),
            '[' => {
                let words = parse_command(interp, cursor, true)?;
                result.push_str(&interp.dispatch(words)?);
            }
            _ => {
                result.push(c);
                cursor.advance(1);
            }
        }
    }
    Err(TclError::UnclosedQuote)
}

/// Parse a braced word. The cursor must point at the opening brace.
///
/// No substitution happens inside braces; `$` and `[` are copied
/// literally. A nested `{` parses a complete sub-word and re-wraps it in
/// braces, so nesting depth survives verbatim in the result. Backslash is
/// special only before newline, `{`, `}`, or `\`, each decoding to its
/// second character.
pub fn parse_braced_word(cursor: &mut Cursor) -> Result<String, TclError> {
    cursor.advance(1); // opening brace
    let mut result = String::new();
    while let Some(c) = cursor.peek(0) {
        match c {
            '}' => {
                cursor.advance(1);
                return Ok(result);
            }
            '{' => {
                let sub = parse_braced_word(cursor)?;
                result.push('{');
                result.push_str(&sub);
                result.push('}');
            }
            '\\' => match cursor.peek(1) {
                Some(la @ ('\n' | '}' | '{' | '\\')) => {
                    result.push(la);
                    cursor.advance(2);
                }
                _ => {
                    result.push('\\');
                    cursor.advance(1);
                }
            },
            _ => {
                result.push(c);
                cursor.advance(1);
            }
        }
    }
    Err(TclError::UnclosedBrace)
}

/// Parse a variable reference and resolve it in the current frame. The
/// cursor must point at the `$`. An alias slot (from `global`) redirects
/// the lookup to the aliased frame.
fn parse_and_resolve_variable(
    interp: &mut Interp,
    cursor: &mut Cursor,
) -> Result<String, TclError> {
    let name = parse_variable(cursor);
    interp
        .get_var(interp.current_frame(), &name)
        .ok_or(TclError::UnknownVariable(name))
}

/// Parse a variable reference starting at `$` and return its name.
pub fn parse_variable(cursor: &mut Cursor) -> String {
    if cursor.peek(1) == Some('{') {
        parse_braced_variable(cursor)
    } else {
        parse_normal_variable(cursor)
    }
}

/// `${braced name}`: everything up to the *first* close brace is the
/// name, with no nesting awareness. At end of input the accumulated name
/// is returned as-is.
fn parse_braced_variable(cursor: &mut Cursor) -> String {
    cursor.advance(2); // ${
    let mut name = String::new();
    while let Some(c) = cursor.peek(0) {
        cursor.advance(1);
        if c == '}' {
            break;
        }
        name.push(c);
    }
    name
}

/// `$name` or `$name(index)`: word characters, `_`, and `:` form the
/// name; a `(` starts an array index suffix that is appended to the name
/// including its parentheses.
fn parse_normal_variable(cursor: &mut Cursor) -> String {
    cursor.advance(1); // $
    let mut name = String::new();
    while let Some(c) = cursor.peek(0) {
        match c {
            c if c.is_alphanumeric() || c == '_' || c == ':' => {
                name.push(c);
                cursor.advance(1);
            }
            '(' => {
                name.push_str(&parse_array_index(cursor));
                return name;
            }
            _ => return name,
        }
    }
    name
}

/// Parse an array index suffix starting at `(`. On `)` the index is
/// returned including both parentheses. On any other terminator the
/// index stops there and the terminator is consumed without being
/// included. This asymmetry is long-standing observed behavior.
fn parse_array_index(cursor: &mut Cursor) -> String {
    let mut index = String::from("(");
    cursor.advance(1);
    while let Some(c) = cursor.peek(0) {
        match c {
            c if c.is_alphanumeric() || c == '_' || c == ',' => {
                index.push(c);
                cursor.advance(1);
            }
            ')' => {
                index.push(')');
                cursor.advance(1);
                return index;
            }
            _ => {
                cursor.advance(1);
                return index;
            }
        }
    }
    index
}

/// Consume a comment starting at `#`, up to and including the first
/// unescaped newline. A backslash followed by a newline or another
/// backslash is skipped as a two-character unit, so escaped line endings
/// continue the comment.
pub fn consume_comment(cursor: &mut Cursor) {
    while let Some(c) = cursor.peek(0) {
        match c {
            '\\' if matches!(cursor.peek(1), Some('\n') | Some('\\')) => cursor.advance(2),
            '\n' => {
                cursor.advance(1);
                return;
            }
            _ => cursor.advance(1),
        }
    }
}

/// Consume whitespace, including newlines.
pub fn consume_whitespace(cursor: &mut Cursor) {
    while matches!(cursor.peek(0), Some(c) if c.is_whitespace()) {
        cursor.advance(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(input: &str) -> Cursor {
        Cursor::new(input)
    }

    #[test]
    fn consumes_a_multi_line_comment() {
        let mut input = cursor("# this is a comment \\\non multiple lines\n1234");
        consume_comment(&mut input);
        assert_eq!(input.remaining(), 4);
    }

    #[test]
    fn consumes_a_comment_with_escaped_backslashes() {
        let mut input = cursor("# this is a comment \\\\\n1234");
        consume_comment(&mut input);
        assert_eq!(input.remaining(), 4);
    }

    #[test]
    fn consumes_whitespace_including_newlines() {
        let mut input = cursor("   \t\x0c\n\r  hello");
        consume_whitespace(&mut input);
        assert_eq!(input.remaining(), 5);
    }

    #[test]
    fn parses_a_normal_variable() {
        let mut input = cursor("$namespace::variable_123 tail");
        assert_eq!(parse_variable(&mut input), "namespace::variable_123");
        assert_eq!(input.remaining(), 5);
    }

    #[test]
    fn normal_variable_stops_at_a_backslash() {
        let mut input = cursor("$var\\ tail");
        assert_eq!(parse_variable(&mut input), "var");
        assert_eq!(input.remaining(), 6);
    }

    #[test]
    fn braced_variable_name_is_taken_literally() {
        let mut input = cursor("${{word_{count} tail");
        assert_eq!(parse_variable(&mut input), "{word_{count");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn parses_an_array_index() {
        let mut input = cursor("$var(123,45)tail");
        assert_eq!(parse_variable(&mut input), "var(123,45)");
        assert_eq!(input.remaining(), "tail".len());
    }

    #[test]
    fn array_index_drops_an_unexpected_terminator() {
        // The terminator is consumed but not included in the index.
        let mut input = cursor("$var(12;x");
        assert_eq!(parse_variable(&mut input), "var(12");
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn parses_an_unquoted_word() {
        let mut interp = Interp::new();
        let mut input = cursor("unquoted-word\ntail");
        let word = parse_unquoted_word(&mut interp, &mut input, false).unwrap();
        assert_eq!(word, "unquoted-word");
        assert_eq!(input.remaining(), "\ntail".len());
    }

    #[test]
    fn unquoted_word_decodes_escapes() {
        let mut interp = Interp::new();
        let mut input = cursor("un\\ quoted\\\"word tail");
        let word = parse_unquoted_word(&mut interp, &mut input, false).unwrap();
        assert_eq!(word, "un quoted\"word");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn unquoted_word_interpolates_variables() {
        let mut interp = Interp::new();
        interp.set_global("foo", "99");
        let mut input = cursor("value-of-foo-is-$foo tail");
        let word = parse_unquoted_word(&mut interp, &mut input, false).unwrap();
        assert_eq!(word, "value-of-foo-is-99");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn unquoted_word_substitutes_embedded_commands() {
        let mut interp = Interp::new();
        let mut input = cursor("pre[set a b]post tail");
        let word = parse_unquoted_word(&mut interp, &mut input, false).unwrap();
        assert_eq!(word, "prebpost");
        assert_eq!(interp.get_global("a"), Some("b".to_string()));
    }

    #[test]
    fn unknown_variable_is_fatal() {
        let mut interp = Interp::new();
        let mut input = cursor("$missing ");
        let result = parse_unquoted_word(&mut interp, &mut input, false);
        assert!(matches!(result, Err(TclError::UnknownVariable(name)) if name == "missing"));
    }

    #[test]
    fn parses_a_quoted_word() {
        let mut interp = Interp::new();
        let mut input = cursor("\" this\nis a\tquoted\\\"word\" tail");
        let word = parse_quoted_word(&mut interp, &mut input).unwrap();
        assert_eq!(word, " this\nis a\tquoted\"word");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn quoted_word_interpolates_variables() {
        let mut interp = Interp::new();
        interp.set_global("foo", "99");
        let mut input = cursor("\"the value of foo is $foo \"tail");
        let word = parse_quoted_word(&mut interp, &mut input).unwrap();
        assert_eq!(word, "the value of foo is 99 ");
        assert_eq!(input.remaining(), "tail".len());
    }

    #[test]
    fn quoted_word_decodes_the_whole_escape_table() {
        let mut interp = Interp::new();
        let mut input = cursor("\"\\a\\b\\f\\n\\r\\t\\v\\\\\"");
        let word = parse_quoted_word(&mut interp, &mut input).unwrap();
        assert_eq!(word, "\x07\x08\x0c\n\r\t\x0b\\");
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn unclosed_quote_is_fatal() {
        let mut interp = Interp::new();
        let mut input = cursor("\"never closed");
        let result = parse_quoted_word(&mut interp, &mut input);
        assert!(matches!(result, Err(TclError::UnclosedQuote)));
    }

    #[test]
    fn braced_word_performs_no_substitution() {
        let mut input = cursor("{this is $a \\} braced word} tail");
        let word = parse_braced_word(&mut input).unwrap();
        assert_eq!(word, "this is $a } braced word");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn braced_word_preserves_nesting() {
        let mut input = cursor("{this is {a b c d}\\} braced word} tail");
        let word = parse_braced_word(&mut input).unwrap();
        assert_eq!(word, "this is {a b c d}} braced word");
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn braced_word_copies_other_backslashes_literally() {
        let mut input = cursor("{a\\nb}");
        assert_eq!(parse_braced_word(&mut input).unwrap(), "a\\nb");
    }

    #[test]
    fn unclosed_brace_is_fatal() {
        let mut input = cursor("{never {closed}");
        let result = parse_braced_word(&mut input);
        assert!(matches!(result, Err(TclError::UnclosedBrace)));
    }

    #[test]
    fn parses_a_command_terminated_by_a_semicolon() {
        let mut interp = Interp::new();
        interp.set_global("command", "test value");
        let mut input =
            cursor("    # leading comment\n   $command    {a b c} \"hello there\"; tail");
        let words = parse_command(&mut interp, &mut input, false).unwrap();
        assert_eq!(words, vec!["test value", "a b c", "hello there"]);
        assert_eq!(input.remaining(), " tail".len());
    }

    #[test]
    fn skips_leading_comments_and_whitespace() {
        let mut interp = Interp::new();
        let mut input =
            cursor("    # comment\\\non multiple lines\n\n\n# another\n  set a b\ntail");
        let words = parse_command(&mut interp, &mut input, false).unwrap();
        assert_eq!(words, vec!["set", "a", "b"]);
        assert_eq!(input.remaining(), "tail".len());
    }

    #[test]
    fn embedded_command_ends_at_the_close_bracket() {
        let mut interp = Interp::new();
        let mut input = cursor("[set a b]tail");
        let words = parse_command(&mut interp, &mut input, true).unwrap();
        assert_eq!(words, vec!["set", "a", "b"]);
        assert_eq!(input.remaining(), "tail".len());
    }

    #[test]
    fn blank_input_parses_to_no_words() {
        let mut interp = Interp::new();
        let mut input = cursor("   \n");
        let words = parse_command(&mut interp, &mut input, false).unwrap();
        assert!(words.is_empty());
    }
}
