//! Character cursor over script text
//!
//! All parsing in tickle happens through a `Cursor`: a position-tracking
//! view over an immutable sequence of characters with bounded look-ahead.
//! The cursor is exclusively owned by whichever evaluation is active and
//! is threaded `&mut` through the nested parser calls.

/// A position-tracking view over an immutable sequence of characters.
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Cursor {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Look ahead `offset` characters without consuming. Returns `None`
    /// past the end of input; callers must treat that specially rather
    /// than expecting a failure.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consume `n` characters, clamping at the end of input.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// Number of characters left to consume.
    pub fn remaining(&self) -> usize {
        self.chars.len() - self.pos
    }

    /// True if `offset` characters ahead is past the end of input.
    pub fn at_end(&self, offset: usize) -> bool {
        self.pos + offset >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_walks_the_input() {
        let cursor = Cursor::new("abcde");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(1), Some('b'));
        assert_eq!(cursor.peek(2), Some('c'));
        assert_eq!(cursor.peek(3), Some('d'));
        assert_eq!(cursor.peek(4), Some('e'));
    }

    #[test]
    fn peek_past_end_is_none() {
        let cursor = Cursor::new("abcde");
        assert_eq!(cursor.peek(5), None);
    }

    #[test]
    fn advance_moves_current_character() {
        let mut cursor = Cursor::new("abcde");
        cursor.advance(1);
        assert_eq!(cursor.peek(0), Some('b'));
    }

    #[test]
    fn advance_by_multiple() {
        let mut cursor = Cursor::new("abcde");
        cursor.advance(2);
        assert_eq!(cursor.peek(0), Some('c'));
    }

    #[test]
    fn at_end_after_consuming_everything() {
        let mut cursor = Cursor::new("abcde");
        cursor.advance(5);
        assert!(cursor.at_end(0));
    }

    #[test]
    fn remaining_counts_down_and_clamps() {
        let mut cursor = Cursor::new("abcde");
        for expected in (1..=5).rev() {
            assert_eq!(cursor.remaining(), expected);
            cursor.advance(1);
        }
        assert_eq!(cursor.remaining(), 0);
        cursor.advance(1);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn empty_input_is_at_end() {
        let cursor = Cursor::new("");
        assert!(cursor.at_end(0));
        assert_eq!(cursor.peek(0), None);
        assert_eq!(cursor.remaining(), 0);
    }
}
