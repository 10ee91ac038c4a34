//! A byte-indexed, line-tracking walk over ASCII source text.

use fspl_util::Line;

/// Position a [`Cursor`] can be rewound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
}

/// Walks a source string one byte at a time, tracking the 1-based line
/// number as it goes (newlines are counted wherever they occur, including
/// inside comments and strings — §6.2).
///
/// Source is assumed ASCII; bytes are read directly rather than decoded
/// as UTF-8, since the lexical encoding this crate accepts is ASCII only.
pub struct Cursor<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
        }
    }

    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.source.get(self.position).map(|&b| b as char)
    }

    #[inline]
    pub fn peek_char(&self) -> Option<char> {
        self.source.get(self.position + 1).map(|&b| b as char)
    }

    /// Consume and return the current character, advancing the line
    /// counter if it was a newline.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.line)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_forward_and_returns_consumed_char() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn newlines_increment_the_line_counter() {
        let mut cursor = Cursor::new("a\nb\nc");
        assert_eq!(cursor.line().get(), 1);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line().get(), 2);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line().get(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = Cursor::new("xy");
        assert_eq!(cursor.peek_char(), Some('y'));
        assert_eq!(cursor.current_char(), Some('x'));
        cursor.advance();
        assert_eq!(cursor.current_char(), Some('y'));
    }

    #[test]
    fn match_char_only_consumes_on_match() {
        let mut cursor = Cursor::new("=x");
        assert!(!cursor.match_char('x'));
        assert_eq!(cursor.current_char(), Some('='));
        assert!(cursor.match_char('='));
        assert_eq!(cursor.current_char(), Some('x'));
    }

    #[test]
    fn is_at_end_reflects_exhaustion() {
        let mut cursor = Cursor::new("a");
        assert!(!cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn empty_source_is_immediately_at_end() {
        let cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_char(), None);
    }

    #[test]
    fn snapshot_and_restore_rewind_position_and_line() {
        let mut cursor = Cursor::new("a\nb\nc");
        cursor.advance();
        cursor.advance();
        let mark = cursor.snapshot();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line().get(), 3);
        cursor.restore(mark);
        assert_eq!(cursor.line().get(), 2);
        assert_eq!(cursor.current_char(), Some('b'));
    }
}
