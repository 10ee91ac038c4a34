//! Whitespace and comment skipping.
//!
//! Line comments run `//` to the next newline. Block comments `/* … */`
//! nest: a depth counter starts at 1 on the opening `/*`, each further
//! nested `/*` increments it, each `*/` decrements it, and the comment
//! ends only once the counter reaches 0 — not merely once it drops back
//! to 1, which would end the comment one close early.

use crate::lexer::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes whitespace and comments up to the next real token. A `/`
    /// not followed by `/` or `*` is left alone for the operator lexer to
    /// handle as division.
    pub(super) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                Some(c) if crate::ascii::is_whitespace(c) => {
                    self.cursor.advance();
                }
                Some('/') => match self.cursor.peek_char() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment(),
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.cursor.advance(); // first '/'
        self.cursor.advance(); // second '/'
        while let Some(c) = self.cursor.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        let mut depth: u32 = 1;

        tracing::trace!(depth, "entering block comment");

        while let Some(c) = self.cursor.current_char() {
            if c == '*' && self.cursor.peek_char() == Some('/') {
                self.cursor.advance();
                self.cursor.advance();
                depth -= 1;
                tracing::trace!(depth, "closed nested block comment");
                if depth == 0 {
                    return;
                }
            } else if c == '/' && self.cursor.peek_char() == Some('*') {
                self.cursor.advance();
                self.cursor.advance();
                depth += 1;
                tracing::trace!(depth, "opened nested block comment");
            } else {
                self.cursor.advance();
            }
        }

        // Reaching end of file mid-comment is not diagnosed; the scanner
        // simply stops, same as the implementation this is grounded on.
    }
}
