//! Operator and punctuation lexing (§4.1).
//!
//! Single-character tokens for `. ; ( ) , [ ] : & | + - * /`; the
//! multi-character operators `<= >= == != :=` are disambiguated by one
//! character of lookahead. A bare `<`, `>`, `:` stands on its own. `=`
//! only appears as the second half of `==`; a standalone `=` is unknown,
//! and likewise for a standalone `!`. Neither case is diagnosed here —
//! `Lexer::next_token` diagnoses any `Unknown` token centrally so the
//! message is reported exactly once regardless of which dispatch branch
//! produced it.

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Dispatches a single- or two-character symbol starting at `c`, or
    /// the string/char literal lexers for quotes.
    pub(super) fn lex_symbol(&mut self, c: char) -> Token {
        let line = self.cursor.line();

        match c {
            '"' => self.lex_string(line),
            '\'' => self.lex_char(line),

            '.' => self.single(TokenKind::Period),
            ';' => self.single(TokenKind::Semicolon),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Multiplication),
            '/' => self.single(TokenKind::Division),
            '&' => self.single(TokenKind::And),
            '|' => self.single(TokenKind::Or),

            ':' => self.one_or_two('=', TokenKind::Colon, TokenKind::Assignment),
            '<' => self.one_or_two('=', TokenKind::Lt, TokenKind::LtEq),
            '>' => self.one_or_two('=', TokenKind::Gt, TokenKind::GtEq),

            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::new(TokenKind::Equals, line)
                } else {
                    Token::new(TokenKind::Unknown, line)
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::new(TokenKind::NotEqual, line)
                } else {
                    Token::new(TokenKind::Unknown, line)
                }
            }

            _ => {
                self.cursor.advance();
                Token::new(TokenKind::Unknown, line)
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let line = self.cursor.line();
        self.cursor.advance();
        Token::new(kind, line)
    }

    /// Consumes the current character, then `second` if it follows,
    /// choosing between a one- and a two-character token kind accordingly.
    fn one_or_two(&mut self, second: char, alone: TokenKind, paired: TokenKind) -> Token {
        let line = self.cursor.line();
        self.cursor.advance();
        if self.cursor.match_char(second) {
            Token::new(paired, line)
        } else {
            Token::new(alone, line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fspl_util::Handler;

    fn lex_one(src: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source(src, &handler);
        lexer.next_token()
    }

    #[test]
    fn single_char_structural_tokens() {
        assert_eq!(lex_one(".").kind, TokenKind::Period);
        assert_eq!(lex_one(";").kind, TokenKind::Semicolon);
        assert_eq!(lex_one("(").kind, TokenKind::LParen);
        assert_eq!(lex_one(")").kind, TokenKind::RParen);
        assert_eq!(lex_one(",").kind, TokenKind::Comma);
        assert_eq!(lex_one("[").kind, TokenKind::LBracket);
        assert_eq!(lex_one("]").kind, TokenKind::RBracket);
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(lex_one("+").kind, TokenKind::Plus);
        assert_eq!(lex_one("-").kind, TokenKind::Minus);
        assert_eq!(lex_one("*").kind, TokenKind::Multiplication);
        assert_eq!(lex_one("/").kind, TokenKind::Division);
        assert_eq!(lex_one("&").kind, TokenKind::And);
        assert_eq!(lex_one("|").kind, TokenKind::Or);
    }

    #[test]
    fn colon_alone_vs_assignment() {
        assert_eq!(lex_one(":").kind, TokenKind::Colon);
        assert_eq!(lex_one(":=").kind, TokenKind::Assignment);
    }

    #[test]
    fn lt_gt_alone_vs_with_equals() {
        assert_eq!(lex_one("<").kind, TokenKind::Lt);
        assert_eq!(lex_one("<=").kind, TokenKind::LtEq);
        assert_eq!(lex_one(">").kind, TokenKind::Gt);
        assert_eq!(lex_one(">=").kind, TokenKind::GtEq);
    }

    #[test]
    fn double_equals_is_equality() {
        assert_eq!(lex_one("==").kind, TokenKind::Equals);
    }

    #[test]
    fn bare_equals_is_unknown_and_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("=", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Unknown);
        assert!(handler.has_errors());
    }

    #[test]
    fn not_equal_operator() {
        assert_eq!(lex_one("!=").kind, TokenKind::NotEqual);
    }

    #[test]
    fn bare_bang_is_unknown_and_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("!", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Unknown);
        assert!(handler.has_errors());
    }

    #[test]
    fn completely_unmapped_byte_is_unknown_and_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("@", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Unknown);
        assert!(handler.has_errors());
    }

    #[test]
    fn operators_advance_the_cursor_past_themselves() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source(":= 5", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Assignment);
        assert_eq!(lexer.next_token().integer_value(), Some(5));
    }
}
