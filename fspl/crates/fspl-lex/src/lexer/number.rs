//! Number literal lexing.
//!
//! Decimal integers and floats only — no base prefixes. Floats accumulate
//! digit-by-digit rather than through a final string-to-f64 parse: the
//! fractional part is built up as `fract_mult * digit`, with `fract_mult`
//! starting at 0.1 and decaying by ×0.1 per digit, matching the precision
//! characteristics of the implementation this is grounded on (§9).

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, TokenPayload};

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> Token {
        let line = self.cursor.line();

        let first = self.cursor.advance().expect("caller confirmed a digit");
        let mut int_value: i64 = (first as u8 - b'0') as i64;
        let mut float_value: f64 = 0.0;
        let mut fract_mult: f64 = 0.1;
        let mut is_float = false;

        while let Some(c) = self.cursor.current_char() {
            if c == '.' {
                is_float = true;
                float_value = int_value as f64;
                self.cursor.advance();
            } else if c == '_' {
                self.cursor.advance();
            } else if crate::ascii::is_digit(c) {
                let digit = (c as u8 - b'0') as i64;
                if is_float {
                    float_value += fract_mult * digit as f64;
                    fract_mult *= 0.1;
                } else {
                    int_value = int_value * 10 + digit;
                }
                self.cursor.advance();
            } else {
                break;
            }
        }

        if is_float {
            Token::with_payload(TokenKind::FloatLiteral, line, TokenPayload::Float(float_value))
        } else {
            Token::with_payload(TokenKind::IntegerLiteral, line, TokenPayload::Integer(int_value))
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
    fn single_digit_integer() {
        let t = lex_one("7");
        assert_eq!(t.kind, TokenKind::IntegerLiteral);
        assert_eq!(t.integer_value(), Some(7));
    }

    #[test]
    fn multi_digit_integer() {
        assert_eq!(lex_one("12345").integer_value(), Some(12345));
    }

    #[test]
    fn underscores_between_digits_are_skipped() {
        assert_eq!(lex_one("1_000_000").integer_value(), Some(1_000_000));
    }

    #[test]
    fn float_with_fractional_part() {
        let t = lex_one("3.5");
        assert_eq!(t.kind, TokenKind::FloatLiteral);
        assert!((t.float_value().unwrap() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn float_accumulates_multiple_fractional_digits() {
        let t = lex_one("1.125");
        assert!((t.float_value().unwrap() - 1.125).abs() < 1e-9);
    }

    #[test]
    fn non_digit_non_dot_non_underscore_ends_the_literal() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("42;", &handler);
        let t = lexer.next_token();
        assert_eq!(t.integer_value(), Some(42));
        assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
    }

    #[test]
    fn trailing_dot_with_no_digits_yields_a_float_equal_to_the_integer_part() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("9.;", &handler);
        let t = lexer.next_token();
        assert_eq!(t.kind, TokenKind::FloatLiteral);
        assert!((t.float_value().unwrap() - 9.0).abs() < 1e-9);
    }
}
