//! Character classification.
//!
//! The source surface is ASCII (§6.2): every classification question the
//! scanner asks — does this letter start an identifier, is this character
//! allowed inside a string — reduces to a handful of byte-range checks.
//! There is no Unicode identifier or escape handling to do here.

/// A letter begins an identifier (§4.1); digits and underscores may
/// follow but never lead.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters permitted inside a string literal: identifier characters
/// plus a small punctuation allowlist (§4.1).
#[inline]
pub fn is_valid_in_string(c: char) -> bool {
    is_ident_continue(c) || matches!(c, ' ' | ';' | ':' | '.' | ',' | '\'')
}

/// Characters permitted as the single body of a character literal.
/// Note the allowlist swaps `'` for `"` relative to [`is_valid_in_string`]
/// — a character literal can quote a double quote but not itself.
#[inline]
pub fn is_valid_char_literal(c: char) -> bool {
    is_ident_continue(c) || matches!(c, ' ' | ';' | ':' | '.' | '"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_start_identifiers_digits_and_underscore_do_not() {
        assert!(is_ident_start('A'));
        assert!(is_ident_start('z'));
        assert!(!is_ident_start('_'));
        assert!(!is_ident_start('7'));
    }

    #[test]
    fn continue_set_is_wider_than_start_set() {
        assert!(is_ident_continue('_'));
        assert!(is_ident_continue('9'));
        assert!(is_ident_continue('Q'));
    }

    #[test]
    fn whitespace_set_matches_ascii_table() {
        for c in [' ', '\t', '\n', '\r'] {
            assert!(is_whitespace(c));
        }
        assert!(!is_whitespace('a'));
    }

    #[test]
    fn string_allowlist_includes_punctuation_but_not_double_quote() {
        for c in [' ', ';', ':', '.', ',', '\''] {
            assert!(is_valid_in_string(c));
        }
        assert!(!is_valid_in_string('"'));
        assert!(!is_valid_in_string('@'));
    }

    #[test]
    fn char_literal_allowlist_includes_double_quote_but_not_apostrophe() {
        for c in [' ', ';', ':', '.', '"'] {
            assert!(is_valid_char_literal(c));
        }
        assert!(!is_valid_char_literal('\''));
    }
}
