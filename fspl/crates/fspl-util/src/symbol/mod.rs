//! String interning for identifiers and reserved words.
//!
//! [`Symbol`] is a compact (4-byte) handle into a global string table,
//! giving O(1) equality comparison instead of repeated string comparisons
//! every time the parser or symbol table checks a name. Reserved words are
//! interned eagerly (see [`interner`]) and exposed as `KW_*` constants so the
//! scanner can classify an accumulated identifier by comparing symbols
//! rather than strings.
//!
//! # Examples
//!
//! ```
//! use fspl_util::symbol::{Symbol, KW_PROGRAM};
//!
//! let a = Symbol::intern("TOTAL");
//! let b = Symbol::intern("TOTAL");
//! assert_eq!(a, b);
//!
//! assert_eq!(Symbol::intern("PROGRAM"), KW_PROGRAM);
//! assert!(KW_PROGRAM.is_reserved());
//! ```

mod interner;

pub use interner::STRING_TABLE;

/// Interner statistics, useful for a `--verbose` driver flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternerStats {
    pub count: usize,
    pub capacity: usize,
    pub hits: usize,
    pub misses: usize,
}

impl InternerStats {
    pub const fn new(count: usize, capacity: usize, hits: usize, misses: usize) -> Self {
        Self {
            count,
            capacity,
            hits,
            misses,
        }
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// An interned string identifier.
///
/// `Symbol` is `Copy`, 4 bytes, and compares in O(1) by index. Retrieving
/// the text back out (`as_str`) is a linear scan of the table and should be
/// avoided in hot paths — compare symbols, not strings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

/// Symbols with an index below this are reserved words, pre-interned at
/// table construction; they can never be assigned an `IDENTIFIER` token
/// kind and are never shadowable.
const RESERVED_WORDS_END: u32 = RESERVED_WORDS.len() as u32;

/// All reserved words of the source language, case folded to upper case as
/// the scanner stores them (§6.1). Order fixes the `KW_*` indices below —
/// do not reorder without updating them.
const RESERVED_WORDS: &[&str] = &[
    "IN", "OUT", "INOUT", "PROGRAM", "IS", "BEGIN", "END", "GLOBAL",
    "PROCEDURE", "STRING", "CHAR", "INTEGER", "FLOAT", "BOOL", "IF", "THEN",
    "ELSE", "FOR", "RETURN", "TRUE", "FALSE", "NOT",
];

pub const KW_IN: Symbol = Symbol { index: 0 };
pub const KW_OUT: Symbol = Symbol { index: 1 };
pub const KW_INOUT: Symbol = Symbol { index: 2 };
pub const KW_PROGRAM: Symbol = Symbol { index: 3 };
pub const KW_IS: Symbol = Symbol { index: 4 };
pub const KW_BEGIN: Symbol = Symbol { index: 5 };
pub const KW_END: Symbol = Symbol { index: 6 };
pub const KW_GLOBAL: Symbol = Symbol { index: 7 };
pub const KW_PROCEDURE: Symbol = Symbol { index: 8 };
pub const KW_STRING: Symbol = Symbol { index: 9 };
pub const KW_CHAR: Symbol = Symbol { index: 10 };
pub const KW_INTEGER: Symbol = Symbol { index: 11 };
pub const KW_FLOAT: Symbol = Symbol { index: 12 };
pub const KW_BOOL: Symbol = Symbol { index: 13 };
pub const KW_IF: Symbol = Symbol { index: 14 };
pub const KW_THEN: Symbol = Symbol { index: 15 };
pub const KW_ELSE: Symbol = Symbol { index: 16 };
pub const KW_FOR: Symbol = Symbol { index: 17 };
pub const KW_RETURN: Symbol = Symbol { index: 18 };
pub const KW_TRUE: Symbol = Symbol { index: 19 };
pub const KW_FALSE: Symbol = Symbol { index: 20 };
pub const KW_NOT: Symbol = Symbol { index: 21 };

impl Symbol {
    pub const MAX_INDEX: u32 = u32::MAX;

    /// Intern a string, returning its symbol (hit or miss).
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Look up the text a symbol was interned from.
    ///
    /// O(n) in the table size; avoid in hot loops, prefer comparing
    /// `Symbol`s directly.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.get(*self).unwrap_or("")
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    /// True for any of the 22 reserved words (§6.1); these can never be
    /// redeclared and are never shadowed by a local scope.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.index < RESERVED_WORDS_END
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    pub fn stats() -> InternerStats {
        STRING_TABLE.stats()
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let a = Symbol::intern("COUNTER");
        let b = Symbol::intern("COUNTER");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "COUNTER");
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        assert_ne!(Symbol::intern("X"), Symbol::intern("Y"));
    }

    #[test]
    fn reserved_words_round_trip() {
        for word in RESERVED_WORDS {
            let sym = Symbol::intern(word);
            assert!(sym.is_reserved(), "{word} should be reserved");
            assert_eq!(sym.as_str(), *word);
        }
    }

    #[test]
    fn ordinary_identifier_is_not_reserved() {
        assert!(!Symbol::intern("CUSTOMER_NAME").is_reserved());
    }

    #[test]
    fn known_constant_matches_its_text() {
        assert_eq!(KW_PROCEDURE.as_str(), "PROCEDURE");
        assert_eq!(KW_INOUT.as_str(), "INOUT");
        assert_eq!(KW_NOT.as_str(), "NOT");
    }

    #[test]
    fn display_and_debug() {
        let sym = Symbol::intern("INDEX");
        assert_eq!(format!("{sym}"), "INDEX");
        assert_eq!(format!("{sym:?}"), "Symbol(INDEX)");
    }

    #[test]
    fn hit_rate_reports_zero_with_no_lookups() {
        let stats = InternerStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
