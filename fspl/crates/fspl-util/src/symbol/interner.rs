//! The string table backing [`Symbol`].
//!
//! Interning lives behind a thread-local rather than a field threaded
//! through the compiler's types: every phase from the scanner onward needs
//! to intern or resolve symbols, a single-pass compiler run never spans
//! more than one thread, and a global table keeps call sites free of an
//! extra parameter. The reserved words are interned eagerly on first touch
//! so their indices are stable and known at compile time via the `KW_*`
//! constants in [`super`].

use super::{InternerStats, Symbol, RESERVED_WORDS};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

struct Inner {
    indices: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
    hits: usize,
    misses: usize,
}

impl Inner {
    fn new() -> Self {
        let mut table = Self {
            indices: FxHashMap::default(),
            strings: Vec::new(),
            hits: 0,
            misses: 0,
        };
        for word in RESERVED_WORDS {
            table.intern_fresh(word);
        }
        table
    }

    fn intern_fresh(&mut self, string: &str) -> u32 {
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(interned);
        self.indices.insert(interned, index);
        index
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&index) = self.indices.get(string) {
            self.hits += 1;
            return Symbol { index };
        }
        self.misses += 1;
        Symbol {
            index: self.intern_fresh(string),
        }
    }

    fn get(&self, index: u32) -> Option<&'static str> {
        self.strings.get(index as usize).copied()
    }
}

thread_local! {
    static TABLE: RefCell<Inner> = RefCell::new(Inner::new());
}

/// Handle to the thread-local string table. Zero-sized; all state lives in
/// the `thread_local!`.
pub struct StringTable;

pub static STRING_TABLE: StringTable = StringTable;

impl StringTable {
    pub(crate) fn intern(&self, string: &str) -> Symbol {
        TABLE.with(|table| table.borrow_mut().intern(string))
    }

    pub(crate) fn get(&self, symbol: Symbol) -> Option<&'static str> {
        TABLE.with(|table| table.borrow().get(symbol.index))
    }

    pub(crate) fn stats(&self) -> InternerStats {
        TABLE.with(|table| {
            let inner = table.borrow();
            InternerStats::new(
                inner.strings.len(),
                inner.indices.capacity(),
                inner.hits,
                inner.misses,
            )
        })
    }

    pub(crate) fn reset_stats(&self) {
        TABLE.with(|table| {
            let mut inner = table.borrow_mut();
            inner.hits = 0;
            inner.misses = 0;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::KW_PROGRAM;
    use super::*;

    #[test]
    fn reserved_words_are_pre_interned() {
        let stats = STRING_TABLE.stats();
        assert!(stats.count >= RESERVED_WORDS.len());
        assert_eq!(KW_PROGRAM.as_str(), "PROGRAM");
    }

    #[test]
    fn repeated_intern_hits_the_table() {
        STRING_TABLE.reset_stats();
        let a = STRING_TABLE.intern("widget_count");
        let b = STRING_TABLE.intern("widget_count");
        assert_eq!(a, b);
        assert!(STRING_TABLE.stats().hits >= 1);
    }
}
