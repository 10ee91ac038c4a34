//! A single scope: a flat map from name to entry. FSPL has exactly two
//! scope levels at any time (§4.2) — this type doesn't know that; it's
//! [`crate::SymbolTable`] that enforces "global plus at most one active
//! local" by only ever holding one of these aside as the local scope.

use fspl_util::Symbol;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entry::SymbolEntry;

pub type EntryRef = Rc<RefCell<SymbolEntry>>;

/// Declaration order matters for procedure signature diagnostics and for
/// emitting parameter lists in source order, hence `IndexMap` rather than
/// the plain hash map the rest of the table's lookups are happy with.
#[derive(Default)]
pub struct Scope {
    entries: IndexMap<Symbol, EntryRef>,
}

impl Scope {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Inserts `entry`, returning the previous entry under the same name
    /// if this scope already declared one — callers use this to detect
    /// and diagnose redeclaration rather than silently shadowing.
    pub fn insert(&mut self, entry: SymbolEntry) -> Option<EntryRef> {
        let name = entry.name;
        self.entries.insert(name, Rc::new(RefCell::new(entry)))
    }

    /// Inserts an already-shared entry under `name`, used when a binding
    /// moves between scopes without losing the identity other code may
    /// still hold a reference to (see
    /// [`crate::SymbolTable::promote_to_global`]).
    pub fn insert_ref(&mut self, name: Symbol, entry: EntryRef) -> Option<EntryRef> {
        self.entries.insert(name, entry)
    }

    pub fn get(&self, name: Symbol) -> Option<EntryRef> {
        self.entries.get(&name).cloned()
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn remove(&mut self, name: Symbol) -> Option<EntryRef> {
        self.entries.shift_remove(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &EntryRef)> {
        self.entries.iter()
    }
}
