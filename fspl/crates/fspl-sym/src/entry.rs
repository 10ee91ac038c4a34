//! A symbol table entry (§4.2) and the handful of pieces of metadata a
//! declaration carries depending on what it names.

use fspl_ir::{BlockId, FunctionId, ValueId};
use fspl_util::Symbol;

/// What a declared name actually is. `Undefined` exists only as the
/// lookup-miss placeholder in error-recovery paths — no symbol is ever
/// inserted with this kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Undefined,
    Integer,
    Float,
    Bool,
    Character,
    Str,
    Procedure,
}

impl SymbolKind {
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            SymbolKind::Integer | SymbolKind::Float | SymbolKind::Bool | SymbolKind::Character
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, SymbolKind::Integer | SymbolKind::Float)
    }
}

/// Formal parameter direction (§4.3.4): controls both the ABI (by value
/// vs. by reference) and whether an argument expression may be a plain
/// expression or must be an assignable variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamDirection {
    In,
    Out,
    InOut,
}

impl ParamDirection {
    pub fn is_output(self) -> bool {
        matches!(self, ParamDirection::Out | ParamDirection::InOut)
    }

    pub fn is_input(self) -> bool {
        matches!(self, ParamDirection::In | ParamDirection::InOut)
    }
}

/// An array's declared bounds, inclusive on both ends as FSPL's
/// `[lower:upper]` syntax writes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayBounds {
    pub lower: i64,
    pub upper: i64,
}

impl ArrayBounds {
    /// `upper - lower`, not `upper - lower + 1` — the element count is
    /// one short of the inclusive reading. This reproduces the source
    /// compiler's computation rather than the natural one; a `[0:4]`
    /// array backs only indices `0..3` at the IR level.
    pub fn len(&self) -> u32 {
        (self.upper - self.lower).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.upper <= self.lower
    }

    /// Whether `index` falls within the *usable* range, i.e. excludes
    /// the uppermost inclusive value to match [`Self::len`].
    pub fn contains(&self, index: i64) -> bool {
        index >= self.lower && index < self.upper
    }
}

/// A single formal parameter of a procedure, in declaration order.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: Symbol,
    pub kind: SymbolKind,
    pub direction: ParamDirection,
    pub array_bounds: Option<ArrayBounds>,
}

/// Everything the table tracks about one declared name. Variables,
/// parameters, and procedures are all `SymbolEntry`s; the `kind` and the
/// optional fields distinguish what's actually filled in.
#[derive(Clone, Debug)]
pub struct SymbolEntry {
    pub name: Symbol,
    pub kind: SymbolKind,
    pub array_bounds: Option<ArrayBounds>,

    /// Set once the declaration has been emitted: the storage slot for a
    /// variable or parameter, `None` for a procedure (which instead has
    /// `function`).
    pub storage: Option<ValueId>,

    /// Set only for procedures.
    pub function: Option<FunctionId>,
    pub params: Vec<Parameter>,
    pub returns_value: bool,

    /// Filled in by [`crate::SymbolTable::promote_to_global`] when a
    /// local symbol turns out to alias a name that must live at module
    /// scope (built-ins resolved from inside a procedure body).
    pub is_global: bool,
}

impl SymbolEntry {
    pub fn variable(name: Symbol, kind: SymbolKind, array_bounds: Option<ArrayBounds>) -> Self {
        Self {
            name,
            kind,
            array_bounds,
            storage: None,
            function: None,
            params: Vec::new(),
            returns_value: false,
            is_global: false,
        }
    }

    pub fn procedure(name: Symbol, params: Vec<Parameter>, returns_value: bool) -> Self {
        Self {
            name,
            kind: SymbolKind::Procedure,
            array_bounds: None,
            storage: None,
            function: None,
            params,
            returns_value,
            is_global: true,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_bounds.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_is_upper_minus_lower_not_the_inclusive_count() {
        let bounds = ArrayBounds { lower: 0, upper: 4 };
        assert_eq!(bounds.len(), 4);
    }

    #[test]
    fn negative_lower_bound_normalizes_through_contains() {
        // §8 Boundaries: an array declared `[-5:5]` accepts indices
        // `-5..4` after normalization, not `-5..5` — `len()` is 10, not 11.
        let bounds = ArrayBounds { lower: -5, upper: 5 };
        assert_eq!(bounds.len(), 10);
        assert!(bounds.contains(-5));
        assert!(bounds.contains(4));
        assert!(!bounds.contains(5));
        assert!(!bounds.contains(-6));
    }

    #[test]
    fn empty_when_upper_does_not_exceed_lower() {
        assert!(ArrayBounds { lower: 0, upper: 0 }.is_empty());
        assert!(!ArrayBounds { lower: 0, upper: 1 }.is_empty());
    }
}

/// Where in a procedure body emission currently sits: the function being
/// built and the block new instructions are appended to. Saved and
/// restored around constructs that temporarily redirect emission
/// elsewhere, such as a nested `if`/`for` body.
#[derive(Clone, Copy, Debug)]
pub struct InsertPoint {
    pub function: FunctionId,
    pub block: BlockId,
}
