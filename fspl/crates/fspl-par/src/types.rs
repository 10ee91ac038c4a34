//! Type system and coercion (§4.3.2): the five value kinds, the lattice
//! of implicit coercions between them, and the hint-driven widening
//! rules binary operators apply before emitting.

use fspl_ir::Value;
use fspl_sym::SymbolKind;
use fspl_util::{DiagnosticBuilder, DiagnosticCode, Line};

use crate::Parser;

/// An expression's emitted value together with the kind it carries.
/// This is the currency every grammar production above `factor` passes
/// up and down — there is no separate AST node for an expression,
/// `Typed` fills that role at emission time.
#[derive(Clone, Copy)]
pub struct Typed<'ctx> {
    pub kind: SymbolKind,
    pub value: Value<'ctx>,

    /// The storage address this value was loaded from, if it names one
    /// directly (a bare variable or one array element) rather than being
    /// the result of a computation. Call-argument materialization (§4.3.4)
    /// reuses this address for `out`/`inout` formals instead of spilling a
    /// fresh temporary.
    pub place: Option<Value<'ctx>>,
}

impl<'ctx> Typed<'ctx> {
    pub fn new(kind: SymbolKind, value: Value<'ctx>) -> Self {
        Self { kind, value, place: None }
    }

    pub fn with_place(kind: SymbolKind, value: Value<'ctx>, place: Value<'ctx>) -> Self {
        Self { kind, value, place: Some(place) }
    }
}

impl<'ctx, 'src> Parser<'ctx, 'src> {
    /// Coerces `typed` to `target` per the lattice in §4.3.2:
    /// integer↔float, integer↔bool. Anything else (including any
    /// coercion touching string or char) is reported and the value is
    /// returned unconverted so emission can continue.
    pub(crate) fn coerce(&mut self, typed: Typed<'ctx>, target: SymbolKind, line: Line) -> Typed<'ctx> {
        use SymbolKind::*;
        match (typed.kind, target) {
            (a, b) if a == b => typed,
            (Integer, Float) => Typed::new(Float, self.backend.int_to_float(typed.value)),
            (Float, Integer) => Typed::new(Integer, self.backend.float_to_int(typed.value)),
            (Integer, Bool) => Typed::new(Bool, self.backend.int_to_bool(typed.value)),
            (Bool, Integer) => Typed::new(Integer, self.backend.bool_to_int(typed.value)),
            _ => {
                DiagnosticBuilder::error(format!(
                    "cannot coerce {:?} to {:?}",
                    typed.kind, target
                ))
                .code(DiagnosticCode::E_SEM_BAD_COERCION)
                .line(Some(line))
                .emit(self.handler);
                typed
            }
        }
    }

    /// Applies the "Binary arithmetic rules" widening (§4.3.2) shared by
    /// `+ - * /`: a float operand widens its integer partner. Arithmetic is
    /// only defined on float and integer operands — a bool operand is a
    /// type error here, even though bool↔integer coercion is legal
    /// elsewhere (assignment, an explicit hint type).
    pub(crate) fn widen_arith(
        &mut self,
        lhs: Typed<'ctx>,
        rhs: Typed<'ctx>,
        line: Line,
    ) -> (Typed<'ctx>, Typed<'ctx>, SymbolKind) {
        if lhs.kind == SymbolKind::Bool || rhs.kind == SymbolKind::Bool {
            DiagnosticBuilder::error("arithmetic operations are only defined on float and integer types")
                .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                .line(Some(line))
                .emit(self.handler);
        }
        let lhs = if lhs.kind == SymbolKind::Bool { self.coerce(lhs, SymbolKind::Integer, line) } else { lhs };
        let rhs = if rhs.kind == SymbolKind::Bool { self.coerce(rhs, SymbolKind::Integer, line) } else { rhs };

        let result_kind = if lhs.kind == SymbolKind::Float || rhs.kind == SymbolKind::Float {
            SymbolKind::Float
        } else {
            SymbolKind::Integer
        };

        let lhs = self.coerce(lhs, result_kind, line);
        let rhs = self.coerce(rhs, result_kind, line);
        (lhs, rhs, result_kind)
    }

    /// Widens a relational operator's operands (§4.3.2): integer/integer,
    /// float/float, or bool/bool are compared directly; a bool pair is
    /// additionally widened to integer first when the surrounding hint
    /// isn't itself bool.
    pub(crate) fn widen_relation(
        &mut self,
        lhs: Typed<'ctx>,
        rhs: Typed<'ctx>,
        hint: SymbolKind,
        line: Line,
    ) -> (Typed<'ctx>, Typed<'ctx>, SymbolKind) {
        if lhs.kind == SymbolKind::Bool && rhs.kind == SymbolKind::Bool {
            if hint != SymbolKind::Bool {
                let lhs = self.coerce(lhs, SymbolKind::Integer, line);
                let rhs = self.coerce(rhs, SymbolKind::Integer, line);
                return (lhs, rhs, SymbolKind::Integer);
            }
            return (lhs, rhs, SymbolKind::Bool);
        }
        self.widen_arith(lhs, rhs, line)
    }

    /// `&`/`|` (§4.3.2): bitwise over integers, logical over bools; a
    /// mixed pair resolves to whichever the hint type asks for.
    pub(crate) fn widen_bitwise(
        &mut self,
        lhs: Typed<'ctx>,
        rhs: Typed<'ctx>,
        hint: SymbolKind,
        line: Line,
    ) -> (Typed<'ctx>, Typed<'ctx>, SymbolKind) {
        let target = if hint == SymbolKind::Bool { SymbolKind::Bool } else { SymbolKind::Integer };
        let lhs = self.coerce(lhs, target, line);
        let rhs = self.coerce(rhs, target, line);
        (lhs, rhs, target)
    }
}
