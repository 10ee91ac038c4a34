//! Expressions (§4.3.1 `expr`/`arith`/`relation`/`term`/`factor`, §4.3.2
//! hint-driven coercion): the lowest four productions in the grammar,
//! each one level of the precedence climb, each hint-typed by its
//! caller and each reducing straight to emitted IR through [`Typed`].

use fspl_ir::Comparison;
use fspl_sym::SymbolKind;
use fspl_util::{DiagnosticBuilder, DiagnosticCode, Line};

use crate::items::natural_ir_type;
use crate::types::Typed;
use crate::Parser;
use fspl_lex::TokenKind;

impl<'ctx, 'src> Parser<'ctx, 'src> {
    /// `expr := [ "not" ] arith { ("&" | "|") arith }` (§4.3.1), coerced to
    /// `hint` once reduced — this is the one entry point every statement
    /// production calls, and the only place the final coercion in §4.3.2
    /// ("applied just before the expression value is returned to its
    /// caller") actually happens.
    pub(crate) fn parse_expr(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let line = self.line();
        let reduced = self.parse_expr_inner(hint);
        self.coerce(reduced, hint, line)
    }

    /// Same grammar as [`Self::parse_expr`] but stops short of the final
    /// hint coercion — call-argument evaluation (§4.3.4) needs the
    /// expression's natural type to compare against the formal, not a
    /// value that has already been silently converted to match it.
    pub(crate) fn parse_expr_inner(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let not_line = self.line();
        let negate = self.eat(TokenKind::KwNot);
        let mut left = self.parse_arith(hint);

        while matches!(self.peek_kind(), TokenKind::And | TokenKind::Or) {
            let op = self.peek_kind();
            let line = self.line();
            self.bump();
            let right = self.parse_arith(hint);
            let (l, r, kind) = self.widen_bitwise(left, right, hint, line);
            let value = match op {
                TokenKind::And => self.backend.bitwise_and(l.value, r.value),
                _ => self.backend.bitwise_or(l.value, r.value),
            };
            left = Typed::new(kind, value);
        }

        if negate {
            left = self.apply_not(left, not_line);
        }
        left
    }

    /// `arith := relation { ("+" | "-") relation }`.
    fn parse_arith(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let mut left = self.parse_relation(hint);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus | TokenKind::Minus => self.peek_kind(),
                _ => break,
            };
            let line = self.line();
            self.bump();
            let right = self.parse_relation(hint);
            let (l, r, kind) = self.widen_arith(left, right, line);
            let value = if op == TokenKind::Plus { self.backend.add(l.value, r.value) } else { self.backend.sub(l.value, r.value) };
            left = Typed::new(kind, value);
        }
        left
    }

    /// `relation := term { ("<" | ">" | "<=" | ">=" | "==" | "!=") term }`.
    /// Unlike the other binary levels the result is always `Bool`
    /// regardless of the operand kind the comparison widened to.
    fn parse_relation(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let mut left = self.parse_term(hint);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => Comparison::Lt,
                TokenKind::Gt => Comparison::Gt,
                TokenKind::LtEq => Comparison::LtEq,
                TokenKind::GtEq => Comparison::GtEq,
                TokenKind::Equals => Comparison::Eq,
                TokenKind::NotEqual => Comparison::NotEq,
                _ => break,
            };
            let line = self.line();
            self.bump();
            let right = self.parse_term(hint);
            let (l, r, _) = self.widen_relation(left, right, hint, line);
            let value = self.backend.compare(op, l.value, r.value);
            left = Typed::new(SymbolKind::Bool, value);
        }
        left
    }

    /// `term := factor { ("*" | "/") factor }`.
    fn parse_term(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let mut left = self.parse_factor(hint);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Multiplication | TokenKind::Division => self.peek_kind(),
                _ => break,
            };
            let line = self.line();
            self.bump();
            let right = self.parse_factor(hint);
            let (l, r, kind) = self.widen_arith(left, right, line);
            let value =
                if op == TokenKind::Multiplication { self.backend.mul(l.value, r.value) } else { self.backend.div(l.value, r.value) };
            left = Typed::new(kind, value);
        }
        left
    }

    /// `factor := "(" expr ")" | [ "-" ] ( IDENT [ "[" expr "]" ] | INT |
    /// FLOAT ) | STRING | CHAR | "true" | "false"`.
    fn parse_factor(&mut self, hint: SymbolKind) -> Typed<'ctx> {
        let line = self.line();

        if self.eat(TokenKind::LParen) {
            let inner = self.parse_expr_inner(hint);
            self.expect(TokenKind::RParen, "`)`");
            return inner;
        }

        let negate = self.eat(TokenKind::Minus);

        match self.peek_kind() {
            TokenKind::Identifier => {
                let tok = self.bump();
                let Some(name) = tok.ident_symbol() else { return self.error_sentinel(hint) };
                let typed = self.resolve_variable(name, line);
                if negate { self.negate_typed(typed, line) } else { typed }
            }
            TokenKind::IntegerLiteral => {
                let tok = self.bump();
                let raw = tok.integer_value().unwrap_or(0);
                let value = self.backend.const_int(if negate { -raw } else { raw });
                Typed::new(SymbolKind::Integer, value)
            }
            TokenKind::FloatLiteral => {
                let tok = self.bump();
                let raw = tok.float_value().unwrap_or(0.0);
                let value = self.backend.const_float(if negate { -raw } else { raw });
                Typed::new(SymbolKind::Float, value)
            }
            TokenKind::StringLiteral if !negate => {
                let tok = self.bump();
                let text = tok.string_symbol().map(|s| s.as_str().to_string()).unwrap_or_default();
                let Ok(value) = self.backend.global_string_literal(&text, "str") else {
                    return self.error_sentinel(hint);
                };
                Typed::new(SymbolKind::Str, value)
            }
            TokenKind::CharLiteral if !negate => {
                let tok = self.bump();
                let c = tok.char_value().unwrap_or('\0');
                Typed::new(SymbolKind::Character, self.backend.const_char(c))
            }
            TokenKind::KwTrue if !negate => {
                self.bump();
                Typed::new(SymbolKind::Bool, self.backend.const_bool(true))
            }
            TokenKind::KwFalse if !negate => {
                self.bump();
                Typed::new(SymbolKind::Bool, self.backend.const_bool(false))
            }
            _ => {
                self.internal_error("factor");
                self.error_sentinel(hint)
            }
        }
    }

    /// Resolves a bare identifier used as a value: a plain variable load,
    /// or — if followed by `"[" expr "]"` — an array element load, index
    /// normalized per §4.3.5 by subtracting the declared lower bound
    /// before `element_address`. Either way `place` carries the address
    /// actually read from, so a by-reference call argument built on top
    /// of this can reuse the cell instead of spilling a fresh temporary.
    fn resolve_variable(&mut self, name: fspl_util::Symbol, line: Line) -> Typed<'ctx> {
        let Some(entry) = self.symbols.resolve(name) else {
            DiagnosticBuilder::error(format!("`{}` was not declared", name.as_str()))
                .code(DiagnosticCode::E_SEM_UNDECLARED)
                .line(Some(line))
                .emit(self.handler);
            return self.error_sentinel(SymbolKind::Integer);
        };

        let (kind, bounds, storage) = {
            let borrowed = entry.borrow();
            (borrowed.kind, borrowed.array_bounds, borrowed.storage)
        };

        if kind == SymbolKind::Procedure {
            DiagnosticBuilder::error(format!("`{}` names a procedure, not a value", name.as_str()))
                .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                .line(Some(line))
                .emit(self.handler);
            return self.error_sentinel(SymbolKind::Integer);
        }

        let Some(storage) = storage else {
            self.internal_error("resolve_variable: declared symbol has no storage");
            return self.error_sentinel(kind);
        };

        if self.at(TokenKind::LBracket) {
            self.bump();
            let Some(bounds) = bounds else {
                DiagnosticBuilder::error(format!("`{}` is not an array", name.as_str()))
                    .code(DiagnosticCode::E_SEM_NOT_AN_ARRAY)
                    .line(Some(line))
                    .emit(self.handler);
                let _ = self.parse_expr(SymbolKind::Integer);
                self.expect(TokenKind::RBracket, "`]`");
                return self.error_sentinel(kind);
            };
            let index = self.parse_expr(SymbolKind::Integer);
            self.expect(TokenKind::RBracket, "`]`");

            let lower = self.backend.const_int(bounds.lower);
            let normalized = self.backend.sub(index.value, lower);
            let Ok(address) = self.backend.element_address(storage, normalized) else {
                self.internal_error("element_address");
                return self.error_sentinel(kind);
            };
            let element_ty = natural_ir_type(kind);
            let Ok(value) = self.backend.load_through(address, &element_ty) else {
                self.internal_error("load_through element");
                return self.error_sentinel(kind);
            };
            return Typed::with_place(kind, value, address);
        }

        if bounds.is_some() {
            // A bare array name names the whole array — only meaningful
            // as a by-reference call argument (§4.3.4), which the call
            // site parses directly rather than going through here. Used
            // as a scalar value it is a type error.
            DiagnosticBuilder::error(format!("`{}` is an array; an index is required here", name.as_str()))
                .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                .line(Some(line))
                .emit(self.handler);
            return self.error_sentinel(kind);
        }

        let Ok(value) = self.backend.load(storage) else {
            self.internal_error("load scalar");
            return self.error_sentinel(kind);
        };
        let Ok(address) = self.backend.address_of(storage) else {
            return Typed::new(kind, value);
        };
        Typed::with_place(kind, value, address)
    }

    /// An `Integer`-kind placeholder value (§7: "a null symbol entry
    /// returned from resolution is replaced with a sentinel so subsequent
    /// emissions have a well-typed argument"), shaped to whatever kind the
    /// caller expected so the surrounding expression keeps type-checking.
    fn error_sentinel(&mut self, kind: SymbolKind) -> Typed<'ctx> {
        let kind = if kind == SymbolKind::Procedure || kind == SymbolKind::Undefined { SymbolKind::Integer } else { kind };
        let value = match kind {
            SymbolKind::Float => self.backend.const_float(0.0),
            SymbolKind::Bool => self.backend.const_bool(false),
            SymbolKind::Character => self.backend.const_char('\0'),
            SymbolKind::Str => self.backend.global_string_literal("", "err_str").unwrap_or_else(|_| self.backend.const_int(0)),
            _ => self.backend.const_int(0),
        };
        Typed::new(kind, value)
    }

    fn negate_typed(&mut self, typed: Typed<'ctx>, line: Line) -> Typed<'ctx> {
        match typed.kind {
            SymbolKind::Integer => Typed::new(SymbolKind::Integer, self.backend.negate_int(typed.value)),
            SymbolKind::Float => Typed::new(SymbolKind::Float, self.backend.negate_float(typed.value)),
            _ => {
                DiagnosticBuilder::error(format!("cannot negate a {:?} value", typed.kind))
                    .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                    .line(Some(line))
                    .emit(self.handler);
                typed
            }
        }
    }

    /// Unary `not` (§4.3.2, §9): bitwise XOR against all-ones for an
    /// integer operand, logical XOR against one for a bool operand. This
    /// is the corrected reading, not the source compiler's bug that
    /// treats a bool operand as if it were already an integer coming in.
    fn apply_not(&mut self, typed: Typed<'ctx>, line: Line) -> Typed<'ctx> {
        match typed.kind {
            SymbolKind::Bool => {
                let one = self.backend.const_bool(true);
                Typed::new(SymbolKind::Bool, self.backend.bitwise_xor(typed.value, one))
            }
            SymbolKind::Integer => {
                let all_ones = self.backend.const_int(-1);
                Typed::new(SymbolKind::Integer, self.backend.bitwise_xor(typed.value, all_ones))
            }
            _ => {
                DiagnosticBuilder::error(format!("`not` does not apply to a {:?} value", typed.kind))
                    .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                    .line(Some(line))
                    .emit(self.handler);
                typed
            }
        }
    }
}
