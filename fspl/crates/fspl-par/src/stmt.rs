//! Statements and control flow (§4.3.1 `statement`, §4.3.3 control-flow
//! emission, §4.3.4 procedure-call argument materialization).
//!
//! `statement := assignment | if | for | return | proc_call`. The first
//! token alone never disambiguates `assignment` from `proc_call` — both
//! start with an identifier — so dispatch reads one token past the name
//! before deciding which production it is in.

use fspl_ir::Value;
use fspl_sym::{ParamDirection, Parameter, SymbolKind};
use fspl_util::{DiagnosticBuilder, DiagnosticCode, Line, Symbol};

use crate::items::natural_ir_type;
use crate::types::Typed;
use crate::Parser;
use fspl_lex::TokenKind;

impl<'ctx, 'src> Parser<'ctx, 'src> {
    /// `statement := assignment | if | for | return | proc_call`.
    pub(crate) fn stmt_parse_statement(&mut self) {
        match self.peek_kind() {
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::KwReturn => self.parse_return_stmt(),
            TokenKind::Identifier => self.parse_assignment_or_call(),
            _ => {
                DiagnosticBuilder::error(format!("expected a statement, found {:?}", self.peek_kind()))
                    .code(DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN)
                    .line(Some(self.line()))
                    .emit(self.handler);
                self.resync();
            }
        }
    }

    fn parse_assignment_or_call(&mut self) {
        let name_tok = self.expect(TokenKind::Identifier, "an identifier");
        let Some(name) = name_tok.ident_symbol() else { return };
        let line = name_tok.line;

        if self.eat(TokenKind::LParen) {
            self.parse_proc_call_rest(name, line);
        } else {
            self.parse_assignment_rest(name, line);
        }
    }

    /// The `assignment` production on its own, for the for-loop header
    /// (§4.3.1 `for := "for" "(" assignment ";" expr ")" stmts "end" "for"`)
    /// where a bare `proc_call` is never syntactically valid.
    fn parse_assignment(&mut self) {
        let name_tok = self.expect(TokenKind::Identifier, "an identifier");
        let Some(name) = name_tok.ident_symbol() else { return };
        let line = name_tok.line;
        self.parse_assignment_rest(name, line);
    }

    /// `assignment := IDENT [ "[" expr "]" ] ":=" expr`.
    fn parse_assignment_rest(&mut self, name: Symbol, line: Line) {
        let Some(entry) = self.symbols.resolve(name) else {
            DiagnosticBuilder::error(format!("`{}` was not declared", name.as_str()))
                .code(DiagnosticCode::E_SEM_UNDECLARED)
                .line(Some(line))
                .emit(self.handler);
            if self.eat(TokenKind::LBracket) {
                let _ = self.parse_expr(SymbolKind::Integer);
                self.expect(TokenKind::RBracket, "`]`");
            }
            self.expect(TokenKind::Assignment, "`:=`");
            let _ = self.parse_expr(SymbolKind::Integer);
            return;
        };

        let (kind, bounds, storage) = {
            let borrowed = entry.borrow();
            (borrowed.kind, borrowed.array_bounds, borrowed.storage)
        };

        if kind == SymbolKind::Procedure {
            DiagnosticBuilder::error(format!("`{}` names a procedure and cannot be assigned to", name.as_str()))
                .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                .line(Some(line))
                .emit(self.handler);
            if self.eat(TokenKind::LBracket) {
                let _ = self.parse_expr(SymbolKind::Integer);
                self.expect(TokenKind::RBracket, "`]`");
            }
            self.expect(TokenKind::Assignment, "`:=`");
            let _ = self.parse_expr(SymbolKind::Integer);
            return;
        }

        let Some(storage) = storage else {
            self.internal_error("parse_assignment_rest: declared symbol has no storage");
            return;
        };

        if self.eat(TokenKind::LBracket) {
            let Some(bounds) = bounds else {
                DiagnosticBuilder::error(format!("`{}` is not an array", name.as_str()))
                    .code(DiagnosticCode::E_SEM_NOT_AN_ARRAY)
                    .line(Some(line))
                    .emit(self.handler);
                let _ = self.parse_expr(SymbolKind::Integer);
                self.expect(TokenKind::RBracket, "`]`");
                self.expect(TokenKind::Assignment, "`:=`");
                let _ = self.parse_expr(SymbolKind::Integer);
                return;
            };
            let index = self.parse_expr(SymbolKind::Integer);
            self.expect(TokenKind::RBracket, "`]`");
            self.expect(TokenKind::Assignment, "`:=`");

            let lower = self.backend.const_int(bounds.lower);
            let normalized = self.backend.sub(index.value, lower);
            let Ok(address) = self.backend.element_address(storage, normalized) else {
                self.internal_error("element_address in assignment");
                let _ = self.parse_expr(kind);
                return;
            };
            let rhs = self.parse_expr(kind);
            self.backend.store_through(address, rhs.value).ok();
            return;
        }

        if bounds.is_some() {
            DiagnosticBuilder::error(format!("assigning to array `{}` requires an index", name.as_str()))
                .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
                .line(Some(line))
                .emit(self.handler);
            self.expect(TokenKind::Assignment, "`:=`");
            let _ = self.parse_expr(SymbolKind::Integer);
            return;
        }

        self.expect(TokenKind::Assignment, "`:=`");
        let rhs = self.parse_expr(kind);
        self.backend.store(storage, rhs.value).ok();
    }

    /// `proc_call := IDENT "(" [ expr { "," expr } ] ")"` with the `IDENT
    /// "("` prefix already consumed by the caller.
    fn parse_proc_call_rest(&mut self, name: Symbol, line: Line) {
        let Some(entry) = self.symbols.resolve(name) else {
            DiagnosticBuilder::error(format!("`{}` was not declared", name.as_str()))
                .code(DiagnosticCode::E_SEM_UNDECLARED)
                .line(Some(line))
                .emit(self.handler);
            self.discard_call_args();
            self.expect(TokenKind::RParen, "`)`");
            return;
        };

        let (kind, params, function) = {
            let borrowed = entry.borrow();
            (borrowed.kind, borrowed.params.clone(), borrowed.function)
        };

        if kind != SymbolKind::Procedure {
            DiagnosticBuilder::error(format!("`{}` is not a procedure", name.as_str()))
                .code(DiagnosticCode::E_SEM_NOT_A_PROCEDURE)
                .line(Some(line))
                .emit(self.handler);
            self.discard_call_args();
            self.expect(TokenKind::RParen, "`)`");
            return;
        }

        let mut args = Vec::with_capacity(params.len());
        if !self.at(TokenKind::RParen) {
            loop {
                let formal = params.get(args.len()).cloned();
                match formal {
                    Some(formal) => args.push(self.parse_call_argument(&formal, line)),
                    None => {
                        // more arguments than the procedure declares; parse
                        // and discard so the rest of the call still scans
                        let _ = self.parse_expr_inner(SymbolKind::Integer);
                    }
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)`");

        if args.len() != params.len() {
            DiagnosticBuilder::error(format!(
                "`{}` expects {} argument(s), found {}",
                name.as_str(),
                params.len(),
                args.len()
            ))
            .code(DiagnosticCode::E_SEM_ARITY_MISMATCH)
            .line(Some(line))
            .emit(self.handler);
        }

        if let Some(function) = function {
            self.backend.call(function, &args).ok();
        }
    }

    fn discard_call_args(&mut self) {
        if !self.at(TokenKind::RParen) {
            loop {
                let _ = self.parse_expr_inner(SymbolKind::Integer);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
    }

    /// One call-site argument (§4.3.4): an array formal takes a bare
    /// array identifier passed by pointer regardless of direction; a
    /// scalar/string formal is evaluated as an expression hinted to the
    /// formal's type, checked against it *without* the implicit numeric
    /// coercion ordinary expression contexts allow (an `in integer`
    /// formal rejects a float argument rather than truncating it), and
    /// then materialized per the ABI: `in` passes the value directly,
    /// `out`/`inout` pass an address — reusing the argument's own
    /// storage cell when it already names one, otherwise spilling a
    /// fresh temporary.
    fn parse_call_argument(&mut self, formal: &Parameter, line: Line) -> Value<'ctx> {
        if let Some(bounds) = formal.array_bounds {
            return self.parse_array_argument(formal, bounds.len(), line);
        }

        let typed = self.parse_expr_inner(formal.kind);
        if typed.kind != formal.kind {
            DiagnosticBuilder::error(format!(
                "argument type mismatch: expected {:?}, found {:?}",
                formal.kind, typed.kind
            ))
            .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
            .line(Some(line))
            .emit(self.handler);
        }
        let typed = self.coerce(typed, formal.kind, line);

        match formal.direction {
            ParamDirection::In => typed.value,
            ParamDirection::Out | ParamDirection::InOut => match typed.place {
                Some(place) => place,
                None => {
                    let Ok(temp) = self.backend.alloca(natural_ir_type(formal.kind), "argtmp") else {
                        self.internal_error("argument temporary allocation");
                        return typed.value;
                    };
                    self.backend.store(temp, typed.value).ok();
                    self.backend.address_of(temp).unwrap_or(typed.value)
                }
            },
        }
    }

    /// An array argument is always just its name — FSPL has no array
    /// expressions — resolved to the array's own storage pointer.
    fn parse_array_argument(&mut self, formal: &Parameter, expected_len: u32, line: Line) -> Value<'ctx> {
        let name_tok = self.expect(TokenKind::Identifier, "an array name");
        let Some(name) = name_tok.ident_symbol() else {
            return self.backend.const_int(0);
        };

        let Some(entry) = self.symbols.resolve(name) else {
            DiagnosticBuilder::error(format!("`{}` was not declared", name.as_str()))
                .code(DiagnosticCode::E_SEM_UNDECLARED)
                .line(Some(line))
                .emit(self.handler);
            return self.backend.const_int(0);
        };

        let (kind, bounds, storage) = {
            let borrowed = entry.borrow();
            (borrowed.kind, borrowed.array_bounds, borrowed.storage)
        };

        let Some(bounds) = bounds else {
            DiagnosticBuilder::error(format!("`{}` is not an array", name.as_str()))
                .code(DiagnosticCode::E_SEM_NOT_AN_ARRAY)
                .line(Some(line))
                .emit(self.handler);
            return self.backend.const_int(0);
        };

        if kind != formal.kind || bounds.len() != expected_len {
            DiagnosticBuilder::error(format!(
                "argument type mismatch: expected an array of {:?} of length {}, found `{}`",
                formal.kind, expected_len, name.as_str()
            ))
            .code(DiagnosticCode::E_SEM_TYPE_MISMATCH)
            .line(Some(line))
            .emit(self.handler);
        }

        let Some(storage) = storage else {
            self.internal_error("parse_array_argument: declared array has no storage");
            return self.backend.const_int(0);
        };
        self.backend.address_of(storage).unwrap_or_else(|_| self.backend.const_int(0))
    }

    /// `if := "if" "(" expr ")" "then" stmts [ "else" stmts ] "end" "if"`
    /// (§4.3.1, §4.3.3): three blocks — then, else, after — with an
    /// unconditional fallthrough to `after` at the end of whichever of
    /// then/else actually ran. When no `else` appears, the else block is
    /// still created and still branches straight to `after`, giving the
    /// synthetic "falls through" behavior without the emitter needing a
    /// separate code path for it.
    fn parse_if_stmt(&mut self) {
        self.expect(TokenKind::KwIf, "`if`");
        self.expect(TokenKind::LParen, "`(`");
        let cond = self.parse_expr(SymbolKind::Bool);
        self.expect(TokenKind::RParen, "`)`");
        self.expect(TokenKind::KwThen, "`then`");

        let function = self.current_fn();
        let then_block = self.new_block(function, "if.then");
        let else_block = self.new_block(function, "if.else");
        let after_block = self.new_block(function, "if.after");
        self.backend.cond_branch(cond.value, then_block, else_block).ok();

        self.position_at(function, then_block);
        while !matches!(self.peek_kind(), TokenKind::KwElse | TokenKind::KwEnd | TokenKind::FileEnd) {
            self.stmt_parse_statement();
            self.expect(TokenKind::Semicolon, "`;`");
        }
        self.backend.branch(after_block).ok();

        self.position_at(function, else_block);
        if self.eat(TokenKind::KwElse) {
            while !matches!(self.peek_kind(), TokenKind::KwEnd | TokenKind::FileEnd) {
                self.stmt_parse_statement();
                self.expect(TokenKind::Semicolon, "`;`");
            }
        }
        self.backend.branch(after_block).ok();

        self.expect_end_closer(TokenKind::KwIf, "if");
        self.position_at(function, after_block);
    }

    /// `for := "for" "(" assignment ";" expr ")" stmts "end" "for"`
    /// (§4.3.1, §4.3.3): the initializer runs once in the block active
    /// before the loop; header, body, after are then created, with an
    /// unconditional branch into header, the condition evaluated in
    /// header on every iteration, and the body branching back to header
    /// rather than falling through to after.
    fn parse_for_stmt(&mut self) {
        self.expect(TokenKind::KwFor, "`for`");
        self.expect(TokenKind::LParen, "`(`");
        self.parse_assignment();
        self.expect(TokenKind::Semicolon, "`;`");

        let function = self.current_fn();
        let header = self.new_block(function, "for.header");
        let body = self.new_block(function, "for.body");
        let after = self.new_block(function, "for.after");
        self.backend.branch(header).ok();

        self.position_at(function, header);
        let cond = self.parse_expr(SymbolKind::Bool);
        self.expect(TokenKind::RParen, "`)`");
        self.backend.cond_branch(cond.value, body, after).ok();

        self.position_at(function, body);
        while !matches!(self.peek_kind(), TokenKind::KwEnd | TokenKind::FileEnd) {
            self.stmt_parse_statement();
            self.expect(TokenKind::Semicolon, "`;`");
        }
        self.backend.branch(header).ok();

        self.expect_end_closer(TokenKind::KwFor, "for");
        self.position_at(function, after);
    }

    /// `return` (§4.3.3): emits a void return, then repositions to a
    /// fresh, unreached block so any statements still left in the body
    /// keep type-checking and emitting — they just never run.
    fn parse_return_stmt(&mut self) {
        self.expect(TokenKind::KwReturn, "`return`");
        self.backend.ret_void().ok();

        let function = self.current_fn();
        let unreachable = self.new_block(function, "after.return");
        self.position_at(function, unreachable);
    }

    fn new_block(&mut self, function: fspl_ir::FunctionId, label: &str) -> fspl_ir::BlockId {
        match self.backend.create_block(function, label) {
            Ok(block) => block,
            Err(_) => {
                self.internal_error("create_block");
                self.current_block()
            }
        }
    }

    /// Closes an `if`/`for` with `end K`, diagnosing (but tolerating) the
    /// other of the two keywords in K's place (§9 Open Questions:
    /// unbalanced `end if`/`end for`).
    fn expect_end_closer(&mut self, expected: TokenKind, label: &str) {
        self.expect(TokenKind::KwEnd, "`end`");
        if self.at(expected) {
            self.bump();
        } else if matches!(self.peek_kind(), TokenKind::KwIf | TokenKind::KwFor) {
            DiagnosticBuilder::warning(format!("`end {:?}` does not match the {label} it closes", self.peek_kind()))
                .code(DiagnosticCode::W_PARSE_MISMATCHED_END)
                .line(Some(self.line()))
                .emit(self.handler);
            self.bump();
        } else {
            self.expect(expected, &format!("`{label}` to close"));
        }
    }
}
