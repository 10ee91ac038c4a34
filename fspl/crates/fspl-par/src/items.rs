//! Declarations (§4.3.1 `declaration`, `var_decl`, `proc_decl`,
//! `param_list`): variable and procedure headers, plus the ten built-in
//! I/O procedures (§4.3.6) that every module starts out already knowing.

use fspl_ir::{Backend, FunctionId, IrType};
use fspl_sym::{ArrayBounds, ParamDirection, Parameter, SymbolEntry, SymbolKind, SymbolTable};
use fspl_util::{DiagnosticBuilder, DiagnosticCode};

use crate::BodyKind;
use crate::Parser;
use fspl_lex::TokenKind;

/// The natural IR type a symbol kind maps to, ignoring direction — the
/// type a loaded value of that kind has in an expression.
pub(crate) fn natural_ir_type(kind: SymbolKind) -> IrType {
    match kind {
        SymbolKind::Integer => IrType::Int,
        SymbolKind::Float => IrType::Float,
        SymbolKind::Bool => IrType::Bool,
        SymbolKind::Character => IrType::Char,
        SymbolKind::Str => IrType::Str,
        SymbolKind::Procedure | SymbolKind::Undefined => {
            unreachable!("natural_ir_type is never asked for a procedure or undefined symbol")
        }
    }
}

/// The type a formal parameter has in the function's signature (§4.3.4):
/// arrays are always passed by pointer; `in` scalars/strings by value;
/// `out`/`inout` scalars/strings by reference.
pub(crate) fn param_signature_type(kind: SymbolKind, direction: ParamDirection, bounds: Option<ArrayBounds>) -> IrType {
    if let Some(b) = bounds {
        return natural_ir_type(kind).array_of(b.len()).ptr_to();
    }
    let base = natural_ir_type(kind);
    match (kind, direction) {
        (_, ParamDirection::In) => base,
        (_, ParamDirection::Out) | (_, ParamDirection::InOut) => base.ptr_to(),
    }
}

/// Seeds the global scope and the IR module with the ten built-in I/O
/// procedures before any user declaration is parsed.
pub(crate) fn declare_builtins(symbols: &mut SymbolTable, backend: &mut Backend<'_>) {
    for entry in fspl_sym::builtins::entries() {
        let name = entry.name;
        let param_types: Vec<IrType> = entry
            .params
            .iter()
            .map(|p| param_signature_type(p.kind, p.direction, p.array_bounds))
            .collect();
        let fn_id = backend.declare_function(name.as_str(), &param_types, false);

        let mut entry = entry;
        entry.function = Some(fn_id);
        symbols.declare_global(entry);
    }
}

fn typemark_kind(kind: TokenKind) -> Option<SymbolKind> {
    match kind {
        TokenKind::KwInteger => Some(SymbolKind::Integer),
        TokenKind::KwFloat => Some(SymbolKind::Float),
        TokenKind::KwBool => Some(SymbolKind::Bool),
        TokenKind::KwChar => Some(SymbolKind::Character),
        TokenKind::KwString => Some(SymbolKind::Str),
        _ => None,
    }
}

impl<'ctx, 'src> Parser<'ctx, 'src> {
    fn parse_typemark(&mut self) -> SymbolKind {
        if let Some(kind) = typemark_kind(self.current_kind()) {
            self.bump();
            kind
        } else {
            DiagnosticBuilder::error(format!("expected a type, found {:?}", self.current_kind()))
                .code(DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN)
                .line(Some(self.line()))
                .emit(self.handler);
            SymbolKind::Integer
        }
    }

    fn current_kind(&self) -> TokenKind {
        self.peek_kind()
    }

    /// `bound := [ "-" ] INT_LITERAL` (§4.3.1).
    fn parse_bound(&mut self) -> i64 {
        let negative = self.eat(TokenKind::Minus);
        let tok = self.expect(TokenKind::IntegerLiteral, "an integer bound");
        let magnitude = tok.integer_value().unwrap_or(0);
        if negative { -magnitude } else { magnitude }
    }

    /// `declaration := [ "global" ] ( var_decl | proc_decl )`.
    pub(crate) fn items_parse_declaration(&mut self) {
        let is_global = self.eat(TokenKind::KwGlobal);
        if self.at(TokenKind::KwProcedure) {
            self.parse_proc_decl();
        } else {
            self.parse_var_decl(is_global);
        }
    }

    /// `var_decl := typemark IDENT [ "[" bound ":" bound "]" ]`.
    fn parse_var_decl(&mut self, is_global: bool) {
        let kind = self.parse_typemark();
        let name_tok = self.expect(TokenKind::Identifier, "a variable name");
        let Some(name) = name_tok.ident_symbol() else { return };
        let line = name_tok.line;

        let bounds = if self.eat(TokenKind::LBracket) {
            let lower = self.parse_bound();
            self.expect(TokenKind::Colon, "`:`");
            let upper = self.parse_bound();
            self.expect(TokenKind::RBracket, "`]`");
            Some(ArrayBounds { lower, upper })
        } else {
            None
        };

        if self.symbols.is_declared_in_current_scope(name) {
            DiagnosticBuilder::error(format!("`{}` may have already been defined", name.as_str()))
                .code(DiagnosticCode::E_SEM_REDECLARED)
                .line(Some(line))
                .emit(self.handler);
        }

        let storage = if let Some(b) = bounds {
            self.backend.global_array_zero(natural_ir_type(kind), b.len(), name.as_str())
        } else if !self.symbols.in_procedure_scope() || is_global {
            self.backend.global_scalar_zero(natural_ir_type(kind), name.as_str())
        } else {
            self.backend.alloca(natural_ir_type(kind), name.as_str())
        };
        let Ok(storage) = storage else {
            self.internal_error("var_decl storage allocation");
            return;
        };

        let mut entry = SymbolEntry::variable(name, kind, bounds);
        entry.storage = Some(storage);
        entry.is_global = !self.symbols.in_procedure_scope() || is_global;

        if self.symbols.in_procedure_scope() {
            self.symbols.declare_local(entry);
            if is_global {
                self.symbols.promote_to_global(name);
            }
        } else {
            self.symbols.declare_global(entry);
        }
    }

    /// `proc_decl := "procedure" IDENT "(" [ param_list ] ")" body`.
    fn parse_proc_decl(&mut self) {
        self.expect(TokenKind::KwProcedure, "`procedure`");
        let name_tok = self.expect(TokenKind::Identifier, "a procedure name");
        let Some(name) = name_tok.ident_symbol() else { return };
        let line = name_tok.line;

        if self.symbols.in_procedure_scope() {
            DiagnosticBuilder::error("procedures cannot be nested")
                .code(DiagnosticCode::E_SEM_NESTED_PROCEDURE)
                .line(Some(line))
                .emit(self.handler);
            self.expect(TokenKind::LParen, "`(`");
            self.skip_nested_procedure();
            return;
        }

        self.expect(TokenKind::LParen, "`(`");
        let params = if self.at(TokenKind::RParen) { Vec::new() } else { self.parse_param_list() };
        self.expect(TokenKind::RParen, "`)`");

        if self.symbols.is_declared_in_current_scope(name) {
            DiagnosticBuilder::error(format!("`{}` may have already been defined", name.as_str()))
                .code(DiagnosticCode::E_SEM_REDECLARED)
                .line(Some(line))
                .emit(self.handler);
        }

        let param_types: Vec<IrType> =
            params.iter().map(|p| param_signature_type(p.kind, p.direction, p.array_bounds)).collect();
        let fn_id = self.backend.declare_function(name.as_str(), &param_types, false);

        let mut proc_entry = SymbolEntry::procedure(name, params.clone(), false);
        proc_entry.function = Some(fn_id);
        self.symbols.declare_global(proc_entry);

        self.enter_procedure_body(fn_id, &params);
        self.parse_body(BodyKind::Procedure);
        self.leave_procedure_body();
    }

    /// `param_list := param { "," param }`, `param := var_decl ("in" |
    /// "out" | "inout")` (§4.3.1).
    fn parse_param_list(&mut self) -> Vec<Parameter> {
        let mut params = Vec::new();
        loop {
            let kind = self.parse_typemark();
            let name_tok = self.expect(TokenKind::Identifier, "a parameter name");
            let bounds = if self.eat(TokenKind::LBracket) {
                let lower = self.parse_bound();
                self.expect(TokenKind::Colon, "`:`");
                let upper = self.parse_bound();
                self.expect(TokenKind::RBracket, "`]`");
                Some(ArrayBounds { lower, upper })
            } else {
                None
            };
            let direction = match self.peek_kind() {
                TokenKind::KwIn => {
                    self.bump();
                    ParamDirection::In
                }
                TokenKind::KwOut => {
                    self.bump();
                    ParamDirection::Out
                }
                TokenKind::KwInout => {
                    self.bump();
                    ParamDirection::InOut
                }
                _ => {
                    DiagnosticBuilder::error("expected `in`, `out`, or `inout`")
                        .code(DiagnosticCode::E_PARSE_EXPECTED_TOKEN)
                        .line(Some(self.line()))
                        .emit(self.handler);
                    ParamDirection::In
                }
            };
            if let Some(name) = name_tok.ident_symbol() {
                params.push(Parameter { name, kind, direction, array_bounds: bounds });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        params
    }

    /// Opens the one local scope a procedure body gets (§4.2), saving
    /// the caller's insertion point and materializing each formal's
    /// storage cell per the ABI table in §4.3.4.
    fn enter_procedure_body(&mut self, fn_id: FunctionId, params: &[Parameter]) {
        let outer_point = fspl_sym::InsertPoint { function: self.current_fn(), block: self.current_block() };
        self.symbols.save_insert_point(outer_point);
        let outer_fn = self.symbols.current_procedure_fn();

        self.symbols.enter_procedure_scope();
        self.symbols.set_current_procedure_fn(fn_id);

        let entry_block = self.backend.create_block(fn_id, "entry").expect("freshly declared function");
        self.position_at(fn_id, entry_block);

        for (index, param) in params.iter().enumerate() {
            let Ok(raw) = self.backend.function_param(fn_id, index as u32) else {
                self.internal_error("procedure parameter materialization");
                continue;
            };
            let storage = if let Some(bounds) = param.array_bounds {
                self.backend.register_pointer(raw.into_ptr(), natural_ir_type(param.kind).array_of(bounds.len()))
            } else if param.direction == ParamDirection::In {
                let cell = match self.backend.alloca(natural_ir_type(param.kind), param.name.as_str()) {
                    Ok(cell) => cell,
                    Err(_) => {
                        self.internal_error("parameter cell allocation");
                        continue;
                    }
                };
                self.backend.store(cell, raw).ok();
                cell
            } else {
                self.backend.register_pointer(raw.into_ptr(), natural_ir_type(param.kind))
            };

            let mut entry = SymbolEntry::variable(param.name, param.kind, param.array_bounds);
            entry.storage = Some(storage);
            self.symbols.add_parameter(param.name, param.kind, param.direction, param.array_bounds);
            self.symbols.declare_local(entry);
        }

        if outer_fn.is_none() {
            self.internal_error("enter_procedure_body: no enclosing procedure");
        }
        self.pending_outer_fn = outer_fn;
    }

    fn leave_procedure_body(&mut self) {
        // a `return` as the body's last statement may already have
        // terminated the current block; `ret_void` on an already-terminated
        // block is a no-op error the result is discarded for, so a bare
        // fallthrough still gets the terminator it needs (§8 property 6).
        self.backend.ret_void().ok();

        self.symbols.leave_procedure_scope();
        if let Some(outer_fn) = self.pending_outer_fn.take() {
            self.symbols.set_current_procedure_fn(outer_fn);
        }
        if let Some(point) = self.symbols.restore_insert_point() {
            self.position_at(point.function, point.block);
        }
    }

    /// Error recovery for a rejected nested `procedure` declaration:
    /// consumes the parameter list and body without touching the symbol
    /// table or the backend, tracking nested `procedure`/`end` pairs so
    /// a procedure nested two levels deep doesn't desync the resync.
    fn skip_nested_procedure(&mut self) {
        let mut depth = 1usize;
        while depth > 0 && !self.at(TokenKind::FileEnd) {
            match self.peek_kind() {
                TokenKind::KwProcedure => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::KwEnd => {
                    self.bump();
                    if self.at(TokenKind::KwProcedure) {
                        depth -= 1;
                    }
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}
