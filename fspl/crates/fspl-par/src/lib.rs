//! **Parser / Semantic Emitter** (§4.3): a predictive, one-token-lookahead
//! recursive-descent recognizer fused with type checking and IR emission.
//! There is no separate AST stage (§9) — each production, as it reduces,
//! consults [`fspl_sym::SymbolTable`] and emits through the
//! [`fspl_ir::Backend`] façade directly.
//!
//! The grammar lives across four modules mirroring §4.3's own
//! breakdown: [`items`] (declarations, procedure headers), [`stmt`]
//! (statements and control flow), [`expr`] (the expression grammar), and
//! [`types`] (the coercion lattice every expression production consults).

pub mod expr;
pub mod items;
pub mod stmt;
pub mod types;

use fspl_ir::{Backend, BlockId, FunctionId};
use fspl_lex::{Lexer, Token, TokenKind};
use fspl_sym::SymbolTable;
use fspl_util::{DiagnosticBuilder, DiagnosticCode, Handler, Line};
use inkwell::context::Context;

/// Which keyword a body is expected to close with (§4.3.1's grammar
/// parameterizes `body`'s closing `end K` on this).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Program,
    Procedure,
}

pub struct Parser<'ctx, 'src> {
    lexer: Lexer<'src>,
    current: Token,
    pub(crate) handler: &'src Handler,
    pub(crate) symbols: SymbolTable,
    pub(crate) backend: Backend<'ctx>,

    /// Mirrors the backend builder's insertion point so control-flow
    /// emission and procedure-boundary save/restore (§4.3.3, §4.2) have
    /// something to read back — the façade itself only exposes "move
    /// the cursor here", never "where is it now". `None` only before
    /// `parse_program` has declared the outermost function.
    current_fn: Option<FunctionId>,
    current_block: Option<BlockId>,

    /// The enclosing procedure's function handle, stashed across one
    /// level of procedure nesting alongside `save_insert_point` (§4.2);
    /// `current_procedure_fn` itself only ever holds a single value.
    pending_outer_fn: Option<FunctionId>,
}

impl<'ctx, 'src> Parser<'ctx, 'src> {
    pub fn new(source: &'src str, handler: &'src Handler, context: &'ctx Context) -> Self {
        let mut lexer = Lexer::from_source(source, handler);
        let current = lexer.next_token();
        let mut backend = Backend::new(context, "fspl_module");
        let mut symbols = SymbolTable::new();
        items::declare_builtins(&mut symbols, &mut backend);

        Self {
            lexer,
            current,
            handler,
            symbols,
            backend,
            current_fn: None,
            current_block: None,
        }
    }

    pub(crate) fn current_fn(&self) -> FunctionId {
        self.current_fn.expect("current_fn read before parse_program declared the outermost function")
    }

    pub(crate) fn current_block(&self) -> BlockId {
        self.current_block.expect("current_block read before parse_program declared the outermost function")
    }

    /// Parses the whole program and returns the finished module's IR
    /// text (§6.3 "module serialization"). Emission happens as a side
    /// effect of parsing; this is just the final step of pulling the
    /// result out of the façade once the recognizer reaches EOF.
    pub fn compile(mut self) -> String {
        self.parse_program();
        self.backend.print_to_string()
    }

    pub fn has_errors(&self) -> bool {
        self.handler.has_errors()
    }

    // ---- token stream -------------------------------------------------

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(crate) fn line(&self) -> Line {
        self.current.line
    }

    pub(crate) fn bump(&mut self) -> Token {
        let consumed = self.current;
        self.current = self.lexer.next_token();
        consumed
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` if present; otherwise reports the syntactic error
    /// and still consumes the offending token so the parser keeps
    /// making progress (§7 propagation policy).
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Token {
        if self.at(kind) {
            self.bump()
        } else {
            DiagnosticBuilder::error(format!("expected {what}, found {:?}", self.current.kind))
                .code(DiagnosticCode::E_PARSE_EXPECTED_TOKEN)
                .line(Some(self.line()))
                .emit(self.handler);
            if self.at(TokenKind::FileEnd) {
                self.current
            } else {
                self.bump()
            }
        }
    }

    /// Recovery sync point (§7): skip forward to the next `;`, `)`, or
    /// `end`-starting construct, or EOF. Does not consume the syncing
    /// token itself so the caller's own `expect` can account for it.
    pub(crate) fn resync(&mut self) {
        while !matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RParen | TokenKind::KwEnd | TokenKind::FileEnd
        ) {
            self.bump();
        }
    }

    pub(crate) fn internal_error(&mut self, where_: &str) {
        DiagnosticBuilder::error(format!("internal: unhandled case in {where_} (token {:?})", self.current.kind))
            .code(DiagnosticCode::E_INTERNAL)
            .line(Some(self.line()))
            .emit(self.handler);
    }

    // ---- insertion point ------------------------------------------------

    pub(crate) fn position_at(&mut self, function: FunctionId, block: BlockId) {
        self.current_fn = Some(function);
        self.current_block = Some(block);
        self.backend
            .position_at_end(block)
            .expect("block handle came from this parser's own backend");
    }

    fn parse_program(&mut self) {
        self.expect(TokenKind::KwProgram, "`program`");
        let name = self.expect(TokenKind::Identifier, "a program name");
        self.expect(TokenKind::KwIs, "`is`");

        let main_fn = self.backend.declare_function(
            &name.ident_symbol().map(|s| s.as_str().to_string()).unwrap_or_else(|| "main".to_string()),
            &[],
            false,
        );
        let entry = self.backend.create_block(main_fn, "entry").expect("fresh function has no blocks yet");
        self.symbols.set_current_procedure_fn(main_fn);
        self.position_at(main_fn, entry);

        self.parse_body(BodyKind::Program);

        if !self.eat(TokenKind::Period) {
            DiagnosticBuilder::warning("missing trailing `.` at end of program")
                .code(DiagnosticCode::W_PARSE_MISMATCHED_END)
                .line(Some(self.line()))
                .emit(self.handler);
        }

        self.backend.ret_void().ok();
    }

    /// `body := { declaration ";" } "begin" { statement ";" } "end" K`
    /// (§4.3.1) — declarations mode flips to statements mode on `begin`.
    pub(crate) fn parse_body(&mut self, kind: BodyKind) {
        while !self.at(TokenKind::KwBegin) && !self.at(TokenKind::FileEnd) {
            self.items_parse_declaration();
            self.expect(TokenKind::Semicolon, "`;`");
        }
        self.expect(TokenKind::KwBegin, "`begin`");

        while !self.at(TokenKind::KwEnd) && !self.at(TokenKind::FileEnd) {
            self.stmt_parse_statement();
            self.expect(TokenKind::Semicolon, "`;`");
        }
        self.expect(TokenKind::KwEnd, "`end`");

        let expected = match kind {
            BodyKind::Program => TokenKind::KwProgram,
            BodyKind::Procedure => TokenKind::KwProcedure,
        };
        if self.at(expected) {
            self.bump();
        } else if self.at(TokenKind::KwProgram) || self.at(TokenKind::KwProcedure) {
            DiagnosticBuilder::warning(format!(
                "`end {:?}` does not match the body it closes",
                self.current.kind
            ))
            .code(DiagnosticCode::W_PARSE_MISMATCHED_END)
            .line(Some(self.line()))
            .emit(self.handler);
            self.bump();
        }
    }
}
