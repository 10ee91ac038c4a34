//! CLI driver.
//!
//! §1 treats "the command-line driver" and "file I/O plumbing beyond a
//! stream of characters with line numbers" as external collaborators —
//! but an ambient stack is always carried regardless of the original's
//! Non-goals, so this crate still implements a thin, real one: read one
//! file, drive the scanner/parser/emitter in [`fspl_par`], and report
//! what the diagnostic sink collected.
//!
//! `Config`/`Session`/`run` give the single-file surface §6.2 describes
//! — multi-file compilation, incremental caching, and a multi-phase
//! MIR/LIR/codegen pipeline are all explicit Non-goals (§1) FSPL does
//! not carry.

use std::path::PathBuf;

use fspl_par::Parser;
use fspl_util::Handler;
use inkwell::context::Context;

/// What [`Session::compile`] produces once the pipeline finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitKind {
    /// The finished module's IR text (§6.3 "module serialization").
    Ir,
    /// The raw token stream, one token per line — a scanner debugging aid
    /// layered on top of §4.1's scanner contract.
    Tokens,
}

impl Default for EmitKind {
    fn default() -> Self {
        EmitKind::Ir
    }
}

/// Everything one invocation of the driver needs to know (§6.2: "input
/// is a single text file").
#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: Option<PathBuf>,
    pub emit: EmitKind,
    pub verbose: bool,
    /// Treat any warning as if it were an error for the purpose of the
    /// "suppress emission on any error" policy (§7) — the natural knob a
    /// CLI front-end puts next to that policy.
    pub warnings_as_errors: bool,
}

impl Config {
    pub fn new(input_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: None,
            emit: EmitKind::default(),
            verbose: false,
            warnings_as_errors: false,
        }
    }
}

#[derive(Debug)]
pub enum CompileError {
    Io(PathBuf, std::io::Error),
    /// §7: "On any non-zero error count the driver suppresses IR
    /// emission to disk."
    CompilationFailed { errors: usize },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Io(path, e) => write!(f, "could not read {}: {e}", path.display()),
            CompileError::CompilationFailed { errors } => {
                write!(f, "compilation failed with {errors} error(s)")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// One compiler invocation: the configuration plus the diagnostic sink
/// every phase reports into. `fspl-par`'s [`Parser`] owns the scanner
/// and symbol table internally (§2: "three cooperate... under a shared
/// invariant set") — the session only ever sees the finished module.
pub struct Session {
    pub config: Config,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, handler: Handler::new() }
    }

    /// Runs the whole pipeline (§5: "a strict sequence... one control
    /// flow") and returns the text the driver should emit. Diagnostics
    /// accumulate in `self.handler` regardless of which `EmitKind` was
    /// requested; only the final error-count check decides whether the
    /// result is usable.
    pub fn compile(&mut self) -> Result<String, CompileError> {
        let source = std::fs::read_to_string(&self.config.input_file)
            .map_err(|e| CompileError::Io(self.config.input_file.clone(), e))?;

        if self.config.verbose {
            eprintln!("fsplc: compiling {}", self.config.input_file.display());
        }

        let output = match self.config.emit {
            EmitKind::Tokens => self.dump_tokens(&source),
            EmitKind::Ir => self.emit_ir(&source),
        };

        let failed = self.handler.has_errors()
            || (self.config.warnings_as_errors && self.handler.warning_count() > 0);
        if failed {
            return Err(CompileError::CompilationFailed { errors: self.handler.error_count() });
        }
        Ok(output)
    }

    fn dump_tokens(&self, source: &str) -> String {
        let mut lexer = fspl_lex::Lexer::from_source(source, &self.handler);
        let mut out = String::new();
        loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break;
            }
            out.push_str(&format!("{:?} (line {})\n", token.kind, token.line));
        }
        out
    }

    fn emit_ir(&mut self, source: &str) -> String {
        let context = Context::create();
        let parser = Parser::new(source, &self.handler, &context);
        parser.compile()
    }

    /// Renders every accumulated diagnostic to stderr, in the order they
    /// were reported (§6.4: the sink is append-only; this is just how the
    /// driver chooses to render what it collected — the core never
    /// decides that itself).
    pub fn print_diagnostics(&self) {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{diagnostic}");
        }
    }
}

/// Compiles `config.input_file` and writes the result to
/// `config.output_file` (stdout if none), printing accumulated
/// diagnostics to stderr either way. Mirrors §7's user-visible policy:
/// nothing is written once any error was reported; a run with only
/// warnings still emits normally (unless `warnings_as_errors` is set).
pub fn run(config: Config) -> Result<(), CompileError> {
    let mut session = Session::new(config);
    let result = session.compile();
    session.print_diagnostics();

    let text = result?;
    write_output(&session.config, &text)
        .map_err(|e| CompileError::Io(session.config.input_file.clone(), e))?;
    Ok(())
}

fn write_output(config: &Config, text: &str) -> std::io::Result<()> {
    match &config.output_file {
        Some(path) => std::fs::write(path, text),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(text.as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(source: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        file
    }

    #[test]
    fn compiles_a_clean_program_to_ir_text() {
        let file = write_temp("program P is integer X; begin X := 3 + 4 * 2; end program.");
        let mut session = Session::new(Config::new(file.path()));
        let ir = session.compile().expect("clean program compiles");
        assert!(ir.contains("define void @P"));
        assert!(!session.handler.has_errors());
    }

    #[test]
    fn a_redeclaration_error_suppresses_the_compile_result() {
        let file = write_temp(
            "program P is integer X; integer X; begin end program.",
        );
        let mut session = Session::new(Config::new(file.path()));
        let result = session.compile();
        assert!(result.is_err());
        assert_eq!(session.handler.error_count(), 1);
    }

    #[test]
    fn warnings_as_errors_fails_a_program_with_only_a_warning() {
        let file = write_temp("program P is begin end program");
        let mut config = Config::new(file.path());
        config.warnings_as_errors = true;
        let mut session = Session::new(config);
        assert!(session.compile().is_err());
        assert_eq!(session.handler.warning_count(), 1);
    }

    #[test]
    fn missing_file_reports_an_io_error() {
        let mut session = Session::new(Config::new("/no/such/file.fspl"));
        assert!(matches!(session.compile(), Err(CompileError::Io(_, _))));
    }

    #[test]
    fn emit_tokens_dumps_one_line_per_token() {
        let file = write_temp("program P is begin end program.");
        let mut config = Config::new(file.path());
        config.emit = EmitKind::Tokens;
        let mut session = Session::new(config);
        let dump = session.compile().unwrap();
        assert_eq!(dump.lines().count(), 7);
    }
}
