//! Diagnostic collection: the sink every phase from the scanner onward
//! reports into.
//!
//! [`Handler`] exposes the two entry points the rest of the compiler calls —
//! [`Handler::report_error`] and [`Handler::report_warning`] — plus a fluent
//! [`DiagnosticBuilder`] for call sites that want to attach a
//! [`DiagnosticCode`] or a note. Diagnostics are fire-and-forget: nothing
//! unwinds, the sink just keeps a running total that the driver checks
//! before emitting IR to disk.
//!
//! # Examples
//!
//! ```
//! use fspl_util::diagnostic::Handler;
//!
//! let handler = Handler::new();
//! handler.report_error("undeclared name `X`", Some(3.into()));
//!
//! if handler.has_errors() {
//!     eprintln!("compilation failed with {} error(s)", handler.error_count());
//! }
//! ```

mod builder;
mod codes;
mod level;

pub use builder::DiagnosticBuilder;
pub use codes::DiagnosticCode;
pub use level::Level;

use crate::span::Line;
use std::cell::RefCell;
use std::fmt;

/// A single error or warning, optionally tied to a source line.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub line: Option<Line>,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, line: Option<Line>) -> Self {
        Self {
            level,
            message: message.into(),
            line,
            code: None,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, line: Option<Line>) -> Self {
        Self::new(Level::Error, message, line)
    }

    pub fn warning(message: impl Into<String>, line: Option<Line>) -> Self {
        Self::new(Level::Warning, message, line)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

/// Collects diagnostics for one compilation and tracks error/warning counts.
///
/// # Examples
///
/// ```
/// use fspl_util::diagnostic::Handler;
///
/// let handler = Handler::new();
/// handler.report_warning("trailing `.` missing", None);
/// assert_eq!(handler.warning_count(), 1);
/// assert!(!handler.has_errors());
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    panic_on_error: RefCell<bool>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: RefCell::new(false),
        }
    }

    /// A handler that panics as soon as an error is reported, for tests
    /// that want to assert a code path never raises one.
    pub fn new_panicking() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: RefCell::new(true),
        }
    }

    pub fn report_error(&self, message: impl Into<String>, line: Option<Line>) {
        self.emit(Diagnostic::error(message, line));
    }

    pub fn report_warning(&self, message: impl Into<String>, line: Option<Line>) {
        self.emit(Diagnostic::warning(message, line));
    }

    fn emit(&self, diagnostic: Diagnostic) {
        if *self.panic_on_error.borrow() && diagnostic.level.is_error() {
            panic!("{diagnostic}");
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.emit(diagnostic);
    }

    pub fn build_error(&self, line: Option<Line>, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).line(line)
    }

    pub fn build_warning(&self, line: Option<Line>, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).line(line)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level.is_warning()).count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
