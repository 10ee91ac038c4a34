//! Fluent diagnostic construction.
//!
//! Most call sites just want `Handler::report_error`/`report_warning`, but
//! the parser's internal-error branches (§7's fourth taxonomy member) want
//! to attach a [`DiagnosticCode`] and a clarifying note, which is what this
//! builder is for.

use super::{Diagnostic, DiagnosticCode, Level};
use crate::span::Line;

pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    line: Option<Line>,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            code: None,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn line(mut self, line: Option<Line>) -> Self {
        self.line = line;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note(note)
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            line: self.line,
            code: self.code,
            notes: self.notes,
        }
    }

    /// Build and emit to `handler` in one step.
    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_error_defaults() {
        let diag = DiagnosticBuilder::error("bad token").build();
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "bad token");
        assert_eq!(diag.line, None);
    }

    #[test]
    fn builder_fluent_chain() {
        let diag = DiagnosticBuilder::error("undeclared name")
            .code(DiagnosticCode::E_SEM_UNDECLARED)
            .line(Some(Line::new(7)))
            .note("did you mean `TOTAL`?")
            .build();

        assert_eq!(diag.code, Some(DiagnosticCode::E_SEM_UNDECLARED));
        assert_eq!(diag.line, Some(Line::new(7)));
        assert_eq!(diag.notes, vec!["did you mean `TOTAL`?"]);
    }

    #[test]
    fn builder_emit_reaches_handler() {
        use super::super::Handler;

        let handler = Handler::new();
        DiagnosticBuilder::warning("trailing `.` missing")
            .code(DiagnosticCode::W_PARSE_MISMATCHED_END)
            .emit(&handler);

        assert_eq!(handler.warning_count(), 1);
        assert!(!handler.has_errors());
    }
}
