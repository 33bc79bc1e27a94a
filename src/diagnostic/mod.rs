//! Reporting hooks used by the scanner and the interpreter.
//!
//! Lexical problems are keyed by line only, runtime problems by the token that triggered them.
//! The two channels are kept apart so a driver can decide on exit codes per kind.

use crate::lexer::Token;
use compact_str::CompactString;

pub trait Reporter {
    /// Reports a problem found while scanning `line`.
    fn report_lexical(&mut self, line: u32, message: &str);
    /// Reports a problem found while evaluating the expression `token` belongs to.
    fn report_runtime(&mut self, token: &Token, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Lexical {
        line: u32,
        message: String,
    },
    Runtime {
        line: u32,
        lexeme: CompactString,
        message: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Lexical { line, message } => write!(f, "[line {line}] Error: {message}"),
            Diagnostic::Runtime { line, message, .. } => write!(f, "{message}\n[line {line}]"),
        }
    }
}

/// Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn had_lexical_error(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Lexical { .. }))
    }

    pub fn had_runtime_error(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Runtime { .. }))
    }
}

impl Reporter for CollectingReporter {
    fn report_lexical(&mut self, line: u32, message: &str) {
        self.diagnostics.push(Diagnostic::Lexical {
            line,
            message: message.into(),
        });
    }

    fn report_runtime(&mut self, token: &Token, message: &str) {
        self.diagnostics.push(Diagnostic::Runtime {
            line: token.line,
            lexeme: token.lexeme.clone(),
            message: message.into(),
        });
    }
}

/// Writes diagnostics to standard error as they arrive.
#[derive(Debug, Default)]
pub struct StderrReporter {
    pub had_lexical_error: bool,
    pub had_runtime_error: bool,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for StderrReporter {
    fn report_lexical(&mut self, line: u32, message: &str) {
        self.had_lexical_error = true;
        eprintln!("[line {line}] Error: {message}");
    }

    fn report_runtime(&mut self, token: &Token, message: &str) {
        self.had_runtime_error = true;
        eprintln!("{message}\n[line {}]", token.line);
    }
}
