use super::token::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("Unexpected character '{0}'.")]
    Unrecognized(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated multiline comment.")]
    UnterminatedComment,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] Error: {kind}")]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    pub line: u32,
    pub span: Span,
}

impl LexicalError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexicalErrorKind::Unrecognized(_) => "LX001",
            LexicalErrorKind::UnterminatedString => "LX002",
            LexicalErrorKind::UnterminatedComment => "LX003",
        }
    }
}
