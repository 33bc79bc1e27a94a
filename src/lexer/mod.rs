mod cursor;
mod error;
pub mod formatter;
mod token;

use crate::diagnostic::Reporter;
use cursor::Cursor;
pub use error::{LexicalError, LexicalErrorKind};
pub use token::{Literal, Span, SpanIndex, Token, TokenKind, KEYWORD_HASHMAP};

/// Everything a full run of the lexer produced.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Always terminated by exactly one `Eof` token.
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

/// Scans `source` to completion, reporting every lexical error through `reporter`.
///
/// Never fails: a bad lexeme is reported and skipped, and scanning resumes at the next one.
pub fn scan<R: Reporter + ?Sized>(source: &str, reporter: &mut R) -> Vec<Token> {
    let output = Lexer::new(source).scan_all();
    for error in output.errors.iter() {
        reporter.report_lexical(error.line, &error.kind.to_string());
    }
    output.tokens
}

#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }

    pub fn scan_all(mut self) -> ScanOutput {
        let mut output = ScanOutput::default();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let is_eof = matches!(token.kind, TokenKind::Eof);
                    output.tokens.push(token);
                    if is_eof {
                        break;
                    }
                }
                Err(error) => output.errors.push(error),
            }
        }
        log::debug!(
            "Scanned {} tokens with {} lexical errors",
            output.tokens.len(),
            output.errors.len()
        );
        output
    }

    /// Produces the next token or the next lexical error.
    ///
    /// Once the source is exhausted every call returns an `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            self.cursor.mark_start();
            let Some(c) = self.cursor.advance() else {
                return Ok(Token::eof(self.cursor.line(), self.cursor.offset()));
            };
            if let Some(token_or_error) = self.scan_lexeme(c) {
                return token_or_error;
            }
        }
    }
}

impl<'src> Lexer<'src> {
    /// Scans the lexeme starting with `c`. Returns `None` for discarded input such as whitespace
    /// and comments.
    fn scan_lexeme(&mut self, c: char) -> Option<Result<Token, LexicalError>> {
        let kind = match c {
            // Single character tokens
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            // One or two character tokens
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.either('=', TokenKind::LessThanEqual, TokenKind::LessThan),
            '>' => self.either('=', TokenKind::GreaterThanEqual, TokenKind::GreaterThan),
            '/' => {
                if self.cursor.eat_if('/') {
                    self.cursor.eat_while(|c| c != '\n');
                    return None;
                } else if self.cursor.eat_if('*') {
                    return self.skip_block_comment().err().map(Err);
                }
                TokenKind::Slash
            }
            // Whitespace and newlines. The cursor counts lines itself.
            ' ' | '\t' | '\r' | '\n' => return None,
            '"' => return Some(self.scan_string()),
            '0'..='9' => return Some(Ok(self.scan_number())),
            'a'..='z' | 'A'..='Z' | '_' => return Some(Ok(self.scan_ident_or_keyword())),
            _ => return Some(Err(self.error(LexicalErrorKind::Unrecognized(c)))),
        };
        Some(Ok(self.emit(kind, None)))
    }

    fn either(&mut self, next: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.cursor.eat_if(next) {
            matched
        } else {
            otherwise
        }
    }

    fn emit(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        Token {
            kind,
            lexeme: self.cursor.lexeme().into(),
            literal,
            line: self.cursor.line(),
            span: self.cursor.span(),
        }
    }

    fn error(&self, kind: LexicalErrorKind) -> LexicalError {
        LexicalError {
            kind,
            line: self.cursor.line(),
            span: self.cursor.span(),
        }
    }

    // Block comments do not nest: the first `*/` closes the comment.
    fn skip_block_comment(&mut self) -> Result<(), LexicalError> {
        loop {
            match (self.cursor.peek(), self.cursor.peek_next()) {
                (Some('*'), Some('/')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return Ok(());
                }
                (Some(_), _) => {
                    self.cursor.advance();
                }
                (None, _) => return Err(self.error(LexicalErrorKind::UnterminatedComment)),
            }
        }
    }

    fn scan_string(&mut self) -> Result<Token, LexicalError> {
        self.cursor.eat_while(|c| c != '"');
        if !self.cursor.eat_if('"') {
            return Err(self.error(LexicalErrorKind::UnterminatedString));
        }
        let lexeme = self.cursor.lexeme();
        let value = &lexeme[1..lexeme.len() - 1];
        Ok(self.emit(TokenKind::StringLiteral, Some(Literal::String(value.into()))))
    }

    fn scan_number(&mut self) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        // The dot only belongs to the number when a digit follows it.
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let value: f64 = self
            .cursor
            .lexeme()
            .parse()
            .expect("Numeric literals are guaranteed to be parseable into f64.");
        self.emit(TokenKind::NumericLiteral, Some(Literal::Number(value)))
    }

    fn scan_ident_or_keyword(&mut self) -> Token {
        self.cursor
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind = KEYWORD_HASHMAP
            .get(self.cursor.lexeme())
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.emit(kind, None)
    }
}
