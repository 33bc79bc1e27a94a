mod span;

use compact_str::CompactString;
pub use span::{Span, SpanIndex};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("and", TokenKind::KeywordAnd);
    map.insert("class", TokenKind::KeywordClass);
    map.insert("else", TokenKind::KeywordElse);
    map.insert("false", TokenKind::KeywordFalse);
    map.insert("for", TokenKind::KeywordFor);
    map.insert("fun", TokenKind::KeywordFun);
    map.insert("if", TokenKind::KeywordIf);
    map.insert("nil", TokenKind::KeywordNil);
    map.insert("or", TokenKind::KeywordOr);
    map.insert("print", TokenKind::KeywordPrint);
    map.insert("return", TokenKind::KeywordReturn);
    map.insert("super", TokenKind::KeywordSuper);
    map.insert("this", TokenKind::KeywordThis);
    map.insert("true", TokenKind::KeywordTrue);
    map.insert("var", TokenKind::KeywordVar);
    map.insert("while", TokenKind::KeywordWhile);
    map
});

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Parentheses
    LeftParenthesis,
    RightParenthesis,
    // Braces
    LeftBrace,
    RightBrace,
    // Miscellaneous
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Star,
    Question,
    Colon,
    // Operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Slash,

    // Literals
    NumericLiteral,
    StringLiteral,
    Ident,

    // Keywords
    KeywordAnd,
    KeywordClass,
    KeywordElse,
    KeywordFalse,
    KeywordFor,
    KeywordFun,
    KeywordIf,
    KeywordNil,
    KeywordOr,
    KeywordPrint,
    KeywordReturn,
    KeywordSuper,
    KeywordThis,
    KeywordTrue,
    KeywordVar,
    KeywordWhile,

    // End of file.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::LeftParenthesis => "LEFT_PAREN",
            TokenKind::RightParenthesis => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::LessThan => "LESS",
            TokenKind::LessThanEqual => "LESS_EQUAL",
            TokenKind::GreaterThan => "GREATER",
            TokenKind::GreaterThanEqual => "GREATER_EQUAL",
            TokenKind::Slash => "SLASH",
            TokenKind::NumericLiteral => "NUMBER",
            TokenKind::StringLiteral => "STRING",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::KeywordAnd => "AND",
            TokenKind::KeywordClass => "CLASS",
            TokenKind::KeywordElse => "ELSE",
            TokenKind::KeywordFalse => "FALSE",
            TokenKind::KeywordFor => "FOR",
            TokenKind::KeywordFun => "FUN",
            TokenKind::KeywordIf => "IF",
            TokenKind::KeywordNil => "NIL",
            TokenKind::KeywordOr => "OR",
            TokenKind::KeywordPrint => "PRINT",
            TokenKind::KeywordReturn => "RETURN",
            TokenKind::KeywordSuper => "SUPER",
            TokenKind::KeywordThis => "THIS",
            TokenKind::KeywordTrue => "TRUE",
            TokenKind::KeywordVar => "VAR",
            TokenKind::KeywordWhile => "WHILE",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{name}")
    }
}

/// Decoded value carried by string and number tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(CompactString),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(v) => write!(f, "{v:?}"),
            Literal::String(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text the token was scanned from.
    pub lexeme: CompactString,
    pub literal: Option<Literal>,
    /// 1-based line of the end of the lexeme.
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn eof(line: u32, offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: CompactString::default(),
            literal: None,
            line,
            span: Span::new(offset, offset),
        }
    }
}
