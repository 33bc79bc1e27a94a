use super::token::Span;

/// Scanning position over a source string.
///
/// `start` marks the beginning of the lexeme being scanned, `current` the next byte to read and
/// `line` the line `current` sits on. All offsets are byte offsets on `char` boundaries.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn offset(&self) -> usize {
        self.current
    }

    /// Begins a new lexeme at the current position.
    pub fn mark_start(&mut self) {
        self.start = self.current;
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.source[self.current..].chars().next()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    /// Consumes the next character only if it is `expected`.
    pub fn eat_if(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    pub fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.current)
    }
}
