use std::ops::Range;

/// Byte offset into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SpanIndex(u32);

impl SpanIndex {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn to_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<SpanIndex> for usize {
    fn from(value: SpanIndex) -> Self {
        value.0 as usize
    }
}

impl From<usize> for SpanIndex {
    fn from(value: usize) -> Self {
        Self(value as u32)
    }
}

impl std::ops::Add<usize> for SpanIndex {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs as u32)
    }
}

/// Half-open byte range `[start, end)` of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: SpanIndex,
    pub end: SpanIndex,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start.into()..self.end.into()
    }

    pub fn len(&self) -> usize {
        self.end.to_usize() - self.start.to_usize()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
