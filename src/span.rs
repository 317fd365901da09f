//! Byte-offset span type for error locations.

#[cfg(test)]
#[path = "./span_tests.rs"]
mod tests;

/// A byte-offset range within a TOML document.
///
/// Convertible to and from [`Range<u32>`](std::ops::Range) and
/// [`Range<usize>`](std::ops::Range).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new [`Span`] from start and end byte offsets.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the number of bytes covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }
}

impl From<Span> for (usize, usize) {
    fn from(s: Span) -> (usize, usize) {
        (s.start as usize, s.end as usize)
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(s: std::ops::Range<u32>) -> Self {
        Self::new(s.start, s.end)
    }
}

impl From<Span> for std::ops::Range<u32> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start as usize..s.end as usize
    }
}
