use rowan::TextRange;

/// A byte range `[start, end)` into the document text.
///
/// Marker spans, visible ranges and edit ranges all use this type. Offsets are
/// UTF-8 byte offsets, the unit the syntax tree reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Half-open intersection: the spans share at least one byte. An empty
    /// span intersects nothing.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && self.end > other.start
    }

    /// Closed-interval touch: the spans overlap or meet at an endpoint.
    ///
    /// A zero-width span at either end of `self` touches it.
    #[must_use]
    pub fn touches(self, other: Span) -> bool {
        other.start <= self.end && other.end >= self.start
    }

    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self::new(range.start().into(), range.end().into())
    }
}

/// Sort ranges, drop empty ones and merge the ones that overlap or abut.
///
/// The result is strictly ascending and pairwise disjoint, so a node can be
/// tested against it with a binary search and is never reported twice.
pub fn normalize(ranges: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<Span> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Whether `span` intersects any range of a normalized list.
pub fn intersects_any(normalized: &[Span], span: Span) -> bool {
    let first_candidate = normalized.partition_point(|r| r.end <= span.start);
    normalized
        .get(first_candidate)
        .is_some_and(|r| r.intersects(span))
}
