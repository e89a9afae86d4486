//! The published set of hidden marker spans.

use crate::marker::MarkerKind;
use crate::span::Span;

/// A marker span to hide. Masking removes the bytes from view; it never
/// replaces them with other content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedRange {
    pub span: Span,
    pub kind: MarkerKind,
}

/// Marker spans to hide, ascending by start offset and pairwise disjoint.
///
/// A `MaskSet` is built whole and replaced whole; it has no mutators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSet {
    ranges: Vec<MaskedRange>,
}

impl MaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ranges in any order. Adjacent ranges stay separate.
    pub fn from_ranges(mut ranges: Vec<MaskedRange>) -> Self {
        ranges.sort_by_key(|r| (r.span.start, r.span.end));
        Self { ranges }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn as_slice(&self) -> &[MaskedRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaskedRange> {
        self.ranges.iter()
    }

    /// Whether the byte at `offset` is hidden.
    pub fn is_masked(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.span.end <= offset);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.span.contains(offset))
    }

    /// Masked ranges that intersect `span`, in order.
    pub fn within(&self, span: Span) -> impl Iterator<Item = &MaskedRange> {
        let first = self.ranges.partition_point(|r| r.span.end <= span.start);
        self.ranges[first..]
            .iter()
            .take_while(move |r| r.span.start < span.end)
    }

    /// Panics if the set is unordered, overlapping, or exceeds `len` bytes.
    pub fn check_invariants(&self, len: usize) {
        for r in &self.ranges {
            assert!(
                r.span.start < r.span.end && r.span.end <= len,
                "masked range out of bounds: {:?} (document len: {})",
                r.span,
                len
            );
        }
        for pair in self.ranges.windows(2) {
            assert!(
                pair[0].span.end <= pair[1].span.start,
                "masked ranges overlap or are unordered: {:?} then {:?}",
                pair[0].span,
                pair[1].span
            );
        }
    }
}

impl<'a> IntoIterator for &'a MaskSet {
    type Item = &'a MaskedRange;
    type IntoIter = std::slice::Iter<'a, MaskedRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
