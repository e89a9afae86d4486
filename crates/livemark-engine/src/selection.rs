use crate::span::Span;

/// A cursor or selection.
///
/// `anchor` is where the selection started and `head` is the end that moves,
/// so a selection made right-to-left keeps `head < anchor`. A range with
/// `anchor == head` is a bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn from(self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_caret(self) -> bool {
        self.anchor == self.head
    }

    pub fn span(self) -> Span {
        Span::new(self.from(), self.to())
    }

    /// Move the head, keeping the anchor (shift-extend).
    pub fn extend_to(self, head: usize) -> Self {
        Self::new(self.anchor, head)
    }

    /// Clamp both ends to a document of `len` bytes.
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.anchor.min(len), self.head.min(len))
    }
}
