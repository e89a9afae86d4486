use std::ops::Range;

/// A single replace edit: the bytes in `range` become `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }
}

/// Which side of an insertion an offset sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Stay before text inserted at the offset.
    Before,
    /// Move past text inserted at the offset.
    After,
}

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Range in the old text that was replaced.
    pub replaced: Range<usize>,
    /// Range in the new text holding the inserted bytes.
    pub inserted: Range<usize>,
    pub version: u64,
}

impl Patch {
    /// Map an offset in the old text to the new text.
    ///
    /// Offsets before the edit are unchanged and offsets after it shift by
    /// the length difference. The start and end of a non-empty replaced range
    /// map to the start and end of the inserted text. `bias` decides where an
    /// offset lands when it sits exactly at a pure insertion or strictly
    /// inside the replaced range.
    pub fn map_offset(&self, offset: usize, bias: Bias) -> usize {
        let Range { start, end } = self.replaced;
        let biased = match bias {
            Bias::Before => self.inserted.start,
            Bias::After => self.inserted.end,
        };

        if offset < start {
            offset
        } else if offset > end {
            offset - (end - start) + self.inserted.len()
        } else if start == end {
            biased
        } else if offset == start {
            self.inserted.start
        } else if offset == end {
            self.inserted.end
        } else {
            biased
        }
    }
}
