use std::borrow::Cow;
use std::ops::Range;

use livemark_syntax::SyntaxNode;
use log::{trace, warn};
use rowan::GreenNode;
use thiserror::Error;
use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::editing::{Edit, Patch};

/// Why an edit was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is reversed")]
    Reversed { start: usize, end: usize },

    #[error("edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// The text being edited and its syntax tree.
///
/// ## Single source of truth
/// The xi-rope buffer holds the entire document as UTF-8. Saving writes
/// `text()` back out byte for byte, whatever the line endings or content.
///
/// ## Derived syntax tree
/// Every successful edit reparses the whole buffer. The green tree is kept;
/// [`Document::syntax`] hands out a fresh red root over it, so the document
/// stays `Send` even though rowan's cursor nodes are not.
///
/// ```rust
/// # use livemark_engine::editing::{Document, Edit};
/// let mut doc = Document::from_bytes(b"# Hello\n").unwrap();
/// let patch = doc.apply(Edit::insert(7, ", world")).unwrap();
///
/// assert_eq!(doc.text(), "# Hello, world\n");
/// assert_eq!(patch.inserted, 7..14);
/// assert_eq!(doc.version(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    green: GreenNode,
    version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            green: parse_green(text),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Root of the syntax tree for the current text.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Slice the buffer, clamping the range to the document.
    pub fn slice(&self, range: Range<usize>) -> Cow<'_, str> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    /// Replace a byte range, reparse, and bump the version.
    pub fn apply(&mut self, edit: Edit) -> Result<Patch, EditError> {
        let text = self.text();
        if let Err(err) = validate(&text, &edit.range) {
            warn!("rejected edit {:?}: {err}", edit.range);
            return Err(err);
        }

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(edit.range.clone(), Rope::from(edit.text.as_str()));
        let delta = builder.build();
        self.buffer = delta.apply(&self.buffer);

        self.green = parse_green(&self.text());
        self.version += 1;

        let start = edit.range.start;
        let patch = Patch {
            replaced: edit.range,
            inserted: start..start + edit.text.len(),
            version: self.version,
        };
        trace!("applied edit {patch:?}");
        Ok(patch)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // The tree is derived from the buffer
        self.text() == other.text() && self.version == other.version
    }
}

fn parse_green(text: &str) -> GreenNode {
    livemark_syntax::parse(text).green().into_owned()
}

fn validate(text: &str, range: &Range<usize>) -> Result<(), EditError> {
    let (start, end) = (range.start, range.end);
    if start > end {
        return Err(EditError::Reversed { start, end });
    }
    if end > text.len() {
        return Err(EditError::OutOfBounds {
            start,
            end,
            len: text.len(),
        });
    }
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary { offset });
        }
    }
    Ok(())
}
