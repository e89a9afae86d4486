use livemark_syntax::SyntaxNode;
use log::debug;

use crate::editing::{Bias, Document, Edit, EditError, Patch};
use crate::marker::MarkerKinds;
use crate::masking::{EditorView, MarkerMasker, MaskSet, ViewUpdate};
use crate::selection::SelectionRange;
use crate::span::Span;

/// An open document with its cursors, viewport and marker masks.
///
/// Every mutating call sends exactly one [`ViewUpdate`] to the masker before
/// returning, so [`EditorSession::masks`] always reflects the current state.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    selection: Vec<SelectionRange>,
    visible: Vec<Span>,
    masker: MarkerMasker,
}

/// Borrowed view of a session's state, as the masker reads it.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    document: &'a Document,
    selection: &'a [SelectionRange],
    visible: &'a [Span],
}

impl EditorView for SessionView<'_> {
    fn syntax(&self) -> Option<SyntaxNode> {
        Some(self.document.syntax())
    }

    fn visible_ranges(&self) -> Option<&[Span]> {
        (!self.visible.is_empty()).then_some(self.visible)
    }

    fn selection(&self) -> Option<&[SelectionRange]> {
        (!self.selection.is_empty()).then_some(self.selection)
    }
}

impl EditorSession {
    /// Open a session with the caret at 0 and the whole document visible.
    pub fn new(document: Document) -> Self {
        Self::with_masker(document, MarkerMasker::new())
    }

    pub fn with_kinds(document: Document, kinds: MarkerKinds) -> Self {
        Self::with_masker(document, MarkerMasker::with_kinds(kinds))
    }

    fn with_masker(document: Document, masker: MarkerMasker) -> Self {
        let visible = vec![Span::new(0, document.len())];
        let mut session = Self {
            document,
            selection: vec![SelectionRange::caret(0)],
            visible,
            masker,
        };
        session.notify(ViewUpdate::document() | ViewUpdate::viewport() | ViewUpdate::selection());
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &[SelectionRange] {
        &self.selection
    }

    /// The first selection range, which typing and caret motion act on.
    pub fn primary(&self) -> SelectionRange {
        self.selection.first().copied().unwrap_or_default()
    }

    pub fn visible_ranges(&self) -> &[Span] {
        &self.visible
    }

    pub fn masks(&self) -> &MaskSet {
        self.masker.masks()
    }

    pub fn masker(&self) -> &MarkerMasker {
        &self.masker
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            document: &self.document,
            selection: &self.selection,
            visible: &self.visible,
        }
    }

    /// Replace all selection ranges. Offsets past the end are clamped.
    pub fn set_selection(&mut self, ranges: Vec<SelectionRange>) {
        let len = self.document.len();
        self.selection = ranges.into_iter().map(|r| r.clamp(len)).collect();
        self.notify(ViewUpdate::selection());
    }

    pub fn set_visible_ranges(&mut self, ranges: Vec<Span>) {
        self.visible = ranges;
        self.notify(ViewUpdate::viewport());
    }

    /// Apply an edit and carry cursors and visible ranges through it.
    pub fn apply_edit(&mut self, edit: Edit) -> Result<Patch, EditError> {
        let patch = self.document.apply(edit)?;
        self.map_through(&patch);
        self.notify(ViewUpdate::document());
        Ok(patch)
    }

    /// Replace the primary selection with `text`, leaving a caret after it.
    pub fn replace_selection(&mut self, text: &str) -> Result<Patch, EditError> {
        let primary = self.primary();
        let patch = self
            .document
            .apply(Edit::replace(primary.from()..primary.to(), text))?;
        self.map_through(&patch);
        if let Some(first) = self.selection.first_mut() {
            *first = SelectionRange::caret(patch.inserted.end);
        }
        self.notify(ViewUpdate::document() | ViewUpdate::selection());
        Ok(patch)
    }

    fn map_through(&mut self, patch: &Patch) {
        for range in &mut self.selection {
            *range = SelectionRange::new(
                patch.map_offset(range.anchor, Bias::Before),
                patch.map_offset(range.head, Bias::Before),
            );
        }
        for span in &mut self.visible {
            *span = Span::new(
                patch.map_offset(span.start, Bias::Before),
                patch.map_offset(span.end, Bias::After),
            );
        }
    }

    fn notify(&mut self, update: ViewUpdate) -> bool {
        let view = SessionView {
            document: &self.document,
            selection: &self.selection,
            visible: &self.visible,
        };
        let recomputed = self.masker.update(&update, &view);
        debug!(
            "session update {update:?}: {} masks (recomputed: {recomputed})",
            self.masker.masks().len()
        );
        recomputed
    }
}
