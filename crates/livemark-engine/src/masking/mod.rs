//! # Marker masking
//!
//! Decides which formatting markers to hide so the document reads as
//! rendered Markdown while staying plain text underneath.
//!
//! ```text
//! syntax tree ──► scanner ──► filter ──► MaskSet
//!   visible ranges ─┘           │
//!   selection ranges ───────────┘
//! ```
//!
//! - [`scanner`] yields marker nodes that intersect the visible ranges.
//! - [`filter`] exempts markers touched by a cursor or selection. Touching
//!   either delimiter of an emphasis or strong pair reveals both.
//! - [`mask_set`] holds the survivors, sorted and disjoint.
//!
//! [`MarkerMasker`] owns the published set and recomputes it from scratch
//! whenever the host reports a document, viewport or selection change.

pub mod filter;
pub mod mask_set;
pub mod scanner;

use livemark_syntax::SyntaxNode;
use log::{debug, trace};

use crate::marker::MarkerKinds;
use crate::selection::SelectionRange;
use crate::span::Span;

pub use filter::{is_exempt, is_marker_exempt};
pub use mask_set::{MaskSet, MaskedRange};
pub use scanner::{MarkerNode, MarkerScan, scan};

/// What changed in the host since the last notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl ViewUpdate {
    pub const NONE: ViewUpdate = ViewUpdate {
        doc_changed: false,
        viewport_changed: false,
        selection_set: false,
    };

    pub fn document() -> Self {
        Self {
            doc_changed: true,
            ..Self::NONE
        }
    }

    pub fn viewport() -> Self {
        Self {
            viewport_changed: true,
            ..Self::NONE
        }
    }

    pub fn selection() -> Self {
        Self {
            selection_set: true,
            ..Self::NONE
        }
    }

    /// Whether any flag asks for a recompute.
    pub fn is_relevant(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

impl std::ops::BitOr for ViewUpdate {
    type Output = ViewUpdate;

    fn bitor(self, rhs: ViewUpdate) -> ViewUpdate {
        ViewUpdate {
            doc_changed: self.doc_changed || rhs.doc_changed,
            viewport_changed: self.viewport_changed || rhs.viewport_changed,
            selection_set: self.selection_set || rhs.selection_set,
        }
    }
}

/// The host state the masker reads on every recompute.
///
/// Each accessor may return `None` while the host is not fully attached; the
/// masker then publishes an empty set.
pub trait EditorView {
    /// The current syntax tree, built fresh for the current text.
    fn syntax(&self) -> Option<SyntaxNode>;

    /// Rendered ranges of the document.
    fn visible_ranges(&self) -> Option<&[Span]>;

    /// Cursors and selections.
    fn selection(&self) -> Option<&[SelectionRange]>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Holding the last published set.
    Idle,
    /// A recompute is running; it always finishes before `update` returns.
    Recomputing,
}

/// Compute the mask set for fixed inputs.
pub fn compute_masks(
    tree: &SyntaxNode,
    visible: &[Span],
    selection: &[SelectionRange],
    kinds: MarkerKinds,
) -> MaskSet {
    let ranges = scan(tree, visible, kinds)
        .filter(|marker| !is_marker_exempt(marker, selection))
        .map(|marker| MaskedRange {
            span: marker.span,
            kind: marker.kind,
        })
        .collect();
    MaskSet::from_ranges(ranges)
}

/// Holds the published mask set and recomputes it on relevant updates.
#[derive(Debug)]
pub struct MarkerMasker {
    kinds: MarkerKinds,
    masks: MaskSet,
    phase: Phase,
    attached: bool,
}

impl Default for MarkerMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerMasker {
    /// A masker for every marker kind.
    pub fn new() -> Self {
        Self::with_kinds(MarkerKinds::all())
    }

    pub fn with_kinds(kinds: MarkerKinds) -> Self {
        Self {
            kinds,
            masks: MaskSet::new(),
            phase: Phase::Idle,
            attached: true,
        }
    }

    pub fn kinds(&self) -> MarkerKinds {
        self.kinds
    }

    pub fn masks(&self) -> &MaskSet {
        &self.masks
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stop reacting to updates. The last published set stays readable.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// React to a host notification. Returns true if the set was recomputed.
    pub fn update(&mut self, update: &ViewUpdate, view: &impl EditorView) -> bool {
        if !self.attached || !update.is_relevant() {
            trace!("ignoring view update {update:?}");
            return false;
        }
        self.recompute(view);
        true
    }

    /// Rebuild the set from the current view and replace the published one.
    pub fn recompute(&mut self, view: &impl EditorView) {
        self.phase = Phase::Recomputing;

        let masks = match (view.syntax(), view.visible_ranges(), view.selection()) {
            (Some(tree), Some(visible), Some(selection)) => {
                compute_masks(&tree, visible, selection, self.kinds)
            }
            _ => MaskSet::new(),
        };
        debug!("recomputed mask set: {} ranges", masks.len());

        self.masks = masks;
        self.phase = Phase::Idle;
    }
}
