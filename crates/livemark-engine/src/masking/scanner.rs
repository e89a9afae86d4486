//! Lazy walk over the marker nodes that lie in the visible part of a tree.

use livemark_syntax::{MarkdownLang, SyntaxKind, SyntaxNode};
use rowan::WalkEvent;
use rowan::api::Preorder;

use crate::marker::{MarkerKind, MarkerKinds};
use crate::span::{self, Span};

/// A marker node found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerNode {
    pub kind: MarkerKind,
    pub span: Span,
    /// The other delimiter of the same emphasis or strong construct.
    pub partner: Option<Span>,
}

impl MarkerNode {
    /// Spans whose contact with a selection reveals this marker.
    pub fn reveal_spans(&self) -> impl Iterator<Item = Span> {
        std::iter::once(self.span).chain(self.partner)
    }
}

/// The sibling delimiter of an emphasis or strong mark. Heading and quote
/// marks stand alone.
fn partner_of(mark: &SyntaxNode) -> Option<Span> {
    let parent = mark.parent()?;
    if !matches!(parent.kind(), SyntaxKind::EMPHASIS | SyntaxKind::STRONG) {
        return None;
    }
    parent
        .children()
        .find(|sibling| sibling.kind() == mark.kind() && sibling != mark)
        .map(|sibling| Span::from(sibling.text_range()))
}

/// Iterator over visible marker nodes, in document order.
///
/// Subtrees that intersect no visible range are skipped without descending,
/// so the cost follows the visible part of the document rather than its size.
pub struct MarkerScan {
    preorder: Preorder<MarkdownLang>,
    visible: Vec<Span>,
    kinds: MarkerKinds,
}

impl MarkerScan {
    pub fn new(tree: &SyntaxNode, visible: &[Span], kinds: MarkerKinds) -> Self {
        Self {
            preorder: tree.preorder(),
            visible: span::normalize(visible),
            kinds,
        }
    }
}

impl Iterator for MarkerScan {
    type Item = MarkerNode;

    fn next(&mut self) -> Option<MarkerNode> {
        while let Some(event) = self.preorder.next() {
            let WalkEvent::Enter(node) = event else {
                continue;
            };

            let span = Span::from(node.text_range());
            if !span::intersects_any(&self.visible, span) {
                self.preorder.skip_subtree();
                continue;
            }

            if let Some(kind) = MarkerKind::from_syntax(node.kind()) {
                // Marker nodes only hold tokens
                self.preorder.skip_subtree();
                if self.kinds.allows(kind) {
                    return Some(MarkerNode {
                        kind,
                        span,
                        partner: partner_of(&node),
                    });
                }
            }
        }
        None
    }
}

/// Scan `tree` for marker nodes intersecting `visible`.
pub fn scan(tree: &SyntaxNode, visible: &[Span], kinds: MarkerKinds) -> MarkerScan {
    MarkerScan::new(tree, visible, kinds)
}
