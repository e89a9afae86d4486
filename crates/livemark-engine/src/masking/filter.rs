use crate::masking::scanner::MarkerNode;
use crate::selection::SelectionRange;
use crate::span::Span;

/// A marker is exempt from masking while any selection range touches it.
///
/// Touching is a closed-interval test, so a caret sitting right before or
/// right after the marker reveals it.
pub fn is_exempt(marker: Span, selection: &[SelectionRange]) -> bool {
    selection.iter().any(|range| marker.touches(range.span()))
}

/// Like [`is_exempt`], but an emphasis or strong delimiter is also revealed
/// when the selection touches the other delimiter of its pair.
pub fn is_marker_exempt(marker: &MarkerNode, selection: &[SelectionRange]) -> bool {
    marker
        .reveal_spans()
        .any(|span| is_exempt(span, selection))
}
