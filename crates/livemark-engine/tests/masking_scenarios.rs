use livemark_engine::masking::compute_masks;
use livemark_engine::{
    Document, EditorSession, MarkerKind, MarkerKinds, MaskSet, SelectionRange, Span,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const TITLE_AND_BOLD: &str = "# Title\n\n**bold** text";

fn masks_with(source: &str, visible: &[Span], selection: &[SelectionRange]) -> MaskSet {
    let doc = Document::from_text(source);
    compute_masks(&doc.syntax(), visible, selection, MarkerKinds::all())
}

fn masks_at(source: &str, caret: usize) -> Vec<(MarkerKind, usize, usize)> {
    let set = masks_with(
        source,
        &[Span::new(0, source.len())],
        &[SelectionRange::caret(caret)],
    );
    set.check_invariants(source.len());
    set.iter()
        .map(|m| (m.kind, m.span.start, m.span.end))
        .collect()
}

#[test]
fn caret_on_heading_reveals_heading_mark() {
    assert_eq!(
        masks_at(TITLE_AND_BOLD, 0),
        vec![
            (MarkerKind::StrongEmphasisMark, 9, 11),
            (MarkerKind::StrongEmphasisMark, 15, 17),
        ]
    );
}

#[test]
fn caret_on_strong_reveals_strong_marks() {
    assert_eq!(
        masks_at(TITLE_AND_BOLD, 9),
        vec![(MarkerKind::HeadingMark, 0, 1)]
    );
}

#[rstest]
#[case::at_from(9, false)]
#[case::inside(10, false)]
#[case::at_to(11, false)]
#[case::just_outside(12, true)]
#[case::before(8, true)]
#[case::at_closing_from(15, false)]
#[case::at_closing_to(17, false)]
#[case::past_closing(18, true)]
fn caret_position_against_opening_mark(#[case] caret: usize, #[case] masked: bool) {
    let masks = masks_at(TITLE_AND_BOLD, caret);
    let opening = (MarkerKind::StrongEmphasisMark, 9, 11);
    assert_eq!(masks.contains(&opening), masked, "caret at {caret}");
}

#[test]
fn shared_boundary_reveals_both_markers() {
    // `*` closes at 2..3 and `**` opens at 3..5; a caret at 3 touches both
    let source = "*a***b**";
    assert_eq!(
        masks_at(source, 0),
        vec![
            (MarkerKind::StrongEmphasisMark, 3, 5),
            (MarkerKind::StrongEmphasisMark, 6, 8),
        ]
    );
    assert_eq!(masks_at(source, 3), vec![]);
    assert_eq!(
        masks_at(source, 8),
        vec![
            (MarkerKind::EmphasisMark, 0, 1),
            (MarkerKind::EmphasisMark, 2, 3),
        ]
    );
}

#[test]
fn any_cursor_of_many_reveals() {
    let set = masks_with(
        TITLE_AND_BOLD,
        &[Span::new(0, TITLE_AND_BOLD.len())],
        &[SelectionRange::caret(1), SelectionRange::caret(12)],
    );
    let spans: Vec<_> = set.iter().map(|m| m.span).collect();
    assert_eq!(spans, vec![Span::new(9, 11), Span::new(15, 17)]);

    // A caret on the closing `**` reveals the opening one too
    let set = masks_with(
        TITLE_AND_BOLD,
        &[Span::new(0, TITLE_AND_BOLD.len())],
        &[SelectionRange::caret(1), SelectionRange::caret(17)],
    );
    assert!(set.is_empty());
}

#[test]
fn selection_spanning_markers_reveals_all_of_them() {
    let set = masks_with(
        TITLE_AND_BOLD,
        &[Span::new(0, TITLE_AND_BOLD.len())],
        &[SelectionRange::new(22, 0)],
    );
    assert!(set.is_empty());
}

#[test]
fn markers_outside_the_viewport_never_appear() {
    let source = "# One\n\n*two*\n\n> three\n\n**four**\n";
    let visible = [Span::new(7, 13), Span::new(23, 31)];
    let set = masks_with(source, &visible, &[SelectionRange::caret(0)]);
    for masked in &set {
        assert!(
            visible.iter().any(|v| v.intersects(masked.span)),
            "{masked:?} is outside the viewport"
        );
    }
    let kinds: Vec<_> = set.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerKind::EmphasisMark,
            MarkerKind::EmphasisMark,
            MarkerKind::StrongEmphasisMark,
            MarkerKind::StrongEmphasisMark,
        ]
    );
}

#[test]
fn recompute_is_deterministic() {
    let source = "# A\n\n> *b* __c__\n\n- **d** and _e_\n";
    let visible = [Span::new(0, source.len())];
    let selection = [SelectionRange::caret(7)];
    let first = masks_with(source, &visible, &selection);
    for _ in 0..5 {
        assert_eq!(masks_with(source, &visible, &selection), first);
    }
}

#[test]
fn published_set_is_sorted_and_disjoint() {
    let source = "## *a* **b** ##\n> > _c_ and __d__\n*e **f** g*\n";
    let set = masks_with(
        source,
        &[Span::new(0, source.len())],
        &[SelectionRange::caret(source.len())],
    );
    set.check_invariants(source.len());
    assert_eq!(set.len(), 16);
}

#[test]
fn no_op_updates_are_idempotent() {
    let mut session = EditorSession::new(Document::from_text(TITLE_AND_BOLD));
    let before = session.masks().clone();

    session.set_selection(vec![SelectionRange::caret(0)]);
    session.set_visible_ranges(vec![Span::new(0, TITLE_AND_BOLD.len())]);

    assert_eq!(session.masks(), &before);
}

#[test]
fn code_is_never_masked() {
    let source = "`*a*`\n\n```\n# b\n**c**\n```\n";
    assert_eq!(masks_at(source, source.len()), vec![]);
}
