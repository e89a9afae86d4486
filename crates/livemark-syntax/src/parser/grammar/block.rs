//! Block-level grammar rules.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{inline, run_length};

/// Deepest ATX heading level.
const MAX_HEADING_LEVEL: usize = 6;

/// Spaces allowed before an ATX heading's opening hashes.
const MAX_HEADING_INDENT: usize = 3;

/// Parse a block element.
pub fn block(p: &mut Parser<'_, '_>) {
    skip_blank_lines(p);

    if p.at_end() {
        return;
    }

    // Detect block type at line start
    match p.current() {
        SyntaxKind::HASH => {
            if is_atx_heading(p) {
                heading(p);
            } else {
                paragraph(p);
            }
        }
        SyntaxKind::WHITESPACE if is_indented_atx_heading(p) => heading(p),
        SyntaxKind::GT => blockquote(p),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE | SyntaxKind::PLUS => {
            if is_thematic_break(p) {
                thematic_break(p);
            } else if p.at(SyntaxKind::UNDERSCORE) || p.nth(1) != SyntaxKind::WHITESPACE {
                paragraph(p);
            } else {
                list_item(p);
            }
        }
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => {
            if is_code_fence(p) {
                fenced_code(p);
            } else {
                paragraph(p);
            }
        }
        _ => paragraph(p),
    }
}

/// Blank lines (optionally holding only whitespace) sit directly under ROOT.
fn skip_blank_lines(p: &mut Parser<'_, '_>) {
    loop {
        if p.at(SyntaxKind::NEWLINE) {
            p.bump();
        } else if p.at(SyntaxKind::WHITESPACE)
            && matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::EOF)
        {
            p.bump();
        } else {
            break;
        }
    }
}

/// Level of the ATX heading opening at `start`: `#` through `######`
/// followed by whitespace or the end of the line.
fn atx_level(p: &Parser<'_, '_>, start: usize) -> Option<usize> {
    let level = run_length(p, start, SyntaxKind::HASH);
    ((1..=MAX_HEADING_LEVEL).contains(&level)
        && matches!(
            p.kind_at(start + level),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        ))
    .then_some(level)
}

fn is_atx_heading(p: &Parser<'_, '_>) -> bool {
    atx_level(p, p.pos()).is_some()
}

/// An ATX heading behind one to three spaces.
fn is_indented_atx_heading(p: &Parser<'_, '_>) -> bool {
    let indent = p.text_at(p.pos());
    p.at(SyntaxKind::WHITESPACE)
        && indent.len() <= MAX_HEADING_INDENT
        && indent.bytes().all(|b| b == b' ')
        && atx_level(p, p.pos() + 1).is_some()
}

/// A heading at the current position, indented or not.
fn at_heading(p: &Parser<'_, '_>) -> bool {
    is_atx_heading(p) || is_indented_atx_heading(p)
}

/// Check if current position is a thematic break (---, ***, ___)
fn is_thematic_break(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(
        marker,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE
    ) {
        return false;
    }

    let mut count = 0;
    let mut i = 0;

    while !matches!(p.nth(i), SyntaxKind::EOF | SyntaxKind::NEWLINE) {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    count >= 3
}

/// Check if current position starts a code fence.
fn is_code_fence(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE)
        && run_length(p, p.pos(), marker) >= 3
}

/// If the heading line ends in ` ###` (optionally followed by spaces), the
/// number of closing hashes.
fn closing_sequence(p: &Parser<'_, '_>) -> Option<usize> {
    if !p.at(SyntaxKind::WHITESPACE) {
        return None;
    }
    let hashes = run_length(p, p.pos() + 1, SyntaxKind::HASH);
    if hashes == 0 {
        return None;
    }
    let mut after = 1 + hashes;
    if p.nth(after) == SyntaxKind::WHITESPACE {
        after += 1;
    }
    matches!(p.nth(after), SyntaxKind::NEWLINE | SyntaxKind::EOF).then_some(hashes)
}

/// Parse an ATX heading block, including its line break.
fn heading(p: &mut Parser<'_, '_>) {
    let m = p.start();
    heading_line(p);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::HEADING);
}

/// Parse a heading inside a quote or list item. The container owns the
/// line break.
fn nested_heading(p: &mut Parser<'_, '_>) {
    let m = p.start();
    heading_line(p);
    m.complete(p, SyntaxKind::HEADING);
}

/// Indent, hashes and content of a heading, up to the end of the line.
fn heading_line(p: &mut Parser<'_, '_>) {
    p.eat(SyntaxKind::WHITESPACE);

    let level = run_length(p, p.pos(), SyntaxKind::HASH);
    p.bump_wrapped(level, SyntaxKind::HEADING_MARK);
    p.eat(SyntaxKind::WHITESPACE);

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if let Some(hashes) = closing_sequence(p) {
            p.bump();
            p.bump_wrapped(hashes, SyntaxKind::HEADING_MARK);
            p.eat(SyntaxKind::WHITESPACE);
            break;
        }
        inline::inline_element(p);
    }
}

/// A blockquote line continues the quote when it starts with `>`, possibly indented.
fn continues_blockquote(p: &Parser<'_, '_>) -> bool {
    p.at(SyntaxKind::GT) || (p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::GT)
}

/// Parse a blockquote.
fn blockquote(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        // `> > nested` carries one mark per level
        while p.at(SyntaxKind::GT) {
            p.bump_wrapped(1, SyntaxKind::QUOTE_MARK);
            p.eat(SyntaxKind::WHITESPACE);
        }

        if at_heading(p) {
            nested_heading(p);
        } else {
            inline::inline_until_newline(p);
        }

        if !p.eat(SyntaxKind::NEWLINE) || !continues_blockquote(p) {
            break;
        }
        p.eat(SyntaxKind::WHITESPACE);
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

/// Parse a list item. The caller has checked for the space after the marker.
fn list_item(p: &mut Parser<'_, '_>) {
    let m = p.start();

    // Consume the marker (-, *, +) and the space after it
    p.bump();
    p.bump();

    if at_heading(p) {
        nested_heading(p);
    } else {
        inline::inline_until_newline(p);
    }
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// Parse a thematic break.
fn thematic_break(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

/// Parse a fenced code block. Content is never parsed for inlines.
fn fenced_code(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let fence_marker = p.current();
    let fence_len = run_length(p, p.pos(), fence_marker);

    // Opening fence plus info string
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);

    while !p.at_end() {
        let is_closing = p.at(fence_marker) && run_length(p, p.pos(), fence_marker) >= fence_len;

        while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
            p.bump();
        }
        p.eat(SyntaxKind::NEWLINE);

        if is_closing {
            break;
        }
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// True when the current line start would open a new block.
fn interrupts_paragraph(p: &Parser<'_, '_>) -> bool {
    match p.current() {
        SyntaxKind::HASH => is_atx_heading(p),
        SyntaxKind::WHITESPACE => is_indented_atx_heading(p),
        SyntaxKind::GT => true,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
            p.nth(1) == SyntaxKind::WHITESPACE || is_thematic_break(p)
        }
        SyntaxKind::UNDERSCORE => is_thematic_break(p),
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => is_code_fence(p),
        _ => false,
    }
}

/// Parse a paragraph (default block).
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        inline::inline_until_newline(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }

        // Blank line or a new block ends the paragraph
        if p.at_end()
            || p.at(SyntaxKind::NEWLINE)
            || (p.at(SyntaxKind::WHITESPACE)
                && matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::EOF))
            || interrupts_paragraph(p)
        {
            break;
        }
    }

    m.complete(p, SyntaxKind::PARAGRAPH);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// `(kind, text)` of every marker node in document order.
    fn markers(tree: &SyntaxNode) -> Vec<(SyntaxKind, String)> {
        tree.descendants()
            .filter(|n| n.kind().is_marker())
            .map(|n| (n.kind(), n.text().to_string()))
            .collect()
    }

    #[test]
    fn parse_heading() {
        let tree = parse("# Heading\n");
        let heading = tree.children().next().unwrap();
        assert_eq!(heading.kind(), SyntaxKind::HEADING);

        let mark = heading.first_child().unwrap();
        assert_eq!(mark.kind(), SyntaxKind::HEADING_MARK);
        assert_eq!(mark.text().to_string(), "#");
        assert_eq!(u32::from(mark.text_range().start()), 0);
        assert_eq!(u32::from(mark.text_range().end()), 1);
    }

    #[rstest]
    #[case("## Second\n", "##")]
    #[case("###### Six\n", "######")]
    #[case("#\n", "#")]
    #[case("#", "#")]
    fn heading_mark_covers_all_hashes(#[case] input: &str, #[case] mark: &str) {
        let tree = parse(input);
        assert_eq!(tree.first_child().unwrap().kind(), SyntaxKind::HEADING);
        assert_eq!(
            markers(&tree),
            vec![(SyntaxKind::HEADING_MARK, mark.to_string())]
        );
    }

    #[rstest]
    #[case("#hashtag\n")]
    #[case("####### seven\n")]
    fn not_a_heading(#[case] input: &str) {
        let tree = parse(input);
        assert_eq!(tree.first_child().unwrap().kind(), SyntaxKind::PARAGRAPH);
        assert!(markers(&tree).is_empty());
    }

    #[test]
    fn heading_closing_sequence_is_a_mark() {
        let tree = parse("## Title ##  \n");
        assert_eq!(
            markers(&tree),
            vec![
                (SyntaxKind::HEADING_MARK, "##".to_string()),
                (SyntaxKind::HEADING_MARK, "##".to_string()),
            ]
        );
        assert_eq!(tree.text().to_string(), "## Title ##  \n");
    }

    #[rstest]
    #[case::indented("  # h\n", "#")]
    #[case::three_spaces("   ## h\n", "##")]
    fn indented_heading(#[case] input: &str, #[case] mark: &str) {
        let tree = parse(input);
        let heading = tree.first_child().unwrap();
        assert_eq!(heading.kind(), SyntaxKind::HEADING);
        assert_eq!(heading.text().to_string(), input);
        assert_eq!(
            markers(&tree),
            vec![(SyntaxKind::HEADING_MARK, mark.to_string())]
        );
    }

    #[test]
    fn four_spaces_is_not_a_heading() {
        let tree = parse("    # h\n");
        assert!(markers(&tree).is_empty());
    }

    #[test]
    fn indented_heading_interrupts_paragraph() {
        let tree = parse("text\n  # h\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::PARAGRAPH, SyntaxKind::HEADING]);
    }

    #[rstest]
    #[case::in_quote("> # h\n> more\n", vec![SyntaxKind::QUOTE_MARK, SyntaxKind::HEADING_MARK, SyntaxKind::QUOTE_MARK])]
    #[case::in_nested_quote("> > ## h\n", vec![SyntaxKind::QUOTE_MARK, SyntaxKind::QUOTE_MARK, SyntaxKind::HEADING_MARK])]
    #[case::in_list_item("- # h\n", vec![SyntaxKind::HEADING_MARK])]
    fn heading_inside_container(#[case] input: &str, #[case] expected: Vec<SyntaxKind>) {
        let tree = parse(input);
        let kinds: Vec<_> = markers(&tree).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, expected);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn hash_inside_heading_text_is_not_a_mark() {
        let tree = parse("# C# rocks\n");
        assert_eq!(
            markers(&tree),
            vec![(SyntaxKind::HEADING_MARK, "#".to_string())]
        );
    }

    #[test]
    fn parse_blockquote_marks_each_line() {
        let tree = parse("> one\n> two\n");
        let bq = tree.children().next().unwrap();
        assert_eq!(bq.kind(), SyntaxKind::BLOCK_QUOTE);
        assert_eq!(
            markers(&tree),
            vec![
                (SyntaxKind::QUOTE_MARK, ">".to_string()),
                (SyntaxKind::QUOTE_MARK, ">".to_string()),
            ]
        );
    }

    #[test]
    fn nested_blockquote_marks() {
        let tree = parse("> > deep\n");
        assert_eq!(markers(&tree).len(), 2);
        assert_eq!(tree.children().count(), 1);
    }

    #[test]
    fn blockquote_ends_at_line_without_gt() {
        let tree = parse("> quoted\nnot quoted\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::BLOCK_QUOTE, SyntaxKind::PARAGRAPH]);
    }

    #[test]
    fn parse_list_item() {
        let tree = parse("* item\n");
        let item = tree.children().next().unwrap();
        assert_eq!(item.kind(), SyntaxKind::LIST_ITEM);
        assert!(markers(&tree).is_empty(), "list bullets are not emphasis");
    }

    #[rstest]
    #[case("---\n")]
    #[case("***\n")]
    #[case("* * *\n")]
    #[case("___\n")]
    fn parse_thematic_break(#[case] input: &str) {
        let tree = parse(input);
        let hr = tree.children().next().unwrap();
        assert_eq!(hr.kind(), SyntaxKind::THEMATIC_BREAK);
        assert!(markers(&tree).is_empty());
    }

    #[test]
    fn fenced_code_content_has_no_marks() {
        let input = "```md\n# not a heading\n**not strong**\n```\n# after\n";
        let tree = parse(input);
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::FENCED_CODE, SyntaxKind::HEADING]);
        assert_eq!(
            markers(&tree),
            vec![(SyntaxKind::HEADING_MARK, "#".to_string())]
        );
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let input = "~~~\n*a*\n";
        let tree = parse(input);
        assert_eq!(tree.children().count(), 1);
        assert!(markers(&tree).is_empty());
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let tree = parse("text\n# Heading\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::PARAGRAPH, SyntaxKind::HEADING]);
    }

    #[test]
    fn paragraph_continues_over_plain_lines() {
        let tree = parse("line one\nline two\n\nnext\n");
        let paragraphs = tree
            .children()
            .filter(|n| n.kind() == SyntaxKind::PARAGRAPH)
            .count();
        assert_eq!(paragraphs, 2);
    }

    #[test]
    fn parse_multiple_blocks() {
        let input = "# Heading\n\nParagraph text.\n\n- list item\n";
        let tree = parse(input);

        let blocks: Vec<_> = tree.children().collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].kind(), SyntaxKind::HEADING);
        assert_eq!(blocks[1].kind(), SyntaxKind::PARAGRAPH);
        assert_eq!(blocks[2].kind(), SyntaxKind::LIST_ITEM);
    }

    #[test]
    fn text_preservation() {
        let input = "# Heading\n  \n> Quote\n\n- Item\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }
}
