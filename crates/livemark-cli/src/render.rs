//! Turning document lines plus a mask set into what the terminal shows.

use livemark_engine::{MaskSet, Span};
use livemark_syntax::{SyntaxKind, SyntaxNode};
use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns a tab is drawn as.
const TAB_WIDTH: usize = 4;

/// Byte spans of each line, excluding the `\n` or `\r\n` terminator.
///
/// Always returns at least one line; text ending in a newline has a final
/// empty line, where a caret after the last newline lives.
pub fn line_spans(text: &str) -> Vec<Span> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices('\n') {
        let end = if text[..idx].ends_with('\r') { idx - 1 } else { idx };
        lines.push(Span::new(start, end.max(start)));
        start = idx + 1;
    }
    lines.push(Span::new(start, text.len()));
    lines
}

/// Index of the line holding `offset`.
pub fn line_of(lines: &[Span], offset: usize) -> usize {
    lines
        .partition_point(|line| line.start <= offset)
        .saturating_sub(1)
}

/// The unmasked byte spans of `line`, in order.
pub fn visible_segments(line: Span, masks: &MaskSet) -> Vec<Span> {
    let mut segments = Vec::new();
    let mut cursor = line.start;
    for masked in masks.within(line) {
        if masked.span.start > cursor {
            segments.push(Span::new(cursor, masked.span.start));
        }
        cursor = cursor.max(masked.span.end);
    }
    if cursor < line.end {
        segments.push(Span::new(cursor, line.end));
    }
    segments
}

/// Text of `span` as drawn: tabs expanded to spaces.
pub fn display_text(text: &str, span: Span) -> String {
    text[span.range()].replace('\t', &" ".repeat(TAB_WIDTH))
}

/// A line with its masked bytes removed.
pub fn masked_line(text: &str, line: Span, masks: &MaskSet) -> String {
    visible_segments(line, masks)
        .into_iter()
        .map(|segment| display_text(text, segment))
        .collect()
}

/// Screen column of a caret at `offset` on `line`, after masking.
pub fn display_column(text: &str, line: Span, offset: usize, masks: &MaskSet) -> usize {
    let prefix = Span::new(line.start, offset.clamp(line.start, line.end));
    masked_line(text, prefix, masks).width()
}

/// Byte offset a click at screen `column` on `line` lands on: before the
/// character drawn in that cell, or the line end past the last one.
pub fn offset_at_column(text: &str, line: Span, column: usize, masks: &MaskSet) -> usize {
    let mut col = 0;
    for segment in visible_segments(line, masks) {
        for (idx, c) in text[segment.range()].char_indices() {
            let width = if c == '\t' {
                TAB_WIDTH
            } else {
                c.width().unwrap_or(0)
            };
            if column < col + width {
                return segment.start + idx;
            }
            col += width;
        }
    }
    line.end
}

/// Style a node kind is drawn with, if any.
fn node_style(kind: SyntaxKind) -> Option<Style> {
    let style = Style::default();
    match kind {
        SyntaxKind::HEADING | SyntaxKind::STRONG => Some(style.add_modifier(Modifier::BOLD)),
        SyntaxKind::EMPHASIS | SyntaxKind::BLOCK_QUOTE => {
            Some(style.add_modifier(Modifier::ITALIC))
        }
        SyntaxKind::CODE_SPAN => Some(style.fg(Color::Cyan)),
        SyntaxKind::LINK => Some(style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED)),
        _ => None,
    }
}

/// Byte ranges of every styled node in `tree`, outermost first.
pub fn style_spans(tree: &SyntaxNode) -> Vec<(Span, Style)> {
    tree.descendants()
        .filter_map(|node| node_style(node.kind()).map(|style| (Span::from(node.text_range()), style)))
        .collect()
}

/// Visible segments of `line`, split wherever a styled node starts or ends,
/// each with the combined style of the nodes covering it.
pub fn styled_segments(line: Span, masks: &MaskSet, styles: &[(Span, Style)]) -> Vec<(Span, Style)> {
    let on_line: Vec<_> = styles
        .iter()
        .filter(|(span, _)| span.intersects(line))
        .copied()
        .collect();

    let mut out = Vec::new();
    for segment in visible_segments(line, masks) {
        let mut cuts: Vec<usize> = on_line
            .iter()
            .flat_map(|(span, _)| [span.start, span.end])
            .filter(|&cut| cut > segment.start && cut < segment.end)
            .collect();
        cuts.push(segment.end);
        cuts.sort_unstable();
        cuts.dedup();

        let mut start = segment.start;
        for end in cuts {
            let piece = Span::new(start, end);
            let style = on_line
                .iter()
                .filter(|(span, _)| span.intersects(piece))
                .fold(Style::default(), |acc, (_, style)| acc.patch(*style));
            out.push((piece, style));
            start = end;
        }
    }
    out
}

/// The whole document with masked bytes removed, one output line per line.
pub fn render_document(text: &str, masks: &MaskSet) -> String {
    let mut out = line_spans(text)
        .into_iter()
        .map(|line| masked_line(text, line, masks))
        .collect::<Vec<_>>()
        .join("\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
