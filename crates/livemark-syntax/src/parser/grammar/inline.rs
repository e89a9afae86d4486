//! # Inline-Level Grammar
//!
//! Inline elements are the formatting within blocks: links, emphasis, code
//! spans. Inline parsing is driven by special characters rather than
//! line-start patterns:
//!
//! | Token | Possible Element |
//! |-------|-----------------|
//! | `[` | Link |
//! | `` ` `` | Code span |
//! | `*`, `_` | Emphasis or strong |
//! | (other) | Plain text |
//!
//! ## Look Before You Mark
//!
//! Emphasis and code spans are decided by looking ahead for the closing
//! delimiter on the same line *before* anything is emitted. Only a construct
//! that closes gets a node and marker children; an unclosed `*` or backtick
//! run is consumed as plain text.
//!
//! Nested emphasis is parsed with a `limit`: the absolute token index of the
//! enclosing closer. A nested construct must close before it, so the outer
//! closer found by the lookahead is always the one consumed.
//!
//! ## Delimiter Rules
//!
//! A simplified take on CommonMark's flanking rules:
//! - the opener is not followed by whitespace, the closer not preceded by it
//! - content is non-empty
//! - `_` does not open or close inside a word (`snake_case_name`)
//! - a run of two or more opens STRONG, a single delimiter opens EMPHASIS
//! - a nested opener of the same delimiter claims the next closer before
//!   the outer construct can

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::run_length;

/// Parse inline content until newline or EOF.
pub fn inline_until_newline(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        inline_element(p);
    }
}

/// Parse a single inline element.
pub fn inline_element(p: &mut Parser<'_, '_>) {
    match p.current() {
        SyntaxKind::LBRACKET => link_or_text(p),
        SyntaxKind::BACKTICK => code_span(p),
        SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis_or_text(p, None),
        _ => p.bump(),
    }
}

/// Absolute index just past the code span opening at `start`, if it closes on this line.
fn code_span_end(p: &Parser<'_, '_>, start: usize) -> Option<usize> {
    let open = run_length(p, start, SyntaxKind::BACKTICK);
    let mut i = start + open;

    loop {
        match p.kind_at(i) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            SyntaxKind::BACKTICK => {
                let run = run_length(p, i, SyntaxKind::BACKTICK);
                if run == open {
                    return Some(i + run);
                }
                i += run;
            }
            _ => i += 1,
        }
    }
}

/// Parse a code span `code`, or its backticks as text when unclosed.
fn code_span(p: &mut Parser<'_, '_>) {
    let start = p.pos();
    match code_span_end(p, start) {
        Some(end) => {
            let m = p.start();
            while p.pos() < end {
                p.bump();
            }
            m.complete(p, SyntaxKind::CODE_SPAN);
        }
        None => {
            for _ in 0..run_length(p, start, SyntaxKind::BACKTICK) {
                p.bump();
            }
        }
    }
}

/// Absolute index of the closing delimiter run for an opener of `open`
/// delimiters at the current position, if one exists before `limit`.
fn find_closer(
    p: &Parser<'_, '_>,
    delimiter: SyntaxKind,
    open: usize,
    limit: Option<usize>,
) -> Option<usize> {
    let content_start = p.pos() + open;
    let end = limit.unwrap_or(usize::MAX);

    if matches!(
        p.kind_at(content_start),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    ) {
        return None;
    }

    // Open lengths of nested openers still waiting for their closer
    let mut pending: Vec<usize> = Vec::new();
    let mut i = content_start;
    loop {
        if i >= end {
            return None;
        }
        match p.kind_at(i) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            SyntaxKind::BACKTICK => match code_span_end(p, i) {
                Some(after) => i = after,
                None => i += run_length(p, i, SyntaxKind::BACKTICK),
            },
            kind if kind == delimiter => {
                let run = run_length(p, i, delimiter);
                let underscore = delimiter == SyntaxKind::UNDERSCORE;
                let can_close = i > content_start
                    && p.kind_at(i - 1) != SyntaxKind::WHITESPACE
                    && !(underscore && p.kind_at(i + run) == SyntaxKind::TEXT);
                let can_open = !matches!(
                    p.kind_at(i + run),
                    SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
                ) && !(underscore && p.kind_at(i - 1) == SyntaxKind::TEXT);

                if can_close {
                    match pending.last() {
                        Some(&inner) if run >= inner => {
                            pending.pop();
                            i += inner;
                            continue;
                        }
                        None if run >= open && i + open <= end => return Some(i),
                        _ => {}
                    }
                } else if can_open {
                    pending.push(run.min(2));
                }
                i += run;
            }
            _ => i += 1,
        }
    }
}

/// Parse emphasis `*text*` or strong `**text**` (or the underscore variants)
/// that closes before `limit`, or a single delimiter as plain text.
fn emphasis_or_text(p: &mut Parser<'_, '_>, limit: Option<usize>) {
    let delimiter = p.current();
    let run = run_length(p, p.pos(), delimiter);
    let open = run.min(2);

    // An intraword `_` run is text as a whole, never split into openers
    if delimiter == SyntaxKind::UNDERSCORE && p.prev() == SyntaxKind::TEXT {
        let stop = limit.unwrap_or(usize::MAX);
        for _ in 0..run {
            if p.pos() >= stop {
                break;
            }
            p.bump();
        }
        return;
    }

    let Some(close) = find_closer(p, delimiter, open, limit) else {
        p.bump();
        return;
    };

    let (node, mark) = if open == 2 {
        (SyntaxKind::STRONG, SyntaxKind::STRONG_EMPHASIS_MARK)
    } else {
        (SyntaxKind::EMPHASIS, SyntaxKind::EMPHASIS_MARK)
    };

    let m = p.start();
    p.bump_wrapped(open, mark);

    while p.pos() < close {
        match p.current() {
            SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis_or_text(p, Some(close)),
            SyntaxKind::BACKTICK => code_span(p),
            _ => p.bump(),
        }
    }

    p.bump_wrapped(open, mark);
    m.complete(p, node);
}

/// Absolute index of the first `kind` token at or after `start` on this line.
fn find_on_line(p: &Parser<'_, '_>, start: usize, kind: SyntaxKind) -> Option<usize> {
    let mut i = start;
    loop {
        match p.kind_at(i) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            k if k == kind => return Some(i),
            _ => i += 1,
        }
    }
}

/// Parse a standard link `[text](url)`, a bracketed INLINE, or a lone `[`.
fn link_or_text(p: &mut Parser<'_, '_>) {
    let Some(rbracket) = find_on_line(p, p.pos() + 1, SyntaxKind::RBRACKET) else {
        p.bump();
        return;
    };

    let m = p.start();
    p.bump(); // [

    // Link text may carry emphasis, bounded by the `]`
    while p.pos() < rbracket {
        match p.current() {
            SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis_or_text(p, Some(rbracket)),
            _ => p.bump(),
        }
    }
    p.bump(); // ]

    let rparen = if p.at(SyntaxKind::LPAREN) {
        find_on_line(p, p.pos() + 1, SyntaxKind::RPAREN)
    } else {
        None
    };

    match rparen {
        Some(rparen) => {
            // URL characters are never formatting
            while p.pos() <= rparen {
                p.bump();
            }
            m.complete(p, SyntaxKind::LINK);
        }
        None => m.complete(p, SyntaxKind::INLINE),
    }
}
