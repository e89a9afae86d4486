//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.bump_wrapped()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`)
//!
//! - [`block`] - Block-level elements (headings, quotes, lists, code blocks)
//! - [`inline`] - Inline elements (links, emphasis, code spans)
//!
//! ## Formatting markers
//!
//! The literal syntax characters of headings, quotes and emphasis are
//! wrapped in their own nodes (`HEADING_MARK`, `QUOTE_MARK`,
//! `EMPHASIS_MARK`, `STRONG_EMPHASIS_MARK`) so consumers can address the
//! marker span separately from the content it decorates:
//!
//! ```text
//! HEADING
//!   HEADING_MARK
//!     HASH "#"
//!   WHITESPACE " "
//!   TEXT "Title"
//! ```
//!
//! A marker node is only produced when the construct is well formed. An
//! unmatched `*` is plain text, because a consumer hiding markers must never
//! hide characters that do not format anything.
//!
//! ## Error Recovery
//!
//! Grammar functions are lenient: any input produces a tree that preserves
//! all bytes. Nothing here panics or returns errors.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Length of the run of `kind` tokens starting at absolute index `start`.
fn run_length(p: &Parser<'_, '_>, start: usize, kind: SyntaxKind) -> usize {
    let mut len = 0;
    while p.kind_at(start + len) == kind {
        len += 1;
    }
    len
}
