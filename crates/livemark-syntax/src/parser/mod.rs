//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the **event-based**
//! architecture from rust-analyzer.
//!
//! Rather than building the tree directly, grammar rules emit a flat list of
//! [`Event`]s; the [`Sink`] then builds the Rowan tree. This keeps nesting off
//! the call stack's critical path and lets a rule open a node before it knows
//! where the node ends.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that **must** be completed with
//! `marker.complete(parser, KIND)`. Dropping it otherwise panics, catching
//! grammar bugs instead of producing corrupt trees. Grammar rules decide
//! whether a construct closes *before* starting a marker, so there is no
//! abandon path.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::QUOTE_MARK);
//! ```
//!
//! ## Public API
//!
//! ```
//! use livemark_syntax::parse;
//!
//! let tree = parse("> quoted\n");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `kind_at()`, `text_at()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        log::trace!(
            "parsed {} tokens into {} events",
            self.tokens.len(),
            self.events.len()
        );
        Sink::new(self.tokens, self.events).finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.kind_at(self.pos + n)
    }

    /// Kind of the token at an absolute index, or EOF past the end.
    pub fn kind_at(&self, index: usize) -> SyntaxKind {
        self.tokens
            .get(index)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Source text of the token at an absolute index, empty past the end.
    pub fn text_at(&self, index: usize) -> &'input str {
        self.tokens.get(index).map_or("", |t| t.text)
    }

    /// Kind of the token just consumed, or NEWLINE at the start of input.
    pub fn prev(&self) -> SyntaxKind {
        match self.pos.checked_sub(1) {
            Some(index) => self.kind_at(index),
            None => SyntaxKind::NEWLINE,
        }
    }

    /// Absolute index of the current token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume `n` tokens wrapped in a single node of `kind`.
    pub fn bump_wrapped(&mut self, n: usize, kind: SyntaxKind) {
        let m = self.start();
        for _ in 0..n {
            self.bump();
        }
        m.complete(self, kind);
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. The `#[must_use]` attribute and the `Drop`
/// impl together enforce that every marker is completed.
#[must_use = "Markers must be completed, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be completed");
        }
    }
}

/// Parse markdown source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("");
        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "Hello, world!";
        let tree = parse(input);
        assert_eq!(tree.text(), input);
    }

    #[test]
    fn prev_at_start_reads_as_line_start() {
        let tokens = lex("x");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.prev(), SyntaxKind::NEWLINE);
        assert_eq!(parser.kind_at(5), SyntaxKind::EOF);
    }

    #[test]
    fn bump_wrapped_creates_node() {
        let tokens = lex("**");
        let mut parser = Parser::new(&tokens);
        let root = parser.start();
        parser.bump_wrapped(2, SyntaxKind::STRONG_EMPHASIS_MARK);
        root.complete(&mut parser, SyntaxKind::ROOT);
        let tree = Sink::new(&tokens, parser.events).finish();

        let mark = tree.first_child().unwrap();
        assert_eq!(mark.kind(), SyntaxKind::STRONG_EMPHASIS_MARK);
        assert_eq!(mark.text().to_string(), "**");
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens);
            let _marker = parser.start();
        });
        assert!(result.is_err());
    }
}
