//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree
//! building. Instead of building the tree directly, the parser emits a flat
//! sequence of events that describe the tree structure:
//!
//! ```text
//! Start(HEADING)
//!   Start(HEADING_MARK)
//!     Token(HASH)
//!   Finish
//!   Token(WHITESPACE)
//!   Token(TEXT)
//!   Token(NEWLINE)
//! Finish
//! ```
//!
//! The Sink processes these in order, maintaining a stack of open nodes.
//! Start pushes, Finish pops.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add the next lexer token to the current node.
    Token { kind: SyntaxKind },

    /// Finish the current node. Must be paired with a preceding `Start`.
    Finish,

    /// A slot reserved by `parser.start()`.
    ///
    /// `marker.complete()` turns it into a `Start`. The Sink skips any that
    /// remain.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}
