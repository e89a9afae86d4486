//! # Lexer - Tokenizing Markdown Source
//!
//! The first parsing stage breaks source text into tokens using the [Logos]
//! lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! **Every byte in the input appears in exactly one token.** Nothing is
//! skipped, which is what lets marker spans in the final tree line up with
//! offsets in the editor's buffer:
//!
//! ```
//! use livemark_syntax::lexer::lex;
//!
//! let input = "# Hello, *world*!\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are minimal and context-free. The lexer doesn't know whether `*`
//! opens a list item, emphasis or a thematic break; the grammar decides, and
//! only the grammar decides what becomes a formatting marker.
//!
//! - `#` → `HASH`, `>` → `GT`
//! - `-`, `*`, `_`, `+` → `DASH`, `STAR`, `UNDERSCORE`, `PLUS`
//! - `[`, `]`, `(`, `)` → bracket tokens (links)
//! - `` ` ``, `~` → `BACKTICK`, `TILDE` (code spans, fenced blocks)
//!
//! Everything else becomes `TEXT`, grouped into runs.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Separate from [`SyntaxKind`] because Logos needs to derive on it. Each
/// variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token(">")]
    Gt,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("_")]
    Underscore,

    #[token("+")]
    Plus,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("#")]
    Hash,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^\s\[\]()>`*_+#~-]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized input (a lone `\r`, say) is still text
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}
