//! # livemark-syntax
//!
//! A lossless Markdown syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! Every byte of the source lands in exactly one token, so each node's
//! `text_range()` is a byte range into the text that was parsed. The editor
//! engine relies on this to map formatting markers back onto its buffer.
//!
//! ## Pipeline
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! - [`lexer`] turns text into context-free tokens (`#` is always `HASH`).
//! - [`parser`] runs the grammar rules and records events.
//! - [`parser::sink`] builds the immutable, cheaply cloned green tree.
//!
//! ## Formatting markers
//!
//! The literal characters that format a construct get their own node kinds:
//! [`SyntaxKind::HEADING_MARK`], [`SyntaxKind::QUOTE_MARK`],
//! [`SyntaxKind::EMPHASIS_MARK`] and [`SyntaxKind::STRONG_EMPHASIS_MARK`].
//! A marker node only exists when its construct is well formed.
//!
//! ```
//! use livemark_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("# Hello *there*\n");
//! assert_eq!(tree.text().to_string(), "# Hello *there*\n");
//!
//! let marks: Vec<_> = tree
//!     .descendants()
//!     .filter(|n| n.kind().is_marker())
//!     .map(|n| n.text().to_string())
//!     .collect();
//! assert_eq!(marks, ["#", "*", "*"]);
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_heading_and_strong() {
        let tree = parse("# Title\n\n**bold** text");
        assert_snapshot!(format_tree(&tree, 0), @r##"
        ROOT@0..22
          HEADING@0..8
            HEADING_MARK@0..1
              HASH@0..1 "#"
            WHITESPACE@1..2 " "
            TEXT@2..7 "Title"
            NEWLINE@7..8 "\\n"
          NEWLINE@8..9 "\\n"
          PARAGRAPH@9..22
            STRONG@9..17
              STRONG_EMPHASIS_MARK@9..11
                STAR@9..10 "*"
                STAR@10..11 "*"
              TEXT@11..15 "bold"
              STRONG_EMPHASIS_MARK@15..17
                STAR@15..16 "*"
                STAR@16..17 "*"
            WHITESPACE@17..18 " "
            TEXT@18..22 "text"
        "##);
    }

    #[test]
    fn snapshot_quoted_emphasis() {
        let tree = parse("> *hi*\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..7
          BLOCK_QUOTE@0..7
            QUOTE_MARK@0..1
              GT@0..1 ">"
            WHITESPACE@1..2 " "
            EMPHASIS@2..6
              EMPHASIS_MARK@2..3
                STAR@2..3 "*"
              TEXT@3..5 "hi"
              EMPHASIS_MARK@5..6
                STAR@5..6 "*"
            NEWLINE@6..7 "\\n"
        "#);
    }

    #[test]
    fn snapshot_unclosed_emphasis_is_text() {
        let tree = parse("a *b");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..4
          PARAGRAPH@0..4
            TEXT@0..1 "a"
            WHITESPACE@1..2 " "
            STAR@2..3 "*"
            TEXT@3..4 "b"
        "#);
    }

    // Real-world notes are messy. Every input must produce a tree that
    // preserves all bytes.
    #[test]
    fn messy_unclosed_constructs_keep_text() {
        let input = r#"# Draft notes

Check out [this page for more info

Also see [broken link without url

Some *half done emphasis

And `unclosed code span

> quote
lazy line

```python
def broken():
    # oops forgot to close the fence
"#;
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "Hello, world!\n",
            "# Heading\n",
            "> Quote\n",
            "- Item\n",
            "```\ncode\n```\n",
            "[link](url)\n",
            "*emphasis*\n",
            "**strong**\n",
            "`code span`\n",
            "line\r\nwith crlf\r\n",
            "héllo *wörld* ✓\n",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }
}
