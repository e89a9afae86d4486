//! # livemark-engine
//!
//! The marker-masking engine behind livemark's live preview, plus the
//! host-side document and session it runs against.
//!
//! - [`masking`] decides which formatting markers are hidden.
//! - [`editing`] holds the text ([`Document`]) and the open editor state
//!   ([`EditorSession`]) that notifies the masker of every change.
//!
//! ```
//! use livemark_engine::{Document, EditorSession, SelectionRange};
//!
//! let mut session = EditorSession::new(Document::from_text("# Title\n\n**bold** text"));
//!
//! // Caret at 0 touches the heading mark, so only the `**` pair is hidden
//! let hidden: Vec<_> = session.masks().iter().map(|m| m.span.range()).collect();
//! assert_eq!(hidden, [9..11, 15..17]);
//!
//! session.set_selection(vec![SelectionRange::caret(9)]);
//! let hidden: Vec<_> = session.masks().iter().map(|m| m.span.range()).collect();
//! assert_eq!(hidden, [0..1]);
//! ```

pub mod editing;
pub mod marker;
pub mod masking;
pub mod selection;
pub mod span;

pub use editing::{Document, Edit, EditError, EditorSession, Patch};
pub use marker::{MarkerKind, MarkerKinds};
pub use masking::{EditorView, MarkerMasker, MaskSet, MaskedRange, Phase, ViewUpdate};
pub use selection::SelectionRange;
pub use span::Span;
