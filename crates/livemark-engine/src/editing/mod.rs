/*!
 * # Editing
 *
 * - **`document`**: the xi-rope buffer and the syntax tree derived from it.
 *   Edits compile to an xi-rope `Delta`; the tree is rebuilt after each one.
 * - **`patch`**: a replace `Edit` and the `Patch` describing where it landed,
 *   used to carry offsets (cursors, visible ranges) across the change.
 * - **`session`**: an open document plus cursors and viewport. Every change
 *   is reported to the marker masker as a `ViewUpdate`.
 */

pub mod document;
pub mod patch;
pub mod session;

pub use document::{Document, EditError};
pub use patch::{Bias, Edit, Patch};
pub use session::{EditorSession, SessionView};
