//! Immutable notebook document model.
//!
//! A [`Document`] is created by the host (in code, or by a format reader such
//! as `nbrender-ipynb`) and handed to the renderer read-only.

mod cell;
mod document;
mod metadata;
mod output;

pub use cell::{Cell, CellId, CodeCell, TextCell, UnknownCell};
pub use document::{Document, PLACEHOLDER_SOURCE};
pub use metadata::{CellMetadata, CodemirrorMode, DocumentMetadata, LanguageInfo};
pub use output::{MimeBundle, Output};
