//! Source and output visibility.

use crate::model::{Cell, DocumentMetadata};

/// Resolved visibility of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub source_hidden: bool,
    pub output_hidden: bool,
    pub output_expanded: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            source_hidden: false,
            output_hidden: false,
            output_expanded: true,
        }
    }
}

/// Resolve a cell's visibility against the document-wide flags.
///
/// - source is hidden if the document's `hide_input`, or the cell's
///   `inputHidden` or `hide_input`, is set;
/// - output is hidden if the cell has no outputs or sets `outputHidden`.
///   Cells other than code cells have no outputs;
/// - output is expanded unless the cell sets `outputExpanded` to false.
pub fn resolve_visibility(document: &DocumentMetadata, cell: &Cell) -> Visibility {
    let meta = cell.metadata();

    let source_hidden = document.hide_input.unwrap_or(false)
        || meta.input_hidden.unwrap_or(false)
        || meta.hide_input.unwrap_or(false);

    let has_outputs = match cell {
        Cell::Code(code) => !code.outputs.is_empty(),
        Cell::Markdown(_) | Cell::Raw(_) | Cell::Unknown(_) => false,
    };
    let output_hidden = !has_outputs || meta.output_hidden.unwrap_or(false);

    let output_expanded = meta.output_expanded.unwrap_or(true);

    Visibility {
        source_hidden,
        output_hidden,
        output_expanded,
    }
}
