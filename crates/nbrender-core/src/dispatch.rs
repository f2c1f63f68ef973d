//! Cell classification.
//!
//! Every cell maps to exactly one [`CellView`]. The match over [`Cell`] is
//! exhaustive, so a new cell kind cannot be silently dropped.

use std::sync::Arc;

use crate::model::{Cell, CellId, DocumentMetadata, Output};
use crate::resolve::{Visibility, resolve_language, resolve_visibility};

/// Document-wide state shared by every cell of a render pass.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    metadata: Arc<DocumentMetadata>,
    language: Arc<str>,
}

impl DocumentContext {
    /// Snapshot the document metadata and resolve its language.
    pub fn new(metadata: &DocumentMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata.clone()),
            language: resolve_language(metadata).into(),
        }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Render strategy of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
    Unknown,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified cell, ready for a drawing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Syntax-highlighted source plus outputs.
    Code {
        /// Prompt number; `None` draws an empty prompt.
        execution_count: Option<u32>,
        source: Arc<str>,
        language: Arc<str>,
        visibility: Visibility,
        /// The cell's outputs, unmodified and in display order.
        outputs: Arc<[Output]>,
    },

    /// Source for the markdown/math pipeline.
    Markdown { source: Arc<str> },

    /// Literal preformatted text.
    Raw { source: Arc<str> },

    /// A cell type with no renderer.
    Unknown { cell_type: String },
}

impl CellView {
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Code { .. } => CellKind::Code,
            Self::Markdown { .. } => CellKind::Markdown,
            Self::Raw { .. } => CellKind::Raw,
            Self::Unknown { .. } => CellKind::Unknown,
        }
    }

    /// Text drawn in place of a cell whose type has no renderer.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Unknown { cell_type } => {
                Some(format!("Cell Type \"{}\" is not implemented", cell_type))
            }
            _ => None,
        }
    }
}

/// Per-cell output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescriptor {
    pub id: CellId,
    pub view: CellView,
}

impl RenderDescriptor {
    pub fn kind(&self) -> CellKind {
        self.view.kind()
    }

    pub fn source_hidden(&self) -> bool {
        self.visibility().is_some_and(|v| v.source_hidden)
    }

    pub fn output_hidden(&self) -> bool {
        self.visibility().is_none_or(|v| v.output_hidden)
    }

    pub fn output_expanded(&self) -> bool {
        self.visibility().is_none_or(|v| v.output_expanded)
    }

    /// Highlighting language, for code cells.
    pub fn language(&self) -> Option<&str> {
        match &self.view {
            CellView::Code { language, .. } => Some(language),
            _ => None,
        }
    }

    fn visibility(&self) -> Option<Visibility> {
        match &self.view {
            CellView::Code { visibility, .. } => Some(*visibility),
            _ => None,
        }
    }
}

/// Classify a cell.
pub fn classify(cell: &Cell, context: &DocumentContext) -> CellView {
    match cell {
        Cell::Code(code) => CellView::Code {
            execution_count: code.execution_count,
            source: code.source.clone(),
            language: context.language.clone(),
            visibility: resolve_visibility(context.metadata(), cell),
            outputs: code.outputs.clone(),
        },
        Cell::Markdown(text) => CellView::Markdown {
            source: text.source.clone(),
        },
        Cell::Raw(text) => CellView::Raw {
            source: text.source.clone(),
        },
        Cell::Unknown(unknown) => CellView::Unknown {
            cell_type: unknown.cell_type.clone(),
        },
    }
}
