//! Notebook cells.

use std::sync::Arc;

use super::metadata::CellMetadata;
use super::output::Output;

/// Unique identifier for a cell within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(Arc<str>);

impl CellId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CellId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A code cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeCell {
    pub source: Arc<str>,
    pub metadata: CellMetadata,
    /// Display-only prompt number.
    pub execution_count: Option<u32>,
    pub outputs: Arc<[Output]>,
}

/// A markdown or raw cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextCell {
    pub source: Arc<str>,
    pub metadata: CellMetadata,
}

/// A cell whose `cell_type` is not one of `code`, `markdown` or `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCell {
    pub cell_type: String,
    pub source: Arc<str>,
    pub metadata: CellMetadata,
}

/// One cell of a notebook document.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Code(CodeCell),
    Markdown(TextCell),
    Raw(TextCell),
    Unknown(UnknownCell),
}

impl Cell {
    /// A code cell with no outputs and no execution count.
    pub fn code(source: impl Into<Arc<str>>) -> Self {
        Self::Code(CodeCell {
            source: source.into(),
            ..Default::default()
        })
    }

    pub fn markdown(source: impl Into<Arc<str>>) -> Self {
        Self::Markdown(TextCell {
            source: source.into(),
            metadata: CellMetadata::default(),
        })
    }

    pub fn raw(source: impl Into<Arc<str>>) -> Self {
        Self::Raw(TextCell {
            source: source.into(),
            metadata: CellMetadata::default(),
        })
    }

    /// Build a cell from its declared `cell_type` tag.
    ///
    /// Tags other than `code`, `markdown` and `raw` produce [`Cell::Unknown`].
    pub fn from_tag(cell_type: &str, source: impl Into<Arc<str>>, metadata: CellMetadata) -> Self {
        let source = source.into();
        match cell_type {
            "code" => Self::Code(CodeCell {
                source,
                metadata,
                ..Default::default()
            }),
            "markdown" => Self::Markdown(TextCell { source, metadata }),
            "raw" => Self::Raw(TextCell { source, metadata }),
            other => Self::Unknown(UnknownCell {
                cell_type: other.to_string(),
                source,
                metadata,
            }),
        }
    }

    /// The nbformat `cell_type` tag.
    pub fn cell_type(&self) -> &str {
        match self {
            Self::Code(_) => "code",
            Self::Markdown(_) => "markdown",
            Self::Raw(_) => "raw",
            Self::Unknown(cell) => &cell.cell_type,
        }
    }

    pub fn source(&self) -> &Arc<str> {
        match self {
            Self::Code(cell) => &cell.source,
            Self::Markdown(cell) | Self::Raw(cell) => &cell.source,
            Self::Unknown(cell) => &cell.source,
        }
    }

    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Self::Code(cell) => &cell.metadata,
            Self::Markdown(cell) | Self::Raw(cell) => &cell.metadata,
            Self::Unknown(cell) => &cell.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known_types() {
        let meta = CellMetadata::default;
        assert!(matches!(Cell::from_tag("code", "x = 1", meta()), Cell::Code(_)));
        assert!(matches!(Cell::from_tag("markdown", "# Hi", meta()), Cell::Markdown(_)));
        assert!(matches!(Cell::from_tag("raw", "raw", meta()), Cell::Raw(_)));
    }

    #[test]
    fn test_from_tag_unknown_keeps_tag() {
        let cell = Cell::from_tag("heading", "Title", CellMetadata::default());
        assert_eq!(cell.cell_type(), "heading");
        assert_eq!(cell.source().as_ref(), "Title");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(CellId::generate(), CellId::generate());
    }
}
