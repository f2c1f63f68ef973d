//! Jupyter notebook (.ipynb) reading.
//!
//! Deserializes nbformat v4 JSON and converts it into an immutable
//! [`Document`].

use std::fs;
use std::path::Path;

use nbrender_core::{Cell, CellId, CellMetadata, CodeCell, Document, DocumentMetadata};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{IpynbError, IpynbResult};
use crate::outputs::convert_outputs;

/// The only nbformat major version this reader understands.
pub const SUPPORTED_NBFORMAT: u32 = 4;

/// A Jupyter notebook as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct JupyterNotebook {
    /// Notebook metadata
    #[serde(default)]
    pub metadata: Value,

    /// Format version
    pub nbformat: u32,

    /// Minor format version
    #[serde(default)]
    pub nbformat_minor: u32,

    /// Notebook cells
    #[serde(default)]
    pub cells: Vec<JupyterCell>,
}

/// A Jupyter cell.
#[derive(Debug, Clone, Deserialize)]
pub struct JupyterCell {
    /// Cell id (nbformat 4.5 and later)
    #[serde(default)]
    pub id: Option<String>,

    /// Cell type
    pub cell_type: String,

    /// Cell metadata
    #[serde(default)]
    pub metadata: Value,

    /// Cell source
    #[serde(default)]
    pub source: MultilineString,

    /// Cell outputs (for code cells)
    #[serde(default)]
    pub outputs: Vec<Value>,

    /// Execution count (for code cells)
    #[serde(default, deserialize_with = "execution_count")]
    pub execution_count: Option<u32>,
}

/// Read an execution count, treating negative, fractional or out-of-range
/// values as absent.
pub(crate) fn execution_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()))
}

/// Text stored either as one string or as a list of lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultilineString {
    Single(String),
    Lines(Vec<String>),
}

impl Default for MultilineString {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl MultilineString {
    /// Join the lines. Lines keep their own trailing newlines.
    pub fn into_string(self) -> String {
        match self {
            Self::Single(s) => s,
            Self::Lines(lines) => lines.concat(),
        }
    }
}

impl JupyterNotebook {
    /// Parse a notebook from JSON text.
    pub fn from_json(json: &str) -> IpynbResult<Self> {
        let notebook: Self = serde_json::from_str(json)?;
        if notebook.nbformat != SUPPORTED_NBFORMAT {
            return Err(IpynbError::UnsupportedFormat {
                major: notebook.nbformat,
                minor: notebook.nbformat_minor,
            });
        }
        Ok(notebook)
    }

    /// Read a notebook from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> IpynbResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| IpynbError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Convert into an immutable document.
    ///
    /// Cells without an id, or repeating an id already seen, get a fresh one.
    pub fn into_document(self) -> IpynbResult<Document> {
        let metadata = DocumentMetadata::from_value(self.metadata);

        let mut seen = FxHashSet::default();
        let mut order = Vec::with_capacity(self.cells.len());
        let mut cells = Vec::with_capacity(self.cells.len());

        for raw in self.cells {
            let id = match raw.id.as_deref() {
                Some(id) if !id.is_empty() && !seen.contains(id) => CellId::from(id),
                Some(id) => {
                    tracing::warn!("Cell id '{}' is empty or repeated, assigning a new one", id);
                    CellId::generate()
                }
                None => CellId::generate(),
            };
            seen.insert(id.as_str().to_string());

            order.push(id.clone());
            cells.push((id, convert_cell(raw)));
        }

        Ok(Document::new(metadata, order, cells)?)
    }
}

/// Convert a Jupyter cell into a document cell.
fn convert_cell(raw: JupyterCell) -> Cell {
    let metadata = CellMetadata::from_value(raw.metadata);
    let source = raw.source.into_string();

    match Cell::from_tag(&raw.cell_type, source, metadata) {
        Cell::Code(code) => Cell::Code(CodeCell {
            execution_count: raw.execution_count,
            outputs: convert_outputs(raw.outputs).into(),
            ..code
        }),
        other => other,
    }
}
