//! Cell outputs.

use serde_json::{Map, Value};

/// MIME type → payload. Keys carry no ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeBundle(Map<String, Value>);

impl MimeBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the payload for a MIME type.
    pub fn with(mut self, mime_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        self.0.insert(mime_type.into(), payload.into());
        self
    }

    /// Payload for a MIME type.
    pub fn get(&self, mime_type: &str) -> Option<&Value> {
        self.0.get(mime_type)
    }

    /// Whether the bundle carries a representation for the MIME type.
    pub fn contains(&self, mime_type: &str) -> bool {
        self.0.contains_key(mime_type)
    }

    /// MIME types present in the bundle.
    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for MimeBundle {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One output of a code cell.
///
/// Output order within a cell is display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Result of the cell's last expression.
    ExecuteResult {
        execution_count: Option<u32>,
        data: MimeBundle,
        metadata: Map<String, Value>,
    },

    /// Rich display produced during execution.
    DisplayData {
        data: MimeBundle,
        metadata: Map<String, Value>,
    },

    /// Standard output or standard error text.
    Stream { name: String, text: String },

    /// Exception raised during execution.
    Error {
        ename: String,
        evalue: String,
        traceback: Vec<String>,
    },

    /// An `output_type` this renderer does not know.
    Unrecognized { output_type: String },
}

impl Output {
    /// A `display_data` output.
    pub fn display(data: MimeBundle) -> Self {
        Self::DisplayData {
            data,
            metadata: Map::new(),
        }
    }

    /// A `stream` output.
    pub fn stream(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Stream {
            name: name.into(),
            text: text.into(),
        }
    }

    /// The MIME bundle for rich outputs.
    pub fn bundle(&self) -> Option<(&MimeBundle, &Map<String, Value>)> {
        match self {
            Self::ExecuteResult { data, metadata, .. } | Self::DisplayData { data, metadata } => {
                Some((data, metadata))
            }
            Self::Stream { .. } | Self::Error { .. } | Self::Unrecognized { .. } => None,
        }
    }

    /// The nbformat `output_type` tag.
    pub fn output_type(&self) -> &str {
        match self {
            Self::ExecuteResult { .. } => "execute_result",
            Self::DisplayData { .. } => "display_data",
            Self::Stream { .. } => "stream",
            Self::Error { .. } => "error",
            Self::Unrecognized { output_type } => output_type,
        }
    }
}
