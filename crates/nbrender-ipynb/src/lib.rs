//! Jupyter notebook reader for nbrender.
//!
//! Converts `.ipynb` files into immutable [`Document`]s.
//!
//! # Architecture
//!
//! ```text
//! notebook.ipynb ─────► JupyterNotebook ─────► Document ─────► NotebookRenderer
//!                        (nbformat v4)      (nbrender-core)
//! ```

mod error;
mod ipynb;
mod outputs;

pub use error::{IpynbError, IpynbResult};
pub use ipynb::{JupyterCell, JupyterNotebook, MultilineString, SUPPORTED_NBFORMAT};
pub use outputs::{convert_output, convert_outputs};

use std::path::Path;

use nbrender_core::Document;

/// Read an `.ipynb` file into a document.
pub fn read_notebook(path: impl AsRef<Path>) -> IpynbResult<Document> {
    let path = path.as_ref();
    let document = JupyterNotebook::read_from_file(path)?.into_document()?;

    tracing::info!("Loaded {} ({} cells)", path.display(), document.len());

    Ok(document)
}

/// Parse `.ipynb` JSON text into a document.
pub fn parse_notebook(json: &str) -> IpynbResult<Document> {
    JupyterNotebook::from_json(json)?.into_document()
}

/// Get the default `.html` path for a notebook.
pub fn default_html_path(ipynb_path: impl AsRef<Path>) -> std::path::PathBuf {
    ipynb_path.as_ref().with_extension("html")
}
