//! The notebook renderer.
//!
//! [`NotebookRenderer`] caches the current document and the context derived
//! from it. A new document is detected by reference identity
//! ([`Arc::ptr_eq`]), never by comparing contents: handing in an equal but
//! distinct document always recomputes and advances [`generation`].
//!
//! Render passes are recomputed from scratch every time and hold no state.
//!
//! [`generation`]: NotebookRenderer::generation

use std::sync::Arc;

use crate::config::{RenderConfig, Theme};
use crate::dispatch::{DocumentContext, RenderDescriptor, classify};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::transform::TransformRegistry;

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// Theme signal for the styling layer.
    pub theme: Theme,
    /// Generation of the document this pass was computed from.
    pub generation: u64,
    /// Language used for code cells.
    pub language: String,
    /// One descriptor per entry of the document's cell order.
    pub cells: Vec<RenderDescriptor>,
}

/// Renders notebook documents into descriptors.
#[derive(Debug)]
pub struct NotebookRenderer {
    config: RenderConfig,
    document: Arc<Document>,
    context: DocumentContext,
    generation: u64,
}

impl NotebookRenderer {
    /// Create a renderer showing the placeholder document.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_document(config, Arc::new(Document::placeholder()))
    }

    pub fn with_document(config: RenderConfig, document: Arc<Document>) -> Self {
        let context = DocumentContext::new(document.metadata());
        Self {
            config,
            document,
            context,
            generation: 0,
        }
    }

    /// Supply a document.
    ///
    /// Returns `true` if `document` is a different reference from the cached
    /// one, in which case the cache is replaced and the generation advances.
    pub fn set_document(&mut self, document: Arc<Document>) -> bool {
        if Arc::ptr_eq(&self.document, &document) {
            return false;
        }

        self.context = DocumentContext::new(document.metadata());
        self.document = document;
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            cells = self.document.len(),
            language = self.context.language(),
            "document replaced"
        );
        true
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Incremented each time a new document reference is supplied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.config.registry
    }

    pub fn language(&self) -> &str {
        self.context.language()
    }

    /// Classify every cell in display order.
    ///
    /// Fails only if the cell order names a cell that does not exist.
    pub fn render(&self) -> Result<RenderPass> {
        let cells = self
            .document
            .cell_order()
            .iter()
            .map(|id| {
                let cell = self
                    .document
                    .cell(id)
                    .ok_or_else(|| Error::MissingCell(id.clone()))?;
                Ok(RenderDescriptor {
                    id: id.clone(),
                    view: classify(cell, &self.context),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RenderPass {
            theme: self.config.theme,
            generation: self.generation,
            language: self.context.language().to_string(),
            cells,
        })
    }
}

impl Default for NotebookRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::CellKind;
    use crate::model::Cell;

    #[test]
    fn test_default_renders_placeholder() {
        let renderer = NotebookRenderer::default();
        let pass = renderer.render().unwrap();

        assert_eq!(pass.theme, Theme::Light);
        assert_eq!(pass.language, "text");
        assert_eq!(pass.cells.len(), 1);
        assert_eq!(pass.cells[0].kind(), CellKind::Code);
    }

    #[test]
    fn test_same_reference_does_not_recompute() {
        let doc = Arc::new(Document::empty().append_cell(Cell::code("1")));
        let mut renderer = NotebookRenderer::new(RenderConfig::new());

        assert!(renderer.set_document(doc.clone()));
        assert!(!renderer.set_document(doc.clone()));
        assert_eq!(renderer.generation(), 1);
    }

    #[test]
    fn test_equal_but_distinct_reference_recomputes() {
        let doc = Document::empty().append_cell(Cell::code("1"));
        let mut renderer = NotebookRenderer::with_document(RenderConfig::new(), Arc::new(doc.clone()));

        assert!(renderer.set_document(Arc::new(doc)));
        assert_eq!(renderer.generation(), 1);
    }

    #[test]
    fn test_theme_signal() {
        let renderer = NotebookRenderer::new(RenderConfig::new().with_theme(Theme::Dark));
        assert_eq!(renderer.render().unwrap().theme, Theme::Dark);
    }
}
