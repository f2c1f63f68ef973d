//! The immutable notebook document.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::cell::{Cell, CellId};
use super::metadata::DocumentMetadata;
use crate::error::{Error, Result};

/// Source of the placeholder cell shown when no document is supplied.
pub const PLACEHOLDER_SOURCE: &str = "# where's the content?";

/// An immutable notebook document.
///
/// Cells are shared between documents derived from one another, so
/// [`Document::append_cell`] copies only the order and the map of handles.
/// There is no way to mutate a document in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    metadata: Arc<DocumentMetadata>,
    cell_order: Vec<CellId>,
    cell_map: FxHashMap<CellId, Arc<Cell>>,
}

impl Document {
    /// Build a document, checking that every ordered id has a cell.
    ///
    /// Ids may repeat in `cell_order`; such a cell is rendered once per entry.
    pub fn new(
        metadata: DocumentMetadata,
        cell_order: Vec<CellId>,
        cells: impl IntoIterator<Item = (CellId, Cell)>,
    ) -> Result<Self> {
        let cell_map: FxHashMap<CellId, Arc<Cell>> = cells
            .into_iter()
            .map(|(id, cell)| (id, Arc::new(cell)))
            .collect();

        if let Some(missing) = cell_order.iter().find(|id| !cell_map.contains_key(*id)) {
            return Err(Error::MissingCell(missing.clone()));
        }

        Ok(Self {
            metadata: Arc::new(metadata),
            cell_order,
            cell_map,
        })
    }

    /// An empty document with default metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-code-cell document used when the host supplies nothing.
    pub fn placeholder() -> Self {
        Self::empty().append_cell(Cell::code(PLACEHOLDER_SOURCE))
    }

    /// Start an empty document with the given metadata.
    pub fn with_metadata(metadata: DocumentMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata),
            ..Self::default()
        }
    }

    /// A new document with `cell` appended under a fresh id.
    pub fn append_cell(&self, cell: Cell) -> Self {
        self.append_cell_with_id(CellId::generate(), cell)
    }

    /// A new document with `cell` appended under `id`.
    ///
    /// If `id` already exists its cell is replaced at every position it is
    /// listed, and the id is listed once more at the end.
    pub fn append_cell_with_id(&self, id: CellId, cell: Cell) -> Self {
        let mut next = self.clone();
        next.cell_map.insert(id.clone(), Arc::new(cell));
        next.cell_order.push(id);
        next
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Display order of cell ids.
    pub fn cell_order(&self) -> &[CellId] {
        &self.cell_order
    }

    pub fn cell(&self, id: &CellId) -> Option<&Arc<Cell>> {
        self.cell_map.get(id)
    }

    /// Number of distinct cells.
    pub fn cell_count(&self) -> usize {
        self.cell_map.len()
    }

    /// Number of entries in the display order.
    pub fn len(&self) -> usize {
        self.cell_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_missing_cell() {
        let err = Document::new(
            DocumentMetadata::default(),
            vec![CellId::from("a"), CellId::from("b")],
            [(CellId::from("a"), Cell::code("1"))],
        )
        .unwrap_err();

        match err {
            Error::MissingCell(id) => assert_eq!(id.as_str(), "b"),
            other => panic!("Expected MissingCell, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_in_order_are_kept() {
        let doc = Document::new(
            DocumentMetadata::default(),
            vec![CellId::from("a"), CellId::from("a")],
            [(CellId::from("a"), Cell::markdown("hi"))],
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.cell_count(), 1);
    }

    #[test]
    fn test_append_leaves_original_untouched() {
        let first = Document::empty().append_cell(Cell::code("x = 1"));
        let second = first.append_cell(Cell::markdown("# Notes"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);

        let shared = &first.cell_order()[0];
        assert!(Arc::ptr_eq(
            first.cell(shared).unwrap(),
            second.cell(shared).unwrap()
        ));
    }

    #[test]
    fn test_placeholder_has_single_code_cell() {
        let doc = Document::placeholder();
        assert_eq!(doc.len(), 1);

        let cell = doc.cell(&doc.cell_order()[0]).unwrap();
        assert_eq!(cell.cell_type(), "code");
        assert_eq!(cell.source().as_ref(), PLACEHOLDER_SOURCE);
    }
}
