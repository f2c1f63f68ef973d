//! Cell dispatch and resolution engine for rendering notebooks.
//!
//! This crate provides:
//! - An immutable notebook document model
//! - Language and visibility resolution from notebook metadata
//! - Cell classification into render descriptors
//! - MIME-ordered output transform selection
//! - A markdown pipeline with math interception and KaTeX typesetting
//! - A renderer with reference-identity change detection
//!
//! Drawing is left to the host; `nbrender-cli` ships an HTML host.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod markdown;
pub mod model;
pub mod resolve;
pub mod transform;

pub use config::{RenderConfig, RenderSettings, Theme};
pub use dispatch::{CellKind, CellView, DocumentContext, RenderDescriptor, classify};
pub use engine::{NotebookRenderer, RenderPass};
pub use error::{Error, Result};
pub use markdown::{KatexMarkup, KatexRenderer, MarkdownPipeline, MathRenderer, MathSpan};
pub use model::{
    Cell, CellId, CellMetadata, CodeCell, CodemirrorMode, Document, DocumentMetadata,
    LanguageInfo, MimeBundle, Output, TextCell, UnknownCell,
};
pub use resolve::{FALLBACK_LANGUAGE, Visibility, resolve_language, resolve_visibility};
pub use transform::{
    BuiltinTransform, DEFAULT_DISPLAY_ORDER, OutputView, Rendered, SelectedTransform, Transform,
    TransformRegistry, resolve_outputs, select_transform,
};
