//! Output transform selection.
//!
//! A [`TransformRegistry`] pairs a priority-ordered list of MIME types with the
//! transforms registered for them. Selection walks the display order and takes
//! the first MIME type the output actually carries. The selector itself knows
//! nothing about particular MIME types; [`TransformRegistry::builtin`] is just
//! the default configuration.

mod builtin;

pub use builtin::{BuiltinTransform, DEFAULT_DISPLAY_ORDER};

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::model::Output;

/// Drawable content produced by a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Trusted HTML markup.
    Html(String),
    /// SVG document markup.
    Svg(String),
    /// Markdown source for the markdown/math pipeline.
    Markdown(String),
    /// LaTeX for the math renderer.
    Latex(String),
    /// Decoded raster image bytes.
    Image { mime_type: String, bytes: Vec<u8> },
    /// Structured JSON data.
    Json(Value),
    /// Script source.
    Javascript(String),
    /// Plain text.
    Text(String),
}

/// Renders one MIME type of output payload.
pub trait Transform: Send + Sync + fmt::Debug {
    /// Convert a payload. `None` when the payload cannot be interpreted.
    fn transform(&self, payload: &Value, metadata: &Map<String, Value>) -> Option<Rendered>;
}

/// Display order plus the transform registered for each MIME type.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    display_order: Vec<String>,
    transforms: FxHashMap<String, Arc<dyn Transform>>,
}

/// The transform chosen for one output.
#[derive(Debug, Clone, Copy)]
pub struct SelectedTransform<'a> {
    pub mime_type: &'a str,
    pub transform: &'a dyn Transform,
    pub payload: &'a Value,
    pub metadata: &'a Map<String, Value>,
}

impl SelectedTransform<'_> {
    /// Run the selected transform on its payload.
    pub fn apply(&self) -> Option<Rendered> {
        self.transform.transform(self.payload, self.metadata)
    }
}

impl TransformRegistry {
    /// An empty registry. Nothing renders until transforms are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default registry covering the common Jupyter MIME types.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &mime_type in DEFAULT_DISPLAY_ORDER {
            if let Some(transform) = BuiltinTransform::for_mime_type(mime_type) {
                registry.register(mime_type, Arc::new(transform));
            }
        }
        registry
    }

    /// Register a transform.
    ///
    /// A MIME type not yet in the display order is appended as the lowest
    /// priority; an existing entry keeps its position.
    pub fn register(&mut self, mime_type: impl Into<String>, transform: Arc<dyn Transform>) {
        let mime_type = mime_type.into();
        if !self.display_order.contains(&mime_type) {
            self.display_order.push(mime_type.clone());
        }
        self.transforms.insert(mime_type, transform);
    }

    /// Replace the display order.
    ///
    /// Entries without a registered transform are kept; they simply never
    /// match.
    pub fn set_display_order(&mut self, order: impl IntoIterator<Item = impl Into<String>>) {
        self.display_order = order.into_iter().map(Into::into).collect();
    }

    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }

    pub fn get(&self, mime_type: &str) -> Option<&dyn Transform> {
        self.transforms.get(mime_type).map(|t| t.as_ref())
    }

    pub fn is_registered(&self, mime_type: &str) -> bool {
        self.transforms.contains_key(mime_type)
    }
}

/// Pick the transform for an output.
///
/// Returns `None` for outputs without a MIME bundle and for bundles with no
/// MIME type in the display order.
pub fn select_transform<'a>(
    output: &'a Output,
    registry: &'a TransformRegistry,
) -> Option<SelectedTransform<'a>> {
    let (data, metadata) = output.bundle()?;

    registry.display_order.iter().find_map(|mime_type| {
        let payload = data.get(mime_type)?;
        let transform = registry.get(mime_type)?;
        Some(SelectedTransform {
            mime_type: mime_type.as_str(),
            transform,
            payload,
            metadata,
        })
    })
}

/// An output resolved for drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputView {
    /// A rich output rendered by the transform for `mime_type`.
    Rich { mime_type: String, content: Rendered },
    /// Stream text (`stdout`/`stderr`).
    Stream { name: String, text: String },
    /// An exception with its traceback.
    Error {
        ename: String,
        evalue: String,
        traceback: Vec<String>,
    },
}

/// Resolve every output of a cell, preserving order.
///
/// Outputs with no matching transform, and unrecognized output types, are
/// left out.
pub fn resolve_outputs(outputs: &[Output], registry: &TransformRegistry) -> Vec<OutputView> {
    outputs
        .iter()
        .filter_map(|output| resolve_output(output, registry))
        .collect()
}

fn resolve_output(output: &Output, registry: &TransformRegistry) -> Option<OutputView> {
    match output {
        Output::Stream { name, text } => Some(OutputView::Stream {
            name: name.clone(),
            text: text.clone(),
        }),
        Output::Error {
            ename,
            evalue,
            traceback,
        } => Some(OutputView::Error {
            ename: ename.clone(),
            evalue: evalue.clone(),
            traceback: traceback.clone(),
        }),
        Output::Unrecognized { output_type } => {
            tracing::debug!(output_type = %output_type, "skipping unrecognized output type");
            None
        }
        Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => {
            let Some(selected) = select_transform(output, registry) else {
                tracing::debug!(
                    mime_types = ?data.mime_types().collect::<Vec<_>>(),
                    "no transform registered for output"
                );
                return None;
            };

            let Some(content) = selected.apply() else {
                tracing::debug!(mime_type = selected.mime_type, "transform rejected payload");
                return None;
            };

            Some(OutputView::Rich {
                mime_type: selected.mime_type.to_string(),
                content,
            })
        }
    }
}
