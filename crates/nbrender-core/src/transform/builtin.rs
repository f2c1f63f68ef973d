//! Built-in transforms for the common Jupyter MIME types.

use base64::Engine;
use serde_json::{Map, Value};

use super::{Rendered, Transform};

/// Default rendering priority, richest representation first.
pub const DEFAULT_DISPLAY_ORDER: &[&str] = &[
    "application/json",
    "application/javascript",
    "text/html",
    "text/markdown",
    "text/latex",
    "image/svg+xml",
    "image/gif",
    "image/png",
    "image/jpeg",
    "text/plain",
];

/// Transforms shipped with the default registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTransform {
    Json,
    Javascript,
    Html,
    Markdown,
    Latex,
    Svg,
    /// Base64-encoded raster image of the given MIME type.
    Image(&'static str),
    PlainText,
}

impl BuiltinTransform {
    /// The built-in transform for a MIME type, if there is one.
    pub fn for_mime_type(mime_type: &str) -> Option<Self> {
        let transform = match mime_type {
            "application/json" => Self::Json,
            "application/javascript" => Self::Javascript,
            "text/html" => Self::Html,
            "text/markdown" => Self::Markdown,
            "text/latex" => Self::Latex,
            "image/svg+xml" => Self::Svg,
            "image/gif" => Self::Image("image/gif"),
            "image/png" => Self::Image("image/png"),
            "image/jpeg" => Self::Image("image/jpeg"),
            "text/plain" => Self::PlainText,
            _ => return None,
        };
        Some(transform)
    }
}

impl Transform for BuiltinTransform {
    fn transform(&self, payload: &Value, _metadata: &Map<String, Value>) -> Option<Rendered> {
        let rendered = match self {
            Self::Json => Rendered::Json(payload.clone()),
            Self::Javascript => Rendered::Javascript(payload_text(payload)?),
            Self::Html => Rendered::Html(payload_text(payload)?),
            Self::Markdown => Rendered::Markdown(payload_text(payload)?),
            Self::Latex => Rendered::Latex(payload_text(payload)?),
            Self::Svg => Rendered::Svg(payload_text(payload)?),
            Self::Image(mime_type) => Rendered::Image {
                mime_type: (*mime_type).to_string(),
                bytes: decode_base64(&payload_text(payload)?)?,
            },
            Self::PlainText => Rendered::Text(payload_text(payload)?),
        };
        Some(rendered)
    }
}

/// Text payloads are stored either as one string or as a list of lines.
fn payload_text(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) => Some(s.clone()),
        Value::Array(lines) => lines
            .iter()
            .map(|line| line.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|lines| lines.concat()),
        _ => None,
    }
}

/// Decode base64 image data, which notebooks often wrap across lines.
fn decode_base64(encoded: &str) -> Option<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    match base64::engine::general_purpose::STANDARD.decode(compact) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!("invalid base64 image payload: {}", e);
            None
        }
    }
}
