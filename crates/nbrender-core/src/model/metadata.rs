//! Typed views over the open-ended notebook and cell metadata maps.
//!
//! Only the keys the renderer acts on are given fields. Every other key is
//! retained in `extra` so documents written by notebook extensions still load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Document-wide metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentMetadata {
    /// Hide every code cell's source (set by the hide_input nbextension).
    #[serde(default, deserialize_with = "flag")]
    pub hide_input: Option<bool>,

    /// Kernel language description.
    #[serde(default, deserialize_with = "lenient")]
    pub language_info: Option<LanguageInfo>,

    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `language_info` block of the document metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LanguageInfo {
    /// Language name (e.g. `python`).
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Editor mode, either a bare mode name or a mode spec object.
    #[serde(default, deserialize_with = "lenient")]
    pub codemirror_mode: Option<CodemirrorMode>,

    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `language_info.codemirror_mode`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CodemirrorMode {
    /// A plain mode tag such as `"ruby"`.
    Name(String),
    /// A mode spec such as `{"name": "ipython", "version": 3}`.
    Spec {
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
        #[serde(flatten)]
        options: Map<String, Value>,
    },
}

/// Per-cell metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CellMetadata {
    /// nteract's input visibility flag.
    #[serde(rename = "inputHidden", default, deserialize_with = "flag")]
    pub input_hidden: Option<bool>,

    /// hide_input nbextension flag.
    #[serde(default, deserialize_with = "flag")]
    pub hide_input: Option<bool>,

    /// nteract's output visibility flag.
    #[serde(rename = "outputHidden", default, deserialize_with = "flag")]
    pub output_hidden: Option<bool>,

    /// Whether outputs are shown expanded. Absent means expanded.
    #[serde(rename = "outputExpanded", default, deserialize_with = "flag")]
    pub output_expanded: Option<bool>,

    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentMetadata {
    /// Parse document metadata from a JSON value, falling back to defaults
    /// when the value is not an object.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl CellMetadata {
    /// Parse cell metadata from a JSON value, falling back to defaults when
    /// the value is not an object.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Truthiness of a metadata value, matching how notebook frontends read flags.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a boolean flag from any JSON value. `null` counts as absent.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| truthy(&v)))
}

/// Deserialize `T`, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_metadata_flags() {
        let meta = CellMetadata::from_value(json!({
            "inputHidden": true,
            "outputExpanded": false,
            "tags": ["keep"]
        }));

        assert_eq!(meta.input_hidden, Some(true));
        assert_eq!(meta.output_expanded, Some(false));
        assert_eq!(meta.hide_input, None);
        assert!(meta.extra.contains_key("tags"));
    }

    #[test]
    fn test_flags_use_truthiness() {
        let meta = CellMetadata::from_value(json!({
            "inputHidden": 1,
            "hide_input": "",
            "outputHidden": {},
            "outputExpanded": null
        }));

        assert_eq!(meta.input_hidden, Some(true));
        assert_eq!(meta.hide_input, Some(false));
        assert_eq!(meta.output_hidden, Some(true));
        assert_eq!(meta.output_expanded, None);
    }

    #[test]
    fn test_codemirror_mode_shapes() {
        let named = DocumentMetadata::from_value(json!({
            "language_info": {"codemirror_mode": "ruby"}
        }));
        let object_mode = DocumentMetadata::from_value(json!({
            "language_info": {"codemirror_mode": {"name": "ipython", "version": 3}}
        }));

        assert_eq!(
            named.language_info.unwrap().codemirror_mode,
            Some(CodemirrorMode::Name("ruby".to_string()))
        );
        match object_mode.language_info.unwrap().codemirror_mode {
            Some(CodemirrorMode::Spec { name, options }) => {
                assert_eq!(name.as_deref(), Some("ipython"));
                assert_eq!(options.get("version"), Some(&json!(3)));
            }
            other => panic!("Expected mode spec, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_language_info_is_ignored() {
        let meta = DocumentMetadata::from_value(json!({
            "language_info": "python",
            "hide_input": true
        }));

        assert!(meta.language_info.is_none());
        assert_eq!(meta.hide_input, Some(true));
    }

    #[test]
    fn test_non_object_metadata_defaults() {
        assert_eq!(CellMetadata::from_value(json!(null)), CellMetadata::default());
        assert_eq!(
            DocumentMetadata::from_value(json!([1, 2])),
            DocumentMetadata::default()
        );
    }
}
