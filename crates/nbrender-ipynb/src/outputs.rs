//! Output conversion.
//!
//! Converts nbformat output objects into document outputs. Outputs are read
//! one at a time, so a malformed or unfamiliar output never fails the whole
//! notebook.

use nbrender_core::{MimeBundle, Output};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ipynb::MultilineString;

#[derive(Debug, Deserialize)]
struct RichOutput {
    #[serde(default, deserialize_with = "crate::ipynb::execution_count")]
    execution_count: Option<u32>,
    #[serde(default)]
    data: Map<String, Value>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct StreamOutput {
    name: String,
    #[serde(default)]
    text: MultilineString,
}

#[derive(Debug, Deserialize)]
struct ErrorOutput {
    #[serde(default)]
    ename: String,
    #[serde(default)]
    evalue: String,
    #[serde(default)]
    traceback: Vec<String>,
}

/// Convert a cell's raw outputs, preserving order.
pub fn convert_outputs(raw: Vec<Value>) -> Vec<Output> {
    raw.into_iter().map(convert_output).collect()
}

/// Convert one raw output.
///
/// Unknown or malformed outputs become [`Output::Unrecognized`].
pub fn convert_output(raw: Value) -> Output {
    let output_type = raw
        .get("output_type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let converted = match output_type.as_str() {
        "execute_result" => serde_json::from_value::<RichOutput>(raw).ok().map(|o| {
            Output::ExecuteResult {
                execution_count: o.execution_count,
                data: MimeBundle::from(o.data),
                metadata: o.metadata,
            }
        }),
        "display_data" => serde_json::from_value::<RichOutput>(raw)
            .ok()
            .map(|o| Output::DisplayData {
                data: MimeBundle::from(o.data),
                metadata: o.metadata,
            }),
        "stream" => serde_json::from_value::<StreamOutput>(raw)
            .ok()
            .map(|o| Output::stream(o.name, o.text.into_string())),
        "error" => serde_json::from_value::<ErrorOutput>(raw)
            .ok()
            .map(|o| Output::Error {
                ename: o.ename,
                evalue: o.evalue,
                traceback: o.traceback,
            }),
        _ => None,
    };

    converted.unwrap_or_else(|| {
        tracing::debug!("Keeping output of type '{}' as unrecognized", output_type);
        Output::Unrecognized { output_type }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execute_result() {
        let output = convert_output(json!({
            "output_type": "execute_result",
            "execution_count": 4,
            "data": {"text/plain": ["42"]},
            "metadata": {}
        }));

        match output {
            Output::ExecuteResult {
                execution_count,
                data,
                ..
            } => {
                assert_eq!(execution_count, Some(4));
                assert_eq!(data.get("text/plain"), Some(&json!(["42"])));
            }
            other => panic!("Expected ExecuteResult, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_execution_count_keeps_output() {
        let output = convert_output(json!({
            "output_type": "execute_result",
            "execution_count": -5,
            "data": {"text/plain": "x"},
            "metadata": {}
        }));

        assert!(matches!(
            output,
            Output::ExecuteResult {
                execution_count: None,
                ..
            }
        ));
    }

    #[test]
    fn test_stream_lines_are_joined() {
        let output = convert_output(json!({
            "output_type": "stream",
            "name": "stdout",
            "text": ["hello\n", "world\n"]
        }));

        assert_eq!(output, Output::stream("stdout", "hello\nworld\n"));
    }

    #[test]
    fn test_error_output() {
        let output = convert_output(json!({
            "output_type": "error",
            "ename": "KeyError",
            "evalue": "'x'",
            "traceback": ["line 1", "line 2"]
        }));

        assert!(matches!(output, Output::Error { ref ename, .. } if ename == "KeyError"));
    }

    #[test]
    fn test_unknown_and_malformed_outputs() {
        let unknown = convert_output(json!({"output_type": "update_display_data", "data": {}}));
        let malformed = convert_output(json!({"output_type": "stream", "text": 3}));
        let untyped = convert_output(json!({"data": {}}));

        assert_eq!(unknown.output_type(), "update_display_data");
        assert_eq!(malformed.output_type(), "stream");
        assert!(matches!(malformed, Output::Unrecognized { .. }));
        assert_eq!(untyped.output_type(), "");
    }
}
