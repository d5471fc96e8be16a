//! Flattening of the server's text renderers.
//!
//! Human-readable fields come back either as `{"simpleText": "..."}` or as
//! `{"runs": [{"text": "..."}, ...]}`. Both collapse to a plain string.

use serde_json::Value;

pub(crate) fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }
    let runs = value.get("runs")?.as_array()?;
    Some(
        runs.iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .concat(),
    )
}

/// Text at `path` under `root`, in either renderer form.
pub(crate) fn text_at(root: &Value, path: &str) -> Option<String> {
    crate::path::resolve(root, path).ok().and_then(text_of)
}
