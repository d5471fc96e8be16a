//! Extraction of the bootstrap state blobs (`ytInitialData` and
//! `ytInitialGuideData`) embedded in server-rendered pages.
//!
//! Unlike the config blob these have no schema at all; they come back as raw
//! [`serde_json::Value`] trees for the path resolver to dig through.

use regex::Regex;
use serde_json::Value;

use crate::scrape;

#[derive(thiserror::Error, Debug)]
pub enum InitialDataError {
    #[error("no script element contains the {marker} blob")]
    NotFound { marker: &'static str },
    #[error("{marker} blob is not valid JSON")]
    Malformed {
        marker: &'static str,
        source: serde_json::Error,
    },
}

/// The general page-state blob.
pub fn initial_data(html: &str) -> Result<Value, InitialDataError> {
    extract_state(html, "ytInitialData")
}

/// The navigation/guide blob, present on the homepage.
pub fn initial_guide_data(html: &str) -> Result<Value, InitialDataError> {
    extract_state(html, "ytInitialGuideData")
}

fn extract_state(html: &str, marker: &'static str) -> Result<Value, InitialDataError> {
    // Both `var ytInitialData = {...}` and `window["ytInitialData"] = {...}`
    // appear in the wild.
    let assignment = Regex::new(&format!(
        r#"(?:var\s+{m}|window\s*\[\s*"{m}"\s*\])\s*="#,
        m = marker
    ))
    .expect("marker regex");

    for script in scrape::script_texts(html) {
        let Some(found) = assignment.find(script) else {
            continue;
        };
        let object =
            scrape::object_after(script, found.end()).ok_or(InitialDataError::NotFound { marker })?;
        return serde_json::from_str(object)
            .map_err(|source| InitialDataError::Malformed { marker, source });
    }
    Err(InitialDataError::NotFound { marker })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn var_assignment_form() {
        let html = r#"<script>var ytInitialData = {"contents": {"ok": true}};</script>"#;
        let data = initial_data(html).unwrap();
        assert_eq!(data, json!({"contents": {"ok": true}}));
    }

    #[test]
    fn window_assignment_form() {
        let html = r#"<script>window["ytInitialData"] = {"a": [1, 2]};</script>"#;
        let data = initial_data(html).unwrap();
        assert_eq!(data, json!({"a": [1, 2]}));
    }

    #[test]
    fn guide_data_uses_its_own_marker() {
        let html = concat!(
            r#"<script>var ytInitialData = {"page": 1};</script>"#,
            r#"<script>var ytInitialGuideData = {"items": []};</script>"#,
        );
        assert_eq!(initial_guide_data(html).unwrap(), json!({"items": []}));
        assert_eq!(initial_data(html).unwrap(), json!({"page": 1}));
    }

    #[test]
    fn missing_blob_is_not_found() {
        let err = initial_data("<script>var other = {};</script>").unwrap_err();
        assert!(matches!(
            err,
            InitialDataError::NotFound {
                marker: "ytInitialData"
            }
        ));
    }

    #[test]
    fn bad_json_is_malformed() {
        let html = r#"<script>var ytInitialData = {"a": nope};</script>"#;
        assert!(matches!(
            initial_data(html).unwrap_err(),
            InitialDataError::Malformed { .. }
        ));
    }
}
