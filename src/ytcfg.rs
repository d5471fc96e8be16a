//! Extraction of the `ytcfg` configuration blob and the request headers
//! derived from it.
//!
//! Every server-rendered page carries a `ytcfg.set({...})` call in an inline
//! script. The blob holds the API key, client name/version, identity token
//! and the anti-forgery (`XSRF_TOKEN`) value that follow-up requests need.

use serde_json::Value;

use crate::constants::WATCH_LATER_URL;
use crate::scrape;

/// Marks the script element that initialises the config blob.
const YTCFG_SIGNATURE: &str = "\"INNERTUBE_CONTEXT_CLIENT_VERSION\":";
const YTCFG_SET: &str = "ytcfg.set(";

#[derive(thiserror::Error, Debug)]
pub enum YtcfgError {
    #[error("no script element contains the ytcfg signature")]
    NotFound,
    #[error("ytcfg blob is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("ytcfg is missing key {0:?}")]
    MissingKey(String),
}

/// The per-page runtime configuration, kept as a raw JSON object.
#[derive(Debug, Clone)]
pub struct Ytcfg(Value);

impl Ytcfg {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A key that must be present and a string (tokens, version strings).
    pub fn string(&self, key: &str) -> Result<&str, YtcfgError> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| YtcfgError::MissingKey(key.to_string()))
    }

    /// A key rendered for use in a header; numbers are stringified since
    /// some fields (e.g. the client name) are numeric in the blob.
    fn header_string(&self, key: &str) -> Result<String, YtcfgError> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(YtcfgError::MissingKey(key.to_string())),
        }
    }

    /// The innertube context `client` object for API POST bodies. Absent
    /// context degrades to an empty object rather than failing the request.
    pub fn context_client(&self) -> Value {
        crate::path::resolve(&self.0, "INNERTUBE_CONTEXT.client")
            .map(Clone::clone)
            .unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

/// Locate and parse the `ytcfg` blob in a page. The first script element
/// containing the signature (document order) is authoritative.
pub fn find_ytcfg(html: &str) -> Result<Ytcfg, YtcfgError> {
    let script = scrape::script_texts(html)
        .find(|text| text.contains(YTCFG_SIGNATURE))
        .ok_or(YtcfgError::NotFound)?;
    let set_at = script.find(YTCFG_SET).ok_or(YtcfgError::NotFound)?;
    let start = set_at + YTCFG_SET.len();
    // A blob whose object never closes still gets handed to the parser so
    // the error comes back as Malformed, not NotFound.
    let object = scrape::object_after(script, start).unwrap_or(&script[start..]);
    let value: Value = serde_json::from_str(object)?;
    Ok(Ytcfg(value))
}

/// The standard header set every follow-up request carries, with values
/// copied verbatim from the config blob. The spf pair defaults to the Watch
/// Later page; call sites working on another page override it.
pub fn ytcfg_headers(ytcfg: &Ytcfg) -> Result<Vec<(&'static str, String)>, YtcfgError> {
    let pairs = vec![
        ("x-spf-previous", WATCH_LATER_URL.to_string()),
        ("x-spf-referer", WATCH_LATER_URL.to_string()),
        (
            "x-youtube-client-name",
            ytcfg.header_string("INNERTUBE_CONTEXT_CLIENT_NAME")?,
        ),
        (
            "x-youtube-client-version",
            ytcfg.header_string("INNERTUBE_CONTEXT_CLIENT_VERSION")?,
        ),
        ("x-youtube-identity-token", ytcfg.header_string("ID_TOKEN")?),
        ("x-youtube-page-cl", ytcfg.header_string("PAGE_CL")?),
        ("x-youtube-utc-offset", "-240".to_string()),
        (
            "x-youtube-variants-checksum",
            ytcfg.header_string("VARIANTS_CHECKSUM")?,
        ),
    ];
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ytcfg_from_script() {
        let html = concat!(
            "<html><script>var x = 1;</script>",
            r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"2.0","XSRF_TOKEN":"abc"});</script>"#,
            "</html>"
        );
        let cfg = find_ytcfg(html).unwrap();
        assert_eq!(cfg.string("XSRF_TOKEN").unwrap(), "abc");
        assert_eq!(cfg.string("INNERTUBE_CONTEXT_CLIENT_VERSION").unwrap(), "2.0");
    }

    #[test]
    fn first_candidate_wins() {
        let html = concat!(
            r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"1.0"});</script>"#,
            r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"9.9"});</script>"#,
        );
        let cfg = find_ytcfg(html).unwrap();
        assert_eq!(cfg.string("INNERTUBE_CONTEXT_CLIENT_VERSION").unwrap(), "1.0");
    }

    #[test]
    fn missing_signature_is_not_found() {
        let html = "<script>var foo = {};</script>";
        assert!(matches!(find_ytcfg(html), Err(YtcfgError::NotFound)));
    }

    #[test]
    fn truncated_blob_is_malformed() {
        // The marker is there but the object never closes.
        let html = r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"2.0"</script>"#;
        assert!(matches!(find_ytcfg(html), Err(YtcfgError::Malformed(_))));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let html =
            r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION": undefined});</script>"#;
        assert!(matches!(find_ytcfg(html), Err(YtcfgError::Malformed(_))));
    }

    #[test]
    fn headers_copied_verbatim() {
        let html = r#"<script>ytcfg.set({
            "INNERTUBE_CONTEXT_CLIENT_NAME": 1,
            "INNERTUBE_CONTEXT_CLIENT_VERSION": "2.20200101",
            "ID_TOKEN": "idtok",
            "PAGE_CL": 123456,
            "VARIANTS_CHECKSUM": "chk",
            "XSRF_TOKEN": "xsrf"
        });</script>"#;
        let cfg = find_ytcfg(html).unwrap();
        let headers = ytcfg_headers(&cfg).unwrap();
        let get = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("x-youtube-client-name"), "1");
        assert_eq!(get("x-youtube-client-version"), "2.20200101");
        assert_eq!(get("x-youtube-identity-token"), "idtok");
        assert_eq!(get("x-youtube-page-cl"), "123456");
        assert_eq!(get("x-youtube-variants-checksum"), "chk");
    }

    #[test]
    fn spf_headers_default_to_watch_later() {
        let html = r#"<script>ytcfg.set({
            "INNERTUBE_CONTEXT_CLIENT_NAME": 1,
            "INNERTUBE_CONTEXT_CLIENT_VERSION": "2.20200101",
            "ID_TOKEN": "idtok",
            "PAGE_CL": 123456,
            "VARIANTS_CHECKSUM": "chk"
        });</script>"#;
        let cfg = find_ytcfg(html).unwrap();
        let headers = ytcfg_headers(&cfg).unwrap();
        for name in ["x-spf-previous", "x-spf-referer"] {
            let value = headers.iter().find(|(k, _)| *k == name).map(|(_, v)| v);
            assert_eq!(value.map(String::as_str), Some(WATCH_LATER_URL));
        }
    }

    #[test]
    fn missing_header_key_is_an_error() {
        let html = r#"<script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"2.0"});</script>"#;
        let cfg = find_ytcfg(html).unwrap();
        assert!(matches!(
            ytcfg_headers(&cfg),
            Err(YtcfgError::MissingKey(_))
        ));
    }
}
