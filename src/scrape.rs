//! Helpers for pulling embedded JSON out of server-rendered HTML.
//!
//! YouTube ships its page state as inline `<script>` assignments. These
//! helpers walk the script blocks in document order and slice a balanced
//! `{...}` object out of the surrounding assignment syntax.

/// Iterate over the text of every inline `<script>` element, in document
/// order.
pub(crate) fn script_texts(html: &str) -> impl Iterator<Item = &str> {
    let mut rest = html;
    std::iter::from_fn(move || {
        let open = rest.find("<script")?;
        let after_open = &rest[open..];
        let body_start = open + after_open.find('>')? + 1;
        let body_end = body_start + rest[body_start..].find("</script>")?;
        let text = &rest[body_start..body_end];
        rest = &rest[body_end..];
        Some(text)
    })
}

/// Find the index of the `}` matching the `{` at `start`, skipping string
/// literals and escapes. Returns `None` if the object never closes.
pub(crate) fn find_matching_brace(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => (),
        }
    }
    None
}

/// Slice the `{...}` object that starts at the first `{` at or after
/// `marker_end` in `text`.
pub(crate) fn object_after(text: &str, marker_end: usize) -> Option<&str> {
    let start = marker_end + text[marker_end..].find('{')?;
    let end = find_matching_brace(text, start)?;
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_in_document_order() {
        let html = r#"<html><script nonce="x">first</script><p>hi</p><script>second</script>"#;
        let texts: Vec<&str> = script_texts(html).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn no_scripts() {
        assert_eq!(script_texts("<html><body/></html>").count(), 0);
    }

    #[test]
    fn brace_matching_nested() {
        let text = r#"x = {"a": {"b": [1, {"c": 2}]}}; rest"#;
        let start = text.find('{').unwrap();
        let end = find_matching_brace(text, start).unwrap();
        assert_eq!(&text[start..=end], r#"{"a": {"b": [1, {"c": 2}]}}"#);
    }

    #[test]
    fn brace_matching_skips_strings() {
        let text = r#"{"a": "}\"{", "b": 1}"#;
        let end = find_matching_brace(text, 0).unwrap();
        assert_eq!(end, text.len() - 1);
    }

    #[test]
    fn unterminated_object() {
        assert!(find_matching_brace(r#"{"a": 1"#, 0).is_none());
    }

    #[test]
    fn object_after_marker() {
        let text = r#"ytcfg.set({"A": 1}); more"#;
        let marker_end = text.find("ytcfg.set(").unwrap() + "ytcfg.set(".len();
        assert_eq!(object_after(text, marker_end).unwrap(), r#"{"A": 1}"#);
    }
}
