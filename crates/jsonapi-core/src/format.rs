//! Pretty-printing of resolved JSON

use crate::{Error, Result};

/// Slice from the first `{` to the last `}`, or the whole text if either is missing
fn object_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if close > open => &text[open..=close],
        _ => text,
    }
}

/// Parse `text` as JSON and re-serialize it with 2-space indentation.
///
/// On parse failure the error keeps the original, unformatted text so it can
/// still be shown (see [`Error::raw_text`]).
pub fn format_json(text: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(object_span(text)).map_err(|source| Error::MalformedJson {
            raw: text.to_string(),
            source,
        })?;

    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_prints_with_two_spaces() {
        let out = format_json(r#"{"ok":true,"user":{"name":"vitalik.eth"}}"#).unwrap();
        assert_eq!(
            out,
            "{\n  \"ok\": true,\n  \"user\": {\n    \"name\": \"vitalik.eth\"\n  }\n}"
        );
    }

    #[test]
    fn test_keeps_key_order() {
        let out = format_json(r#"{"time":"1","block":"2","erc":20}"#).unwrap();
        let time = out.find("time").unwrap();
        let block = out.find("block").unwrap();
        let erc = out.find("erc").unwrap();
        assert!(time < block && block < erc);
    }

    #[test]
    fn test_ignores_stray_bytes_around_object() {
        let out = format_json("\u{1}\u{2}{\"a\":1}\u{0}\u{0}").unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_truncated_json_keeps_raw_text() {
        let err = format_json(r#"{"ok":true"#).unwrap_err();
        assert!(matches!(err, Error::MalformedJson { .. }));
        assert_eq!(err.raw_text(), Some(r#"{"ok":true"#));
    }

    #[test]
    fn test_non_object_text() {
        let err = format_json("not json").unwrap_err();
        assert_eq!(err.raw_text(), Some("not json"));
    }
}
