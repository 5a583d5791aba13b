//! Strict array extraction from model output.
//!
//! Models wrap their JSON in prose or code fences often enough that the
//! reply cannot be decoded directly. This locates the first `[` that opens
//! an array of objects, follows square-bracket depth to its matching `]`,
//! and decodes that slice.
//!
//! Only `[`/`]` are counted. A bracket inside a string literal throws the
//! count off; the slice then fails to decode and the batch fails with it.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Errors from locating or decoding the array.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no JSON array found in model output")]
    NoArrayFound,
    #[error("unbalanced JSON array in model output")]
    UnbalancedArray,
    #[error("JSON array in model output failed to decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `[`, any whitespace, `{`. regex-lite's `\s` is ASCII-only, so the
/// Unicode spaces a model may emit (NBSP, em space, ideographic space)
/// are listed explicitly.
const ARRAY_START: &str = "\\[[\\s\u{1c}-\u{1f}\u{85}\u{a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}]*\\{";

fn array_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ARRAY_START).expect("array start pattern is valid"))
}

/// Byte range of the first bracket-balanced array-of-objects literal.
fn locate_array(text: &str) -> Result<(usize, usize), ExtractError> {
    let start = array_start()
        .find(text)
        .ok_or(ExtractError::NoArrayFound)?
        .start();

    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((start, start + offset + 1));
                }
            }
            _ => {}
        }
    }
    Err(ExtractError::UnbalancedArray)
}

/// Find and decode the first JSON array of objects in `text`.
pub fn extract_json_array(text: &str) -> Result<Vec<serde_json::Value>, ExtractError> {
    let (start, end) = locate_array(text)?;
    Ok(serde_json::from_str(&text[start..end])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_array_between_noise() {
        let items = extract_json_array(r#"noise [ {"a":1} , {"b":2} ] trailing"#).unwrap();
        assert_eq!(items, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn extracts_from_code_fence() {
        let text = "Here you go:\n```json\n[\n  {\"firstName\": \"Ada\"}\n]\n```\nEnjoy!";
        let items = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"firstName": "Ada"})]);
    }

    #[test]
    fn skips_brackets_not_followed_by_an_object() {
        let text = r#"[note] see [1, 2] then [{"a": [1, [2]]}] and [{"b": 3}]"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"a": [1, [2]]})]);
    }

    #[test]
    fn whitespace_between_brackets_is_allowed() {
        let items = extract_json_array("[\n\t  \r\n{\"a\": 1}]").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn unicode_whitespace_between_brackets_still_locates_the_array() {
        for text in [
            "[\u{a0}{\"a\": 1}]",
            "[\u{3000}\n\u{2003}{\"a\": 1}]",
            "[\u{85}\u{202f}{\"a\": 1}]",
        ] {
            assert_eq!(locate_array(text).unwrap(), (0, text.len()), "{text:?}");
            // JSON itself only allows ASCII whitespace, so the slice is found but rejected.
            let err = extract_json_array(text).unwrap_err();
            assert!(matches!(err, ExtractError::Decode(_)), "{text:?}: {err}");
        }
    }

    #[test]
    fn zero_width_space_is_not_whitespace() {
        let err = extract_json_array("[\u{200b}{\"a\": 1}]").unwrap_err();
        assert!(matches!(err, ExtractError::NoArrayFound));
    }

    #[test]
    fn non_ascii_content_survives() {
        let items = extract_json_array("→ [{\"notes\": \"Café owner in Zürich.\"}] ←").unwrap();
        assert_eq!(items[0]["notes"], "Café owner in Zürich.");
    }

    #[test]
    fn no_array_of_objects_is_an_error() {
        for text in ["", "plain prose", "[1, 2, 3]", "{\"a\": 1}", "[ ] {"] {
            let err = extract_json_array(text).unwrap_err();
            assert!(matches!(err, ExtractError::NoArrayFound), "{text:?}: {err}");
        }
    }

    #[test]
    fn unclosed_array_is_unbalanced() {
        let err = extract_json_array(r#"[ {"a":1} "#).unwrap_err();
        assert!(matches!(err, ExtractError::UnbalancedArray));
    }

    #[test]
    fn balanced_but_malformed_slice_fails_to_decode() {
        let err = extract_json_array(r#"[{"a": 1,}]"#).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn bracket_inside_string_desynchronizes_the_scan() {
        let err = extract_json_array(r#"[{"notes": "closes ] early"}]"#).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }
}
