//! JSON payload extraction.
//!
//! # Candidate order
//!
//! | Order | Candidate |
//! |-------|-----------|
//! | 1 | Contents of each fenced code block (` ``` ` or ` ```json `) holding an object or array |
//! | 2 | Bracketed regions: first `[` .. last `]`, first `{` .. last `}`, earliest opener first |
//! | 3 | The whole trimmed text |
//!
//! The first candidate that parses wins. Malformed JSON is never repaired.

use crate::core::string::truncate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Maximum length of the raw-text excerpt carried by [`ExtractionError`]
const SNIPPET_LEN: usize = 200;

/// Model output did not contain the expected structured data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} (model output: {snippet:?})")]
pub struct ExtractionError {
    /// What went wrong
    pub reason: String,
    /// Excerpt of the offending raw text
    pub snippet: String,
}

impl ExtractionError {
    pub fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            snippet: truncate(raw.trim(), SNIPPET_LEN),
        }
    }
}

/// Locate and parse the JSON payload embedded in `raw`.
///
/// ```
/// use pm_assist_domain::extract_json;
///
/// let value = extract_json("here is the data: ```json\n[1,2,3]\n``` thanks").unwrap();
/// assert_eq!(value, serde_json::json!([1, 2, 3]));
/// assert!(extract_json("no structured data here").is_err());
/// ```
pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    candidates(raw)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .ok_or_else(|| ExtractionError::new("No parseable JSON found", raw))
}

/// Extract JSON from `raw` and deserialize it into `T`.
pub fn extract_as<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractionError> {
    let value = extract_json(raw)?;
    serde_json::from_value(value)
        .map_err(|e| ExtractionError::new(format!("Unexpected JSON shape: {}", e), raw))
}

fn candidates(raw: &str) -> Vec<&str> {
    let mut out = fenced_blocks(raw);

    let mut regions: Vec<(usize, &str)> = [('[', ']'), ('{', '}')]
        .into_iter()
        .filter_map(|(open, close)| {
            let start = raw.find(open)?;
            let end = raw.rfind(close)?;
            (end > start).then(|| (start, &raw[start..=end]))
        })
        .collect();
    regions.sort_by_key(|(start, _)| *start);
    out.extend(regions.into_iter().map(|(_, region)| region));

    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
    out
}

/// Contents of every ``` fenced block, in order of appearance.
///
/// The info string after the opening fence (e.g. `json`) is skipped when it
/// is followed by a newline.
fn fenced_blocks(raw: &str) -> Vec<&str> {
    const FENCE: &str = "```";
    let mut blocks = Vec::new();
    let mut rest = raw;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };
        let inner = &after_open[..close];
        let body = match inner.find('\n') {
            Some(nl) if !inner[..nl].trim_start().starts_with(['{', '[']) => &inner[nl + 1..],
            _ => inner,
        };
        let body = body.trim();
        if body.starts_with(['{', '[']) {
            blocks.push(body);
        }
        rest = &after_open[close + FENCE.len()..];
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_fenced_json_with_prose() {
        let raw = "here is the data: ```json\n[1,2,3]\n``` thanks";
        assert_eq!(extract_json(raw).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "Sure!\n```\n{\"isValid\": true}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"isValid": true}));
    }

    #[test]
    fn test_inline_fence() {
        let raw = "```{\"a\": 1}```";
        assert_eq!(extract_json(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_scalar_fence_does_not_shadow_object() {
        let raw = "The count is\n```\n42\n```\nand the data: {\"isValid\": true}";
        assert_eq!(extract_json(raw).unwrap(), json!({"isValid": true}));
    }

    #[test]
    fn test_bare_object_with_preamble() {
        let raw = r#"Here is my answer: {"isValid": false, "response": "Hi!"} Hope that helps."#;
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"isValid": false, "response": "Hi!"})
        );
    }

    #[test]
    fn test_earliest_bracket_wins() {
        let raw = r#"{"questions": ["Who pays?", "Why now?"]}"#;
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"questions": ["Who pays?", "Why now?"]})
        );

        let raw = r#"[{"name": "Web"}, {"name": "Mobile"}]"#;
        assert_eq!(
            extract_json(raw).unwrap(),
            json!([{"name": "Web"}, {"name": "Mobile"}])
        );
    }

    #[test]
    fn test_falls_back_to_next_candidate() {
        // The array region is not JSON, the object region parses
        let raw = r#"Options [a, b] then {"ok": true}"#;
        assert_eq!(extract_json(raw).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_no_json_fails_with_snippet() {
        let err = extract_json("I'm sorry, I can't produce that.").unwrap_err();
        assert_eq!(err.snippet, "I'm sorry, I can't produce that.");
        assert!(err.to_string().contains("No parseable JSON"));
    }

    #[test]
    fn test_malformed_json_not_repaired() {
        assert!(extract_json("[1, 2, 3").is_err());
        assert!(extract_json(r#"{"a": 1,}"#).is_err());
    }

    #[test]
    fn test_snippet_is_truncated() {
        let raw = "x".repeat(1000);
        let err = extract_json(&raw).unwrap_err();
        assert!(err.snippet.len() <= SNIPPET_LEN);
        assert!(err.snippet.ends_with("..."));
    }

    #[test]
    fn test_round_trip_on_own_output() {
        let inputs = [
            "here is the data: ```json\n[1,2,3]\n``` thanks",
            r#"prefix {"name": "Stack", "pros": ["fast"], "n": 2.5} suffix"#,
            r#"["Question 1?", "Question 2?"]"#,
        ];
        for raw in inputs {
            let first = extract_json(raw).unwrap();
            let again = extract_json(&serde_json::to_string(&first).unwrap()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_extract_as_typed() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Shape {
            name: String,
        }

        let shape: Shape = extract_as("```json\n{\"name\": \"Web\"}\n```").unwrap();
        assert_eq!(shape.name, "Web");

        let err = extract_as::<Shape>("[1, 2]").unwrap_err();
        assert!(err.reason.starts_with("Unexpected JSON shape"));
    }
}
