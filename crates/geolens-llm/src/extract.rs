//! Fence-stripping and JSON-substring extraction for model responses.
//!
//! Model output that should be structured data routinely arrives wrapped in
//! markdown code fences, or surrounded by prose. Every structured-response
//! consumer in this crate goes through [`extract_structured_payload`]
//! rather than re-implementing its own cleanup.

use regex::Regex;

use crate::error::LlmError;

/// Which top-level JSON value to extract from the raw response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Array,
    Object,
}

/// Strips code fences and returns the first top-level bracketed substring.
///
/// The span runs from the first opening bracket of the requested shape to
/// its balancing close, tracking nesting depth and skipping brackets
/// inside JSON string literals, so trailing prose (even bracketed prose)
/// is never swept into the payload. No partial recovery is attempted; the
/// caller parses the returned slice and decides what a parse failure means.
///
/// # Errors
///
/// Returns [`LlmError::Extraction`] when no balanced bracketed substring
/// of the requested shape exists.
pub fn extract_structured_payload(raw: &str, shape: PayloadShape) -> Result<String, LlmError> {
    let fence = Regex::new(r"```(?:json)?").expect("valid fence regex");
    let stripped = fence.replace_all(raw, "");

    let (open, close) = match shape {
        PayloadShape::Array => ('[', ']'),
        PayloadShape::Object => ('{', '}'),
    };

    balanced_span(&stripped, open, close)
        .map(str::to_owned)
        .ok_or(LlmError::Extraction)
}

/// First balanced `open..close` span, quote- and escape-aware.
fn balanced_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..=start + offset]);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_passes_through() {
        let payload = extract_structured_payload(r#"[{"domain":"a.com"}]"#, PayloadShape::Array)
            .expect("should extract");
        assert_eq!(payload, r#"[{"domain":"a.com"}]"#);
    }

    #[test]
    fn fenced_array_equals_bare_array() {
        let bare = r#"[{"domain":"a.com"},{"domain":"b.com"}]"#;
        let fenced = format!("```json\n{bare}\n```");

        let from_bare =
            extract_structured_payload(bare, PayloadShape::Array).expect("bare extracts");
        let from_fenced =
            extract_structured_payload(&fenced, PayloadShape::Array).expect("fenced extracts");

        assert_eq!(from_bare.trim(), from_fenced.trim());
    }

    #[test]
    fn surrounding_prose_is_discarded() {
        let raw = "Here are the competitors you asked for:\n[\"a.com\", \"b.com\"]\nHope it helps!";
        let payload =
            extract_structured_payload(raw, PayloadShape::Array).expect("should extract");
        assert_eq!(payload, r#"["a.com", "b.com"]"#);
    }

    #[test]
    fn object_shape_extracts_braces() {
        let raw = "```\n{\"persona\": \"ops lead\", \"painPoint\": \"manual reporting\"}\n```";
        let payload =
            extract_structured_payload(raw, PayloadShape::Object).expect("should extract");
        assert!(payload.starts_with('{') && payload.ends_with('}'));
    }

    #[test]
    fn trailing_bracketed_prose_is_not_swept_in() {
        let raw = r#"[{"domain":"a.com"}] (see [1] for sources)"#;
        let payload =
            extract_structured_payload(raw, PayloadShape::Array).expect("should extract");
        assert_eq!(payload, r#"[{"domain":"a.com"}]"#);
        serde_json::from_str::<serde_json::Value>(&payload).expect("span parses");
    }

    #[test]
    fn nested_brackets_stay_inside_the_span() {
        let raw = r#"result: [["a", "b"], ["c"]] done"#;
        let payload =
            extract_structured_payload(raw, PayloadShape::Array).expect("should extract");
        assert_eq!(payload, r#"[["a", "b"], ["c"]]"#);
    }

    #[test]
    fn brackets_inside_string_literals_do_not_close_the_span() {
        let raw = r#"{"note": "a ] b } c", "score": 1} trailing"#;
        let payload =
            extract_structured_payload(raw, PayloadShape::Object).expect("should extract");
        assert_eq!(payload, r#"{"note": "a ] b } c", "score": 1}"#);
    }

    #[test]
    fn unbalanced_opening_bracket_is_a_hard_error() {
        assert!(extract_structured_payload(r#"["a.com", "b.com"#, PayloadShape::Array).is_err());
    }

    #[test]
    fn missing_array_is_a_hard_error() {
        let err = extract_structured_payload("no structured data here", PayloadShape::Array)
            .expect_err("should fail");
        assert!(err
            .to_string()
            .contains("failed to extract structured data"));
    }

    #[test]
    fn object_not_accepted_when_array_requested() {
        let raw = r#"{"domain": "a.com"}"#;
        assert!(extract_structured_payload(raw, PayloadShape::Array).is_err());
    }
}
