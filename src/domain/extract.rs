//! Structured payload extraction from model replies.
//!
//! Even under schema-constrained decoding, replies can arrive wrapped in
//! markdown code fences or prose preamble. This module locates the JSON
//! payload, parses it, and validates it against the requested shape before
//! any caller trusts it.

use thiserror::Error;

use super::schema::{ResponseSchema, SchemaViolation};

/// Errors that can occur while decoding a structured reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Extracts and parses the JSON payload of a model reply.
///
/// Tries fenced code blocks first, then the first balanced object or array
/// found in the raw text.
pub fn extract_json_payload(response: &str) -> Result<serde_json::Value, ExtractionError> {
    let payload = locate_payload(response.trim());
    serde_json::from_str(&payload).map_err(|e| ExtractionError::Parse(e.to_string()))
}

/// Extracts the payload and validates it against the requested shape.
pub fn decode_structured(
    response: &str,
    schema: &ResponseSchema,
) -> Result<serde_json::Value, ExtractionError> {
    let value = extract_json_payload(response)?;
    schema.validate(&value)?;
    Ok(value)
}

fn locate_payload(trimmed: &str) -> String {
    if let Some(json) = extract_from_code_block(trimmed) {
        return json;
    }

    // Find whichever balanced JSON value comes first, object or array.
    let obj_start = trimmed.find('{');
    let arr_start = trimmed.find('[');

    let (start, open, close) = match (obj_start, arr_start) {
        (Some(o), Some(a)) if a < o => (a, '[', ']'),
        (Some(o), _) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (None, None) => return trimmed.to_string(),
    };

    extract_balanced(trimmed, start, open, close).unwrap_or_else(|| trimmed.to_string())
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced(s: &str, start: usize, open: char, close: char) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(s[start..start + offset + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_plain_json() {
        let value = extract_json_payload(r#"{"name": "Atlas", "value": 42}"#).unwrap();
        assert_eq!(value["name"], "Atlas");
        assert_eq!(value["value"], 42);
    }

    #[test]
    fn extracts_json_from_labeled_code_block() {
        let response = "Here's the update:\n\n```json\n{\"name\": \"Atlas\"}\n```\n\nDone!";
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["name"], "Atlas");
    }

    #[test]
    fn extracts_json_from_unlabeled_code_block() {
        let response = "```\n{\"name\": \"Atlas\"}\n```";
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["name"], "Atlas");
    }

    #[test]
    fn extracts_json_from_text_with_preamble() {
        let response = r#"Based on the conversation, here is the progress:
{"items": ["one", "two"]}
Anything else?"#;
        let value = extract_json_payload(response).unwrap();
        assert!(value["items"].is_array());
    }

    #[test]
    fn extracts_array_payloads() {
        let value = extract_json_payload(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn array_before_object_is_picked() {
        let response = r#"[1, 2, {"nested": true}] trailing {"not": "this"}"#;
        let value = extract_json_payload(response).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn braces_inside_strings_do_not_unbalance() {
        let response = r#"{"content": "use { and } freely", "done": true}"#;
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["content"], "use { and } freely");
    }

    #[test]
    fn multibyte_text_before_payload_is_handled() {
        let response = "Résumé établi — voici : {\"état\": \"prêt\"}";
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["état"], "prêt");
    }

    #[test]
    fn unparsable_text_is_a_parse_error() {
        let result = extract_json_payload("This is not JSON at all");
        assert!(matches!(result, Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn truncated_json_is_a_parse_error() {
        let result = extract_json_payload(r#"{"items": [{"id": 1}"#);
        assert!(matches!(result, Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn decode_structured_validates_shape() {
        let schema = ResponseSchema::object()
            .with_required_property("assistant_message", ResponseSchema::string())
            .with_required_property("updated_content", ResponseSchema::string());

        let good = r###"{"assistant_message": "done", "updated_content": "## Doc"}"###;
        assert_eq!(
            decode_structured(good, &schema).unwrap(),
            json!({"assistant_message": "done", "updated_content": "## Doc"})
        );

        let wrong_shape = r#"{"assistant_message": "done"}"#;
        assert!(matches!(
            decode_structured(wrong_shape, &schema),
            Err(ExtractionError::Schema(_))
        ));
    }

    #[test]
    fn decode_structured_accepts_fenced_payloads() {
        let schema =
            ResponseSchema::object().with_required_property("ready", ResponseSchema::boolean());
        let response = "```json\n{\"ready\": true}\n```";
        assert!(decode_structured(response, &schema).is_ok());
    }
}
