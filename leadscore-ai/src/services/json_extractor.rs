//! Structured extraction from free-form model output
//!
//! Models often wrap the requested JSON in prose or markdown fences. The
//! candidate span runs from the first `{` to the last `}`; there is no brace
//! balancing and no second candidate.

use serde_json::{Map, Value};

/// Extract a JSON object from model output
///
/// 1. Slice from the first `{` to the last `}` (inclusive).
/// 2. Parse strictly.
/// 3. On failure, strip ```` ```json ```` / ```` ``` ```` markers and
///    surrounding whitespace from the slice and parse once more.
///
/// Returns `None` when no span exists, both parses fail, or the object is
/// empty.
pub fn extract_json(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    let candidate = &text[start..=end];

    let object = parse_object(candidate).or_else(|| {
        let cleaned = candidate.replace("```json", "").replace("```", "");
        parse_object(cleaned.trim())
    })?;

    if object.is_empty() {
        None
    } else {
        Some(object)
    }
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
