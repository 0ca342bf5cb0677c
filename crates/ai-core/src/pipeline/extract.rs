//! Locates a parseable JSON object inside sanitized model output.

use serde_json::Value;

/// Why extraction failed, for diagnostic logging by the caller.
#[derive(Debug)]
pub struct ExtractError {
    /// The brace-delimited substring that was tried, when one was found.
    pub attempted: Option<String>,
}

/// Recovers a JSON object from the text.
///
/// Tries a direct parse first. If that does not yield an object, falls back
/// to the span from the first `{` through the last `}` and parses that.
/// Models occasionally surround the object with commentary despite
/// instructions; the outer-brace span recovers the common case without a
/// grammar-aware scan. Unrelated braces inside prose can defeat it; the
/// failure then carries the attempted span so the caller can log it.
pub fn extract_object(text: &str) -> Result<Value, ExtractError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return Ok(value);
        }
    }

    let (start, end) = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(ExtractError { attempted: None }),
    };

    let candidate = &text[start..=end];
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) if value.is_object() => Ok(value),
        _ => Err(ExtractError {
            attempted: Some(candidate.to_string()),
        }),
    }
}
