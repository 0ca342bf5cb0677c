//! Strips formatting artifacts models commonly wrap JSON in.

/// Removes a surrounding markdown code fence, labeled (```json) or
/// unlabeled (```), tried in that order. Absence of fences is a no-op;
/// this never fails.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}
