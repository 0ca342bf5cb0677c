// Cross-cutting prompt fragments. Each feature module defines its own
// prompts.rs alongside it and reuses these.

/// System prompt enforcing JSON-only output for every model call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to feature prompts that restate the expected shape.
pub const SHAPE_REMINDER: &str = "\
    Return a single JSON object with EXACTLY the fields shown above. \
    No extra fields, no comments, no trailing text.";
