// Prompt constants for resume parsing and optimization.

/// Parse prompt template. Replace `{resume_text}` before sending.
pub const PARSE_PROMPT_TEMPLATE: &str = r#"Extract the structure of the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Jane Doe, Senior Backend Engineer",
  "summary": "One-paragraph professional summary, empty string if the resume has none",
  "sections": [
    {
      "heading": "Experience",
      "items": ["Senior Engineer at Acme, 2021-present", "Engineer at Initech, 2018-2021"]
    }
  ]
}

Rules:
- title is the candidate's name plus their most recent role when available.
- Preserve the resume's own section order.
- Each item is one bullet or one entry, verbatim where possible.

RESUME:
{resume_text}"#;

/// Optimization prompt template. Replace `{resume_text}` and
/// `{job_description}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below to better target the job description, without inventing facts.

Return a JSON object with this EXACT schema (no extra fields):
{
  "optimizedSummary": "Rewritten professional summary targeting this role",
  "rewrittenBullets": [
    {
      "original": "Worked on the caching layer",
      "rewritten": "Built the caching layer cutting p99 latency 40% across 3 services",
      "rationale": "Leads with the quantified outcome the role asks for"
    }
  ],
  "keywordsWoven": ["Rust", "latency"]
}

Rules:
- Use ONLY facts present in the resume. Never invent numbers or employers.
- keywordsWoven lists job-description keywords the rewrite works in naturally.
- Skip bullets that are already strong; include only ones you changed.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
