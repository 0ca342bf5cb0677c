// Prompt constants for candidate ranking.

/// Ranking prompt template. Replace `{resume_text}` and `{job_description}`
/// before sending.
pub const RANK_PROMPT_TEMPLATE: &str = r#"Grade how well the resume below fits the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 68,
  "matchedKeywords": ["Rust", "PostgreSQL"],
  "summary": "One or two sentences on why the candidate does or does not fit"
}

Rules:
- score is 0-100, where 100 is a perfect fit for the role.
- matchedKeywords lists role requirements the resume demonstrates.
- Judge the whole resume, not just keyword presence.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
