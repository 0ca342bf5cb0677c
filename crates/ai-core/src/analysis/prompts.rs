// Prompt constants for resume analysis.

/// Analysis prompt template. Replace `{resume_text}` and `{job_description}`
/// before sending.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume reviewer. Score the resume below against the job description and explain the match.

Return a JSON object with this EXACT schema (no extra fields):
{
  "overallScore": 72,
  "strengths": ["Direct Rust experience on a production service"],
  "weaknesses": ["No mention of Kubernetes"],
  "missingElements": ["Quantified impact on the platform migration"],
  "suggestions": ["Lead with the latency numbers from the caching project"],
  "keywordAnalysis": {
    "presentKeywords": ["Rust", "PostgreSQL"],
    "missingKeywords": ["Kubernetes", "Terraform"]
  }
}

Rules:
- overallScore is 0-100, where 100 means the resume fully covers the role.
- presentKeywords are role keywords the resume already demonstrates.
- missingKeywords are role keywords the resume never mentions.
- Every strength and weakness must cite something concrete from the texts.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
