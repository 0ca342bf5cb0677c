// Prompt constants for interview preparation.

/// Question-generation prompt template. Replace `{job_description}` and
/// `{count}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Write {count} interview questions for the role described below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "id": 1,
      "question": "Walk me through a service you made significantly faster. What did you measure?",
      "category": "technical",
      "difficulty": "medium"
    }
  ]
}

Rules:
- id is a sequential integer starting at 1.
- category is one of: "technical", "behavioral", "situational".
- difficulty is one of: "easy", "medium", "hard".
- Mix categories and difficulties; tie every question to the role.

JOB DESCRIPTION:
{job_description}"#;

/// Answer-rating prompt template. Replace `{question}` and `{answer}` before
/// sending.
pub const RATE_ANSWER_PROMPT_TEMPLATE: &str = r#"Rate the candidate's answer to the interview question below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 7,
  "feedback": "Two sentences on how the answer lands overall",
  "strengths": ["Concrete metric for the outcome"],
  "improvements": ["Name the tradeoff you rejected and why"]
}

Rules:
- score is 0-10, where 10 is an outstanding answer.
- Be specific: quote or paraphrase the answer, never generic praise.

QUESTION:
{question}

ANSWER:
{answer}"#;
