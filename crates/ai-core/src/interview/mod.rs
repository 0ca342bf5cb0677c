//! Interview preparation: question generation and answer rating.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::PipelineError;
use crate::interview::prompts::{QUESTIONS_PROMPT_TEMPLATE, RATE_ANSWER_PROMPT_TEMPLATE};
use crate::llm_client::CompletionProvider;
use crate::pipeline::schema::{FieldSpec, SchemaDescriptor};
use crate::pipeline::{self, CompletionRequest};

pub mod prompts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: u32,
    pub question: String,
    pub category: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub questions: Vec<InterviewQuestion>,
}

fn questions_shape() -> SchemaDescriptor {
    // Fresh counter per call: models regularly omit ids, and the numbering
    // must restart at 1 for every generated set.
    let counter = AtomicU32::new(0);
    let question = SchemaDescriptor::new()
        .field(
            "id",
            FieldSpec::number()
                .default_with(move || Value::from(counter.fetch_add(1, Ordering::Relaxed) + 1)),
        )
        .field("question", FieldSpec::string().required())
        .field("category", FieldSpec::string().default_value(json!("general")))
        .field(
            "difficulty",
            FieldSpec::string().default_value(json!("medium")),
        );
    SchemaDescriptor::new().field(
        "questions",
        FieldSpec::object_array(question).required().coerce_scalars(),
    )
}

/// Generates `count` interview questions for a job description.
pub async fn generate_questions(
    provider: &dyn CompletionProvider,
    job_description: &str,
    count: usize,
) -> Result<Vec<InterviewQuestion>, PipelineError> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{count}", &count.to_string());
    let request = CompletionRequest::new(prompt, 0.8);
    let (set, _): (QuestionSet, _) =
        pipeline::run_typed(provider, &request, &questions_shape()).await?;
    Ok(set.questions)
}

/// Model's judgment of one interview answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRating {
    /// 0-10
    pub score: f64,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

fn rating_shape() -> SchemaDescriptor {
    SchemaDescriptor::new()
        .field("score", FieldSpec::number().required())
        .field("feedback", FieldSpec::string().default_value(json!("")))
        .field("strengths", FieldSpec::string_array().default_value(json!([])))
        .field(
            "improvements",
            FieldSpec::string_array().default_value(json!([])),
        )
}

/// Rates a candidate's answer to one question.
pub async fn rate_answer(
    provider: &dyn CompletionProvider,
    question: &str,
    answer: &str,
) -> Result<AnswerRating, PipelineError> {
    let prompt = RATE_ANSWER_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer);
    let request = CompletionRequest::new(prompt, 0.3);
    let (rating, _) = pipeline::run_typed(provider, &request, &rating_shape()).await?;
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::test_support::ScriptedProvider;

    #[tokio::test]
    async fn test_generate_full_reply() {
        let provider = ScriptedProvider::replying(
            r#"{"questions": [
                {"id": 1, "question": "Q1", "category": "technical", "difficulty": "easy"},
                {"id": 2, "question": "Q2", "category": "behavioral", "difficulty": "hard"}
            ]}"#,
        );
        let questions = generate_questions(&provider, "jd", 2).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[1].category, "behavioral");
    }

    #[tokio::test]
    async fn test_generate_backfills_ids_and_labels() {
        let provider = ScriptedProvider::replying(
            r#"{"questions": [
                {"question": "Q1"},
                {"question": "Q2"}
            ]}"#,
        );
        let questions = generate_questions(&provider, "jd", 2).await.unwrap();
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[0].category, "general");
        assert_eq!(questions[0].difficulty, "medium");
    }

    #[tokio::test]
    async fn test_generate_single_object_reply_is_wrapped() {
        let provider = ScriptedProvider::replying(r#"{"questions": {"question": "Only one"}}"#);
        let questions = generate_questions(&provider, "jd", 1).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Only one");
    }

    #[tokio::test]
    async fn test_generate_question_without_text_fails() {
        let provider =
            ScriptedProvider::replying(r#"{"questions": [{"id": 1, "category": "technical"}]}"#);
        let err = generate_questions(&provider, "jd", 1).await.unwrap_err();
        match err {
            PipelineError::SchemaViolation { missing, .. } => {
                assert_eq!(missing, vec!["questions[0].question".to_string()]);
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_answer_full_reply() {
        let provider = ScriptedProvider::replying(
            r#"{
                "score": 7,
                "feedback": "Good structure.",
                "strengths": ["Concrete metric"],
                "improvements": ["Name the tradeoff"]
            }"#,
        );
        let rating = rate_answer(&provider, "Q", "A").await.unwrap();
        assert_eq!(rating.score, 7.0);
        assert_eq!(rating.strengths.len(), 1);
    }

    #[tokio::test]
    async fn test_rate_answer_score_only_backfills() {
        let provider = ScriptedProvider::replying("```\n{\"score\": 4}\n```");
        let rating = rate_answer(&provider, "Q", "A").await.unwrap();
        assert_eq!(rating.score, 4.0);
        assert_eq!(rating.feedback, "");
        assert!(rating.improvements.is_empty());
    }
}
