//! Resume analysis: scores a resume against a job description and reports
//! strengths, gaps and keyword coverage.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analysis::prompts::ANALYZE_PROMPT_TEMPLATE;
use crate::errors::PipelineError;
use crate::llm_client::CompletionProvider;
use crate::pipeline::schema::{FieldSpec, SchemaDescriptor};
use crate::pipeline::{self, CompletionRequest};

pub mod prompts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub present_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Full analysis report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    /// 0-100
    pub overall_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_elements: Vec<String>,
    pub suggestions: Vec<String>,
    pub keyword_analysis: KeywordAnalysis,
}

fn shape() -> SchemaDescriptor {
    SchemaDescriptor::new()
        .field("overallScore", FieldSpec::number().required())
        .field("strengths", FieldSpec::string_array().default_value(json!([])))
        .field("weaknesses", FieldSpec::string_array().default_value(json!([])))
        .field(
            "missingElements",
            FieldSpec::string_array().default_value(json!([])),
        )
        .field(
            "suggestions",
            FieldSpec::string_array().default_value(json!([])),
        )
        .field(
            "keywordAnalysis",
            FieldSpec::object(
                SchemaDescriptor::new()
                    .field(
                        "presentKeywords",
                        FieldSpec::string_array().default_value(json!([])),
                    )
                    .field(
                        "missingKeywords",
                        FieldSpec::string_array().default_value(json!([])),
                    ),
            )
            .default_value(json!({"presentKeywords": [], "missingKeywords": []})),
        )
}

/// Scores `resume_text` against `job_description`.
pub async fn analyze_resume(
    provider: &dyn CompletionProvider,
    resume_text: &str,
    job_description: &str,
) -> Result<ResumeAnalysis, PipelineError> {
    let prompt = ANALYZE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);
    let request = CompletionRequest::new(prompt, 0.2);
    let (analysis, _) = pipeline::run_typed(provider, &request, &shape()).await?;
    Ok(analysis)
}
