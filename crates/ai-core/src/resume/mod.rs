//! Resume parsing and targeted optimization.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::PipelineError;
use crate::llm_client::CompletionProvider;
use crate::pipeline::schema::{FieldSpec, SchemaDescriptor};
use crate::pipeline::{self, CompletionRequest};
use crate::resume::prompts::{OPTIMIZE_PROMPT_TEMPLATE, PARSE_PROMPT_TEMPLATE};

pub mod prompts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSection {
    pub heading: String,
    pub items: Vec<String>,
}

/// Structured form of a free-text resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub title: String,
    pub summary: String,
    pub sections: Vec<ResumeSection>,
}

fn parse_shape() -> SchemaDescriptor {
    let section = SchemaDescriptor::new()
        .field("heading", FieldSpec::string().default_value(json!("")))
        .field(
            "items",
            FieldSpec::string_array().coerce_scalars().default_value(json!([])),
        );
    SchemaDescriptor::new()
        .field("title", FieldSpec::string().required())
        .field("summary", FieldSpec::string().default_value(json!("")))
        .field(
            "sections",
            FieldSpec::object_array(section).default_value(json!([])),
        )
}

/// Parses a free-text resume into titled sections.
pub async fn parse_resume(
    provider: &dyn CompletionProvider,
    resume_text: &str,
) -> Result<ParsedResume, PipelineError> {
    let prompt = PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let request = CompletionRequest::new(prompt, 0.0);
    let (parsed, _) = pipeline::run_typed(provider, &request, &parse_shape()).await?;
    Ok(parsed)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletRewrite {
    pub original: String,
    pub rewritten: String,
    pub rationale: String,
}

/// Targeted rewrite of a resume for one job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedResume {
    pub optimized_summary: String,
    pub rewritten_bullets: Vec<BulletRewrite>,
    pub keywords_woven: Vec<String>,
}

fn optimize_shape() -> SchemaDescriptor {
    let rewrite = SchemaDescriptor::new()
        .field("original", FieldSpec::string().default_value(json!("")))
        .field("rewritten", FieldSpec::string().required())
        .field("rationale", FieldSpec::string().default_value(json!("")));
    SchemaDescriptor::new()
        .field("optimizedSummary", FieldSpec::string().required())
        .field(
            "rewrittenBullets",
            // A rewrite with no rewritten text is useless, so a bad element
            // invalidates the whole list rather than being blanked.
            FieldSpec::object_array(rewrite).atomic().default_value(json!([])),
        )
        .field(
            "keywordsWoven",
            FieldSpec::string_array().default_value(json!([])),
        )
}

/// Rewrites a resume against a job description.
pub async fn optimize_resume(
    provider: &dyn CompletionProvider,
    resume_text: &str,
    job_description: &str,
) -> Result<OptimizedResume, PipelineError> {
    let prompt = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);
    let request = CompletionRequest::new(prompt, 0.7);
    let (optimized, _) = pipeline::run_typed(provider, &request, &optimize_shape()).await?;
    Ok(optimized)
}
