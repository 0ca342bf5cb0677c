//! Candidate ranking: grades each resume against a job description, with
//! keyword-overlap scoring as the degraded path so a batch never hard-fails
//! on malformed model output.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinSet;

use crate::errors::PipelineError;
use crate::llm_client::CompletionProvider;
use crate::pipeline::schema::{FieldSpec, SchemaDescriptor};
use crate::pipeline::{self, CompletionRequest, Provenance};
use crate::ranking::overlap::OverlapSynthesizer;
use crate::ranking::prompts::RANK_PROMPT_TEMPLATE;

pub mod overlap;
pub mod prompts;

/// One resume to grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub resume_text: String,
}

/// Grade for one candidate, before batch ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateScore {
    /// 0-100
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub summary: String,
}

/// A graded candidate in a ranked batch. `provenance` tells callers whether
/// the grade came from the model or from keyword overlap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub name: String,
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub summary: String,
    pub provenance: Provenance,
}

pub(crate) fn shape() -> SchemaDescriptor {
    SchemaDescriptor::new()
        .field("score", FieldSpec::number().required())
        .field(
            "matchedKeywords",
            FieldSpec::string_array().default_value(json!([])),
        )
        .field("summary", FieldSpec::string().default_value(json!("")))
}

/// Grades one resume against a job description. Malformed model output falls
/// back to keyword-overlap scoring; an unavailable provider still fails.
pub async fn rank_candidate(
    provider: &dyn CompletionProvider,
    resume_text: &str,
    job_description: &str,
) -> Result<(CandidateScore, Provenance), PipelineError> {
    let prompt = RANK_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);
    let request = CompletionRequest::new(prompt, 0.2);
    let fallback = OverlapSynthesizer::new(resume_text, job_description);
    pipeline::run_typed_with_fallback(provider, &request, &shape(), &fallback).await
}

/// Grades all candidates concurrently and returns them best-first.
///
/// Completion order across the concurrent calls is arbitrary, so the
/// ordering is re-established here by score once every grade is in.
pub async fn rank_candidates(
    provider: Arc<dyn CompletionProvider>,
    job_description: &str,
    candidates: Vec<Candidate>,
) -> Result<Vec<RankedCandidate>, PipelineError> {
    let mut tasks = JoinSet::new();

    for candidate in candidates {
        let provider = Arc::clone(&provider);
        let job_description = job_description.to_owned();
        tasks.spawn(async move {
            let graded =
                rank_candidate(provider.as_ref(), &candidate.resume_text, &job_description).await;
            (candidate, graded)
        });
    }

    let mut ranked = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (candidate, graded) = joined.expect("ranking task panicked");
        let (scored, provenance) = graded?;
        ranked.push(RankedCandidate {
            name: candidate.name,
            score: scored.score,
            matched_keywords: scored.matched_keywords,
            summary: scored.summary,
            provenance,
        });
    }

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(ranked)
}
