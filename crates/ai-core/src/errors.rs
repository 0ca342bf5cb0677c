use thiserror::Error;

use crate::llm_client::LlmError;

/// Classified failure surface of the extraction pipeline.
///
/// Every caller gets exactly these three kinds back as values, never a panic.
/// The raw model text is carried wherever a completion was actually received
/// so operators can log what the model said.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The completion provider call failed or timed out. The pipeline does
    /// not retry; bounded retry lives inside the provider itself.
    #[error("completion provider unavailable: {0}")]
    UpstreamUnavailable(#[source] LlmError),

    /// No JSON object could be located or parsed in the model output.
    #[error("no JSON object could be recovered from model output")]
    UnrecoverableFormat {
        raw: String,
        /// The brace-delimited substring that was tried, when one was found.
        attempted: Option<String>,
    },

    /// The output parsed, but required fields were unrecoverable after
    /// defaulting. Lists every missing field path, not just the first.
    #[error("model output violates expected shape, missing: {}", missing.join(", "))]
    SchemaViolation { raw: String, missing: Vec<String> },
}

impl PipelineError {
    /// The original completion text, when one was received.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            PipelineError::UpstreamUnavailable(_) => None,
            PipelineError::UnrecoverableFormat { raw, .. }
            | PipelineError::SchemaViolation { raw, .. } => Some(raw),
        }
    }
}
