//! Turns one model completion into one validated object.
//!
//! Per invocation: call the provider, strip fences, locate the JSON object,
//! conform it to the caller's shape. Any step after the provider call can be
//! rescued by an opt-in fallback synthesizer; provider failure cannot. Each
//! invocation is independent and holds no shared state, so callers are free
//! to run many concurrently and re-order results themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub mod extract;
pub mod sanitize;
pub mod schema;

use crate::errors::PipelineError;
use crate::llm_client::CompletionProvider;
use schema::SchemaDescriptor;

/// One prompt for the completion provider. Produced per call, consumed once.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub instruction: String,
    pub temperature: f32,
}

impl CompletionRequest {
    /// `instruction` must be non-empty; `temperature` is clamped to 0.0-1.0.
    pub fn new(instruction: impl Into<String>, temperature: f32) -> Self {
        let instruction = instruction.into();
        debug_assert!(!instruction.trim().is_empty(), "empty instruction");
        Self {
            instruction,
            temperature: temperature.clamp(0.0, 1.0),
        }
    }
}

/// Whether a result came from the model or from fallback synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Model,
    Fallback,
}

/// A validated object satisfying the descriptor it was conformed against,
/// tagged with where it came from.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub value: Value,
    pub provenance: Provenance,
}

/// Deterministic, non-model computation producing a best-effort result from
/// the call site's original structured input. Must be pure, synchronous and
/// bounded, and must satisfy the same shape as the model path; the pipeline
/// re-validates its output.
pub trait Synthesizer: Send + Sync {
    fn synthesize(&self) -> Value;
}

impl<F> Synthesizer for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn synthesize(&self) -> Value {
        self()
    }
}

/// Runs one extraction with no fallback: any recovery failure is terminal.
pub async fn run(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    shape: &SchemaDescriptor,
) -> Result<Extracted, PipelineError> {
    drive(provider, request, shape, None).await
}

/// Runs one extraction, rescuing format and shape failures with the given
/// synthesizer. Provider failure is still terminal.
pub async fn run_with_fallback(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    shape: &SchemaDescriptor,
    fallback: &dyn Synthesizer,
) -> Result<Extracted, PipelineError> {
    drive(provider, request, shape, Some(fallback)).await
}

/// Like [`run`], but decodes the conformed object into a typed result.
pub async fn run_typed<T: DeserializeOwned>(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    shape: &SchemaDescriptor,
) -> Result<(T, Provenance), PipelineError> {
    decode(drive(provider, request, shape, None).await?)
}

/// Like [`run_with_fallback`], but decodes into a typed result.
pub async fn run_typed_with_fallback<T: DeserializeOwned>(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    shape: &SchemaDescriptor,
    fallback: &dyn Synthesizer,
) -> Result<(T, Provenance), PipelineError> {
    decode(drive(provider, request, shape, Some(fallback)).await?)
}

async fn drive(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    shape: &SchemaDescriptor,
    fallback: Option<&dyn Synthesizer>,
) -> Result<Extracted, PipelineError> {
    let raw = provider
        .complete(&request.instruction, request.temperature)
        .await
        .map_err(PipelineError::UpstreamUnavailable)?;

    let cleaned = sanitize::strip_fences(&raw);

    let parsed = match extract::extract_object(cleaned) {
        Ok(parsed) => parsed,
        Err(e) => {
            return rescue(
                fallback,
                shape,
                PipelineError::UnrecoverableFormat {
                    attempted: e.attempted,
                    raw,
                },
            );
        }
    };

    match shape.conform(&parsed) {
        Ok(value) => {
            debug!("extraction succeeded from model output");
            Ok(Extracted {
                value,
                provenance: Provenance::Model,
            })
        }
        Err(missing) => rescue(fallback, shape, PipelineError::SchemaViolation { raw, missing }),
    }
}

/// Applies the synthesizer if one was configured; otherwise the failure is
/// terminal. Synthesized output is conformed against the same shape, and a
/// synthesizer that violates it surfaces the original failure.
fn rescue(
    fallback: Option<&dyn Synthesizer>,
    shape: &SchemaDescriptor,
    failure: PipelineError,
) -> Result<Extracted, PipelineError> {
    let Some(synth) = fallback else {
        return Err(failure);
    };

    warn!("model output unrecoverable ({failure}), engaging fallback synthesis");

    match shape.conform(&synth.synthesize()) {
        Ok(value) => Ok(Extracted {
            value,
            provenance: Provenance::Fallback,
        }),
        Err(missing) => {
            warn!("fallback output violates expected shape: {}", missing.join(", "));
            Err(failure)
        }
    }
}

fn decode<T: DeserializeOwned>(extracted: Extracted) -> Result<(T, Provenance), PipelineError> {
    let provenance = extracted.provenance;
    let raw = extracted.value.to_string();
    let typed = serde_json::from_value(extracted.value).map_err(|e| {
        // A conformed object that fails to decode means the descriptor and
        // the result type disagree; surface it as a shape violation rather
        // than panicking.
        PipelineError::SchemaViolation {
            raw,
            missing: vec![e.to_string()],
        }
    })?;
    Ok((typed, provenance))
}
