//! The setforge generation pipeline.
//!
//! Orchestrates compile → invoke → extract → resolve → transform,
//! propagating or converting failures at each stage and reporting
//! per-stage timing.
//!
//! Failure policy: a provider error or an unextractable reply fails the
//! whole run with a single human-readable error string (raw text kept for
//! audit where it exists). Referential misses and malformed set counts
//! degrade gracefully — the caller still receives a complete plan plus a
//! validation report. Callers never see a partially-populated plan with no
//! error indication, and no panic escapes the pipeline boundary.
//!
//! # Concurrency
//!
//! A pipeline run is a pure function of its inputs except for the one
//! provider call. There is no shared mutable state between runs — ledgers
//! are recomputed per compile — so independent runs may proceed
//! concurrently. Cancellation is dropping the future; there is no built-in
//! retry.

pub mod extract;
pub mod invoker;
pub mod resolver;
pub mod transform;

pub use extract::extract;
pub use invoker::{GenerationInvoker, InvocationResult, InvokerTimings};

use serde::Serialize;
use serde_json::Value;
use setforge_core::blueprint::SessionBlueprint;
use setforge_core::catalog::ExerciseCatalog;
use setforge_core::client::ClientProfile;
use setforge_core::equipment::EquipmentInventory;
use setforge_core::plan::{PersistablePlan, ValidationReport};
use setforge_core::provider::TextGenerationProvider;
use setforge_prompt::PromptCompiler;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything one planning run needs besides the catalog.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub blueprint: SessionBlueprint,
    pub roster: Vec<ClientProfile>,
    pub equipment: EquipmentInventory,
    pub plan_name: Option<String>,
    pub plan_description: Option<String>,
}

/// Per-stage wall-clock milliseconds for one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageTimings {
    pub prompt_compile_ms: u64,
    pub input_format_ms: u64,
    pub provider_call_ms: u64,
    pub response_parse_ms: u64,
    pub transform_ms: u64,
    pub total_ms: u64,
}

/// The result of one pipeline run: a complete plan (possibly with
/// validation warnings) or an explicit error string — never both, never
/// neither.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub success: bool,
    pub plan: Option<PersistablePlan>,
    pub validation: Option<ValidationReport>,
    /// The provider's raw reply, kept for caller inspection/audit
    pub raw: Option<String>,
    pub error: Option<String>,
    pub timings: StageTimings,
    /// Correlation id for log events of this run
    pub run_id: String,
}

impl PipelineOutcome {
    fn failure(run_id: String, error: String, raw: Option<String>, timings: StageTimings) -> Self {
        Self {
            success: false,
            plan: None,
            validation: None,
            raw,
            error: Some(error),
            timings,
            run_id,
        }
    }
}

/// The generation pipeline.
///
/// The provider is an explicit constructor dependency — there is no
/// ambient module-level override to swap, so concurrent runs cannot
/// interfere with each other.
pub struct GenerationPipeline {
    compiler: PromptCompiler,
    invoker: GenerationInvoker,
}

impl GenerationPipeline {
    pub fn new(provider: Arc<dyn TextGenerationProvider>) -> Self {
        Self {
            compiler: PromptCompiler::new(),
            invoker: GenerationInvoker::new(provider),
        }
    }

    /// Replace the default compiler (candidate counts, strictness knobs).
    pub fn with_compiler(mut self, compiler: PromptCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Run the full pipeline for one planning request.
    pub async fn run(&self, request: &PlanRequest, catalog: &dyn ExerciseCatalog) -> PipelineOutcome {
        let run_id = Uuid::new_v4().to_string();
        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        info!(
            run_id = %run_id,
            clients = request.roster.len(),
            "Starting generation pipeline"
        );

        // ── Stage 1: compile (pure, always succeeds) ──
        let compile_start = Instant::now();
        let document =
            self.compiler
                .compile(&request.blueprint, &request.roster, &request.equipment);
        timings.prompt_compile_ms = compile_start.elapsed().as_millis() as u64;

        // ── Stage 2: invoke ──
        let invocation = self.invoker.invoke(&document).await;
        timings.input_format_ms = invocation.timings.input_format_ms;
        timings.provider_call_ms = invocation.timings.provider_call_ms;

        if let Some(error) = invocation.error {
            timings.total_ms = total_start.elapsed().as_millis() as u64;
            warn!(run_id = %run_id, error = %error, "Pipeline failed at provider invocation");
            return PipelineOutcome::failure(run_id, error, None, timings);
        }
        let raw = invocation.text.unwrap_or_default();

        // ── Stage 3: extract ──
        let parse_start = Instant::now();
        let output = extract::extract(&raw);
        timings.response_parse_ms = parse_start.elapsed().as_millis() as u64;

        let Some(output) = output else {
            timings.total_ms = total_start.elapsed().as_millis() as u64;
            warn!(run_id = %run_id, raw_len = raw.len(), "Pipeline failed to parse reply as JSON");
            return PipelineOutcome::failure(
                run_id,
                "Failed to parse response as JSON".to_string(),
                Some(raw),
                timings,
            );
        };

        let has_lists = output
            .as_object()
            .is_some_and(|map| map.values().any(Value::is_array));
        if !has_lists {
            timings.total_ms = total_start.elapsed().as_millis() as u64;
            warn!(run_id = %run_id, "Pipeline reply parsed but carried no exercise lists");
            return PipelineOutcome::failure(
                run_id,
                "Generation response contained no exercise lists".to_string(),
                Some(raw),
                timings,
            );
        }

        // ── Stage 4: resolve + transform (degrades, never fails) ──
        let validation = resolver::validate(&output, catalog);
        if !validation.valid {
            warn!(
                run_id = %run_id,
                missing = ?validation.missing_exercises,
                "Some exercises not found in catalog"
            );
        }

        let transform_start = Instant::now();
        let plan = transform::transform(
            &output,
            catalog,
            request.blueprint.template_kind(),
            request.plan_name.clone(),
            request.plan_description.clone(),
        );
        timings.transform_ms = transform_start.elapsed().as_millis() as u64;
        timings.total_ms = total_start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            exercises = plan.exercises.len(),
            total_sets = plan.total_planned_sets,
            total_ms = timings.total_ms,
            "Generation pipeline completed"
        );

        PipelineOutcome {
            success: true,
            plan: Some(plan),
            validation: Some(validation),
            raw: Some(raw),
            error: None,
            timings,
            run_id,
        }
    }
}
