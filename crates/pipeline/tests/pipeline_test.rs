//! End-to-end pipeline scenarios with a scripted provider.

use setforge_core::blueprint::{BlocksBlueprint, SessionBlueprint};
use setforge_core::catalog::{CatalogExercise, InMemoryCatalog};
use setforge_core::client::ClientProfile;
use setforge_core::equipment::EquipmentInventory;
use setforge_core::error::ProviderError;
use setforge_core::exercise::CandidateExercise;
use setforge_core::plan::UNKNOWN_EXERCISE_ID;
use setforge_core::provider::{PromptMessage, TextGenerationProvider};
use setforge_pipeline::{GenerationPipeline, PlanRequest};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A provider that replays a scripted reply (or failure).
struct ScriptedProvider {
    reply: Result<String, ProviderError>,
}

#[async_trait::async_trait]
impl TextGenerationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, _messages: Vec<PromptMessage>) -> Result<String, ProviderError> {
        self.reply.clone()
    }
}

fn catalog() -> InMemoryCatalog {
    [
        CatalogExercise::new("ex1", "Barbell Squat"),
        CatalogExercise::new("ex2", "Plank"),
    ]
    .into_iter()
    .collect()
}

fn request() -> PlanRequest {
    let mut candidates = BTreeMap::new();
    candidates.insert(
        "blockA".to_string(),
        vec![CandidateExercise::new("Barbell Squat", 9.0)],
    );

    PlanRequest {
        blueprint: SessionBlueprint::Blocks(BlocksBlueprint {
            structure: None,
            candidates,
        }),
        roster: vec![ClientProfile::new("c1", "Hilary Banks")],
        equipment: EquipmentInventory::default(),
        plan_name: None,
        plan_description: None,
    }
}

fn pipeline(reply: Result<String, ProviderError>) -> GenerationPipeline {
    GenerationPipeline::new(Arc::new(ScriptedProvider { reply }))
}

#[tokio::test]
async fn resolvable_reply_yields_complete_plan() {
    let pipeline = pipeline(Ok(
        r#"{"blockA": [{"exercise": "Barbell Squat", "sets": 4}]}"#.to_string(),
    ));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(outcome.success);
    assert!(outcome.error.is_none());

    let plan = outcome.plan.unwrap();
    assert_eq!(plan.exercises.len(), 1);
    let item = &plan.exercises[0];
    assert_eq!(item.exercise_id, "ex1");
    assert_eq!(item.order_index, 0);
    assert_eq!(item.group_name, "BlockA");
    assert_eq!(plan.total_planned_sets, 4);

    let validation = outcome.validation.unwrap();
    assert!(validation.valid);
}

#[tokio::test]
async fn provider_failure_fails_the_run_verbatim() {
    let pipeline = pipeline(Err(ProviderError::ApiError {
        status_code: 429,
        message: "Rate limit exceeded".into(),
    }));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(!outcome.success);
    assert!(outcome.plan.is_none());
    assert!(outcome.error.unwrap().contains("Rate limit exceeded"));
}

#[tokio::test]
async fn unknown_exercise_degrades_but_still_produces_a_plan() {
    let pipeline = pipeline(Ok(
        r#"{"blockA": [{"exercise": "Quantum Flex", "sets": 3}]}"#.to_string(),
    ));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(outcome.success);
    let plan = outcome.plan.unwrap();
    assert_eq!(plan.exercises[0].exercise_id, UNKNOWN_EXERCISE_ID);
    assert_eq!(plan.exercises[0].exercise_name, "Quantum Flex");

    let validation = outcome.validation.unwrap();
    assert!(!validation.valid);
    assert_eq!(validation.missing_exercises, vec!["Quantum Flex".to_string()]);
}

#[tokio::test]
async fn unparsable_reply_fails_with_raw_preserved() {
    let pipeline = pipeline(Ok("Sorry, I cannot produce a plan today.".to_string()));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(!outcome.success);
    assert!(outcome.plan.is_none());
    assert!(outcome.error.unwrap().contains("Failed to parse response as JSON"));
    // Raw text is kept for caller inspection
    assert!(outcome.raw.unwrap().contains("cannot produce"));
}

#[tokio::test]
async fn object_without_lists_fails_the_run() {
    let pipeline = pipeline(Ok(r#"{"reasoning": "I had nothing to add"}"#.to_string()));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(!outcome.success);
    assert!(outcome
        .error
        .unwrap()
        .contains("no exercise lists"));
}

#[tokio::test]
async fn prose_wrapped_reply_is_carved_and_transformed() {
    let pipeline = pipeline(Ok(
        "Here is the plan you asked for:\n```json\n{\"blockA\": [{\"exercise\": \"plank\", \"sets\": 2}]}\n```\nEnjoy!"
            .to_string(),
    ));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(outcome.success);
    let plan = outcome.plan.unwrap();
    // Case-insensitive resolution against "Plank"
    assert_eq!(plan.exercises[0].exercise_id, "ex2");
    assert_eq!(plan.total_planned_sets, 2);
}

#[tokio::test]
async fn timings_cover_all_stages() {
    let pipeline = pipeline(Ok(
        r#"{"blockA": [{"exercise": "Barbell Squat", "sets": 4}]}"#.to_string(),
    ));

    let outcome = pipeline.run(&request(), &catalog()).await;

    assert!(outcome.success);
    assert!(outcome.timings.total_ms >= outcome.timings.provider_call_ms);
    assert!(!outcome.run_id.is_empty());
}
