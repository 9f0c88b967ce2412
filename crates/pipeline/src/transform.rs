//! Plan transformation — converts a validated generation result into the
//! final persistable plan.

use crate::resolver;
use chrono::Utc;
use serde_json::Value;
use setforge_core::catalog::ExerciseCatalog;
use setforge_core::plan::{PersistablePlan, ResolvedExercise, TemplateKind, UNKNOWN_EXERCISE_ID};
use tracing::debug;

/// Transform a generation output into a persistable plan.
///
/// Iterates every top-level key whose value is an ordered list (non-list
/// keys like "reasoning" are ignored). Each entry is name-resolved,
/// assigned a zero-based global order index and a template-specific group
/// label. Total planned volume is the sum of numeric set counts; a
/// missing or non-numeric count becomes zero rather than failing the plan.
pub fn transform(
    output: &Value,
    catalog: &dyn ExerciseCatalog,
    kind: TemplateKind,
    name: Option<String>,
    description: Option<String>,
) -> PersistablePlan {
    let mut exercises: Vec<ResolvedExercise> = Vec::new();
    let mut total_planned_sets: u32 = 0;
    let mut order_index: usize = 0;

    if let Some(map) = output.as_object() {
        for (key, value) in map {
            let Some(items) = value.as_array() else {
                continue;
            };

            let group_name = kind.group_label(key);

            for item in items {
                let exercise_name = item
                    .get("exercise")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim();
                if exercise_name.is_empty() {
                    continue;
                }

                let resolved = resolver::find_by_name(catalog, exercise_name);
                let sets = item.get("sets").and_then(Value::as_u64).unwrap_or(0) as u32;
                total_planned_sets += sets;

                exercises.push(ResolvedExercise {
                    exercise_id: resolved
                        .map(|entry| entry.id)
                        .unwrap_or_else(|| UNKNOWN_EXERCISE_ID.to_string()),
                    exercise_name: exercise_name.to_string(),
                    sets,
                    reps: string_field(item, "reps"),
                    rest_period: string_field(item, "rest"),
                    notes: string_field(item, "notes"),
                    order_index,
                    group_name: group_name.clone(),
                });
                order_index += 1;
            }
        }
    }

    debug!(
        template = kind.as_str(),
        exercises = exercises.len(),
        total_planned_sets,
        "Transformed generation output into plan"
    );

    let created_at = Utc::now();
    PersistablePlan {
        name: name.unwrap_or_else(|| kind.default_plan_name(created_at)),
        description,
        template: kind,
        total_planned_sets,
        raw_output: output.clone(),
        template_config: kind.template_config(),
        created_at,
        exercises,
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use setforge_core::catalog::{CatalogExercise, InMemoryCatalog};

    fn catalog() -> InMemoryCatalog {
        [
            CatalogExercise::new("ex1", "Barbell Squat"),
            CatalogExercise::new("ex2", "Plank"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn totals_default_bad_set_counts_to_zero() {
        let output = json!({
            "blockA": [
                {"exercise": "Barbell Squat", "sets": 4},
                {"exercise": "Plank", "sets": 3},
                {"exercise": "Plank", "sets": "bad"}
            ]
        });
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        assert_eq!(plan.total_planned_sets, 7);
        assert_eq!(plan.exercises.len(), 3);
        assert_eq!(plan.exercises[2].sets, 0);
    }

    #[test]
    fn order_indexes_are_global_and_zero_based() {
        let output = json!({
            "blockA": [{"exercise": "Barbell Squat", "sets": 4}],
            "blockB": [
                {"exercise": "Plank", "sets": 3},
                {"exercise": "Plank", "sets": 2}
            ]
        });
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        let indexes: Vec<usize> = plan.exercises.iter().map(|e| e.order_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(plan.exercises[0].group_name, "BlockA");
        assert_eq!(plan.exercises[1].group_name, "BlockB");
    }

    #[test]
    fn reasoning_and_other_non_lists_are_ignored() {
        let output = json!({
            "blockA": [{"exercise": "Plank", "sets": 3}],
            "reasoning": "core work first",
            "finalSlots": {"Hilary": {"used": 5, "total": 5}}
        });
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        assert_eq!(plan.exercises.len(), 1);
        assert_eq!(plan.total_planned_sets, 3);
    }

    #[test]
    fn unresolved_names_get_sentinel_but_survive() {
        let output = json!({
            "blockA": [{"exercise": "Mystery Move", "sets": 5, "reps": "10", "notes": "?"}]
        });
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        let item = &plan.exercises[0];
        assert_eq!(item.exercise_id, UNKNOWN_EXERCISE_ID);
        assert_eq!(item.exercise_name, "Mystery Move");
        assert_eq!(item.reps.as_deref(), Some("10"));
        assert_eq!(plan.total_planned_sets, 5);
    }

    #[test]
    fn circuit_round_keys_become_round_groups() {
        let output = json!({
            "round3": [{"exercise": "Barbell Squat", "sets": 3, "rest": "60s"}]
        });
        let plan = transform(&output, &catalog(), TemplateKind::Circuit, None, None);
        assert_eq!(plan.exercises[0].group_name, "Round 3");
        assert_eq!(plan.exercises[0].rest_period.as_deref(), Some("60s"));
        assert_eq!(plan.template_config["format"], "time-based");
    }

    #[test]
    fn nameless_entries_are_skipped() {
        let output = json!({
            "blockA": [
                {"sets": 4},
                {"exercise": "  ", "sets": 2},
                {"exercise": "Plank", "sets": 1}
            ]
        });
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        assert_eq!(plan.exercises.len(), 1);
        assert_eq!(plan.total_planned_sets, 1);
    }

    #[test]
    fn supplied_name_beats_default() {
        let output = json!({"blockA": []});
        let plan = transform(
            &output,
            &catalog(),
            TemplateKind::Standard,
            Some("Leg Day".into()),
            Some("Heavy lower session".into()),
        );
        assert_eq!(plan.name, "Leg Day");
        assert_eq!(plan.description.as_deref(), Some("Heavy lower session"));
    }

    #[test]
    fn default_name_is_templated_per_kind() {
        let output = json!({"blockA": []});
        let standard = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        assert!(standard.name.starts_with("Strength Training - "));

        let circuit = transform(&output, &catalog(), TemplateKind::Circuit, None, None);
        assert!(circuit.name.starts_with("Circuit Training - "));
    }

    #[test]
    fn raw_output_is_kept_verbatim() {
        let output = json!({"blockA": [{"exercise": "Plank", "sets": 3}], "reasoning": "x"});
        let plan = transform(&output, &catalog(), TemplateKind::Standard, None, None);
        assert_eq!(plan.raw_output, output);
    }
}
