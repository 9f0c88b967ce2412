//! Name resolution against the canonical exercise catalog.
//!
//! Exact match first, then a case-insensitive scan. Unresolved names are
//! reported, never fatal: the plan still carries them with a sentinel id
//! so a human can reconcile later.

use serde_json::Value;
use setforge_core::catalog::{CatalogExercise, ExerciseCatalog};
use setforge_core::plan::ValidationReport;

/// Resolve a free-text exercise name to a catalog entry.
pub fn find_by_name(catalog: &dyn ExerciseCatalog, name: &str) -> Option<CatalogExercise> {
    if let Some(exact) = catalog.get_by_name(name) {
        return Some(exact);
    }

    let lower = name.to_lowercase();
    catalog
        .all()
        .into_iter()
        .find(|entry| entry.name.to_lowercase() == lower)
}

/// Validate every line item of a generation output against the catalog.
///
/// Walks each top-level key whose value is a list. Empty/whitespace-only
/// names are skipped with a warning (not counted as missing); names the
/// catalog cannot resolve go into `missing_exercises`. `valid == false`
/// never blocks downstream transformation.
pub fn validate(output: &Value, catalog: &dyn ExerciseCatalog) -> ValidationReport {
    let mut missing_exercises: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Some(map) = output.as_object() {
        for (key, value) in map {
            let Some(items) = value.as_array() else {
                continue;
            };

            for item in items {
                let name = item
                    .get("exercise")
                    .and_then(Value::as_str)
                    .unwrap_or_default();

                if name.trim().is_empty() {
                    warnings.push(format!("Exercise in {key} has no name"));
                    continue;
                }

                if find_by_name(catalog, name).is_none() {
                    missing_exercises.push(name.to_string());
                    warnings.push(format!(
                        "Exercise \"{name}\" in {key} not found in catalog"
                    ));
                }
            }
        }
    }

    ValidationReport {
        valid: missing_exercises.is_empty(),
        missing_exercises,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use setforge_core::catalog::InMemoryCatalog;

    fn catalog() -> InMemoryCatalog {
        [
            CatalogExercise::new("ex1", "Bench Press"),
            CatalogExercise::new("ex2", "Barbell Squat"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolution_is_case_insensitive() {
        let catalog = catalog();
        let lower = find_by_name(&catalog, "bench press").unwrap();
        let upper = find_by_name(&catalog, "BENCH PRESS").unwrap();
        assert_eq!(lower.id, "ex1");
        assert_eq!(upper.id, "ex1");
    }

    #[test]
    fn exact_match_wins_before_scan() {
        let catalog = catalog();
        assert_eq!(find_by_name(&catalog, "Barbell Squat").unwrap().id, "ex2");
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let catalog = catalog();
        assert!(find_by_name(&catalog, "Mystery Move").is_none());
    }

    #[test]
    fn valid_output_passes() {
        let output = json!({
            "blockA": [{"exercise": "Barbell Squat", "sets": 4}],
            "reasoning": "squats are great"
        });
        let report = validate(&output, &catalog());
        assert!(report.valid);
        assert!(report.missing_exercises.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_exercise_is_reported_not_fatal() {
        let output = json!({
            "blockA": [{"exercise": "Mystery Move", "sets": 3}]
        });
        let report = validate(&output, &catalog());
        assert!(!report.valid);
        assert_eq!(report.missing_exercises, vec!["Mystery Move".to_string()]);
        assert!(report.warnings[0].contains("not found in catalog"));
    }

    #[test]
    fn empty_name_is_warned_but_not_missing() {
        let output = json!({
            "blockA": [
                {"exercise": "", "sets": 3},
                {"exercise": "   ", "sets": 2}
            ]
        });
        let report = validate(&output, &catalog());
        assert!(report.valid);
        assert!(report.missing_exercises.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("has no name"));
    }

    #[test]
    fn non_list_fields_are_ignored() {
        let output = json!({
            "reasoning": "no exercises here",
            "finalSlots": {"Hilary": {"used": 5, "total": 5}}
        });
        let report = validate(&output, &catalog());
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }
}
