//! Constraint narration — pure functions that render structured constraint
//! objects into the prose lines the prompt compiler stitches together.
//!
//! Nothing here derives numbers beyond reading already-derived ledgers;
//! this module only narrates.

use crate::ledger::{CoverageLedger, SlotLedger};
use setforge_core::client::ClientProfile;
use setforge_core::equipment::EquipmentInventory;
use setforge_core::exercise::CandidateExercise;

/// Infer equipment tags from an exercise name.
///
/// A best-effort substring heuristic; candidates with no recognizable
/// equipment are tagged "none" (floor/bodyweight work).
pub fn infer_equipment(exercise_name: &str) -> Vec<&'static str> {
    let name = exercise_name.to_lowercase();
    let mut equipment = Vec::new();

    if name.contains("barbell") && !name.contains("dumbbell") {
        equipment.push("barbell");
    }
    if name.contains("bench") || name.contains("incline") {
        equipment.push("bench");
    }
    if name.contains("dumbbell") || name.contains("db ") {
        equipment.push("DB");
    }
    if name.contains("kettlebell") || name.contains("goblet") {
        equipment.push("KB");
    }
    if name.contains("cable") || name.contains("lat pulldown") {
        equipment.push("cable");
    }
    if name.contains("band") {
        equipment.push("band");
    }
    if name.contains("landmine") {
        equipment.push("landmine");
    }
    if name.contains("medicine ball") || name.contains("med ball") {
        equipment.push("med ball");
    }
    if name.contains("row machine") {
        equipment.push("row machine");
    }
    if name.contains("swiss ball") || name.contains("stability ball") {
        equipment.push("swiss ball");
    }
    if name.contains("plank")
        || name.contains("dead bug")
        || name.contains("bird dog")
        || name.contains("bear crawl")
        || name.contains("push-up")
    {
        equipment.push("none");
    }

    if equipment.is_empty() {
        equipment.push("none");
    }
    equipment
}

/// Format a candidate as an option line: name, rounded score, equipment
/// tags, and the request marker when the score breakdown says the client
/// asked for it.
pub fn format_option(exercise: &CandidateExercise) -> String {
    let equipment = infer_equipment(&exercise.name);
    let mut line = format!(
        "{} ({:.1}, {})",
        exercise.name,
        exercise.score,
        equipment.join("+")
    );
    if exercise.is_client_request() {
        line.push_str(" [CLIENT REQUEST]");
    }
    line
}

/// Render the client roster as labeled blocks.
pub fn render_clients(roster: &[ClientProfile]) -> Vec<String> {
    let mut lines = vec!["## Clients:".to_string()];

    for client in roster {
        lines.push(format!(
            "- {}: {} strength/{} skill (max {} total exercises)",
            client.name,
            client.strength,
            client.skill,
            client.slot_capacity()
        ));
        let goal = client.primary_goal.as_deref().unwrap_or("general fitness");
        lines.push(format!(
            "  Goal: {goal}, Intensity: {}",
            client.intensity
        ));
        if !client.muscle_targets.is_empty() {
            lines.push(format!("  Target muscles: {}", client.muscle_targets.join(", ")));
        }
        if !client.muscle_lessens.is_empty() {
            lines.push(format!("  Lessen load: {}", client.muscle_lessens.join(", ")));
        }
        if !client.joint_avoidance.is_empty() {
            lines.push(format!("  Avoid joints: {}", client.joint_avoidance.join(", ")));
        }
        if !client.include_requests.is_empty() {
            lines.push(format!("  Requested: {}", client.include_requests.join(", ")));
        }
        if !client.avoid_requests.is_empty() {
            lines.push(format!("  Avoid exercises: {}", client.avoid_requests.join(", ")));
        }
    }

    lines
}

/// Render equipment split into limited (counted) vs available groups.
pub fn render_equipment(inventory: &EquipmentInventory) -> Vec<String> {
    let limited = inventory
        .limited_items()
        .into_iter()
        .map(|(label, count)| format!("{count} {label}"))
        .collect::<Vec<_>>()
        .join(", ");
    let available = inventory.available_items().join(", ");

    vec![
        "## Equipment (resets each round):".to_string(),
        format!("- {limited}"),
        format!("- {available}"),
    ]
}

/// Render per-client remaining-slot lines.
///
/// Remainders are the raw arithmetic — a negative count means upstream
/// over-assigned and is left visible for human review.
pub fn render_slots(ledger: &SlotLedger) -> Vec<String> {
    let mut lines = vec!["## Remaining Slots:".to_string()];

    for entry in &ledger.entries {
        let per_unit = entry
            .per_unit
            .iter()
            .map(|(unit, open)| format!("{open} in {unit}"))
            .collect::<Vec<_>>()
            .join(", ");
        if per_unit.is_empty() {
            lines.push(format!("- {}: {} left", entry.client_name, entry.remaining));
        } else {
            lines.push(format!(
                "- {}: {} left ({per_unit})",
                entry.client_name, entry.remaining
            ));
        }
    }

    lines
}

/// Render per-client coverage status with an explicit failure marker when
/// a mandatory target is not yet covered anywhere.
pub fn render_coverage(ledger: &CoverageLedger) -> Vec<String> {
    let mut lines = vec!["## Muscle Target Coverage:".to_string()];

    for entry in &ledger.entries {
        if entry.targets.is_empty() {
            lines.push(format!("- {}: No specific targets", entry.client_name));
            continue;
        }

        let targets = entry.targets.join(", ");
        let status = if entry.is_covered() {
            format!("(covered in: {})", entry.covered_in.join(", "))
        } else {
            "❌ MUST ASSIGN".to_string()
        };
        lines.push(format!("- {}: Targets {targets} {status}", entry.client_name));
    }

    lines
}

/// Render per-client set-target lines.
pub fn render_set_targets(roster: &[ClientProfile]) -> Vec<String> {
    let mut lines = vec!["## Client Set Targets:".to_string()];
    for client in roster {
        lines.push(format!(
            "- {}: {} total sets target",
            client.name, client.set_target
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CoverageEntry, SlotEntry};
    use setforge_core::client::CapacityLevel;
    use setforge_core::exercise::ScoreBreakdown;

    #[test]
    fn equipment_inference_from_names() {
        assert_eq!(infer_equipment("Barbell Bench Press"), vec!["barbell", "bench"]);
        assert_eq!(infer_equipment("Goblet Squat"), vec!["KB"]);
        assert_eq!(infer_equipment("Lat Pulldown"), vec!["cable"]);
        assert_eq!(infer_equipment("Plank"), vec!["none"]);
        assert_eq!(infer_equipment("Air Squat"), vec!["none"]);
    }

    #[test]
    fn dumbbell_does_not_trigger_barbell() {
        assert_eq!(infer_equipment("Dumbbell Row"), vec!["DB"]);
    }

    #[test]
    fn option_line_shape() {
        let mut ex = CandidateExercise::new("Barbell Bench Press", 8.25);
        assert_eq!(format_option(&ex), "Barbell Bench Press (8.2, barbell+bench)");

        ex.breakdown = Some(ScoreBreakdown {
            include_boost: 2.0,
            ..Default::default()
        });
        assert!(format_option(&ex).ends_with("[CLIENT REQUEST]"));
    }

    #[test]
    fn client_block_includes_capacity_and_lists() {
        let mut hilary = ClientProfile::new("c1", "Hilary Banks");
        hilary.skill = CapacityLevel::Low;
        hilary.muscle_targets = vec!["chest".into()];
        hilary.include_requests = vec!["Barbell Bench Press".into()];

        let lines = render_clients(&[hilary]).join("\n");
        assert!(lines.contains("Hilary Banks: moderate strength/low skill (max 5 total exercises)"));
        assert!(lines.contains("Target muscles: chest"));
        assert!(lines.contains("Requested: Barbell Bench Press"));
        assert!(!lines.contains("Avoid joints"));
    }

    #[test]
    fn equipment_split_lines() {
        let lines = render_equipment(&EquipmentInventory::default());
        assert_eq!(lines[0], "## Equipment (resets each round):");
        assert!(lines[1].contains("2 barbells"));
        assert!(lines[1].contains("1 cable machine"));
        assert!(lines[2].contains("dumbbells (unlimited)"));
    }

    #[test]
    fn slot_lines_keep_negatives_visible() {
        let ledger = SlotLedger {
            entries: vec![SlotEntry {
                client_name: "Hilary".into(),
                capacity: 5,
                consumed: 6,
                remaining: -1,
                per_unit: vec![("Round 3".into(), 0)],
            }],
        };
        let lines = render_slots(&ledger);
        assert_eq!(lines[1], "- Hilary: -1 left (0 in Round 3)");
    }

    #[test]
    fn coverage_failure_marker() {
        let ledger = CoverageLedger {
            entries: vec![
                CoverageEntry {
                    client_name: "Hilary".into(),
                    targets: vec!["chest".into()],
                    covered_in: vec![],
                },
                CoverageEntry {
                    client_name: "Curtis".into(),
                    targets: vec![],
                    covered_in: vec![],
                },
            ],
        };
        let lines = render_coverage(&ledger);
        assert!(lines[1].contains("❌ MUST ASSIGN"));
        assert_eq!(lines[2], "- Curtis: No specific targets");
    }
}
