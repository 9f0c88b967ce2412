//! Prompt compilation — composes narration, volume targets, and a
//! session's exercise blueprint into one complete instruction document.
//!
//! # Determinism
//!
//! Compilation is a pure function of its inputs: identical blueprints,
//! rosters, and inventories always produce identical documents. Sections
//! are emitted in a fixed order so the generator's reply stays structurally
//! predictable.

use crate::ledger::{CoverageLedger, SlotLedger};
use crate::narrator;
use crate::volume::{determine_volume, VolumeTarget};
use setforge_core::blueprint::{
    unit_output_key, BlocksBlueprint, RoundBlueprint, RoundsBlueprint, SectionStructure,
    SessionBlueprint,
};
use setforge_core::client::ClientProfile;
use setforge_core::equipment::EquipmentInventory;
use setforge_core::exercise::CandidateExercise;
use setforge_core::provider::PromptDocument;
use std::collections::HashSet;
use tracing::debug;

const ROLE_SECTION: &str = "You are a workout programmer. Given the TOP exercises for each block, create a workout routine.";

const RULES_SECTION: &str = "## Rules
Your goal is to design a personalized, cohesive workout that:
- Aligns with the client's session goal and preferred intensity.
- Reflects the client's strength and skill levels throughout the programming (exercise order, volume, complexity).
- Includes any requested exercises, force it in
- Maintains balanced movement patterns, variety in fatigue profiles and modalities, and a logical flow between blocks.";

const INCLUDE_RULE: &str = "Includes any requested exercises, force it in";
const INCLUDE_RULE_EMPHASIZED: &str =
    "CRITICAL: Must include any requested exercises - these are non-negotiable requirements";

const CONTEXT_SECTION: &str = "## Context
You are provided with pre-filtered TOP exercises for each training block. Each exercise has been scored and selected based on the client's requirements.

Exercise data includes:
- name: Exercise name
- score: Selection priority (higher = better match)
- movement_pattern: Movement pattern classification
- primary_muscle: Main muscle group targeted

Client context may include:
- primary_goal: Training focus (strength or stability)
- strength: Client's strength capacity
- skill: Client's technical ability
- intensity: Desired session intensity
- include_requests: Specific exercises requested
- muscle_targets: Muscles to emphasize
- muscle_lessens: Muscles to avoid/reduce load";

const SET_DISTRIBUTION: &str = "## Constraints
Distribute the provided total set range across all blocks in a way that aligns with the client's session goal and preferred intensity.

Decide how many sets to assign per block based on:
- The block's role (e.g., primary strength vs accessory work).
- The relative intensity of each exercise (higher intensity = fewer sets).
- The total number of sets must remain within the provided range (never exceed or fall short).
- Do not assign fewer sets than the minimum per block if it results in falling below the total set range.";

const FALLBACK_CONSTRAINTS: &str = "Exercise selection constraints:
- Block A: Select exactly 1 exercise with 3-4 sets
- IMPORTANT: Maximum 8 exercises TOTAL across ALL blocks (no more than 8)
- This means you have 7 exercises remaining to distribute across blocks B, C, and D
- Count carefully: Block A (1) + Block B + Block C + Block D must equal 8 or fewer exercises";

const FALLBACK_MAX_LINE: &str =
    "IMPORTANT: Maximum 8 exercises TOTAL across ALL blocks (no more than 8)";
const FALLBACK_MAX_LINE_STRICT: &str =
    "CRITICAL REQUIREMENT: You MUST use EXACTLY 8 exercises TOTAL across ALL blocks (not fewer, not more)";

/// Fallback output keys used when no section structure is supplied.
const FALLBACK_KEYS: [&str; 4] = ["blockA", "blockB", "blockC", "blockD"];

const INSTRUCTIONS_SECTION: &str = "## Instructions
Select exercises for each block and assign sets. In your reasoning, include:
1. Why you selected each exercise
2. How you distributed the total sets across blocks
3. Confirm the total adds up to a number within the provided range";

/// Compiles a session blueprint into a two-block instruction document.
///
/// Stateless apart from its knobs — create one and reuse it.
pub struct PromptCompiler {
    /// How many candidates to list per pool
    top_candidates: usize,
    /// Rewrite the fallback total ceiling into an exact requirement
    strict_exercise_limit: bool,
    /// Rewrite the include rule into a non-negotiable requirement
    emphasize_requested: bool,
}

impl Default for PromptCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptCompiler {
    pub fn new() -> Self {
        Self {
            top_candidates: 5,
            strict_exercise_limit: false,
            emphasize_requested: false,
        }
    }

    /// Set how many candidates each shortlist shows.
    pub fn with_top_candidates(mut self, n: usize) -> Self {
        self.top_candidates = n;
        self
    }

    /// Demand the exact fallback exercise count instead of a ceiling.
    pub fn with_strict_exercise_limit(mut self, enabled: bool) -> Self {
        self.strict_exercise_limit = enabled;
        self
    }

    /// Escalate the include-requested-exercises rule to CRITICAL.
    pub fn with_emphasized_requests(mut self, enabled: bool) -> Self {
        self.emphasize_requested = enabled;
        self
    }

    /// Compile the blueprint into a prompt document.
    pub fn compile(
        &self,
        blueprint: &SessionBlueprint,
        roster: &[ClientProfile],
        equipment: &EquipmentInventory,
    ) -> PromptDocument {
        let document = match blueprint {
            SessionBlueprint::Rounds(rounds) => self.compile_rounds(rounds, roster, equipment),
            SessionBlueprint::Blocks(blocks) => self.compile_blocks(blocks, roster),
        };
        debug!(
            system_len = document.system.len(),
            user_len = document.user.len(),
            "Compiled prompt document"
        );
        document
    }

    // ── Rounds family ─────────────────────────────────────────────────

    fn compile_rounds(
        &self,
        blueprint: &RoundsBlueprint,
        roster: &[ClientProfile],
        equipment: &EquipmentInventory,
    ) -> PromptDocument {
        let slot_ledger = SlotLedger::derive(roster, blueprint);
        let coverage_ledger = CoverageLedger::derive(roster, blueprint);

        let unit_names: Vec<&str> = blueprint.remaining.iter().map(|u| u.name.as_str()).collect();
        let units_phrase = join_names(&unit_names);

        let system = self.rounds_system(blueprint, roster, &units_phrase);
        let user = self.rounds_user(
            blueprint,
            roster,
            equipment,
            &slot_ledger,
            &coverage_ledger,
        );

        PromptDocument { system, user }
    }

    fn rounds_system(
        &self,
        blueprint: &RoundsBlueprint,
        roster: &[ClientProfile],
        units_phrase: &str,
    ) -> String {
        let mut sections: Vec<String> = Vec::new();

        sections.push(format!(
            "You are a group fitness coordinator planning exercises for {units_phrase} of a workout for {} clients.",
            roster.len()
        ));

        sections.push(format!(
            "## Task:
Assign exercises for {units_phrase} following these MANDATORY requirements:

**MANDATORY (Must be satisfied):**
1. Each client with muscle targets MUST receive exercises for those targets
2. Each client MUST have at least 1 shared exercise across the whole session
3. Respect all \"lessen\" and \"avoid\" requests (never assign exercises for those muscles or joints)
4. DO NOT re-assign any exercises marked as \"ALREADY ASSIGNED\"

**PRIORITIES (After mandatory requirements):**
1. For clients with no preferences: prioritize movement balance and shared exercises
2. Keep variety against earlier rounds and a logical easy-to-hard flow
3. Use shared exercises when multiple clients have similar needs

**CONSTRAINTS:**
1. Equipment limits (counts reset each round)
2. Client remaining slots"
        ));

        sections.push(self.rounds_output_format(blueprint));
        sections.join("\n\n")
    }

    fn rounds_output_format(&self, blueprint: &RoundsBlueprint) -> String {
        let mut lines = vec!["Output JSON:".to_string(), "```json".to_string(), "{".to_string()];

        for unit in &blueprint.remaining {
            let key = unit_output_key(&unit.name);
            lines.push(format!(
                "  \"{key}\": [{{\"exercise\": \"exercise name\", \"sets\": 3, \"reps\": \"8-10\", \"rest\": \"60s\", \"notes\": \"optional\"}}],"
            ));
        }
        lines.push("  \"reasoning\": \"brief explanation\"".to_string());
        lines.push("}".to_string());
        lines.push("```".to_string());
        lines.join("\n")
    }

    fn rounds_user(
        &self,
        blueprint: &RoundsBlueprint,
        roster: &[ClientProfile],
        equipment: &EquipmentInventory,
        slot_ledger: &SlotLedger,
        coverage_ledger: &CoverageLedger,
    ) -> String {
        let mut sections: Vec<String> = Vec::new();

        // Workout structure overview
        let mut structure = vec!["## Workout Structure:".to_string()];
        for round in &blueprint.completed {
            structure.push(format!("- {}: {} ✓", round.name, round.focus));
        }
        for unit in &blueprint.remaining {
            structure.push(format!("- {}: {}", unit.name, unit.focus));
        }
        structure.push(String::new());
        structure.push(
            "**Remember: Client muscle targets and goals take priority over movement pattern balance**"
                .to_string(),
        );
        sections.push(structure.join("\n"));

        sections.push(narrator::render_clients(roster).join("\n"));

        // Completed units
        let mut completed = vec!["## Already Completed:".to_string()];
        for round in &blueprint.completed {
            completed.push(format!("{}: {}", round.name, round.focus));
            for assignment in &round.assignments {
                completed.push(format!("- {}: {}", assignment.client_name, assignment.exercise));
            }
        }
        completed.push(format!(
            "Each client has used {} exercise slots.",
            blueprint.completed.len()
        ));
        sections.push(completed.join("\n"));

        // Deterministic pre-assignments, grouped by unit
        if !blueprint.preassigned.is_empty() {
            let mut preassigned = vec!["## Pre-Assigned Exercises:".to_string()];
            for unit in &blueprint.remaining {
                let assignments = blueprint.preassigned_for(&unit.name);
                if assignments.is_empty() {
                    continue;
                }
                preassigned.push(format!("{}:", unit.name));
                for assignment in assignments {
                    preassigned.push(format!(
                        "- {}: {} ({} - ALREADY ASSIGNED)",
                        assignment.client_name,
                        assignment.exercise,
                        assignment.reason.tag()
                    ));
                }
            }
            sections.push(preassigned.join("\n"));
        }

        sections.push(narrator::render_coverage(coverage_ledger).join("\n"));

        sections.push(
            "## Shared Exercise Status:
**REQUIREMENT: Each client must have at least 1 shared exercise across all rounds**
(Shared exercises in completed rounds count toward this requirement)"
                .to_string(),
        );

        sections.push(narrator::render_set_targets(roster).join("\n"));
        sections.push(narrator::render_slots(slot_ledger).join("\n"));
        sections.push(narrator::render_equipment(equipment).join("\n"));

        for unit in &blueprint.remaining {
            sections.push(self.render_unit_candidates(unit, blueprint, roster));
        }

        sections.join("\n\n")
    }

    /// Render one remaining unit's shared and per-client shortlists.
    ///
    /// Exercises already bound to a client (completed rounds or
    /// pre-assignments) are excluded so the generator cannot re-propose
    /// them.
    fn render_unit_candidates(
        &self,
        unit: &RoundBlueprint,
        blueprint: &RoundsBlueprint,
        roster: &[ClientProfile],
    ) -> String {
        let assigned_anywhere: HashSet<&str> = roster
            .iter()
            .flat_map(|c| blueprint.assigned_exercises(&c.id))
            .collect();

        let mut lines = vec![format!("## {} - {}:", unit.name, unit.focus), String::new()];

        lines.push("### Shared Options:".to_string());
        let shared: Vec<&CandidateExercise> = unit
            .shared_candidates
            .iter()
            .filter(|c| !assigned_anywhere.contains(c.name.as_str()))
            .take(self.top_candidates)
            .collect();

        if shared.is_empty() {
            lines.push("*No shared candidates available for this round*".to_string());
        }
        for (idx, exercise) in shared.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, narrator::format_option(exercise)));

            let can_do: Vec<&str> = roster
                .iter()
                .filter(|c| exercise.shared_with(&c.id))
                .map(|c| c.first_name())
                .collect();
            let cant_do: Vec<&str> = roster
                .iter()
                .filter(|c| !exercise.shared_with(&c.id))
                .map(|c| c.first_name())
                .collect();
            if !can_do.is_empty() {
                lines.push(format!("   Can do: {}", can_do.join(", ")));
            }
            if !cant_do.is_empty() {
                lines.push(format!("   Can't do: {}", cant_do.join(", ")));
            }
        }

        lines.push(String::new());
        lines.push("### Individual Options (score, equipment):".to_string());

        for client in roster {
            lines.push(format!("**{}:**", client.first_name()));

            let assigned: HashSet<&str> =
                blueprint.assigned_exercises(&client.id).into_iter().collect();
            let options: Vec<&CandidateExercise> = unit
                .client_candidates
                .get(&client.id)
                .map(|pool| {
                    pool.iter()
                        .filter(|c| !assigned.contains(c.name.as_str()))
                        .take(self.top_candidates)
                        .collect()
                })
                .unwrap_or_default();

            if options.is_empty() {
                lines.push("*No candidates available*".to_string());
            }
            for (idx, exercise) in options.iter().enumerate() {
                lines.push(format!("{}. {}", idx + 1, narrator::format_option(exercise)));
            }
            lines.push(String::new());
        }

        // Drop the trailing blank line from the last client
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    // ── Blocks family ─────────────────────────────────────────────────

    fn compile_blocks(&self, blueprint: &BlocksBlueprint, roster: &[ClientProfile]) -> PromptDocument {
        let system = self.blocks_system(blueprint);
        let user = self.blocks_user(blueprint, roster);
        PromptDocument { system, user }
    }

    fn blocks_system(&self, blueprint: &BlocksBlueprint) -> String {
        let mut sections: Vec<String> = Vec::new();

        sections.push(ROLE_SECTION.to_string());

        let rules = if self.emphasize_requested {
            RULES_SECTION.replace(INCLUDE_RULE, INCLUDE_RULE_EMPHASIZED)
        } else {
            RULES_SECTION.to_string()
        };
        sections.push(rules);

        sections.push(CONTEXT_SECTION.to_string());

        let constraints = match &blueprint.structure {
            Some(structure) => self.structure_constraints(structure),
            None => {
                let fallback = if self.strict_exercise_limit {
                    FALLBACK_CONSTRAINTS.replace(FALLBACK_MAX_LINE, FALLBACK_MAX_LINE_STRICT)
                } else {
                    FALLBACK_CONSTRAINTS.to_string()
                };
                fallback
            }
        };
        sections.push(format!("{SET_DISTRIBUTION}\n\n{constraints}"));

        sections.push(self.blocks_output_format(blueprint));
        sections.push(INSTRUCTIONS_SECTION.to_string());

        sections.join("\n\n")
    }

    fn structure_constraints(&self, structure: &SectionStructure) -> String {
        let mut lines = vec!["Exercise selection constraints:".to_string()];

        for section in &structure.sections {
            let count = if section.min_exercises == section.max_exercises {
                format!("exactly {}", section.min_exercises)
            } else {
                format!("{}-{}", section.min_exercises, section.max_exercises)
            };
            lines.push(format!("- {}: Select {count} exercises", section.name));
        }

        if let Some(limit) = structure.total_limit {
            if self.strict_exercise_limit {
                lines.push(format!(
                    "- CRITICAL REQUIREMENT: You MUST use EXACTLY {limit} exercises TOTAL across ALL sections (not fewer, not more)"
                ));
            } else {
                lines.push(format!(
                    "- IMPORTANT: Maximum {limit} exercises TOTAL across ALL sections (no more than {limit})"
                ));
            }
        }

        lines.join("\n")
    }

    /// The literal output-schema example. Keys are derived from section
    /// names (lower-cased, whitespace removed) so the reply shape is
    /// predictable; without a structure the fallback block keys are used.
    fn blocks_output_format(&self, blueprint: &BlocksBlueprint) -> String {
        let keys: Vec<String> = match &blueprint.structure {
            Some(structure) => structure
                .sections
                .iter()
                .map(|s| unit_output_key(&s.name))
                .collect(),
            None => FALLBACK_KEYS.iter().map(|k| k.to_string()).collect(),
        };

        let mut lines = vec![
            "## Output Format".to_string(),
            "Return a JSON object with this structure:".to_string(),
            "{".to_string(),
        ];
        for key in &keys {
            lines.push(format!(
                "  \"{key}\": [{{\"exercise\": \"exercise name\", \"sets\": number}}],"
            ));
        }
        lines.push(
            "  \"reasoning\": \"Your explanation for why you selected each exercise AND state the total set range provided\""
                .to_string(),
        );
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn blocks_user(&self, blueprint: &BlocksBlueprint, roster: &[ClientProfile]) -> String {
        let mut body = String::from("Here are the TOP exercises selected for each block:\n");

        let keys: Vec<String> = match &blueprint.structure {
            Some(structure) => structure
                .sections
                .iter()
                .map(|s| unit_output_key(&s.name))
                .collect(),
            None => blueprint.candidates.keys().cloned().collect(),
        };

        for key in &keys {
            body.push_str(&format!("\n{}:\n", key.to_uppercase()));
            let pool = blueprint.candidates.get(key).map(Vec::as_slice).unwrap_or(&[]);
            if pool.is_empty() {
                // Rendered even when empty so the generator knows not to
                // invent exercises for this section.
                body.push_str("(no candidates available)\n");
                continue;
            }
            for (idx, exercise) in pool.iter().take(self.top_candidates).enumerate() {
                body.push_str(&format!("{}. {} (Score: {})\n", idx + 1, exercise.name, exercise.score));
                if let Some(pattern) = &exercise.movement_pattern {
                    body.push_str(&format!("   Tags: {pattern}\n"));
                }
                if let Some(muscle) = &exercise.primary_muscle {
                    body.push_str(&format!("   Primary: {muscle}\n"));
                }
            }
        }

        let volume = roster
            .first()
            .map(volume_for_client)
            .unwrap_or_else(|| determine_volume(None, None));

        if let Some(client) = roster.first() {
            let context =
                serde_json::to_string_pretty(client).unwrap_or_else(|_| "{}".to_string());
            body.push_str(&format!("\nClient Context:\n{context}\n"));
        }

        body.push_str(&format!(
            "\nTotal Set Range: {}-{} sets\n{}\n",
            volume.min_sets, volume.max_sets, volume.reasoning
        ));
        body.push_str("\nPlease interpret these exercises according to the system instructions.");
        body
    }
}

/// Determine the volume target for one client from their profile levels.
pub fn volume_for_client(client: &ClientProfile) -> VolumeTarget {
    determine_volume(
        Some(client.strength.as_str()),
        Some(client.intensity.as_str()),
    )
}

/// Join unit names into prose: "Round 3", "Round 3 and Final Round",
/// "Round 2, Round 3 and Final Round".
fn join_names(names: &[&str]) -> String {
    match names {
        [] => "the remaining rounds".to_string(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
