//! Session blueprint types — the planning problem handed to the compiler.
//!
//! A blueprint is one of two closed families:
//!
//! - **Rounds**: a small number of sequential rounds sharing one equipment
//!   pool and per-client slot budgets across the whole session. Some rounds
//!   are already completed or pre-assigned deterministically; the generator
//!   fills the rest.
//! - **Blocks**: a flat single-list session with named sections, each
//!   declaring a min/max exercise count and an optional total ceiling.
//!
//! The family is a tagged variant, not a string: adding a family is a
//! compile-time-checked extension.

use crate::client::ClientId;
use crate::exercise::CandidateExercise;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why an exercise was locked in before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentReason {
    /// The client explicitly asked for this exercise
    ClientRequest,
    /// Mandatory muscle-target coverage
    MuscleTarget,
}

impl AssignmentReason {
    /// Uppercase tag used in prompt narration.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ClientRequest => "CLIENT REQUEST",
            Self::MuscleTarget => "MUSCLE TARGET",
        }
    }
}

/// A (client, exercise) binding decided before the generator runs.
///
/// Immune to being overridden: the compiler excludes it from candidate
/// listings and the task rules forbid re-proposing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterministicAssignment {
    pub client_id: ClientId,
    pub client_name: String,
    pub exercise: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    pub reason: AssignmentReason,
}

/// A planning unit already executed before the generator is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRound {
    /// Unit name, e.g. "Round 1"
    pub name: String,
    /// One-line focus description, e.g. "Individual lower body exercises"
    pub focus: String,
    /// One assignment per client
    pub assignments: Vec<DeterministicAssignment>,
}

/// A planning unit still open for the generator: its candidate pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundBlueprint {
    /// Unit name, e.g. "Round 3"
    pub name: String,
    /// Focus line shown as the unit heading, e.g. "Strength Focus"
    pub focus: String,
    /// Exercises usable by multiple clients, sorted by score descending
    pub shared_candidates: Vec<CandidateExercise>,
    /// Per-client pools, each sorted by score descending
    pub client_candidates: BTreeMap<ClientId, Vec<CandidateExercise>>,
}

/// The rounds planning family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundsBlueprint {
    /// Rounds already completed, in order
    pub completed: Vec<CompletedRound>,
    /// Rounds the generator must fill, in order
    pub remaining: Vec<RoundBlueprint>,
    /// Deterministic pre-assignments for remaining rounds, keyed by unit name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preassigned: BTreeMap<String, Vec<DeterministicAssignment>>,
}

impl RoundsBlueprint {
    /// Pre-assignments for one remaining unit, empty slice if none.
    pub fn preassigned_for(&self, unit: &str) -> &[DeterministicAssignment] {
        self.preassigned.get(unit).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All exercises already bound to the given client, across completed
    /// rounds and pre-assignments. These must never be re-proposed.
    pub fn assigned_exercises(&self, client: &ClientId) -> Vec<&str> {
        let completed = self
            .completed
            .iter()
            .flat_map(|r| r.assignments.iter())
            .filter(|a| &a.client_id == client)
            .map(|a| a.exercise.as_str());
        let preassigned = self
            .preassigned
            .values()
            .flatten()
            .filter(|a| &a.client_id == client)
            .map(|a| a.exercise.as_str());
        completed.chain(preassigned).collect()
    }
}

/// Exercise-count bounds for one named section of a flat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub min_exercises: u32,
    pub max_exercises: u32,
}

/// The declared shape of a flat single-list session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionStructure {
    pub sections: Vec<SectionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_limit: Option<u32>,
}

/// The blocks planning family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlocksBlueprint {
    /// Declared structure; `None` selects the built-in four-block fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<SectionStructure>,
    /// Candidate pool per section key (e.g. "blockA"), sorted by score
    pub candidates: BTreeMap<String, Vec<CandidateExercise>>,
}

/// A complete planning problem for one session, one of the two families.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum SessionBlueprint {
    Rounds(RoundsBlueprint),
    Blocks(BlocksBlueprint),
}

impl SessionBlueprint {
    /// The template kind this blueprint produces plans for.
    pub fn template_kind(&self) -> crate::plan::TemplateKind {
        match self {
            Self::Rounds(_) => crate::plan::TemplateKind::Circuit,
            Self::Blocks(_) => crate::plan::TemplateKind::Standard,
        }
    }
}

/// Derive the JSON output key for a planning-unit name: lower-cased with
/// whitespace removed, so "Round 3" becomes "round3".
pub fn unit_output_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
