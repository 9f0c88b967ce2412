//! Persistable plan types — the final output of a generation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel identifier for line items whose exercise name could not be
/// resolved against the catalog. The item is carried through for human
/// reconciliation instead of being dropped.
pub const UNKNOWN_EXERCISE_ID: &str = "unknown";

/// The closed set of supported plan templates.
///
/// Each variant owns its group naming and static metadata; adding a kind is
/// a compile-time-checked extension, not a silent no-op default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Flat rep-based session organized as lettered blocks
    Standard,
    /// Round-oriented time-based session
    Circuit,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Circuit => "circuit",
        }
    }

    /// Human-readable group label for a generation-output key.
    ///
    /// Only the circuit kind interprets `round*` keys numerically
    /// ("round3" → "Round 3"); everything else gets its first letter
    /// upper-cased verbatim ("blockA" → "BlockA").
    pub fn group_label(&self, key: &str) -> String {
        if *self == Self::Circuit {
            let lower = key.to_lowercase();
            if let Some(number) = lower.strip_prefix("round") {
                if !number.is_empty() {
                    return format!("Round {number}");
                }
            }
        }
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Static template metadata stored alongside the plan.
    pub fn template_config(&self) -> serde_json::Value {
        match self {
            Self::Circuit => serde_json::json!({
                "rounds": 3,
                "workRestRatio": "45s/15s",
                "format": "time-based",
            }),
            Self::Standard => serde_json::json!({
                "blocks": ["A", "B", "C", "D"],
                "format": "rep-based",
            }),
        }
    }

    /// Default plan name, templated with the given date.
    pub fn default_plan_name(&self, date: DateTime<Utc>) -> String {
        let date = date.format("%b %-d");
        match self {
            Self::Circuit => format!("Circuit Training - {date}"),
            Self::Standard => format!("Strength Training - {date}"),
        }
    }
}

/// A generation-result line item after name resolution.
///
/// Either bound to a canonical catalog id or flagged with the
/// [`UNKNOWN_EXERCISE_ID`] sentinel — the originally requested name and
/// prescription text are always retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedExercise {
    /// Catalog id, or the "unknown" sentinel
    pub exercise_id: String,

    /// The name as the generator wrote it, kept for fallback/reference
    pub exercise_name: String,

    /// Planned set count (0 when the generator gave none)
    pub sets: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_period: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Zero-based position across the whole plan
    pub order_index: usize,

    /// Group label, e.g. "Round 3" or "BlockA"
    pub group_name: String,
}

impl ResolvedExercise {
    /// Whether the name resolved to a real catalog entry.
    pub fn is_resolved(&self) -> bool {
        self.exercise_id != UNKNOWN_EXERCISE_ID
    }
}

/// The final persistence-ready plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistablePlan {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub template: TemplateKind,

    /// Sum of all line-item set counts
    pub total_planned_sets: u32,

    /// The generator's structured output, verbatim, for audit
    pub raw_output: serde_json::Value,

    /// Template-specific static metadata
    pub template_config: serde_json::Value,

    pub created_at: DateTime<Utc>,

    /// Ordered line items
    pub exercises: Vec<ResolvedExercise>,
}

/// Referential-validity report produced alongside every plan.
///
/// `valid == false` never blocks transformation; unresolved items are
/// carried through with the sentinel id so nothing is silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub missing_exercises: Vec<String>,
    pub warnings: Vec<String>,
}
