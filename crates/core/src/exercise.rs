//! Candidate exercise types.
//!
//! Candidates arrive pre-scored from the upstream selection engine; the
//! score is an opaque desirability number and is never re-derived here.

use crate::client::ClientId;
use serde::{Deserialize, Serialize};

/// A scored exercise candidate for a planning unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateExercise {
    /// Exercise name (free text, resolved against the catalog later)
    pub name: String,

    /// Desirability score computed upstream (higher = better match)
    pub score: f64,

    /// Movement pattern (e.g., "squat", "horizontal_push")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_pattern: Option<String>,

    /// Main muscle group targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,

    /// Secondary muscle groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_muscles: Vec<String>,

    /// Clients who can perform this exercise together
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_by: Vec<ClientId>,

    /// Score breakdown flags from the upstream scorer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl CandidateExercise {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            movement_pattern: None,
            primary_muscle: None,
            secondary_muscles: Vec::new(),
            shared_by: Vec::new(),
            breakdown: None,
        }
    }

    /// Whether this candidate was explicitly requested by a client.
    pub fn is_client_request(&self) -> bool {
        self.breakdown
            .as_ref()
            .is_some_and(|b| b.include_boost > 0.0)
    }

    /// Whether the given client appears in the sharing set.
    pub fn shared_with(&self, client: &ClientId) -> bool {
        self.shared_by.contains(client)
    }
}

/// Score adjustment components from the upstream scoring engine.
///
/// Only the signs/magnitudes matter for narration; the totals are already
/// folded into `CandidateExercise::score`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Boost applied because the client explicitly requested the exercise
    #[serde(default)]
    pub include_boost: f64,

    /// Bonus for hitting a target muscle
    #[serde(default)]
    pub target_bonus: f64,

    /// Penalty for loading a lessen muscle (negative or zero)
    #[serde(default)]
    pub lessen_penalty: f64,

    /// Adjustment for intensity fit
    #[serde(default)]
    pub intensity_adjustment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_request_flag_from_breakdown() {
        let mut ex = CandidateExercise::new("Barbell Bench Press", 8.5);
        assert!(!ex.is_client_request());

        ex.breakdown = Some(ScoreBreakdown {
            include_boost: 2.0,
            ..Default::default()
        });
        assert!(ex.is_client_request());
    }

    #[test]
    fn sharing_set_membership() {
        let mut ex = CandidateExercise::new("Goblet Squat", 7.0);
        ex.shared_by = vec![ClientId::from("c1"), ClientId::from("c2")];
        assert!(ex.shared_with(&ClientId::from("c1")));
        assert!(!ex.shared_with(&ClientId::from("c3")));
    }
}
