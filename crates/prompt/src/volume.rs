//! Total-volume lookup: maps capacity × intensity to a target set range.
//!
//! Inputs are free-form strings coming from client context; only the exact
//! lowercase level names are recognized. Anything else — wrong case,
//! numbers, unknown strings, absent values — selects the full default
//! moderate × moderate cell rather than a partial substitution.

use serde::{Deserialize, Serialize};

/// A target total-work range with human-readable justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeTarget {
    pub min_sets: u32,
    pub max_sets: u32,
    pub reasoning: String,
}

/// Row order: very_low, low, moderate, high.
/// Column order: low, moderate, high intensity.
const MATRIX: [[(u32, u32); 3]; 4] = [
    [(14, 16), (16, 18), (18, 20)],
    [(16, 18), (18, 20), (20, 22)],
    [(17, 19), (19, 22), (22, 25)],
    [(18, 20), (22, 25), (25, 27)],
];

const DEFAULT_CAPACITY: usize = 2; // moderate
const DEFAULT_INTENSITY: usize = 1; // moderate

fn capacity_index(value: &str) -> Option<usize> {
    match value {
        "very_low" => Some(0),
        "low" => Some(1),
        "moderate" => Some(2),
        "high" => Some(3),
        _ => None,
    }
}

fn intensity_index(value: &str) -> Option<usize> {
    match value {
        "low" => Some(0),
        "moderate" => Some(1),
        "high" => Some(2),
        _ => None,
    }
}

/// Determine the target set range for a capacity/intensity pair.
///
/// An unrecognized or missing value on either axis falls back to the
/// moderate/moderate cell.
pub fn determine_volume(capacity: Option<&str>, intensity: Option<&str>) -> VolumeTarget {
    let resolved = capacity
        .and_then(capacity_index)
        .zip(intensity.and_then(intensity_index));
    let (cap_idx, int_idx) = resolved.unwrap_or((DEFAULT_CAPACITY, DEFAULT_INTENSITY));

    let (min_sets, max_sets) = MATRIX[cap_idx][int_idx];

    let mut clauses: Vec<String> = Vec::new();
    match cap_idx {
        0 | 1 => clauses.push("Lower strength capacity requires conservative volume".into()),
        3 => clauses.push("Higher strength capacity allows for increased training volume".into()),
        _ => {}
    }
    match int_idx {
        0 => clauses.push("Lower intensity with controlled volume".into()),
        2 => clauses.push("Higher intensity increases total work capacity".into()),
        _ => {}
    }
    clauses.push(format!(
        "Total: {min_sets}-{max_sets} sets for optimal training stimulus"
    ));

    VolumeTarget {
        min_sets,
        max_sets,
        reasoning: clauses.join(". "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_extremes() {
        let low = determine_volume(Some("very_low"), Some("low"));
        assert_eq!((low.min_sets, low.max_sets), (14, 16));

        let high = determine_volume(Some("high"), Some("high"));
        assert_eq!((high.min_sets, high.max_sets), (25, 27));
    }

    #[test]
    fn full_matrix_gaps_are_two_or_three() {
        let capacities = ["very_low", "low", "moderate", "high"];
        let intensities = ["low", "moderate", "high"];
        for cap in capacities {
            for int in intensities {
                let target = determine_volume(Some(cap), Some(int));
                assert!(target.max_sets > target.min_sets, "{cap}/{int}");
                let gap = target.max_sets - target.min_sets;
                assert!((2..=3).contains(&gap), "{cap}/{int} gap {gap}");
            }
        }
    }

    #[test]
    fn missing_either_axis_selects_full_default() {
        for target in [
            determine_volume(None, None),
            determine_volume(None, Some("high")),
            determine_volume(Some("low"), None),
        ] {
            assert_eq!((target.min_sets, target.max_sets), (19, 22));
        }
    }

    #[test]
    fn unrecognized_values_select_full_default() {
        for target in [
            determine_volume(Some("invalid_strength"), Some("low")),
            determine_volume(Some("high"), Some("invalid_intensity")),
            determine_volume(Some("VERY_LOW"), Some("low")),
            determine_volume(Some("3"), Some("1")),
        ] {
            assert_eq!((target.min_sets, target.max_sets), (19, 22));
        }
    }

    #[test]
    fn moderate_pair_gets_minimal_reasoning() {
        let target = determine_volume(Some("moderate"), Some("moderate"));
        assert_eq!(
            target.reasoning,
            "Total: 19-22 sets for optimal training stimulus"
        );
        assert!(!target.reasoning.contains("Lower"));
        assert!(!target.reasoning.contains("Higher"));
    }

    #[test]
    fn reasoning_clauses_for_low_capacity_low_intensity() {
        let target = determine_volume(Some("very_low"), Some("low"));
        assert!(target
            .reasoning
            .contains("Lower strength capacity requires conservative volume"));
        assert!(target.reasoning.contains("Lower intensity with controlled volume"));
        assert!(target
            .reasoning
            .contains("14-16 sets for optimal training stimulus"));
    }

    #[test]
    fn reasoning_has_three_clauses_when_both_axes_speak() {
        let target = determine_volume(Some("low"), Some("high"));
        assert!(target.reasoning.contains("Lower strength capacity"));
        assert!(target.reasoning.contains("Higher intensity"));
        assert_eq!(target.reasoning.split(". ").count(), 3);
    }
}
