//! Equipment inventory for a training space.
//!
//! Counted items are genuinely scarce (two clients cannot share one
//! barbell mid-round); the rest are treated as effectively unlimited.

use serde::{Deserialize, Serialize};

/// Per-item equipment counts, read-only during a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentInventory {
    pub barbells: u32,
    pub benches: u32,
    pub cable_machines: u32,
    pub landmines: u32,
    pub kettlebells: u32,
    pub bands: u32,
    pub medicine_balls: u32,
}

impl Default for EquipmentInventory {
    fn default() -> Self {
        Self {
            barbells: 2,
            benches: 2,
            cable_machines: 1,
            landmines: 1,
            kettlebells: 2,
            bands: 3,
            medicine_balls: 2,
        }
    }
}

impl EquipmentInventory {
    /// Scarce, counted items as (label, count) pairs.
    pub fn limited_items(&self) -> Vec<(&'static str, u32)> {
        vec![
            ("barbells", self.barbells),
            ("benches", self.benches),
            ("cable machine", self.cable_machines),
            ("landmine", self.landmines),
            ("kettlebells", self.kettlebells),
        ]
    }

    /// Effectively unconstrained item labels.
    pub fn available_items(&self) -> Vec<String> {
        vec![
            format!("{} bands", self.bands),
            "medicine balls".to_string(),
            "dumbbells (unlimited)".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inventory_counts() {
        let inv = EquipmentInventory::default();
        assert_eq!(inv.barbells, 2);
        assert_eq!(inv.benches, 2);
        assert_eq!(inv.cable_machines, 1);
    }

    #[test]
    fn limited_and_available_split() {
        let inv = EquipmentInventory::default();
        let limited = inv.limited_items();
        assert!(limited.iter().any(|(label, n)| *label == "benches" && *n == 2));
        let available = inv.available_items();
        assert!(available.iter().any(|s| s.contains("dumbbells")));
    }
}
