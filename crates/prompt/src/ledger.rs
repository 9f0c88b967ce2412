//! Per-compile bookkeeping ledgers.
//!
//! Both ledgers are recomputed fresh for every compilation from read-only
//! inputs and never persisted. They exist only to be narrated into the
//! prompt; neither one silently auto-fixes anything.

use setforge_core::blueprint::{AssignmentReason, RoundsBlueprint};
use setforge_core::client::ClientProfile;

/// One client's slot arithmetic for the session.
#[derive(Debug, Clone)]
pub struct SlotEntry {
    pub client_name: String,
    /// Total capacity derived from strength/skill
    pub capacity: u32,
    /// Slots consumed by completed rounds and pre-assignments
    pub consumed: u32,
    /// Raw `capacity - consumed`. Can go negative when upstream
    /// over-assigned; the negative is surfaced in prose, not clamped.
    pub remaining: i64,
    /// Per remaining unit: slots still open there (1 minus pre-assigned)
    pub per_unit: Vec<(String, i64)>,
}

/// Slot bookkeeping for the whole roster.
#[derive(Debug, Clone)]
pub struct SlotLedger {
    pub entries: Vec<SlotEntry>,
}

impl SlotLedger {
    /// Derive the ledger from roster capacity plus deterministic
    /// assignment counts. One slot per completed round per client, plus
    /// one per pre-assignment.
    pub fn derive(roster: &[ClientProfile], blueprint: &RoundsBlueprint) -> Self {
        let completed_slots = blueprint.completed.len() as u32;

        let entries = roster
            .iter()
            .map(|client| {
                let preassigned: u32 = blueprint
                    .preassigned
                    .values()
                    .flatten()
                    .filter(|a| a.client_id == client.id)
                    .count() as u32;

                let capacity = client.slot_capacity();
                let consumed = completed_slots + preassigned;

                let per_unit = blueprint
                    .remaining
                    .iter()
                    .map(|unit| {
                        let here = blueprint
                            .preassigned_for(&unit.name)
                            .iter()
                            .filter(|a| a.client_id == client.id)
                            .count() as i64;
                        (unit.name.clone(), 1 - here)
                    })
                    .collect();

                SlotEntry {
                    client_name: client.name.clone(),
                    capacity,
                    consumed,
                    remaining: capacity as i64 - consumed as i64,
                    per_unit,
                }
            })
            .collect();

        Self { entries }
    }
}

/// One client's mandatory muscle-target coverage status.
#[derive(Debug, Clone)]
pub struct CoverageEntry {
    pub client_name: String,
    pub targets: Vec<String>,
    /// Units in which a muscle-target assignment already covers the client
    pub covered_in: Vec<String>,
}

impl CoverageEntry {
    pub fn is_covered(&self) -> bool {
        !self.covered_in.is_empty()
    }
}

/// Coverage bookkeeping for the whole roster.
#[derive(Debug, Clone)]
pub struct CoverageLedger {
    pub entries: Vec<CoverageEntry>,
}

impl CoverageLedger {
    /// Derive coverage by scanning deterministic-assignment reasons against
    /// each client's target list, across completed and pre-assigned units.
    pub fn derive(roster: &[ClientProfile], blueprint: &RoundsBlueprint) -> Self {
        let entries = roster
            .iter()
            .map(|client| {
                let mut covered_in: Vec<String> = Vec::new();

                for round in &blueprint.completed {
                    let covers = round.assignments.iter().any(|a| {
                        a.client_id == client.id && a.reason == AssignmentReason::MuscleTarget
                    });
                    if covers {
                        covered_in.push(round.name.clone());
                    }
                }
                for (unit, assignments) in &blueprint.preassigned {
                    let covers = assignments.iter().any(|a| {
                        a.client_id == client.id && a.reason == AssignmentReason::MuscleTarget
                    });
                    if covers {
                        covered_in.push(unit.clone());
                    }
                }

                CoverageEntry {
                    client_name: client.name.clone(),
                    targets: client.muscle_targets.clone(),
                    covered_in,
                }
            })
            .collect();

        Self { entries }
    }
}
