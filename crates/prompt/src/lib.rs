//! Prompt compilation for setforge.
//!
//! Turns a structured planning problem — candidate pools, client capacity
//! and goals, equipment inventory, deterministic pre-assignments — into a
//! natural-language instruction document for the text-generation provider.
//!
//! Layering, leaves first:
//! - [`volume`] — pure capacity × intensity → set-range lookup
//! - [`ledger`] — per-compile slot and coverage bookkeeping
//! - [`narrator`] — pure prose rendering of constraint objects
//! - [`compiler`] — fixed-order document assembly per planning family

pub mod compiler;
pub mod ledger;
pub mod narrator;
pub mod volume;

pub use compiler::PromptCompiler;
pub use ledger::{CoverageEntry, CoverageLedger, SlotEntry, SlotLedger};
pub use volume::{determine_volume, VolumeTarget};
