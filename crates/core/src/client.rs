//! Client profile domain types.
//!
//! A `ClientProfile` is the immutable per-client input to a single planning
//! run: capacity levels, intensity preference, goals, and the preference
//! lists (target/lessen muscles, include/avoid exercises, joints to spare).

use serde::{Deserialize, Serialize};

/// Unique identifier for a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal capacity scale for strength and skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityLevel {
    VeryLow,
    Low,
    Moderate,
    High,
}

impl CapacityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for CapacityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferred session intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
}

impl IntensityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable input describing one client for a single planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Unique client ID
    pub id: ClientId,

    /// Display name
    pub name: String,

    /// Strength capacity
    pub strength: CapacityLevel,

    /// Skill (technical) capacity
    pub skill: CapacityLevel,

    /// Preferred session intensity
    pub intensity: IntensityLevel,

    /// Primary training goal (e.g., "strength", "stability")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<String>,

    /// Muscles the client wants emphasized
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub muscle_targets: Vec<String>,

    /// Muscles to reduce load on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub muscle_lessens: Vec<String>,

    /// Joints to avoid loading
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joint_avoidance: Vec<String>,

    /// Exercises the client explicitly asked for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_requests: Vec<String>,

    /// Exercises the client explicitly refused
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avoid_requests: Vec<String>,

    /// Total-set target for the session
    pub set_target: u32,
}

impl ClientProfile {
    /// Create a profile with moderate capacities and the default set target.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ClientId(id.into()),
            name: name.into(),
            strength: CapacityLevel::Moderate,
            skill: CapacityLevel::Moderate,
            intensity: IntensityLevel::Moderate,
            primary_goal: None,
            muscle_targets: Vec::new(),
            muscle_lessens: Vec::new(),
            joint_avoidance: Vec::new(),
            include_requests: Vec::new(),
            avoid_requests: Vec::new(),
            set_target: 20,
        }
    }

    /// Total exercise slots for the session.
    ///
    /// Low strength or low skill caps the client at 5 slots; everyone else
    /// gets 6.
    pub fn slot_capacity(&self) -> u32 {
        if self.strength == CapacityLevel::Low || self.skill == CapacityLevel::Low {
            5
        } else {
            6
        }
    }

    /// First name, used in compact candidate listings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
