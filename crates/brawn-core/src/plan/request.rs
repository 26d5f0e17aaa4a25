//! TOML format types for plan request files.
//!
//! These types map directly to the on-disk request format and are
//! deserialized via `serde` + the `toml` crate. Values stay as plain strings
//! here; [`super::parser`] turns them into typed goals.

use serde::{Deserialize, Serialize};

/// Top-level structure of a plan request file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    /// Name and description stored with the generated program.
    pub program: ProgramMeta,
    /// What the week should look like.
    pub goals: GoalsToml,
}

/// Program metadata in `[program]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramMeta {
    /// Human-readable program name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generation inputs in `[goals]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalsToml {
    /// Training days per week: 3, 4, or 5.
    pub days_per_week: u32,
    /// Template key: "strength" or "cardio".
    pub focus: String,
    /// Muscles to weight 1.5x in the goal profile.
    #[serde(default)]
    pub muscle_target: Vec<String>,
    /// Available equipment ids, or `["all"]`. Falls back to the configured
    /// default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    /// Number of people training together. Falls back to the configured
    /// default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    /// "endurance", "hypertrophy", "power", or "strength".
    #[serde(default = "default_strength_focus")]
    pub strength_focus: String,
    /// "distance" or "tempo".
    #[serde(default = "default_cardio_focus")]
    pub cardio_focus: String,
    /// Cardio type tag used for every cardio segment instead of the
    /// per-segment pick. Tags other than Distance, Intervals, Tempo or HIIT
    /// give a session with only a label and duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_type: Option<String>,
}

fn default_strength_focus() -> String {
    "hypertrophy".to_string()
}

fn default_cardio_focus() -> String {
    "distance".to_string()
}
