use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of a stored workout component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Warmup,
    Circuit,
    Cardio,
    Cooldown,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Warmup => "warmup",
            Self::Circuit => "circuit",
            Self::Cardio => "cardio",
            Self::Cooldown => "cooldown",
        };
        f.write_str(s)
    }
}

impl FromStr for ComponentType {
    type Err = ComponentTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warmup" => Ok(Self::Warmup),
            "circuit" => Ok(Self::Circuit),
            "cardio" => Ok(Self::Cardio),
            "cooldown" => Ok(Self::Cooldown),
            other => Err(ComponentTypeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ComponentType`] string.
#[derive(Debug, Clone)]
pub struct ComponentTypeParseError(pub String);

impl fmt::Display for ComponentTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid component type: {:?}", self.0)
    }
}

impl std::error::Error for ComponentTypeParseError {}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A saved weekly program (`training_programs` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One training day of a program (`workouts` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: i64,
    pub program_id: i64,
    pub day_number: i64,
    pub name: String,
    /// Segment letters of the day joined with `+` (e.g. `L+C`).
    pub focus: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An ordered piece of a workout (`workout_components` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutComponent {
    pub id: i64,
    pub workout_id: i64,
    pub component_type: ComponentType,
    pub order_index: i64,
    /// JSON payload: a warmup/cooldown list, a circuit, or a cardio session.
    pub data: Json<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_type_display_roundtrip() {
        for ty in [
            ComponentType::Warmup,
            ComponentType::Circuit,
            ComponentType::Cardio,
            ComponentType::Cooldown,
        ] {
            let parsed: ComponentType = ty.to_string().parse().expect("should parse");
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn component_type_rejects_unknown() {
        let err = "stretch".parse::<ComponentType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid component type: \"stretch\"");
    }

    #[test]
    fn component_type_serde_is_snake_case() {
        let json = serde_json::to_string(&ComponentType::Cooldown).unwrap();
        assert_eq!(json, "\"cooldown\"");
    }
}
