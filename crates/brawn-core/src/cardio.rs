//! Cardio session templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segments longer than this many minutes are steady distance runs.
pub const DISTANCE_THRESHOLD_MINUTES: u32 = 30;

/// Easy running before the tempo block.
pub const TEMPO_WARMUP_MINUTES: u32 = 10;

const HIIT_EXERCISES: &[&str] = &["burpees", "mountain climbers", "jump squats", "high knees"];

/// Template a cardio segment is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardioKind {
    Distance,
    Intervals,
    Tempo,
    #[serde(rename = "HIIT")]
    Hiit,
}

impl CardioKind {
    /// Kinds handed to successive short runs of a week; later runs repeat
    /// the last one.
    pub const SHORT_RUN_ROTATION: [CardioKind; 3] = [Self::Intervals, Self::Tempo, Self::Hiit];

    /// Kind for the `n`th short run of the week, counting from 1.
    pub fn for_short_run(n: usize) -> Self {
        let last = Self::SHORT_RUN_ROTATION.len() - 1;
        Self::SHORT_RUN_ROTATION[n.saturating_sub(1).min(last)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "Distance",
            Self::Intervals => "Intervals",
            Self::Tempo => "Tempo",
            Self::Hiit => "HIIT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Distance => "Distance Run",
            Self::Intervals => "Interval Training",
            Self::Tempo => "Tempo Run",
            Self::Hiit => "HIIT",
        }
    }
}

impl fmt::Display for CardioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardioKind {
    type Err = UnknownCardioKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Distance" => Ok(Self::Distance),
            "Intervals" => Ok(Self::Intervals),
            "Tempo" => Ok(Self::Tempo),
            "HIIT" => Ok(Self::Hiit),
            other => Err(UnknownCardioKindError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown cardio type: {0:?}")]
pub struct UnknownCardioKindError(pub String);

/// Pacing preference for steady runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioFocus {
    #[default]
    Distance,
    Tempo,
}

impl fmt::Display for CardioFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => f.write_str("distance"),
            Self::Tempo => f.write_str("tempo"),
        }
    }
}

impl FromStr for CardioFocus {
    type Err = CardioFocusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(Self::Distance),
            "tempo" => Ok(Self::Tempo),
            other => Err(CardioFocusParseError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid cardio focus: {0:?} (expected distance or tempo)")]
pub struct CardioFocusParseError(pub String);

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Structure of a cardio session, by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CardioDetails {
    Distance {
        distance_km: f64,
        pace: String,
        effort: String,
        instructions: String,
    },
    Intervals {
        work_meters: u32,
        rest_meters: u32,
        rounds: u32,
        structure: String,
        effort: String,
        instructions: String,
    },
    Tempo {
        warmup_minutes: u32,
        tempo_minutes: u32,
        structure: String,
        pace: String,
        effort: String,
        instructions: String,
    },
    #[serde(rename = "HIIT")]
    Hiit {
        work_seconds: u32,
        rest_seconds: u32,
        rounds: u32,
        structure: String,
        effort: String,
        exercises: Vec<String>,
        instructions: String,
    },
}

/// A cardio block of a training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioSession {
    /// Display name, e.g. "Tempo Run".
    pub label: String,
    pub duration_minutes: u32,
    /// Absent for unrecognized session types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CardioDetails>,
}

impl CardioSession {
    pub fn kind(&self) -> Option<CardioKind> {
        self.details.as_ref().map(|d| match d {
            CardioDetails::Distance { .. } => CardioKind::Distance,
            CardioDetails::Intervals { .. } => CardioKind::Intervals,
            CardioDetails::Tempo { .. } => CardioKind::Tempo,
            CardioDetails::Hiit { .. } => CardioKind::Hiit,
        })
    }
}

/// Kind of cardio for a segment: long segments are distance runs, short
/// ones advance the week's short-run counter.
pub fn kind_for_segment(minutes: u32, short_runs: &mut usize) -> CardioKind {
    if minutes > DISTANCE_THRESHOLD_MINUTES {
        return CardioKind::Distance;
    }
    *short_runs += 1;
    CardioKind::for_short_run(*short_runs)
}

/// Compose a session of `kind` lasting `minutes`.
pub fn compose(kind: CardioKind, minutes: u32, focus: CardioFocus) -> CardioSession {
    let details = match kind {
        CardioKind::Distance => {
            let (km_per_minute, pace, effort) = match focus {
                CardioFocus::Distance => (0.12, "conversational", "60-70% max HR"),
                CardioFocus::Tempo => (0.15, "moderate", "70-80% max HR"),
            };
            CardioDetails::Distance {
                distance_km: f64::from(minutes) * km_per_minute,
                pace: pace.to_owned(),
                effort: effort.to_owned(),
                instructions: format!("Run at {pace} pace for {minutes} minutes"),
            }
        }
        CardioKind::Intervals => {
            let work = if minutes > DISTANCE_THRESHOLD_MINUTES { 400 } else { 200 };
            let rest = work / 2;
            let rounds = minutes * 60 / (work + rest);
            CardioDetails::Intervals {
                work_meters: work,
                rest_meters: rest,
                rounds,
                structure: format!("{work}m sprint / {rest}m recovery"),
                effort: "85-95% max HR during work".to_owned(),
                instructions: format!("Sprint {work}m, recover {rest}m, repeat {rounds} times"),
            }
        }
        CardioKind::Tempo => {
            let tempo = minutes.saturating_sub(TEMPO_WARMUP_MINUTES);
            CardioDetails::Tempo {
                warmup_minutes: TEMPO_WARMUP_MINUTES,
                tempo_minutes: tempo,
                structure: "10min warmup / tempo blocks / cooldown".to_owned(),
                pace: "comfortably hard".to_owned(),
                effort: "80-85% max HR".to_owned(),
                instructions: format!("10min easy, then {tempo}min at tempo pace"),
            }
        }
        CardioKind::Hiit => {
            let (work, rest, rounds) = (30, 30, minutes);
            CardioDetails::Hiit {
                work_seconds: work,
                rest_seconds: rest,
                rounds,
                structure: format!("{work}s max effort / {rest}s rest"),
                effort: "90-100% max HR during work".to_owned(),
                exercises: HIIT_EXERCISES.iter().map(|e| (*e).to_owned()).collect(),
                instructions: format!(
                    "Rotate through exercises: {work}s on, {rest}s off, {rounds} rounds"
                ),
            }
        }
    };

    CardioSession {
        label: kind.label().to_owned(),
        duration_minutes: minutes,
        details: Some(details),
    }
}

/// Compose from a free-form type tag. Unknown tags give a bare session that
/// carries only the tag and duration.
pub fn compose_tagged(tag: &str, minutes: u32, focus: CardioFocus) -> CardioSession {
    match tag.parse::<CardioKind>() {
        Ok(kind) => compose(kind, minutes, focus),
        Err(_) => CardioSession {
            label: tag.to_owned(),
            duration_minutes: minutes,
            details: None,
        },
    }
}
