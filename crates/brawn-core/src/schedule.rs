//! Weekly schedule templates.
//!
//! A template is picked by `(days_per_week, weekly focus)` and lays out each
//! training day as an ordered list of segments, each a day type and a minute
//! budget.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Day types
// ---------------------------------------------------------------------------

/// Kind of work a schedule segment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    #[serde(rename = "U")]
    Upper,
    #[serde(rename = "L")]
    Lower,
    #[serde(rename = "F")]
    Full,
    #[serde(rename = "C")]
    Cardio,
    #[serde(rename = "A")]
    Accessory,
}

impl DayType {
    /// Single-letter code used in templates and stored workout focus labels.
    pub fn letter(self) -> char {
        match self {
            Self::Upper => 'U',
            Self::Lower => 'L',
            Self::Full => 'F',
            Self::Cardio => 'C',
            Self::Accessory => 'A',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Self::Upper),
            'L' => Some(Self::Lower),
            'F' => Some(Self::Full),
            'C' => Some(Self::Cardio),
            'A' => Some(Self::Accessory),
            _ => None,
        }
    }

    /// Whether this segment is filled by the allocator with strength circuits.
    pub fn is_strength(self) -> bool {
        !matches!(self, Self::Cardio)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Full => "full",
            Self::Cardio => "cardio",
            Self::Accessory => "accessory",
        };
        f.write_str(s)
    }
}

/// Template key: whether the week leans toward strength or cardio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyFocus {
    Strength,
    Cardio,
}

impl fmt::Display for WeeklyFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => f.write_str("strength"),
            Self::Cardio => f.write_str("cardio"),
        }
    }
}

impl FromStr for WeeklyFocus {
    type Err = WeeklyFocusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Self::Strength),
            "cardio" => Ok(Self::Cardio),
            other => Err(WeeklyFocusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`WeeklyFocus`] string.
#[derive(Debug, Clone, Error)]
#[error("invalid weekly focus: {0:?} (expected strength or cardio)")]
pub struct WeeklyFocusParseError(pub String);

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// One block of a training day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSegment {
    pub day_type: DayType,
    pub minutes: u32,
}

impl ScheduleSegment {
    pub const fn new(day_type: DayType, minutes: u32) -> Self {
        Self { day_type, minutes }
    }
}

/// No template is registered for the requested combination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no {focus} template for {days_per_week} days per week (supported: 3, 4, 5)")]
    UnsupportedTemplate {
        days_per_week: u32,
        focus: WeeklyFocus,
    },
}

use DayType::{Accessory as A, Cardio as C, Full as F, Lower as L, Upper as U};

const fn s(day_type: DayType, minutes: u32) -> ScheduleSegment {
    ScheduleSegment::new(day_type, minutes)
}

type Template = &'static [&'static [ScheduleSegment]];

static TEMPLATES: &[(u32, WeeklyFocus, Template)] = &[
    (
        3,
        WeeklyFocus::Strength,
        &[&[s(F, 55), s(C, 20)], &[s(F, 50), s(C, 25)], &[s(F, 55), s(C, 20)]],
    ),
    (
        3,
        WeeklyFocus::Cardio,
        &[&[s(C, 30), s(F, 45)], &[s(C, 40), s(F, 35)], &[s(C, 30), s(F, 45)]],
    ),
    (
        4,
        WeeklyFocus::Strength,
        &[
            &[s(L, 55), s(C, 20)],
            &[s(U, 55), s(C, 20)],
            &[s(F, 75)],
            &[s(C, 40), s(A, 35)],
        ],
    ),
    (
        4,
        WeeklyFocus::Cardio,
        &[
            &[s(C, 30), s(L, 45)],
            &[s(C, 30), s(U, 45)],
            &[s(F, 75)],
            &[s(C, 40), s(A, 35)],
        ],
    ),
    (
        5,
        WeeklyFocus::Strength,
        &[
            &[s(L, 50), s(C, 25)],
            &[s(U, 55), s(C, 20)],
            &[s(C, 75)],
            &[s(L, 55), s(C, 20)],
            &[s(U, 50), s(C, 25)],
        ],
    ),
    (
        5,
        WeeklyFocus::Cardio,
        &[
            &[s(F, 55), s(C, 20)],
            &[s(C, 75)],
            &[s(F, 75)],
            &[s(C, 45), s(A, 30)],
            &[s(F, 55), s(C, 20)],
        ],
    ),
];

/// Look up the per-day segment lists for a week.
pub fn resolve(
    days_per_week: u32,
    focus: WeeklyFocus,
) -> Result<Vec<Vec<ScheduleSegment>>, ConfigurationError> {
    TEMPLATES
        .iter()
        .find(|(days, f, _)| *days == days_per_week && *f == focus)
        .map(|(_, _, template)| template.iter().map(|day| day.to_vec()).collect())
        .ok_or(ConfigurationError::UnsupportedTemplate {
            days_per_week,
            focus,
        })
}

/// Whether a template exists for the combination.
pub fn is_supported(days_per_week: u32, focus: WeeklyFocus) -> bool {
    TEMPLATES
        .iter()
        .any(|(days, f, _)| *days == days_per_week && *f == focus)
}

/// Render a day's segments as its letter codes joined with `+` (e.g. `F+C`).
pub fn focus_label(segments: &[ScheduleSegment]) -> String {
    segments
        .iter()
        .map(|s| s.day_type.letter().to_string())
        .collect::<Vec<_>>()
        .join("+")
}
