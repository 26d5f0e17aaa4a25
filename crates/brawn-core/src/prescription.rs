//! Rep ranges and intensity guidance for the week's strength focus.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the strength work is trying to develop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthFocus {
    Endurance,
    #[default]
    Hypertrophy,
    Power,
    Strength,
}

impl StrengthFocus {
    /// Power and strength weeks schedule primary lifts.
    pub fn tracks_primary_lifts(self) -> bool {
        matches!(self, Self::Power | Self::Strength)
    }
}

impl fmt::Display for StrengthFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Endurance => "endurance",
            Self::Hypertrophy => "hypertrophy",
            Self::Power => "power",
            Self::Strength => "strength",
        };
        f.write_str(s)
    }
}

impl FromStr for StrengthFocus {
    type Err = StrengthFocusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "endurance" => Ok(Self::Endurance),
            "hypertrophy" => Ok(Self::Hypertrophy),
            "power" => Ok(Self::Power),
            "strength" => Ok(Self::Strength),
            other => Err(StrengthFocusParseError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid strength focus: {0:?} (expected endurance, hypertrophy, power, or strength)")]
pub struct StrengthFocusParseError(pub String);

/// Inclusive rep range for a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    pub low: u32,
    pub high: u32,
}

impl fmt::Display for RepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Difficulty from which an exercise gets two fewer reps at each end.
pub const HARD_DIFFICULTY: u8 = 4;

pub fn rep_range(focus: StrengthFocus, difficulty: u8) -> RepRange {
    let (low, high): (u32, u32) = match focus {
        StrengthFocus::Endurance => (15, 25),
        StrengthFocus::Hypertrophy => (8, 12),
        StrengthFocus::Power => (3, 6),
        StrengthFocus::Strength => (1, 5),
    };
    if difficulty >= HARD_DIFFICULTY {
        return RepRange {
            low: low.saturating_sub(2).max(1),
            high: high - 2,
        };
    }
    RepRange { low, high }
}

pub fn intensity(focus: StrengthFocus) -> &'static str {
    match focus {
        StrengthFocus::Endurance => "50-65% 1RM or RPE 5-6",
        StrengthFocus::Hypertrophy => "65-80% 1RM or RPE 7-8",
        StrengthFocus::Power => "75-90% 1RM or RPE 8-9 (explosive)",
        StrengthFocus::Strength => "85-95% 1RM or RPE 9-10",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_ranges() {
        assert_eq!(rep_range(StrengthFocus::Endurance, 1).to_string(), "15-25");
        assert_eq!(rep_range(StrengthFocus::Hypertrophy, 3).to_string(), "8-12");
        assert_eq!(rep_range(StrengthFocus::Power, 2).to_string(), "3-6");
    }

    #[test]
    fn hard_exercises_drop_two_reps() {
        assert_eq!(
            rep_range(StrengthFocus::Hypertrophy, 4),
            RepRange { low: 6, high: 10 }
        );
        // Low end never goes below one.
        assert_eq!(
            rep_range(StrengthFocus::Strength, 5),
            RepRange { low: 1, high: 3 }
        );
    }

    #[test]
    fn only_heavy_focuses_track_primaries() {
        assert!(StrengthFocus::Power.tracks_primary_lifts());
        assert!(StrengthFocus::Strength.tracks_primary_lifts());
        assert!(!StrengthFocus::Hypertrophy.tracks_primary_lifts());
        assert!(!StrengthFocus::Endurance.tracks_primary_lifts());
    }

    #[test]
    fn intensity_text() {
        assert_eq!(intensity(StrengthFocus::default()), "65-80% 1RM or RPE 7-8");
    }

    #[test]
    fn parse_focus() {
        assert_eq!("power".parse::<StrengthFocus>().unwrap(), StrengthFocus::Power);
        assert!("speed".parse::<StrengthFocus>().is_err());
    }
}
