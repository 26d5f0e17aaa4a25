//! Plan request parser with validation.
//!
//! Parses a request TOML string into a [`PlanRequest`] and validates it into
//! typed [`PlanGoals`]:
//! - Weekly, strength and cardio focus values are known variants.
//! - Every targeted muscle is a known muscle id.
//! - Party size is positive.
//! - A schedule template exists for the days/focus combination.

use thiserror::Error;

use crate::cardio::CardioFocus;
use crate::catalog::{ALL_EQUIPMENT, EquipmentFilter};
use crate::muscle::Muscle;
use crate::prescription::StrengthFocus;
use crate::schedule::{WeeklyFocus, is_supported};

use super::assemble::{DEFAULT_PARTY_SIZE, PlanGoals};
use super::request::{PlanRequest, ProgramMeta};

/// Errors that can occur during request parsing and validation.
#[derive(Debug, Error)]
pub enum RequestParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid weekly focus {0:?} (expected strength or cardio)")]
    InvalidFocus(String),

    #[error("invalid strength focus {0:?} (expected endurance, hypertrophy, power, or strength)")]
    InvalidStrengthFocus(String),

    #[error("invalid cardio focus {0:?} (expected distance or tempo)")]
    InvalidCardioFocus(String),

    #[error("unknown muscle {0:?} in muscle_target")]
    UnknownMuscle(String),

    #[error("party_size must be at least 1")]
    EmptyParty,

    #[error("no schedule for {days_per_week} days per week with {focus} focus (use 3, 4 or 5)")]
    UnsupportedSchedule {
        days_per_week: u32,
        focus: WeeklyFocus,
    },
}

/// Values applied when a request omits optional goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub party_size: u32,
    pub equipment: Vec<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            party_size: DEFAULT_PARTY_SIZE,
            equipment: vec![ALL_EQUIPMENT.to_owned()],
        }
    }
}

/// A validated request: what to call the program and how to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub program: ProgramMeta,
    pub goals: PlanGoals,
}

/// Parse and validate a request TOML string with the built-in defaults.
pub fn parse_request_toml(content: &str) -> Result<ParsedRequest, RequestParseError> {
    parse_request_toml_with(content, &RequestDefaults::default())
}

/// Parse and validate a request TOML string, filling omitted equipment and
/// party size from `defaults`.
pub fn parse_request_toml_with(
    content: &str,
    defaults: &RequestDefaults,
) -> Result<ParsedRequest, RequestParseError> {
    let request: PlanRequest = toml::from_str(content)?;
    let goals = validate(&request, defaults)?;
    Ok(ParsedRequest {
        program: request.program,
        goals,
    })
}

/// Turn the raw string fields into typed goals.
fn validate(
    request: &PlanRequest,
    defaults: &RequestDefaults,
) -> Result<PlanGoals, RequestParseError> {
    let raw = &request.goals;

    let focus: WeeklyFocus = raw
        .focus
        .parse()
        .map_err(|_| RequestParseError::InvalidFocus(raw.focus.clone()))?;
    let strength_focus: StrengthFocus = raw
        .strength_focus
        .parse()
        .map_err(|_| RequestParseError::InvalidStrengthFocus(raw.strength_focus.clone()))?;
    let cardio_focus: CardioFocus = raw
        .cardio_focus
        .parse()
        .map_err(|_| RequestParseError::InvalidCardioFocus(raw.cardio_focus.clone()))?;

    let muscle_target = raw
        .muscle_target
        .iter()
        .map(|m| {
            m.parse::<Muscle>()
                .map_err(|_| RequestParseError::UnknownMuscle(m.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let party_size = raw.party_size.unwrap_or(defaults.party_size);
    if party_size == 0 {
        return Err(RequestParseError::EmptyParty);
    }

    if !is_supported(raw.days_per_week, focus) {
        return Err(RequestParseError::UnsupportedSchedule {
            days_per_week: raw.days_per_week,
            focus,
        });
    }

    let equipment =
        EquipmentFilter::from_list(raw.equipment.as_deref().unwrap_or(&defaults.equipment));

    Ok(PlanGoals {
        days_per_week: raw.days_per_week,
        focus,
        muscle_target,
        equipment,
        party_size,
        strength_focus,
        cardio_focus,
        cardio_type: raw.cardio_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(goals: &str) -> String {
        format!(
            r#"
[program]
name = "Test"

[goals]
{goals}
"#
        )
    }

    #[test]
    fn parse_valid_request() {
        let parsed = parse_request_toml(&request(
            r#"
days_per_week = 4
focus = "cardio"
muscle_target = ["glute", "trap_rhomboid"]
equipment = ["kettlebell"]
party_size = 12
strength_focus = "power"
cardio_focus = "tempo"
"#,
        ))
        .expect("should parse");

        assert_eq!(parsed.program.name, "Test");
        let goals = parsed.goals;
        assert_eq!(goals.days_per_week, 4);
        assert_eq!(goals.focus, WeeklyFocus::Cardio);
        assert_eq!(goals.muscle_target, vec![Muscle::Glute, Muscle::TrapRhomboid]);
        assert_eq!(goals.equipment, EquipmentFilter::from_list(&["kettlebell"]));
        assert_eq!(goals.party_size, 12);
        assert_eq!(goals.strength_focus, StrengthFocus::Power);
        assert_eq!(goals.cardio_focus, CardioFocus::Tempo);
    }

    #[test]
    fn omitted_goals_use_defaults() {
        let parsed = parse_request_toml(&request("days_per_week = 3\nfocus = \"strength\""))
            .expect("should parse");
        assert_eq!(parsed.goals, PlanGoals::new(3, WeeklyFocus::Strength));
    }

    #[test]
    fn cardio_type_is_kept_verbatim() {
        let parsed = parse_request_toml(&request(
            "days_per_week = 3\nfocus = \"strength\"\ncardio_type = \"Swim\"",
        ))
        .expect("should parse");
        assert_eq!(parsed.goals.cardio_type.as_deref(), Some("Swim"));
    }

    #[test]
    fn configured_defaults_fill_gaps_only() {
        let defaults = RequestDefaults {
            party_size: 40,
            equipment: vec!["dumbbell".to_owned()],
        };
        let parsed = parse_request_toml_with(
            &request("days_per_week = 3\nfocus = \"strength\""),
            &defaults,
        )
        .expect("should parse");
        assert_eq!(parsed.goals.party_size, 40);
        assert_eq!(parsed.goals.equipment, EquipmentFilter::from_list(&["dumbbell"]));

        let parsed = parse_request_toml_with(
            &request(
                "days_per_week = 3\nfocus = \"strength\"\nparty_size = 6\nequipment = [\"all\"]",
            ),
            &defaults,
        )
        .expect("should parse");
        assert_eq!(parsed.goals.party_size, 6);
        assert_eq!(parsed.goals.equipment, EquipmentFilter::All);
    }

    #[test]
    fn rejects_unknown_muscle() {
        let err = parse_request_toml(&request(
            "days_per_week = 3\nfocus = \"strength\"\nmuscle_target = [\"neck\"]",
        ))
        .unwrap_err();
        assert!(matches!(err, RequestParseError::UnknownMuscle(ref m) if m == "neck"));
    }

    #[test]
    fn rejects_bad_focus_values() {
        let err = parse_request_toml(&request("days_per_week = 3\nfocus = \"yoga\"")).unwrap_err();
        assert!(matches!(err, RequestParseError::InvalidFocus(_)));

        let err = parse_request_toml(&request(
            "days_per_week = 3\nfocus = \"strength\"\nstrength_focus = \"speed\"",
        ))
        .unwrap_err();
        assert!(matches!(err, RequestParseError::InvalidStrengthFocus(_)));

        let err = parse_request_toml(&request(
            "days_per_week = 3\nfocus = \"strength\"\ncardio_focus = \"swim\"",
        ))
        .unwrap_err();
        assert!(matches!(err, RequestParseError::InvalidCardioFocus(_)));
    }

    #[test]
    fn rejects_zero_party() {
        let err = parse_request_toml(&request(
            "days_per_week = 3\nfocus = \"strength\"\nparty_size = 0",
        ))
        .unwrap_err();
        assert!(matches!(err, RequestParseError::EmptyParty));
    }

    #[test]
    fn rejects_unsupported_days() {
        let err =
            parse_request_toml(&request("days_per_week = 6\nfocus = \"cardio\"")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no schedule for 6 days per week with cardio focus (use 3, 4 or 5)"
        );
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_request_toml("[program\nname = ").unwrap_err();
        assert!(matches!(err, RequestParseError::TomlError(_)));
    }
}
