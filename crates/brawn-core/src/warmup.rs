//! Warmup and cooldown lists.

use crate::schedule::DayType;

const GENERAL: &[&str] = &[
    "5 minutes light cardio (jog, jump rope, or bike)",
    "Arm circles - 10 each direction",
    "Leg swings - 10 each leg, each direction",
    "Hip circles - 10 each direction",
];

const UPPER_DRILLS: &[&str] = &[
    "Band pull-aparts - 15 reps",
    "Scapular push-ups - 10 reps",
    "Empty bar shoulder press - 10 reps",
    "Empty bar rows - 10 reps",
];

const LOWER_DRILLS: &[&str] = &[
    "Bodyweight squats - 15 reps",
    "Walking lunges - 10 each leg",
    "Glute bridges - 15 reps",
    "Leg swings - 10 each direction",
];

const COOLDOWN: &[&str] = &[
    "5 minutes easy cardio (walk or light jog)",
    "Chest stretch - 30 seconds each side",
    "Shoulder stretch - 30 seconds each side",
    "Hip flexor stretch - 30 seconds each side",
    "Hamstring stretch - 30 seconds each side",
    "Quad stretch - 30 seconds each side",
    "Child's pose - 1 minute",
    "Deep breathing - 2 minutes",
];

/// Warmup for a strength segment. Upper and full add upper drills, lower and
/// full add lower drills.
pub fn warmup(day_type: DayType) -> Vec<String> {
    let upper = matches!(day_type, DayType::Upper | DayType::Full);
    let lower = matches!(day_type, DayType::Lower | DayType::Full);

    GENERAL
        .iter()
        .chain(upper.then_some(UPPER_DRILLS).unwrap_or_default())
        .chain(lower.then_some(LOWER_DRILLS).unwrap_or_default())
        .map(|s| (*s).to_owned())
        .collect()
}

/// The cooldown every training day ends with.
pub fn cooldown() -> Vec<String> {
    COOLDOWN.iter().map(|s| (*s).to_owned()).collect()
}
