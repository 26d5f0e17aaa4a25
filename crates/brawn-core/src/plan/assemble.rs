//! Weekly plan assembly.
//!
//! Resolves the schedule template and folds one [`WeekState`] over every
//! segment of every day: strength segments go through the allocator, the
//! catalog and the circuit builder; cardio segments through the cardio
//! composer.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::allocation::{PrimaryLift, WeekState, allocate};
use crate::cardio::{CardioFocus, CardioSession, compose, compose_tagged, kind_for_segment};
use crate::catalog::{EquipmentFilter, ExerciseLibrary, ExerciseLookup, select_exercises};
use crate::circuit::{ACCESSORY_GROUP_SIZE, Circuit, DEFAULT_GROUP_SIZE, build_circuits};
use crate::muscle::{MissingMuscleDataError, Muscle, MuscleVector};
use crate::prescription::{StrengthFocus, intensity};
use crate::schedule::{
    ConfigurationError, DayType, ScheduleSegment, WeeklyFocus, focus_label, resolve,
};
use crate::warmup::{cooldown, warmup};

/// Default number of people training together.
pub const DEFAULT_PARTY_SIZE: u32 = 20;

/// Validated inputs for one week of training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanGoals {
    pub days_per_week: u32,
    pub focus: WeeklyFocus,
    pub muscle_target: Vec<Muscle>,
    pub equipment: EquipmentFilter,
    pub party_size: u32,
    pub strength_focus: StrengthFocus,
    pub cardio_focus: CardioFocus,
    /// Overrides the cardio kind of every cardio segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_type: Option<String>,
}

impl PlanGoals {
    /// Goals with every optional input at its default.
    pub fn new(days_per_week: u32, focus: WeeklyFocus) -> Self {
        Self {
            days_per_week,
            focus,
            muscle_target: Vec::new(),
            equipment: EquipmentFilter::All,
            party_size: DEFAULT_PARTY_SIZE,
            strength_focus: StrengthFocus::default(),
            cardio_focus: CardioFocus::default(),
            cardio_type: None,
        }
    }
}

/// One training day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// 1-based day number.
    pub day: u32,
    pub segments: Vec<ScheduleSegment>,
    pub primary_lifts: Vec<PrimaryLift>,
    pub circuits: Vec<Circuit>,
    /// The day's last cardio segment, if any.
    pub cardio: Option<CardioSession>,
    /// Empty on days without strength work.
    pub warmup: Vec<String>,
    pub cooldown: Vec<String>,
}

impl WorkoutSession {
    /// Segment letters joined with `+`, e.g. `L+C`.
    pub fn focus_label(&self) -> String {
        focus_label(&self.segments)
    }

    pub fn exercise_count(&self) -> usize {
        self.circuits.iter().map(|c| c.exercises.len()).sum()
    }
}

/// A generated week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub strength_focus: StrengthFocus,
    pub days: Vec<WorkoutSession>,
    /// Stimulus accumulated over the whole week.
    pub stimulus: MuscleVector,
}

impl WeeklyPlan {
    pub fn intensity(&self) -> &'static str {
        intensity(self.strength_focus)
    }
}

/// Errors that stop a week from being generated.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    MissingMuscleData(#[from] MissingMuscleDataError),
}

/// Generate a week against the built-in exercise catalog.
pub fn generate_weekly_plan(goals: &PlanGoals) -> Result<WeeklyPlan, GenerateError> {
    generate_weekly_plan_with(goals, ExerciseLibrary::builtin())
}

/// Generate a week against any exercise catalog.
pub fn generate_weekly_plan_with(
    goals: &PlanGoals,
    lookup: &dyn ExerciseLookup,
) -> Result<WeeklyPlan, GenerateError> {
    let template = resolve(goals.days_per_week, goals.focus)?;
    let mut state = WeekState::new(
        MuscleVector::goal_for_targets(&goals.muscle_target),
        goals.strength_focus.tracks_primary_lifts(),
    );
    let mut short_runs = 0;

    let days = template
        .into_iter()
        .zip(1..)
        .map(|(segments, day)| {
            assemble_day(day, segments, &mut state, &mut short_runs, goals, lookup)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeeklyPlan {
        strength_focus: goals.strength_focus,
        days,
        stimulus: state.current,
    })
}

fn assemble_day(
    day: u32,
    segments: Vec<ScheduleSegment>,
    state: &mut WeekState,
    short_runs: &mut usize,
    goals: &PlanGoals,
    lookup: &dyn ExerciseLookup,
) -> Result<WorkoutSession, MissingMuscleDataError> {
    let mut session = WorkoutSession {
        day,
        segments: Vec::with_capacity(segments.len()),
        primary_lifts: Vec::new(),
        circuits: Vec::new(),
        cardio: None,
        warmup: Vec::new(),
        cooldown: Vec::new(),
    };

    for segment in segments {
        match segment.day_type {
            DayType::Cardio => {
                session.cardio = Some(match &goals.cardio_type {
                    Some(tag) => compose_tagged(tag, segment.minutes, goals.cardio_focus),
                    None => {
                        let kind = kind_for_segment(segment.minutes, short_runs);
                        compose(kind, segment.minutes, goals.cardio_focus)
                    }
                });
            }
            day_type => {
                let allocation = allocate(state, day_type, segment.minutes)?;
                let exercises = select_exercises(&allocation.categories, lookup, &goals.equipment);
                let group_size = match day_type {
                    DayType::Accessory => ACCESSORY_GROUP_SIZE,
                    _ => DEFAULT_GROUP_SIZE,
                };
                session
                    .circuits
                    .extend(build_circuits(&exercises, group_size, goals.party_size));
                session.primary_lifts.extend(allocation.primary_lifts);
                session.warmup = warmup(day_type);
            }
        }
        session.segments.push(segment);
    }
    session.cooldown = cooldown();

    info!(
        day,
        focus = %session.focus_label(),
        circuits = session.circuits.len(),
        exercises = session.exercise_count(),
        cardio = session.cardio.as_ref().map(|c| c.label.as_str()),
        "assembled training day"
    );
    Ok(session)
}
