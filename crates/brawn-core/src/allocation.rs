//! Greedy allocation of exercise categories to a strength segment.
//!
//! Each call spends a segment's minute budget in 7-minute slots. Every slot
//! picks the category that best closes the gap between the week's normalized
//! accumulated stimulus and its goal profile, then credits that category's
//! contribution back into the accumulator. The accumulator lives in a
//! [`WeekState`] threaded through every segment of the week, so work done on
//! earlier days shapes the choices made on later ones.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lifts::{Category, LiftTable, accessory_category};
use crate::muscle::{Muscle, MissingMuscleDataError, MuscleVector, cosine_similarity, dot};
use crate::schedule::DayType;

/// Minutes consumed by one selected category.
pub const MINUTES_PER_SLOT: i64 = 7;

/// Minutes reserved when a segment gets one primary lift.
pub const SINGLE_PRIMARY_MINUTES: i64 = 15;

/// Minutes reserved when a full-body segment gets a lower and an upper
/// primary lift.
pub const DOUBLE_PRIMARY_MINUTES: i64 = 25;

// ---------------------------------------------------------------------------
// Primary lifts
// ---------------------------------------------------------------------------

/// A heavy compound movement scheduled at most once per week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryLift {
    Squat,
    Hinge,
    Bench,
    Row,
}

/// Body region a primary lift belongs to. A day takes at most one per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftGroup {
    Lower,
    Upper,
}

impl LiftGroup {
    /// Lifts of the group in the order they are handed out.
    pub fn lifts(self) -> [PrimaryLift; 2] {
        match self {
            Self::Lower => [PrimaryLift::Squat, PrimaryLift::Hinge],
            Self::Upper => [PrimaryLift::Bench, PrimaryLift::Row],
        }
    }
}

impl PrimaryLift {
    pub fn group(self) -> LiftGroup {
        match self {
            Self::Squat | Self::Hinge => LiftGroup::Lower,
            Self::Bench | Self::Row => LiftGroup::Upper,
        }
    }

    /// Stimulus credited to the week when the lift is assigned.
    pub fn stimulus(self) -> &'static [(Muscle, f64)] {
        match self {
            Self::Squat => &[(Muscle::Quad, 1.5), (Muscle::Glute, 1.5), (Muscle::Lowback, 0.75)],
            Self::Hinge => &[
                (Muscle::Hamstring, 1.5),
                (Muscle::Lowback, 1.5),
                (Muscle::Glute, 0.75),
            ],
            Self::Bench => &[
                (Muscle::Chest, 1.5),
                (Muscle::Frontdelt, 0.75),
                (Muscle::Tricep, 0.75),
            ],
            Self::Row => &[(Muscle::TrapRhomboid, 1.5), (Muscle::Lat, 0.75), (Muscle::Bicep, 0.75)],
        }
    }
}

impl fmt::Display for PrimaryLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::Bench => "bench",
            Self::Row => "row",
        };
        f.write_str(s)
    }
}

/// Primary lifts already handed out this week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryMovementState {
    assigned: BTreeSet<PrimaryLift>,
}

impl PrimaryMovementState {
    pub fn is_assigned(&self, lift: PrimaryLift) -> bool {
        self.assigned.contains(&lift)
    }

    pub fn assigned(&self) -> impl Iterator<Item = PrimaryLift> + '_ {
        self.assigned.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Claim the first unassigned lift of `group`, if any remain.
    pub fn claim(&mut self, group: LiftGroup) -> Option<PrimaryLift> {
        let lift = group.lifts().into_iter().find(|l| !self.is_assigned(*l))?;
        self.assigned.insert(lift);
        Some(lift)
    }
}

// ---------------------------------------------------------------------------
// Week state
// ---------------------------------------------------------------------------

/// Everything the allocator carries from one segment to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekState {
    /// Accumulated stimulus. Only ever increases.
    pub current: MuscleVector,
    /// Normalized target profile. Never mutated.
    pub goal: MuscleVector,
    /// `None` when the week does not schedule primary lifts at all.
    pub primary: Option<PrimaryMovementState>,
}

impl WeekState {
    /// Fresh state: zero stimulus, and primary tracking when requested.
    pub fn new(goal: MuscleVector, track_primary_lifts: bool) -> Self {
        Self {
            current: MuscleVector::zeros(),
            goal,
            primary: track_primary_lifts.then(PrimaryMovementState::default),
        }
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// How a day type scores candidate categories.
#[derive(Debug, Clone, Copy)]
pub enum SelectionStrategy {
    /// Cosine similarity between the deficit and each row (upper, lower).
    Cosine(&'static LiftTable),
    /// Raw dot product between the deficit and each row (full body).
    DotProduct(&'static LiftTable),
    /// Bump the muscle furthest behind its goal (accessory).
    RatioDeficit,
}

impl SelectionStrategy {
    pub fn for_day(day_type: DayType) -> Option<Self> {
        match day_type {
            DayType::Upper | DayType::Lower => LiftTable::for_day(day_type).map(Self::Cosine),
            DayType::Full => LiftTable::for_day(day_type).map(Self::DotProduct),
            DayType::Accessory => Some(Self::RatioDeficit),
            DayType::Cardio => None,
        }
    }

    fn required_muscles(&self) -> &'static [Muscle] {
        match self {
            Self::Cosine(table) | Self::DotProduct(table) => table.subset,
            Self::RatioDeficit => &Muscle::ALL,
        }
    }
}

/// Outcome of allocating one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Selected categories in pick order. Repeats are expected.
    pub categories: Vec<Category>,
    /// Primary lifts assigned to this segment.
    pub primary_lifts: Vec<PrimaryLift>,
}

/// Primary-lift groups a day type draws from, in order.
fn primary_groups(day_type: DayType) -> &'static [LiftGroup] {
    match day_type {
        DayType::Lower => &[LiftGroup::Lower],
        DayType::Upper => &[LiftGroup::Upper],
        DayType::Full => &[LiftGroup::Lower, LiftGroup::Upper],
        DayType::Accessory | DayType::Cardio => &[],
    }
}

/// Allocate categories for one segment of `minutes`, mutating `state`.
///
/// Cardio segments allocate nothing. Fails only when the goal or current
/// vector lacks a muscle the day type scores; in that case `state` is left
/// untouched.
pub fn allocate(
    state: &mut WeekState,
    day_type: DayType,
    minutes: u32,
) -> Result<Allocation, MissingMuscleDataError> {
    let Some(strategy) = SelectionStrategy::for_day(day_type) else {
        return Ok(Allocation::default());
    };

    let required = strategy.required_muscles();
    state.goal.require("goal", required)?;
    state.current.require("current", required)?;

    let mut remaining = i64::from(minutes);
    let mut allocation = Allocation::default();

    if let Some(primary) = state.primary.as_mut() {
        for group in primary_groups(day_type) {
            if let Some(lift) = primary.claim(*group) {
                for (muscle, amount) in lift.stimulus() {
                    state.current.add(*muscle, *amount);
                }
                allocation.primary_lifts.push(lift);
            }
        }
        remaining -= match allocation.primary_lifts.len() {
            0 => 0,
            1 => SINGLE_PRIMARY_MINUTES,
            _ => DOUBLE_PRIMARY_MINUTES,
        };
    }

    let slots = remaining.max(0) / MINUTES_PER_SLOT;
    for _ in 0..slots {
        let picked = match strategy {
            SelectionStrategy::Cosine(table) => {
                select_from_table(state, table, cosine_similarity)?
            }
            SelectionStrategy::DotProduct(table) => select_from_table(state, table, dot)?,
            SelectionStrategy::RatioDeficit => select_lagging(state),
        };
        if let Some(category) = picked {
            allocation.categories.push(category);
        }
    }

    debug!(
        %day_type,
        minutes,
        primary = ?allocation.primary_lifts,
        categories = ?allocation.categories,
        "allocated segment"
    );
    Ok(allocation)
}

/// Score every row against the current deficit, credit the winner.
fn select_from_table(
    state: &mut WeekState,
    table: &'static LiftTable,
    score: fn(&[f64], &[f64]) -> f64,
) -> Result<Option<Category>, MissingMuscleDataError> {
    let want = state.goal.project("goal", table.subset)?;
    let have = state.current.normalized().project("current", table.subset)?;
    let need: Vec<f64> = want.iter().zip(&have).map(|(w, h)| w - h).collect();

    let Some((category, row)) = best_row(table, &need, score) else {
        return Ok(None);
    };
    state.current.accumulate_row(table.subset, row);
    debug!(%category, "picked category");
    Ok(Some(category))
}

/// Highest-scoring row. Only a strictly greater score displaces the
/// incumbent, so ties go to the earlier row.
pub(crate) fn best_row(
    table: &LiftTable,
    need: &[f64],
    score: fn(&[f64], &[f64]) -> f64,
) -> Option<(Category, &'static [f64])> {
    let mut best: Option<(Category, &'static [f64], f64)> = None;
    for (category, row) in table.rows {
        let s = score(need, row);
        if best.is_none_or(|(_, _, top)| s > top) {
            best = Some((*category, *row, s));
        }
    }
    best.map(|(category, row, _)| (category, row))
}

/// Bump the muscle with the lowest normalized-current to goal ratio.
///
/// Muscles with a non-positive goal are ignored; the first minimum in
/// [`Muscle`] order wins.
fn select_lagging(state: &mut WeekState) -> Option<Category> {
    let normalized = state.current.normalized();
    let mut lagging: Option<(Muscle, f64)> = None;
    for (muscle, value) in normalized.iter() {
        let Some(goal) = state.goal.get(muscle).filter(|g| *g > 0.0) else {
            continue;
        };
        let ratio = value / goal;
        if lagging.is_none_or(|(_, lowest)| ratio < lowest) {
            lagging = Some((muscle, ratio));
        }
    }

    let (muscle, _) = lagging?;
    state.current.add(muscle, 1.0);
    let category = accessory_category(muscle);
    debug!(%muscle, %category, "picked accessory for lagging muscle");
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_state(track_primary_lifts: bool) -> WeekState {
        WeekState::new(MuscleVector::goal_for_targets(&[]), track_primary_lifts)
    }

    #[test]
    fn cardio_allocates_nothing() {
        let mut state = baseline_state(true);
        let before = state.clone();
        let allocation = allocate(&mut state, DayType::Cardio, 60).unwrap();
        assert_eq!(allocation, Allocation::default());
        assert_eq!(state, before);
    }

    #[test]
    fn short_segment_without_primaries_is_empty() {
        for day_type in [DayType::Upper, DayType::Lower, DayType::Full, DayType::Accessory] {
            let mut state = baseline_state(false);
            let allocation = allocate(&mut state, day_type, 6).unwrap();
            assert!(allocation.categories.is_empty(), "{day_type}");
            assert_eq!(state.current, MuscleVector::zeros());
        }
    }

    #[test]
    fn slot_count_is_floor_of_minutes_over_seven() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Upper, 55).unwrap();
        assert_eq!(allocation.categories.len(), 7);
    }

    #[test]
    fn full_day_from_zero_starts_with_squat() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Full, 7).unwrap();
        assert_eq!(allocation.categories, vec![Category::Squat]);
        assert_eq!(state.current.get(Muscle::Quad), Some(1.0));
        assert_eq!(state.current.get(Muscle::Lowback), Some(0.5));
    }

    #[test]
    fn upper_day_from_zero_picks_in_order() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Upper, 35).unwrap();
        // The first pick ties Hp with Hpl; the earlier row wins.
        assert_eq!(
            allocation.categories,
            vec![
                Category::Hp,
                Category::Hpl,
                Category::Vp,
                Category::Vpl,
                Category::Reardelt
            ]
        );
    }

    #[test]
    fn full_day_from_zero_picks_in_order() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Full, 55).unwrap();
        assert_eq!(
            allocation.categories,
            vec![
                Category::Squat,
                Category::Hp,
                Category::Hpl,
                Category::Hamstring,
                Category::Calf,
                Category::Vp,
                Category::Vpl
            ]
        );
    }

    #[test]
    fn lower_day_from_zero_starts_with_squat() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Lower, 7).unwrap();
        assert_eq!(allocation.categories, vec![Category::Squat]);
    }

    #[test]
    fn accessory_fills_lowest_ratio_first() {
        let mut state = baseline_state(false);
        let allocation = allocate(&mut state, DayType::Accessory, 35).unwrap();
        assert_eq!(
            allocation.categories,
            vec![
                Category::Vpl,
                Category::Hpl,
                Category::Vp,
                Category::Hp,
                Category::Middelt
            ]
        );
        // Scalar bump of exactly one per pick.
        assert_eq!(state.current.get(Muscle::Lat), Some(1.0));
        assert_eq!(state.current.get(Muscle::Middelt), Some(1.0));
        assert_eq!(state.current.sum(), 5.0);
    }

    #[test]
    fn accumulation_is_monotonic() {
        let mut state = baseline_state(true);
        let mut previous = state.current.clone();
        for day_type in [
            DayType::Lower,
            DayType::Upper,
            DayType::Full,
            DayType::Accessory,
            DayType::Full,
        ] {
            allocate(&mut state, day_type, 55).unwrap();
            for (muscle, value) in state.current.iter() {
                let before = previous.get(muscle).unwrap();
                assert!(value >= before, "{muscle} decreased on {day_type}");
            }
            previous = state.current.clone();
        }
    }

    #[test]
    fn primary_lifts_assigned_in_order_and_once() {
        let mut state = baseline_state(true);

        let lower = allocate(&mut state, DayType::Lower, 55).unwrap();
        assert_eq!(lower.primary_lifts, vec![PrimaryLift::Squat]);
        // 55 - 15 leaves five slots.
        assert_eq!(lower.categories.len(), 5);

        let upper = allocate(&mut state, DayType::Upper, 55).unwrap();
        assert_eq!(upper.primary_lifts, vec![PrimaryLift::Bench]);

        let full = allocate(&mut state, DayType::Full, 75).unwrap();
        assert_eq!(full.primary_lifts, vec![PrimaryLift::Hinge, PrimaryLift::Row]);
        // 75 - 25 leaves seven slots.
        assert_eq!(full.categories.len(), 7);

        let exhausted = allocate(&mut state, DayType::Full, 75).unwrap();
        assert!(exhausted.primary_lifts.is_empty());
        // Nothing assigned means nothing deducted.
        assert_eq!(exhausted.categories.len(), 10);

        let primary = state.primary.as_ref().unwrap();
        assert_eq!(primary.len(), 4);
    }

    #[test]
    fn full_day_with_one_group_left_deducts_single() {
        let mut state = baseline_state(true);
        allocate(&mut state, DayType::Upper, 20).unwrap();
        allocate(&mut state, DayType::Upper, 20).unwrap();

        let full = allocate(&mut state, DayType::Full, 50).unwrap();
        assert_eq!(full.primary_lifts, vec![PrimaryLift::Squat]);
        assert_eq!(full.categories.len(), 5);
    }

    #[test]
    fn primary_stimulus_is_credited() {
        let mut state = baseline_state(true);
        allocate(&mut state, DayType::Lower, 15).unwrap();
        assert_eq!(state.current.get(Muscle::Quad), Some(1.5));
        assert_eq!(state.current.get(Muscle::Glute), Some(1.5));
        assert_eq!(state.current.get(Muscle::Lowback), Some(0.75));
    }

    #[test]
    fn missing_goal_muscle_fails_without_mutation() {
        let goal: MuscleVector = MuscleVector::goal_for_targets(&[])
            .iter()
            .filter(|(m, _)| *m != Muscle::Calf)
            .collect();
        let mut state = WeekState::new(goal, true);
        let before = state.clone();

        let err = allocate(&mut state, DayType::Lower, 55).unwrap_err();
        assert_eq!(err.vector, "goal");
        assert_eq!(err.muscle, Muscle::Calf);
        assert_eq!(state, before);

        // Upper days never look at calves.
        assert!(allocate(&mut state, DayType::Upper, 14).is_ok());
    }

    #[test]
    fn missing_current_muscle_fails() {
        let mut state = baseline_state(false);
        state.current = MuscleVector::default();
        let err = allocate(&mut state, DayType::Accessory, 14).unwrap_err();
        assert_eq!(err.vector, "current");
    }

    static TIED: LiftTable = LiftTable {
        subset: &[Muscle::Chest, Muscle::Lat],
        rows: &[
            (Category::Hp, &[1.0, 1.0]),
            (Category::Vpl, &[1.0, 1.0]),
            (Category::Hpl, &[0.5, 0.0]),
        ],
    };

    #[test]
    fn ties_go_to_first_row() {
        let (category, _) = best_row(&TIED, &[0.3, 0.3], dot).unwrap();
        assert_eq!(category, Category::Hp);
        let (category, _) = best_row(&TIED, &[0.3, 0.3], cosine_similarity).unwrap();
        assert_eq!(category, Category::Hp);
    }

    #[test]
    fn primary_state_claims_in_group_order() {
        let mut primary = PrimaryMovementState::default();
        assert_eq!(primary.claim(LiftGroup::Upper), Some(PrimaryLift::Bench));
        assert_eq!(primary.claim(LiftGroup::Upper), Some(PrimaryLift::Row));
        assert_eq!(primary.claim(LiftGroup::Upper), None);
        assert!(!primary.is_assigned(PrimaryLift::Squat));
    }
}
