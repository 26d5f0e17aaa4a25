//! Muscle identifiers and the stimulus vectors the allocator works on.
//!
//! A [`MuscleVector`] maps each tracked muscle to a non-negative stimulus
//! value. Iteration always follows the declaration order of [`Muscle`], which
//! is also the tie-break order wherever the allocator takes a first minimum.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Muscle
// ---------------------------------------------------------------------------

/// One of the fourteen muscle groups tracked by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Muscle {
    Lat,
    TrapRhomboid,
    Frontdelt,
    Chest,
    Middelt,
    Reardelt,
    Bicep,
    Tricep,
    Core,
    Quad,
    Calf,
    Hamstring,
    Lowback,
    Glute,
}

impl Muscle {
    /// Every muscle in iteration order.
    pub const ALL: [Muscle; 14] = [
        Muscle::Lat,
        Muscle::TrapRhomboid,
        Muscle::Frontdelt,
        Muscle::Chest,
        Muscle::Middelt,
        Muscle::Reardelt,
        Muscle::Bicep,
        Muscle::Tricep,
        Muscle::Core,
        Muscle::Quad,
        Muscle::Calf,
        Muscle::Hamstring,
        Muscle::Lowback,
        Muscle::Glute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lat => "lat",
            Self::TrapRhomboid => "trap_rhomboid",
            Self::Frontdelt => "frontdelt",
            Self::Chest => "chest",
            Self::Middelt => "middelt",
            Self::Reardelt => "reardelt",
            Self::Bicep => "bicep",
            Self::Tricep => "tricep",
            Self::Core => "core",
            Self::Quad => "quad",
            Self::Calf => "calf",
            Self::Hamstring => "hamstring",
            Self::Lowback => "lowback",
            Self::Glute => "glute",
        }
    }

    /// Relative weight of this muscle in the untargeted weekly profile.
    pub fn baseline_weight(self) -> f64 {
        match self {
            Self::Middelt
            | Self::Reardelt
            | Self::Bicep
            | Self::Tricep
            | Self::Calf
            | Self::Lowback => 1.0,
            _ => 2.0,
        }
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Muscle {
    type Err = UnknownMuscleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMuscleError(s.to_owned()))
    }
}

/// Error returned when parsing an unknown muscle identifier.
#[derive(Debug, Clone, Error)]
#[error("unknown muscle: {0:?}")]
pub struct UnknownMuscleError(pub String);

/// A stimulus vector lacks a muscle the current day type needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{vector} vector has no entry for {muscle}")]
pub struct MissingMuscleDataError {
    /// Which vector was incomplete (`goal` or `current`).
    pub vector: &'static str,
    pub muscle: Muscle,
}

// ---------------------------------------------------------------------------
// MuscleVector
// ---------------------------------------------------------------------------

/// Mapping from muscle to stimulus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleVector(BTreeMap<Muscle, f64>);

impl MuscleVector {
    /// All fourteen muscles at zero. The starting point of a week.
    pub fn zeros() -> Self {
        Muscle::ALL.into_iter().map(|m| (m, 0.0)).collect()
    }

    /// The untargeted weekly profile, unnormalized.
    pub fn baseline() -> Self {
        Muscle::ALL
            .into_iter()
            .map(|m| (m, m.baseline_weight()))
            .collect()
    }

    /// Goal profile for a week: the baseline with each targeted muscle
    /// weighted 1.5x, normalized to sum to 1.
    pub fn goal_for_targets(targets: &[Muscle]) -> Self {
        let targets: BTreeSet<Muscle> = targets.iter().copied().collect();
        let mut goal = Self::baseline();
        for (muscle, value) in &mut goal.0 {
            if targets.contains(muscle) {
                *value *= 1.5;
            }
        }
        goal.normalized()
    }

    pub fn get(&self, muscle: Muscle) -> Option<f64> {
        self.0.get(&muscle).copied()
    }

    pub fn contains(&self, muscle: Muscle) -> bool {
        self.0.contains_key(&muscle)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(muscle, value)` pairs in [`Muscle`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Muscle, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Add `amount` to one muscle, inserting it at zero when absent.
    pub fn add(&mut self, muscle: Muscle, amount: f64) {
        *self.0.entry(muscle).or_insert(0.0) += amount;
    }

    /// Elementwise in-place addition.
    pub fn accumulate(&mut self, contribution: &MuscleVector) {
        for (muscle, amount) in contribution.iter() {
            self.add(muscle, amount);
        }
    }

    /// Add `row[i]` to `subset[i]` for every position of a lift-table row.
    pub fn accumulate_row(&mut self, subset: &[Muscle], row: &[f64]) {
        for (muscle, amount) in subset.iter().zip(row) {
            self.add(*muscle, *amount);
        }
    }

    /// Scale so the values sum to 1. A zero sum returns the vector unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total == 0.0 {
            return self.clone();
        }
        self.iter().map(|(m, v)| (m, v / total)).collect()
    }

    /// Check that every muscle in `subset` is present.
    pub fn require(
        &self,
        vector: &'static str,
        subset: &[Muscle],
    ) -> Result<(), MissingMuscleDataError> {
        match subset.iter().find(|m| !self.contains(**m)) {
            Some(&muscle) => Err(MissingMuscleDataError { vector, muscle }),
            None => Ok(()),
        }
    }

    /// Values for `subset`, in subset order.
    pub fn project(
        &self,
        vector: &'static str,
        subset: &[Muscle],
    ) -> Result<Vec<f64>, MissingMuscleDataError> {
        subset
            .iter()
            .map(|&muscle| {
                self.get(muscle)
                    .ok_or(MissingMuscleDataError { vector, muscle })
            })
            .collect()
    }
}

impl FromIterator<(Muscle, f64)> for MuscleVector {
    fn from_iter<I: IntoIterator<Item = (Muscle, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Vector math
// ---------------------------------------------------------------------------

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn magnitude(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine of the angle between `a` and `b`; 0 when either is the zero vector.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (ma, mb) = (magnitude(a), magnitude(b));
    if ma == 0.0 || mb == 0.0 {
        return 0.0;
    }
    dot(a, b) / (ma * mb)
}
