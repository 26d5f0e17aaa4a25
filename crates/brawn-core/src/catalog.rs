//! Built-in exercise catalog and equipment filtering.
//!
//! The catalog maps each [`Category`] to concrete exercises in a fixed
//! order. Selection always takes the first exercise the available equipment
//! allows, so the order below is part of the output contract.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::lifts::Category;
use crate::muscle::Muscle;

/// Equipment keyword meaning "no restriction".
pub const ALL_EQUIPMENT: &str = "all";

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

/// A concrete exercise as it appears in a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub category: Category,
    /// Every item is needed. Empty means bodyweight.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// 1 (easy) to 5 (hard).
    pub difficulty: u8,
    #[serde(default)]
    pub primary_muscles: Vec<Muscle>,
    #[serde(default)]
    pub activation: BTreeMap<Muscle, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Exercise {
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }
}

struct ExerciseSeed {
    name: &'static str,
    equipment: &'static [&'static str],
    difficulty: u8,
    primary: &'static [Muscle],
    activation: &'static [(Muscle, f64)],
    instructions: Option<&'static str>,
}

impl ExerciseSeed {
    fn to_exercise(&self, category: Category) -> Exercise {
        Exercise {
            name: self.name.to_owned(),
            category,
            equipment: self.equipment.iter().map(|e| (*e).to_owned()).collect(),
            difficulty: self.difficulty,
            primary_muscles: self.primary.to_vec(),
            activation: self.activation.iter().copied().collect(),
            instructions: self.instructions.map(str::to_owned),
        }
    }
}

const fn ex(
    name: &'static str,
    equipment: &'static [&'static str],
    difficulty: u8,
    primary: &'static [Muscle],
    activation: &'static [(Muscle, f64)],
) -> ExerciseSeed {
    ExerciseSeed {
        name,
        equipment,
        difficulty,
        primary,
        activation,
        instructions: None,
    }
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

use Muscle::{
    Bicep, Calf, Chest, Core, Frontdelt, Glute, Hamstring, Lat, Lowback, Middelt, Quad, Reardelt,
    Tricep, TrapRhomboid,
};

const PUSH: &[Muscle] = &[Chest, Frontdelt, Tricep];
const PRESS: &[Muscle] = &[Frontdelt, Tricep];
const ROW: &[Muscle] = &[Lat, TrapRhomboid, Bicep];
const PULL: &[Muscle] = &[Lat, Bicep];
const SQUAT: &[Muscle] = &[Quad, Glute];
const POSTERIOR: &[Muscle] = &[Hamstring, Glute, Lowback];

static BUILTIN: &[(Category, &[ExerciseSeed])] = &[
    (
        Category::Hp,
        &[
            ExerciseSeed {
                instructions: Some("Lie on bench, lower bar to chest, press up"),
                ..ex(
                    "Barbell Bench Press",
                    &["barbell", "plates", "bench", "rack"],
                    3,
                    PUSH,
                    &[(Chest, 1.0), (Frontdelt, 0.5), (Tricep, 0.5)],
                )
            },
            ex(
                "Dumbbell Bench Press",
                &["dumbbell", "bench"],
                2,
                PUSH,
                &[(Chest, 0.9), (Frontdelt, 0.5), (Tricep, 0.5)],
            ),
            ex("Push-Up", &[], 1, PUSH, &[(Chest, 0.7), (Frontdelt, 0.4), (Tricep, 0.4)]),
            ex(
                "Weighted Push-Up",
                &["plates", "weight vest"],
                2,
                PUSH,
                &[(Chest, 0.8), (Frontdelt, 0.45), (Tricep, 0.45)],
            ),
            ex("Dip", &["dip bar"], 3, PUSH, &[(Chest, 0.8), (Frontdelt, 0.4), (Tricep, 0.6)]),
            ex(
                "Incline Dumbbell Press",
                &["dumbbell", "incline bench"],
                2,
                PUSH,
                &[(Chest, 0.8), (Frontdelt, 0.6), (Tricep, 0.4)],
            ),
        ],
    ),
    (
        Category::Vp,
        &[
            ex(
                "Overhead Press",
                &["barbell", "plates", "rack"],
                3,
                PRESS,
                &[(Frontdelt, 1.0), (Tricep, 0.5), (Middelt, 0.4)],
            ),
            ex(
                "Dumbbell Shoulder Press",
                &["dumbbell"],
                2,
                PRESS,
                &[(Frontdelt, 0.9), (Tricep, 0.5), (Middelt, 0.4)],
            ),
            ex("Pike Push-Up", &[], 2, PRESS, &[(Frontdelt, 0.7), (Tricep, 0.4), (Middelt, 0.3)]),
            ex(
                "Handstand Push-Up",
                &["wall"],
                5,
                PRESS,
                &[(Frontdelt, 0.9), (Tricep, 0.6), (Middelt, 0.4)],
            ),
            ex(
                "Arnold Press",
                &["dumbbell"],
                3,
                PRESS,
                &[(Frontdelt, 0.8), (Tricep, 0.4), (Middelt, 0.5)],
            ),
        ],
    ),
    (
        Category::Hpl,
        &[
            ex(
                "Barbell Row",
                &["barbell", "plates"],
                3,
                ROW,
                &[(Lat, 0.5), (TrapRhomboid, 1.0), (Bicep, 0.5), (Reardelt, 0.4)],
            ),
            ex(
                "Dumbbell Row",
                &["dumbbell"],
                2,
                ROW,
                &[(Lat, 0.5), (TrapRhomboid, 0.9), (Bicep, 0.5), (Reardelt, 0.4)],
            ),
            ex(
                "Seated Cable Row",
                &["cable machine"],
                2,
                ROW,
                &[(Lat, 0.6), (TrapRhomboid, 0.9), (Bicep, 0.4), (Reardelt, 0.3)],
            ),
            ex(
                "Inverted Row",
                &["bar"],
                2,
                ROW,
                &[(Lat, 0.5), (TrapRhomboid, 0.8), (Bicep, 0.4), (Reardelt, 0.3)],
            ),
            ex(
                "Face Pull",
                &["cable machine", "resistance band"],
                1,
                &[TrapRhomboid, Reardelt],
                &[(TrapRhomboid, 0.6), (Reardelt, 0.8), (Middelt, 0.3)],
            ),
        ],
    ),
    (
        Category::Vpl,
        &[
            ex("Pull-Up", &["bar"], 4, PULL, &[(Lat, 1.0), (Bicep, 0.6), (TrapRhomboid, 0.4)]),
            ex("Chin-Up", &["bar"], 3, PULL, &[(Lat, 0.9), (Bicep, 0.8), (TrapRhomboid, 0.3)]),
            ex(
                "Lat Pulldown",
                &["cable machine"],
                2,
                PULL,
                &[(Lat, 0.9), (Bicep, 0.5), (TrapRhomboid, 0.3)],
            ),
            ex(
                "Assisted Pull-Up",
                &["assistance machine"],
                2,
                PULL,
                &[(Lat, 0.8), (Bicep, 0.5), (TrapRhomboid, 0.3)],
            ),
            ex(
                "Weighted Pull-Up",
                &["bar", "weight belt", "plates"],
                5,
                PULL,
                &[(Lat, 1.0), (Bicep, 0.7), (TrapRhomboid, 0.5)],
            ),
        ],
    ),
    (
        Category::Tricep,
        &[
            ex("Tricep Dip", &["dip bar"], 3, &[Tricep], &[(Tricep, 1.0), (Chest, 0.3)]),
            ex("Overhead Tricep Extension", &["dumbbell"], 2, &[Tricep], &[(Tricep, 0.9)]),
            ex("Tricep Pushdown", &["cable machine"], 1, &[Tricep], &[(Tricep, 0.8)]),
            ex("Close-Grip Push-Up", &[], 2, &[Tricep], &[(Tricep, 0.7), (Chest, 0.4)]),
        ],
    ),
    (
        Category::Bicep,
        &[
            ex("Barbell Curl", &["barbell", "plates"], 2, &[Bicep], &[(Bicep, 1.0)]),
            ex("Dumbbell Curl", &["dumbbell"], 1, &[Bicep], &[(Bicep, 0.9)]),
            ex("Hammer Curl", &["dumbbell"], 2, &[Bicep], &[(Bicep, 0.8)]),
            ex("Cable Curl", &["cable machine"], 1, &[Bicep], &[(Bicep, 0.8)]),
        ],
    ),
    (
        Category::Squat,
        &[
            ex(
                "Barbell Back Squat",
                &["barbell", "plates", "rack"],
                4,
                SQUAT,
                &[(Quad, 1.0), (Glute, 1.0), (Lowback, 0.5)],
            ),
            ex(
                "Goblet Squat",
                &["dumbbell", "kettlebell"],
                2,
                SQUAT,
                &[(Quad, 0.8), (Glute, 0.8), (Core, 0.4)],
            ),
            ex("Bodyweight Squat", &[], 1, SQUAT, &[(Quad, 0.6), (Glute, 0.6)]),
            ex("Bulgarian Split Squat", &["dumbbell"], 3, SQUAT, &[(Quad, 0.9), (Glute, 0.8)]),
            ex(
                "Front Squat",
                &["barbell", "plates", "rack"],
                4,
                SQUAT,
                &[(Quad, 1.0), (Glute, 0.8), (Core, 0.6)],
            ),
        ],
    ),
    (
        Category::Hinge,
        &[
            ex(
                "Barbell Deadlift",
                &["barbell", "plates"],
                5,
                POSTERIOR,
                &[(Hamstring, 1.0), (Glute, 0.9), (Lowback, 1.0), (TrapRhomboid, 0.4)],
            ),
            ex(
                "Romanian Deadlift",
                &["barbell", "plates", "dumbbell"],
                3,
                &[Hamstring, Glute],
                &[(Hamstring, 1.0), (Glute, 0.7), (Lowback, 0.8)],
            ),
            ex(
                "Kettlebell Swing",
                &["kettlebell"],
                2,
                &[Hamstring, Glute],
                &[(Hamstring, 0.7), (Glute, 0.9), (Lowback, 0.5)],
            ),
            ex(
                "Good Morning",
                &["barbell", "plates"],
                3,
                POSTERIOR,
                &[(Hamstring, 0.8), (Glute, 0.6), (Lowback, 0.9)],
            ),
        ],
    ),
    (
        Category::Quad,
        &[
            ex("Leg Extension", &["leg extension machine"], 1, &[Quad], &[(Quad, 1.0)]),
            ex("Walking Lunge", &["dumbbell"], 2, SQUAT, &[(Quad, 0.8), (Glute, 0.6)]),
            ex("Step-Up", &["box", "dumbbell"], 2, SQUAT, &[(Quad, 0.7), (Glute, 0.6)]),
        ],
    ),
    (
        Category::Hamstring,
        &[
            ex("Leg Curl", &["leg curl machine"], 1, &[Hamstring], &[(Hamstring, 1.0)]),
            ex("Nordic Curl", &["partner", "anchor"], 4, &[Hamstring], &[(Hamstring, 1.0)]),
            ex(
                "Glute-Ham Raise",
                &["GHD"],
                3,
                &[Hamstring, Glute],
                &[(Hamstring, 0.9), (Glute, 0.6)],
            ),
        ],
    ),
    (
        Category::Calf,
        &[
            ex("Calf Raise", &["calf machine"], 1, &[Calf], &[(Calf, 1.0)]),
            ex("Seated Calf Raise", &["seated calf machine"], 1, &[Calf], &[(Calf, 0.9)]),
            ex("Jump Rope", &["jump rope"], 2, &[Calf], &[(Calf, 0.7)]),
        ],
    ),
    (
        Category::Core,
        &[
            ex("Plank", &[], 1, &[Core], &[(Core, 1.0)]),
            ex("Hanging Leg Raise", &["bar"], 3, &[Core], &[(Core, 1.0)]),
            ex("Ab Wheel", &["ab wheel"], 4, &[Core], &[(Core, 1.0)]),
            ex("Russian Twist", &["dumbbell", "plate"], 2, &[Core], &[(Core, 0.8)]),
            ex("Dead Bug", &[], 1, &[Core], &[(Core, 0.7)]),
        ],
    ),
    (
        Category::Middelt,
        &[
            ex("Lateral Raise", &["dumbbell", "cable"], 1, &[Middelt], &[(Middelt, 1.0)]),
            ex(
                "Upright Row",
                &["barbell", "dumbbell"],
                2,
                &[Middelt, TrapRhomboid],
                &[(Middelt, 0.8), (TrapRhomboid, 0.6)],
            ),
        ],
    ),
    (
        Category::Reardelt,
        &[
            ex("Rear Delt Fly", &["dumbbell", "cable"], 1, &[Reardelt], &[(Reardelt, 1.0)]),
            ex("Reverse Pec Deck", &["pec deck machine"], 1, &[Reardelt], &[(Reardelt, 0.9)]),
        ],
    ),
];

static BUILTIN_LIBRARY: LazyLock<ExerciseLibrary> = LazyLock::new(|| {
    ExerciseLibrary::new(BUILTIN.iter().flat_map(|(category, seeds)| {
        seeds.iter().map(|seed| seed.to_exercise(*category))
    }))
});

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Which equipment a session has to work with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentFilter {
    /// Anything in the catalog is fair game.
    #[default]
    All,
    Available(BTreeSet<String>),
}

impl EquipmentFilter {
    /// Build from a list of equipment ids. An empty list or one containing
    /// `all` means no restriction.
    pub fn from_list<S: AsRef<str>>(items: &[S]) -> Self {
        if items.is_empty() || items.iter().any(|i| i.as_ref() == ALL_EQUIPMENT) {
            return Self::All;
        }
        Self::Available(items.iter().map(|i| i.as_ref().to_owned()).collect())
    }

    /// Whether every piece of equipment the exercise needs is available.
    pub fn allows(&self, exercise: &Exercise) -> bool {
        match self {
            Self::All => true,
            Self::Available(set) => exercise.equipment.iter().all(|e| set.contains(e)),
        }
    }

    /// Equipment ids for display and storage; `["all"]` when unrestricted.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::All => vec![ALL_EQUIPMENT.to_owned()],
            Self::Available(set) => set.iter().cloned().collect(),
        }
    }
}

/// Source of concrete exercises per category.
pub trait ExerciseLookup {
    /// Every exercise of a category in catalog order.
    fn exercises(&self, category: Category) -> &[Exercise];

    /// Exercises of a category the equipment allows, in catalog order.
    ///
    /// Falls back to the full category list when nothing matches, so only a
    /// category with no exercises at all comes back empty.
    fn lookup(&self, category: Category, filter: &EquipmentFilter) -> Vec<&Exercise> {
        let all = self.exercises(category);
        let allowed: Vec<&Exercise> = all.iter().filter(|e| filter.allows(e)).collect();
        if allowed.is_empty() {
            all.iter().collect()
        } else {
            allowed
        }
    }
}

/// In-memory catalog keyed by category.
#[derive(Debug, Clone, Default)]
pub struct ExerciseLibrary {
    by_category: BTreeMap<Category, Vec<Exercise>>,
}

impl ExerciseLibrary {
    /// Group exercises by category, keeping their relative order.
    pub fn new(exercises: impl IntoIterator<Item = Exercise>) -> Self {
        let mut by_category: BTreeMap<Category, Vec<Exercise>> = BTreeMap::new();
        for exercise in exercises {
            by_category
                .entry(exercise.category)
                .or_default()
                .push(exercise);
        }
        Self { by_category }
    }

    /// The catalog shipped with brawn, built on first use.
    pub fn builtin() -> &'static ExerciseLibrary {
        &BUILTIN_LIBRARY
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ExerciseLookup for ExerciseLibrary {
    fn exercises(&self, category: Category) -> &[Exercise] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Resolve categories to exercises: the first allowed exercise per category.
///
/// Categories without any exercise are skipped.
pub fn select_exercises(
    categories: &[Category],
    lookup: &dyn ExerciseLookup,
    filter: &EquipmentFilter,
) -> Vec<Exercise> {
    categories
        .iter()
        .filter_map(|category| lookup.lookup(*category, filter).first().map(|e| (*e).clone()))
        .collect()
}
