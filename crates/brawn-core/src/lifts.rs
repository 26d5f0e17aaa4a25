//! Exercise categories and their muscle-contribution tables.
//!
//! Each strength day type scores categories against a fixed subset of
//! muscles. Row order is significant: it is the tie-break order when two
//! categories score the same.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::muscle::Muscle;
use crate::schedule::DayType;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// An exercise archetype, resolved to a concrete exercise by the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Horizontal push.
    Hp,
    /// Vertical push.
    Vp,
    /// Horizontal pull.
    Hpl,
    /// Vertical pull.
    Vpl,
    Tricep,
    Bicep,
    Squat,
    Hinge,
    Quad,
    Hamstring,
    Calf,
    Core,
    Middelt,
    Reardelt,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Hp,
        Category::Vp,
        Category::Hpl,
        Category::Vpl,
        Category::Tricep,
        Category::Bicep,
        Category::Squat,
        Category::Hinge,
        Category::Quad,
        Category::Hamstring,
        Category::Calf,
        Category::Core,
        Category::Middelt,
        Category::Reardelt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Vp => "vp",
            Self::Hpl => "hpl",
            Self::Vpl => "vpl",
            Self::Tricep => "tricep",
            Self::Bicep => "bicep",
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::Quad => "quad",
            Self::Hamstring => "hamstring",
            Self::Calf => "calf",
            Self::Core => "core",
            Self::Middelt => "middelt",
            Self::Reardelt => "reardelt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategoryError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown exercise category: {0:?}")]
pub struct UnknownCategoryError(pub String);

/// Category that trains a lagging muscle on accessory days.
pub fn accessory_category(muscle: Muscle) -> Category {
    match muscle {
        Muscle::Chest => Category::Hp,
        Muscle::Frontdelt => Category::Vp,
        Muscle::Tricep => Category::Tricep,
        Muscle::Lat => Category::Vpl,
        Muscle::Bicep => Category::Bicep,
        Muscle::TrapRhomboid => Category::Hpl,
        Muscle::Quad => Category::Quad,
        Muscle::Hamstring => Category::Hamstring,
        Muscle::Glute => Category::Squat,
        Muscle::Calf => Category::Calf,
        Muscle::Core => Category::Core,
        Muscle::Middelt => Category::Middelt,
        Muscle::Reardelt => Category::Reardelt,
        Muscle::Lowback => Category::Hinge,
    }
}

// ---------------------------------------------------------------------------
// Lift tables
// ---------------------------------------------------------------------------

/// Contribution of each category to a day type's muscle subset.
#[derive(Debug)]
pub struct LiftTable {
    /// Column order of every row.
    pub subset: &'static [Muscle],
    pub rows: &'static [(Category, &'static [f64])],
}

impl LiftTable {
    /// Table scored by a strength day type. Accessory and cardio segments
    /// have none.
    pub fn for_day(day_type: DayType) -> Option<&'static LiftTable> {
        match day_type {
            DayType::Upper => Some(&UPPER),
            DayType::Lower => Some(&LOWER),
            DayType::Full => Some(&FULL),
            DayType::Cardio | DayType::Accessory => None,
        }
    }

    pub fn row(&self, category: Category) -> Option<&'static [f64]> {
        self.rows
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, row)| *row)
    }
}

pub const UPPER_SUBSET: [Muscle; 6] = [
    Muscle::Chest,
    Muscle::Tricep,
    Muscle::Frontdelt,
    Muscle::Lat,
    Muscle::Bicep,
    Muscle::TrapRhomboid,
];

pub const LOWER_SUBSET: [Muscle; 5] = [
    Muscle::Quad,
    Muscle::Glute,
    Muscle::Lowback,
    Muscle::Hamstring,
    Muscle::Calf,
];

pub const FULL_SUBSET: [Muscle; 11] = [
    Muscle::Chest,
    Muscle::Tricep,
    Muscle::Frontdelt,
    Muscle::Lat,
    Muscle::Bicep,
    Muscle::TrapRhomboid,
    Muscle::Quad,
    Muscle::Glute,
    Muscle::Lowback,
    Muscle::Hamstring,
    Muscle::Calf,
];

pub static UPPER: LiftTable = LiftTable {
    subset: &UPPER_SUBSET,
    rows: &[
        (Category::Hp, &[1.0, 0.5, 0.5, 0.0, 0.0, 0.0]),
        (Category::Vp, &[0.0, 0.5, 1.0, 0.0, 0.0, 0.0]),
        (Category::Hpl, &[0.0, 0.0, 0.0, 0.5, 0.5, 1.0]),
        (Category::Vpl, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0]),
        (Category::Tricep, &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Bicep, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        (Category::Middelt, &[0.0, 0.3, 0.5, 0.0, 0.0, 0.0]),
        (Category::Reardelt, &[0.0, 0.0, 0.0, 0.3, 0.0, 0.6]),
    ],
};

pub static LOWER: LiftTable = LiftTable {
    subset: &LOWER_SUBSET,
    rows: &[
        (Category::Squat, &[1.0, 1.0, 0.5, 0.0, 0.0]),
        (Category::Hinge, &[0.0, 0.5, 1.0, 1.0, 0.0]),
        (Category::Quad, &[1.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Hamstring, &[0.0, 0.0, 0.0, 1.0, 0.0]),
        (Category::Calf, &[0.0, 0.0, 0.0, 0.0, 1.0]),
    ],
};

/// Compound upper rows followed by the lower rows, zero-padded to the union.
/// The isolation delt rows are upper-only.
pub static FULL: LiftTable = LiftTable {
    subset: &FULL_SUBSET,
    rows: &[
        (Category::Hp, &[1.0, 0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Vp, &[0.0, 0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Hpl, &[0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Vpl, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Tricep, &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Bicep, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Squat, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.5, 0.0, 0.0]),
        (Category::Hinge, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 0.0]),
        (Category::Quad, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (Category::Hamstring, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        (Category::Calf, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rows_well_formed(table: &LiftTable) {
        for (category, row) in table.rows {
            assert_eq!(row.len(), table.subset.len(), "{category} row width");
            assert!(row.iter().all(|v| *v >= 0.0), "{category} has a negative entry");
        }
    }

    #[test]
    fn tables_are_well_formed() {
        assert_rows_well_formed(&UPPER);
        assert_rows_well_formed(&LOWER);
        assert_rows_well_formed(&FULL);
    }

    #[test]
    fn full_subset_is_upper_then_lower() {
        let joined: Vec<Muscle> = UPPER_SUBSET.iter().chain(&LOWER_SUBSET).copied().collect();
        assert_eq!(joined, FULL_SUBSET.to_vec());
    }

    #[test]
    fn full_rows_are_padded_compound_rows() {
        let upper_width = UPPER_SUBSET.len();
        for (category, row) in FULL.rows {
            let (upper_part, lower_part) = row.split_at(upper_width);
            if let Some(upper_row) = UPPER.row(*category) {
                assert_eq!(upper_part, upper_row, "{category}");
                assert!(lower_part.iter().all(|v| *v == 0.0), "{category}");
            } else {
                let lower_row = LOWER.row(*category).expect("row must come from a table");
                assert_eq!(lower_part, lower_row, "{category}");
                assert!(upper_part.iter().all(|v| *v == 0.0), "{category}");
            }
        }
        let order: Vec<Category> = FULL.rows.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                Category::Hp,
                Category::Vp,
                Category::Hpl,
                Category::Vpl,
                Category::Tricep,
                Category::Bicep,
                Category::Squat,
                Category::Hinge,
                Category::Quad,
                Category::Hamstring,
                Category::Calf,
            ]
        );
    }

    #[test]
    fn only_strength_days_have_tables() {
        assert!(LiftTable::for_day(DayType::Upper).is_some());
        assert!(LiftTable::for_day(DayType::Full).is_some());
        assert!(LiftTable::for_day(DayType::Accessory).is_none());
        assert!(LiftTable::for_day(DayType::Cardio).is_none());
    }

    #[test]
    fn accessory_map_covers_glute_and_lowback() {
        assert_eq!(accessory_category(Muscle::Glute), Category::Squat);
        assert_eq!(accessory_category(Muscle::Lowback), Category::Hinge);
        assert_eq!(accessory_category(Muscle::Chest), Category::Hp);
    }

    #[test]
    fn category_parse_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("lunge".parse::<Category>().is_err());
    }
}
