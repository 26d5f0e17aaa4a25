//! Core planning logic for brawn.
//!
//! A week is generated by resolving a schedule template, then walking its
//! segments in order while a running muscle-stimulus vector is compared
//! against a goal profile. Strength segments pick movement categories from
//! lift tables, draw concrete exercises from the catalog and group them into
//! circuits. Cardio segments get a prescribed run. [`plan`] ties this
//! together and stores the result through `brawn-db`.

pub mod allocation;
pub mod cardio;
pub mod catalog;
pub mod circuit;
pub mod lifts;
pub mod muscle;
pub mod plan;
pub mod prescription;
pub mod schedule;
pub mod warmup;
