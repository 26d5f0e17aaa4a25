//! SQLite persistence for generated training programs.
//!
//! A program owns its workouts (one per training day) and each workout owns
//! an ordered list of typed components. Deletes cascade through foreign keys.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
