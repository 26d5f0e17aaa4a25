//! Query functions, one module per table.
//!
//! Every function takes any SQLite executor so the service layer can run
//! them inside a transaction and tests can run them against a pool.

pub mod components;
pub mod programs;
pub mod workouts;
