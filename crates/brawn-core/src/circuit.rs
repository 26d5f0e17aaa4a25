//! Grouping exercises into timed circuits.
//!
//! Rest periods scale with how crowded each station gets: a large party
//! spread over few stations needs longer rests between sets and rounds.

use serde::{Deserialize, Serialize};

use crate::catalog::Exercise;

/// Stations per circuit on ordinary strength segments.
pub const DEFAULT_GROUP_SIZE: usize = 3;
/// Stations per circuit on accessory segments.
pub const ACCESSORY_GROUP_SIZE: usize = 2;

pub const ROUNDS: u32 = 3;
pub const WORK_SECONDS: u32 = 45;

/// Party size above which rounds are separated by the long rest.
pub const LARGE_PARTY: u32 = 20;

/// A group of stations worked in rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub exercises: Vec<Exercise>,
    pub rounds: u32,
    pub work_seconds: u32,
    /// Rest after each station.
    pub rest_seconds: u32,
    pub rest_between_rounds: u32,
}

impl Circuit {
    fn new(exercises: Vec<Exercise>, party_size: u32) -> Self {
        let stations = u32::try_from(exercises.len()).unwrap_or(u32::MAX).max(1);
        let station_load = (party_size / stations).max(2);
        Self {
            exercises,
            rounds: ROUNDS,
            work_seconds: WORK_SECONDS,
            rest_seconds: if station_load <= 2 { 15 } else { 30 },
            rest_between_rounds: if party_size > LARGE_PARTY { 90 } else { 60 },
        }
    }
}

/// Split `exercises` into consecutive circuits of at most `group_size`
/// stations, keeping their order.
pub fn build_circuits(exercises: &[Exercise], group_size: usize, party_size: u32) -> Vec<Circuit> {
    exercises
        .chunks(group_size.max(1))
        .map(|chunk| Circuit::new(chunk.to_vec(), party_size))
        .collect()
}
