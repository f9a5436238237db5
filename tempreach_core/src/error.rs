//! Error types for the reachability engine.

use tempreach_env::Day;
use thiserror::Error;

/// Invalid simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReachError {
    /// The epidemic starts after the simulation ends
    #[error("Invalid simulation window: epi_start_day {epi_start_day} is after sim_end_day {sim_end_day}")]
    InvalidWindow { epi_start_day: Day, sim_end_day: Day },

    /// The infectious period must be at least one day
    #[error("Infectious period (deltaT) must be positive, got {0}")]
    InvalidDeltaT(u32),
}
