//! tempreach Core - Time-Windowed Reachability on Temporal Contact Networks
//!
//! Given one realization of a time-stamped premises contact network and a
//! seed premises, this library answers a single question: how many premises
//! can be reached when every reached premises keeps transmitting for a fixed
//! infectious period (Δt) and then stops for good?
//!
//! 1. **Contact Network**: contact records aggregated per day and per
//!    (origin, destination) pair, built once per network file
//! 2. **Reachability Engine**: day-by-day forward traversal that expires
//!    premises whose window has closed before admitting new ones

pub mod contact_network;
pub mod reachability;
mod error;

// Re-export key types for convenience
pub use contact_network::{DailyContact, Network};
pub use error::ReachError;
pub use reachability::{
    compute_reachable_count, count_reachable, simulate, DayStep, ReachabilityOutcome,
    ReachabilityParams, SimulationState,
};
pub use tempreach_env::{ContactRecord, Day, PremisesId};
