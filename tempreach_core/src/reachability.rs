//! The Reachability Engine - time-windowed forward traversal.
//!
//! Time advances one day per step. Each premises stays able to transmit
//! for Δt days after it is first reached, then drops out of the active set
//! permanently. Within a day the order is fixed:
//!
//! ```text
//!   expire ──► contacts of day t ──► keep active origins ──► admit new destinations
//! ```
//!
//! A premises admitted on day `t` does not transmit on day `t`, and being
//! reached again later never reopens its window.

use crate::contact_network::Network;
use crate::error::ReachError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;
use tempreach_env::{Day, PremisesId};

/// Inputs of one reachability run (everything except the network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilityParams {
    /// Premises reachable from the start
    pub seed: PremisesId,

    /// First simulated day
    pub epi_start_day: Day,

    /// Exclusive end of the simulated days
    pub sim_end_day: Day,

    /// Infectious period in days
    pub delta_t: u32,
}

impl ReachabilityParams {
    /// Creates a new parameter set.
    pub fn new(seed: PremisesId, epi_start_day: Day, sim_end_day: Day, delta_t: u32) -> Self {
        Self {
            seed,
            epi_start_day,
            sim_end_day,
            delta_t,
        }
    }

    /// Checks the preconditions of a run.
    pub fn validate(&self) -> Result<(), ReachError> {
        if self.epi_start_day > self.sim_end_day {
            return Err(ReachError::InvalidWindow {
                epi_start_day: self.epi_start_day,
                sim_end_day: self.sim_end_day,
            });
        }
        if self.delta_t == 0 {
            return Err(ReachError::InvalidDeltaT(self.delta_t));
        }
        Ok(())
    }

    /// Returns the simulated days, `epi_start_day..sim_end_day`.
    pub fn simulated_days(&self) -> Range<Day> {
        self.epi_start_day..self.sim_end_day
    }
}

/// A window closes when `entry + delta_t - day <= 0`.
fn window_closed(entry: Day, delta_t: u32, day: Day) -> bool {
    entry + Day::from(delta_t) - day <= 0
}

/// What happened on one simulated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStep {
    pub day: Day,

    /// Premises whose window closed at the start of the day, ascending
    pub expired: Vec<PremisesId>,

    /// Premises first reached on this day, ascending
    pub admitted: Vec<PremisesId>,

    /// Size of the reachable set after the day
    pub reachable_total: usize,
}

impl DayStep {
    /// Returns true if the day changed the active set.
    pub fn is_eventful(&self) -> bool {
        !self.expired.is_empty() || !self.admitted.is_empty()
    }
}

/// Mutable state of one run. Created fresh for every (network, Δt) pair.
///
/// Invariants:
/// - `active ⊆ reachable`
/// - `entry_day` has exactly the keys of `reachable` and is never rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    reachable: HashSet<PremisesId>,
    active: HashSet<PremisesId>,
    entry_day: HashMap<PremisesId, Day>,
}

impl SimulationState {
    /// Creates the initial state: only the seed, reached on `epi_start_day`.
    pub fn new(seed: PremisesId, epi_start_day: Day) -> Self {
        Self {
            reachable: HashSet::from([seed]),
            active: HashSet::from([seed]),
            entry_day: HashMap::from([(seed, epi_start_day)]),
        }
    }

    /// Returns the number of premises ever reached.
    pub fn reachable_count(&self) -> usize {
        self.reachable.len()
    }

    /// Returns the number of premises still transmitting.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_reachable(&self, premises: PremisesId) -> bool {
        self.reachable.contains(&premises)
    }

    pub fn is_active(&self, premises: PremisesId) -> bool {
        self.active.contains(&premises)
    }

    /// Returns the day `premises` was first reached.
    pub fn entry_day(&self, premises: PremisesId) -> Option<Day> {
        self.entry_day.get(&premises).copied()
    }

    /// Returns every reached premises in ascending order.
    pub fn reachable_premises(&self) -> BTreeSet<PremisesId> {
        self.reachable.iter().copied().collect()
    }

    /// Removes every active premises whose window has closed as of `day`.
    pub fn expire(&mut self, day: Day, delta_t: u32) -> Vec<PremisesId> {
        let entry_day = &self.entry_day;
        let mut expired: Vec<PremisesId> = self
            .active
            .iter()
            .copied()
            .filter(|p| {
                entry_day
                    .get(p)
                    .is_some_and(|entry| window_closed(*entry, delta_t, day))
            })
            .collect();

        for premises in &expired {
            self.active.remove(premises);
        }
        expired.sort_unstable();
        expired
    }

    /// Marks `premises` as reached on `day`.
    ///
    /// Returns false (and changes nothing) if it was already reachable.
    pub fn admit(&mut self, premises: PremisesId, day: Day) -> bool {
        if !self.reachable.insert(premises) {
            return false;
        }
        self.entry_day.insert(premises, day);
        self.active.insert(premises);
        true
    }

    /// Runs one simulated day against `network`.
    pub fn step(&mut self, network: &Network, day: Day, delta_t: u32) -> DayStep {
        let expired = self.expire(day, delta_t);

        // Destinations are collected before admission so that premises
        // reached today cannot transmit today.
        let new_destinations: BTreeSet<PremisesId> = network
            .contacts_on(day)
            .iter()
            .filter(|c| self.active.contains(&c.origin))
            .map(|c| c.destination)
            .filter(|d| !self.reachable.contains(d))
            .collect();

        let admitted: Vec<PremisesId> = new_destinations.into_iter().collect();
        for premises in &admitted {
            self.admit(*premises, day);
        }

        DayStep {
            day,
            expired,
            admitted,
            reachable_total: self.reachable.len(),
        }
    }

    /// Runs one simulated day like [`step`](Self::step) without recording it.
    pub fn advance(&mut self, network: &Network, day: Day, delta_t: u32) {
        let entry_day = &self.entry_day;
        self.active.retain(|p| {
            !entry_day
                .get(p)
                .is_some_and(|entry| window_closed(*entry, delta_t, day))
        });

        let new_destinations: Vec<PremisesId> = network
            .contacts_on(day)
            .iter()
            .filter(|c| self.active.contains(&c.origin))
            .map(|c| c.destination)
            .filter(|d| !self.reachable.contains(d))
            .collect();

        for premises in new_destinations {
            self.admit(premises, day);
        }
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct ReachabilityOutcome {
    pub params: ReachabilityParams,
    state: SimulationState,
    steps: Vec<DayStep>,
}

impl ReachabilityOutcome {
    /// Returns the number of premises ever reached (seed included).
    pub fn reachable_count(&self) -> usize {
        self.state.reachable_count()
    }

    pub fn is_reachable(&self, premises: PremisesId) -> bool {
        self.state.is_reachable(premises)
    }

    /// Returns the day `premises` was first reached.
    pub fn entry_day(&self, premises: PremisesId) -> Option<Day> {
        self.state.entry_day(premises)
    }

    /// Returns the final simulation state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Returns the days on which premises expired or were admitted.
    pub fn steps(&self) -> &[DayStep] {
        &self.steps
    }
}

/// Runs the reachability simulation and keeps the per-day trace.
pub fn simulate(network: &Network, params: &ReachabilityParams) -> Result<ReachabilityOutcome, ReachError> {
    params.validate()?;

    let mut state = SimulationState::new(params.seed, params.epi_start_day);
    let mut steps = Vec::new();

    for day in params.simulated_days() {
        let step = state.step(network, day, params.delta_t);
        if step.is_eventful() {
            steps.push(step);
        }
    }

    Ok(ReachabilityOutcome {
        params: *params,
        state,
        steps,
    })
}

/// Runs the reachability simulation and returns only the final count.
pub fn count_reachable(network: &Network, params: &ReachabilityParams) -> Result<usize, ReachError> {
    params.validate()?;

    let mut state = SimulationState::new(params.seed, params.epi_start_day);
    for day in params.simulated_days() {
        state.advance(network, day, params.delta_t);
    }

    Ok(state.reachable_count())
}

/// Counts the premises temporally reachable from `seed`.
///
/// The result is at least 1: the seed is always reachable, even if it
/// never appears in the network.
pub fn compute_reachable_count(
    network: &Network,
    seed: PremisesId,
    epi_start_day: Day,
    sim_end_day: Day,
    delta_t: u32,
) -> Result<usize, ReachError> {
    let params = ReachabilityParams::new(seed, epi_start_day, sim_end_day, delta_t);
    count_reachable(network, &params)
}
