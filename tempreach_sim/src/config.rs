//! Batch configuration.

use std::path::{Path, PathBuf};
use tempreach_core::{ReachError, ReachabilityParams};
use tempreach_env::{Day, PremisesId};

/// Infectious periods swept for every network, in output order.
pub const DEFAULT_DELTA_T_VALUES: [u32; 6] = [15, 30, 45, 60, 75, 90];

/// Number of network realizations per batch.
pub const DEFAULT_NUM_NETWORKS: usize = 1000;

/// Returns the result table file name for `seed`.
pub fn result_file_name(seed: PremisesId) -> String {
    format!("reachable_map_seed_{}.csv", seed)
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Seed premises shared by every run
    pub seed: PremisesId,

    /// Directory holding `dairy_network_{i}.network` files
    pub dn_path: PathBuf,

    /// First simulated day
    pub epi_start_day: Day,

    /// Exclusive end of the simulated days
    pub sim_end_day: Day,

    /// Directory the result table is written to
    pub output_dir: PathBuf,

    /// Infectious periods (inner loop, in this order)
    pub delta_t_values: Vec<u32>,

    /// Networks `0..num_networks` are processed (outer loop)
    pub num_networks: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            seed: PremisesId(0),
            dn_path: PathBuf::from("."),
            epi_start_day: 0,
            sim_end_day: 365,
            output_dir: PathBuf::from("outputs"),
            delta_t_values: DEFAULT_DELTA_T_VALUES.to_vec(),
            num_networks: DEFAULT_NUM_NETWORKS,
        }
    }
}

impl BatchConfig {
    /// Creates a configuration with the default Δt sweep and network count.
    pub fn new(
        seed: PremisesId,
        dn_path: impl Into<PathBuf>,
        epi_start_day: Day,
        sim_end_day: Day,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            seed,
            dn_path: dn_path.into(),
            epi_start_day,
            sim_end_day,
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the Δt sweep.
    pub fn with_delta_t_values(mut self, values: impl Into<Vec<u32>>) -> Self {
        self.delta_t_values = values.into();
        self
    }

    /// Sets the number of networks.
    pub fn with_num_networks(mut self, num_networks: usize) -> Self {
        self.num_networks = num_networks;
        self
    }

    /// Returns the path of the result table.
    pub fn result_path(&self) -> PathBuf {
        self.output_dir.join(result_file_name(self.seed))
    }

    /// Returns the network directory.
    pub fn network_dir(&self) -> &Path {
        &self.dn_path
    }

    /// Returns the engine parameters for one Δt.
    pub fn params(&self, delta_t: u32) -> ReachabilityParams {
        ReachabilityParams::new(self.seed, self.epi_start_day, self.sim_end_day, delta_t)
    }

    /// Checks every (window, Δt) combination before any file is touched.
    pub fn validate(&self) -> Result<(), ReachError> {
        self.delta_t_values
            .iter()
            .try_for_each(|&delta_t| self.params(delta_t).validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = BatchConfig::default();

        assert_eq!(config.delta_t_values, vec![15, 30, 45, 60, 75, 90]);
        assert_eq!(config.num_networks, 1000);
    }

    #[test]
    fn test_result_path() {
        let config = BatchConfig::new(PremisesId(7), "nets", 0, 100, "out");

        assert_eq!(config.result_path(), Path::new("out").join("reachable_map_seed_7.csv"));
        assert_eq!(config.network_dir(), Path::new("nets"));
    }

    #[test]
    fn test_validate_rejects_zero_delta_t() {
        let config = BatchConfig::new(PremisesId(7), "nets", 0, 100, "out")
            .with_delta_t_values(vec![15, 0]);

        assert_eq!(config.validate(), Err(ReachError::InvalidDeltaT(0)));
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let config = BatchConfig::new(PremisesId(7), "nets", 50, 10, "out");

        assert!(matches!(config.validate(), Err(ReachError::InvalidWindow { .. })));
    }
}
