//! Batch runner - sweeps Δt over every network realization.

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::results::{ResultRow, ResultTableWriter};

use std::io::Write;
use tempreach_core::{count_reachable, simulate, Network};
use tempreach_env::{FsNetworkSource, NetworkSource};
use tracing::{debug, info, trace, Level};

/// Reachable-count spread for one Δt across all networks of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaTStats {
    pub delta_t: u32,

    /// Number of networks simulated with this Δt
    pub runs: usize,

    pub min_reachable: usize,
    pub max_reachable: usize,

    /// Sum of reachable counts (for the mean)
    pub total_reachable: usize,
}

impl DeltaTStats {
    fn new(delta_t: u32) -> Self {
        Self {
            delta_t,
            runs: 0,
            min_reachable: usize::MAX,
            max_reachable: 0,
            total_reachable: 0,
        }
    }

    fn record(&mut self, reachable: usize) {
        self.runs += 1;
        self.min_reachable = self.min_reachable.min(reachable);
        self.max_reachable = self.max_reachable.max(reachable);
        self.total_reachable += reachable;
    }

    /// Returns the mean reachable count, or 0 if nothing ran.
    pub fn mean_reachable(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_reachable as f64 / self.runs as f64
        }
    }
}

/// Results from a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Networks loaded and fully simulated
    pub networks_processed: usize,

    /// Result rows appended by this run
    pub rows_written: usize,

    /// One entry per Δt, in sweep order
    pub per_delta_t: Vec<DeltaTStats>,
}

impl BatchSummary {
    fn new(delta_t_values: &[u32]) -> Self {
        Self {
            networks_processed: 0,
            rows_written: 0,
            per_delta_t: delta_t_values.iter().copied().map(DeltaTStats::new).collect(),
        }
    }
}

/// Runs the engine for every (network, Δt) pair of a configuration.
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Creates a new batch runner.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Runs the batch, appending one row per (network, Δt) pair to `table`.
    ///
    /// Networks are the outer loop and each is loaded once; Δt is the inner
    /// loop. The first network that fails to load aborts the run, leaving
    /// the rows written so far in place.
    pub fn run<S, W>(&self, source: &S, table: &mut ResultTableWriter<W>) -> Result<BatchSummary, BatchError>
    where
        S: NetworkSource,
        W: Write,
    {
        self.config.validate()?;

        let total = self.config.num_networks;
        let report_every = (total / 10).max(1);
        let mut summary = BatchSummary::new(&self.config.delta_t_values);

        info!(
            "Starting batch: seed={} networks={} deltaT={:?} days=[{}, {})",
            self.config.seed,
            total,
            self.config.delta_t_values,
            self.config.epi_start_day,
            self.config.sim_end_day,
        );

        for index in 0..total {
            let identifier = source.identifier(index);
            let network = Network::from_records(identifier.clone(), source.load(index)?);

            debug!(
                "Network {} | records={} contacts={} span={:?}",
                identifier,
                network.record_count(),
                network.contact_count(),
                network.day_span(),
            );

            for (stats, &delta_t) in summary
                .per_delta_t
                .iter_mut()
                .zip(&self.config.delta_t_values)
            {
                let reachable = self.reachable_count(&network, delta_t)?;
                table.append(&ResultRow::new(delta_t, identifier.as_str(), reachable))?;
                stats.record(reachable);
                summary.rows_written += 1;

                debug!("  deltaT={} | reachable={}", delta_t, reachable);
            }

            summary.networks_processed += 1;

            if summary.networks_processed % report_every == 0 || summary.networks_processed == total {
                info!("Processing: {}/{} networks", summary.networks_processed, total);
            }
        }

        Ok(summary)
    }

    /// Simulates one Δt. The per-day trace is only built when it will be logged.
    fn reachable_count(&self, network: &Network, delta_t: u32) -> Result<usize, BatchError> {
        let params = self.config.params(delta_t);

        if !tracing::enabled!(Level::TRACE) {
            return Ok(count_reachable(network, &params)?);
        }

        let outcome = simulate(network, &params)?;
        for step in outcome.steps() {
            trace!(
                "  deltaT={} t={} | expired={} admitted={} reachable={}",
                delta_t,
                step.day,
                step.expired.len(),
                step.admitted.len(),
                step.reachable_total,
            );
        }
        Ok(outcome.reachable_count())
    }
}

/// Runs a batch against network files on disk and writes the result table
/// to `config.result_path()`, creating the output directory if needed.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    config.validate()?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| BatchError::io(config.output_dir.display(), e))?;

    let mut table = ResultTableWriter::create(&config.result_path())?;
    let source = FsNetworkSource::new(&config.dn_path);

    info!("Dairy networks path: {}", source.dir().display());
    info!("Writing results to: {}", table.label());

    BatchRunner::new(config.clone()).run(&source, &mut table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::read_result_rows;
    use crate::synthetic::{SyntheticConfig, SyntheticNetworkGenerator};
    use tempreach_env::{ContactRecord, MemoryNetworkSource, PremisesId};

    fn chain_source() -> MemoryNetworkSource {
        MemoryNetworkSource::new()
            .with_network(
                "net-0",
                vec![ContactRecord::new(1, 2, 1, 1.0), ContactRecord::new(2, 3, 5, 1.0)],
            )
            .with_network("net-1", vec![ContactRecord::new(1, 2, 20, 1.0)])
    }

    #[test]
    fn test_rows_follow_delta_t_inner_order() {
        let config = BatchConfig::new(PremisesId(1), "unused", 0, 10, "unused")
            .with_delta_t_values(vec![3, 10])
            .with_num_networks(2);
        let mut table = ResultTableWriter::new(Vec::new(), "inline").unwrap();

        let summary = BatchRunner::new(config).run(&chain_source(), &mut table).unwrap();

        let bytes = table.into_inner().unwrap();
        let rows = read_result_rows(bytes.as_slice(), "inline").unwrap();
        assert_eq!(
            rows,
            vec![
                ResultRow::new(3, "net-0", 2),
                ResultRow::new(10, "net-0", 3),
                ResultRow::new(3, "net-1", 1),
                ResultRow::new(10, "net-1", 1),
            ]
        );
        assert_eq!(summary.networks_processed, 2);
        assert_eq!(summary.rows_written, 4);
        assert_eq!(summary.per_delta_t[0].min_reachable, 1);
        assert_eq!(summary.per_delta_t[1].max_reachable, 3);
        assert_eq!(summary.per_delta_t[1].mean_reachable(), 2.0);
    }

    #[test]
    fn test_trace_logging_does_not_change_counts() {
        let records = SyntheticNetworkGenerator::new(3, SyntheticConfig::default())
            .unwrap()
            .records(0);
        let source = MemoryNetworkSource::new().with_network("synthetic-0", records);
        let runner = BatchRunner::new(
            BatchConfig::new(PremisesId(0), "unused", 0, 120, "unused").with_num_networks(1),
        );
        let rows = |runner: &BatchRunner| {
            let mut table = ResultTableWriter::new(Vec::new(), "inline").unwrap();
            runner.run(&source, &mut table).unwrap();
            read_result_rows(table.into_inner().unwrap().as_slice(), "inline").unwrap()
        };

        let untraced = rows(&runner);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .finish();
        let traced = tracing::subscriber::with_default(subscriber, || rows(&runner));

        assert_eq!(traced, untraced);
        assert_eq!(untraced.len(), 6);
    }

    #[test]
    fn test_missing_network_aborts_but_keeps_rows() {
        let config = BatchConfig::new(PremisesId(1), "unused", 0, 10, "unused")
            .with_delta_t_values(vec![3])
            .with_num_networks(3);
        let mut table = ResultTableWriter::new(Vec::new(), "inline").unwrap();

        let err = BatchRunner::new(config).run(&chain_source(), &mut table).unwrap_err();

        assert!(matches!(err, BatchError::Env(_)));
        assert_eq!(table.rows_written(), 2);
    }

    #[test]
    fn test_invalid_delta_t_rejected_before_loading() {
        let config = BatchConfig::new(PremisesId(1), "unused", 0, 10, "unused")
            .with_delta_t_values(vec![0])
            .with_num_networks(1);
        let mut table = ResultTableWriter::new(Vec::new(), "inline").unwrap();

        let err = BatchRunner::new(config).run(&chain_source(), &mut table).unwrap_err();

        assert!(matches!(err, BatchError::Reach(_)));
        assert_eq!(table.rows_written(), 0);
    }

    #[test]
    fn test_run_batch_from_files() {
        let net_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let generator = SyntheticNetworkGenerator::new(7, SyntheticConfig::default()).unwrap();
        generator.write_files(net_dir.path(), 4).unwrap();

        let output = out_dir.path().join("results");
        let config = BatchConfig::new(PremisesId(0), net_dir.path(), 0, 120, &output)
            .with_num_networks(4);

        let summary = run_batch(&config).unwrap();

        let rows = crate::results::read_result_table(&config.result_path()).unwrap();
        assert_eq!(rows.len(), 4 * 6);
        assert_eq!(summary.rows_written, 24);

        let first_network = net_dir.path().join("dairy_network_0.network").display().to_string();
        let deltas: Vec<u32> = rows[..6].iter().map(|r| r.delta_t).collect();
        assert_eq!(deltas, vec![15, 30, 45, 60, 75, 90]);
        assert!(rows[..6].iter().all(|r| r.dairy_network == first_network));

        // Larger windows never reach fewer premises
        for chunk in rows.chunks(6) {
            assert!(chunk.windows(2).all(|w| w[0].no_of_reachable_nodes <= w[1].no_of_reachable_nodes));
        }
    }

    #[test]
    fn test_run_batch_missing_directory_fails() {
        let out_dir = tempfile::tempdir().unwrap();
        let config = BatchConfig::new(
            PremisesId(0),
            out_dir.path().join("no_such_dir"),
            0,
            10,
            out_dir.path(),
        )
        .with_num_networks(2);

        let err = run_batch(&config).unwrap_err();

        assert!(matches!(err, BatchError::Env(_)));
        // Header is still on disk
        let rows = crate::results::read_result_table(&config.result_path()).unwrap();
        assert!(rows.is_empty());
    }
}
