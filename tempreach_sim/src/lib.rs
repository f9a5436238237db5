//! tempreach Batch Harness
//!
//! This crate runs the reachability engine over many network realizations
//! and keeps the results in a form the plotting side can pick up later.
//!
//! # Data Flow
//!
//! ```text
//!  dairy_network_{i}.network ──► NetworkSource ──► Network (aggregated once)
//!                                                     │
//!                                      ┌──────────────┘
//!                                      ▼   for each Δt
//!                               Reachability Engine
//!                                      │
//!                                      ▼   one row, flushed
//!                       reachable_map_seed_{seed}.csv
//!                                      │   (later, separate process)
//!                                      ▼
//!                   PlotSpec ──► reachability_seed{seed}.json
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use tempreach_sim::{run_batch, BatchConfig};
//! use tempreach_env::PremisesId;
//!
//! let config = BatchConfig::new(PremisesId(42), "networks", 0, 365, "outputs")
//!     .with_num_networks(10);
//!
//! let summary = run_batch(&config)?;
//! println!("{} rows", summary.rows_written);
//! ```

mod config;
mod error;
mod results;
mod runner;
pub mod plot;
pub mod synthetic;

pub use config::{result_file_name, BatchConfig, DEFAULT_DELTA_T_VALUES, DEFAULT_NUM_NETWORKS};
pub use error::BatchError;
pub use results::{read_result_rows, read_result_table, ResultRow, ResultTableWriter, RESULT_COLUMNS};
pub use runner::{run_batch, BatchRunner, BatchSummary, DeltaTStats};
pub use plot::{PlotSpec, NetworkSeries, SeriesPoint};
pub use synthetic::{SyntheticConfig, SyntheticNetworkGenerator};
