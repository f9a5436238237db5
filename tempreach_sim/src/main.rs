//! tempreach Batch CLI
//!
//! Counts temporally reachable premises from one seed across every dairy
//! network realization and Δt value, writing one CSV row per pair.

use clap::Parser;
use std::path::PathBuf;
use tempreach_env::PremisesId;
use tempreach_sim::{run_batch, BatchConfig};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Computing temporally reachable premises from a seed
#[derive(Parser, Debug)]
#[command(name = "tempreach-batch")]
#[command(about = "Compute temporally reachable premises from a seed across dairy networks", long_about = None)]
struct Args {
    /// Seed premises id
    #[arg(long)]
    seed: u64,

    /// Directory containing dairy_network_{i}.network files
    #[arg(long = "dn_path")]
    dn_path: PathBuf,

    /// Epidemic start day
    #[arg(long = "epi_start_day")]
    epi_start_day: i64,

    /// Simulation end day (exclusive)
    #[arg(long = "sim_end_day")]
    sim_end_day: i64,

    /// Directory for the reachability output file
    #[arg(long = "output_path")]
    output_path: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Seed: {}", args.seed);
    info!("Dairy networks path: {}", args.dn_path.display());
    info!("Epidemic start date: {}", args.epi_start_day);

    let config = BatchConfig::new(
        PremisesId(args.seed),
        args.dn_path,
        args.epi_start_day,
        args.sim_end_day,
        args.output_path,
    );

    match run_batch(&config) {
        Ok(summary) => {
            info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            info!(
                "Processed {} networks, {} rows -> {}",
                summary.networks_processed,
                summary.rows_written,
                config.result_path().display()
            );
            for stats in &summary.per_delta_t {
                info!(
                    "  deltaT={:>3} | min={} max={} mean={:.1}",
                    stats.delta_t,
                    stats.min_reachable,
                    stats.max_reachable,
                    stats.mean_reachable()
                );
            }
        }
        Err(e) => {
            error!("Batch run failed: {}", e);
            std::process::exit(1);
        }
    }
}
