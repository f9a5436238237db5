//! tempreach Plot CLI
//!
//! Turns `outputs/reachable_map_seed_{seed}.csv` into the plot spec for
//! `outputs/figures/reachability_seed{seed}.png`.

use clap::Parser;
use std::path::Path;
use tempreach_sim::plot::{export_plot_spec, OUTPUTS_DIR};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Plot temporally reachable nodes vs Δt for each dairy network
#[derive(Parser, Debug)]
#[command(name = "tempreach-plot")]
#[command(about = "Export the reachability-vs-deltaT plot spec for a seed", long_about = None)]
struct Args {
    /// Simulation seed (shown in the plot title and used to find the CSV file)
    seed: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match export_plot_spec(Path::new(OUTPUTS_DIR), args.seed) {
        Ok((spec, path)) => {
            info!("Number of dairy networks: {}", spec.network_count());
            info!("Plot spec written to {} (image: {})", path.display(), spec.image_path);
        }
        Err(e) => {
            error!("Plot export failed: {}", e);
            std::process::exit(1);
        }
    }
}
