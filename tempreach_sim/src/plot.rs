//! Plot spec exporter for the reachability summary figure.
//!
//! Reads a result table and describes the figure to draw: one faint line per
//! network (reachable count against Δt), a dashed reference line, axis labels
//! and the target image path. The spec is written as JSON for an external
//! renderer, the same way simulation frames are handed to a Python viewer.

use crate::error::BatchError;
use crate::results::{read_result_table, ResultRow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory the plotting side reads from and writes into.
pub const OUTPUTS_DIR: &str = "outputs";

/// Horizontal reference value drawn on every figure.
pub const REFERENCE_VALUE: f64 = 979.0;

/// Legend entry of the reference line.
pub const REFERENCE_LABEL: &str = "Confirmed cases on 28-Feb-2025";

/// Returns `{outputs_dir}/reachable_map_seed_{seed}.csv`.
pub fn result_table_path(outputs_dir: &Path, seed: u64) -> PathBuf {
    outputs_dir.join(format!("reachable_map_seed_{}.csv", seed))
}

/// Returns `{outputs_dir}/figures/reachability_seed{seed}.png`.
pub fn image_path(outputs_dir: &Path, seed: u64) -> PathBuf {
    outputs_dir
        .join("figures")
        .join(format!("reachability_seed{}.png", seed))
}

/// Returns the plot spec path (the image path with a `.json` extension).
pub fn spec_path(outputs_dir: &Path, seed: u64) -> PathBuf {
    image_path(outputs_dir, seed).with_extension("json")
}

/// One point of a network line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub delta_t: u32,
    pub reachable: usize,
}

/// All points of one network, sorted by Δt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSeries {
    pub network: String,
    pub points: Vec<SeriesPoint>,
}

/// Matplotlib-style line attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub linestyle: String,
    pub linewidth: f64,
    pub alpha: f64,
}

/// Horizontal reference line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: String,
    pub style: LineStyle,
}

/// Everything a renderer needs to draw the summary figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Distinct Δt values, ascending
    pub x_ticks: Vec<u32>,

    /// One line per network, ordered by network identifier
    pub series: Vec<NetworkSeries>,
    pub series_label: String,
    pub series_style: LineStyle,

    pub reference: ReferenceLine,

    /// Figure size in inches (width, height)
    pub figsize: (f64, f64),
    pub dpi: u32,

    /// Where the rendered image goes
    pub image_path: String,
}

impl PlotSpec {
    /// Builds the spec for `seed` from result rows.
    pub fn from_rows(seed: u64, rows: &[ResultRow], image_path: &Path) -> Self {
        let mut by_network: BTreeMap<&str, Vec<SeriesPoint>> = BTreeMap::new();
        let mut ticks = BTreeSet::new();

        for row in rows {
            by_network
                .entry(row.dairy_network.as_str())
                .or_default()
                .push(SeriesPoint {
                    delta_t: row.delta_t,
                    reachable: row.no_of_reachable_nodes,
                });
            ticks.insert(row.delta_t);
        }

        let series = by_network
            .into_iter()
            .map(|(network, mut points)| {
                points.sort_by_key(|p| p.delta_t);
                NetworkSeries {
                    network: network.to_string(),
                    points,
                }
            })
            .collect();

        Self {
            title: format!("Seed = {}", seed),
            x_label: "Fixed Infectious Period ($\\Delta t$)".to_string(),
            y_label: "# Temporally Reachable Nodes".to_string(),
            x_ticks: ticks.into_iter().collect(),
            series,
            series_label: "Dairy Network".to_string(),
            series_style: LineStyle {
                color: "k".to_string(),
                linestyle: "-".to_string(),
                linewidth: 1.0,
                alpha: 0.05,
            },
            reference: ReferenceLine {
                y: REFERENCE_VALUE,
                label: REFERENCE_LABEL.to_string(),
                style: LineStyle {
                    color: "red".to_string(),
                    linestyle: "--".to_string(),
                    linewidth: 1.0,
                    alpha: 0.5,
                },
            },
            figsize: (6.0, 4.0),
            dpi: 600,
            image_path: image_path.display().to_string(),
        }
    }

    /// Returns the number of distinct networks in the spec.
    pub fn network_count(&self) -> usize {
        self.series.len()
    }

    /// Writes the spec as pretty JSON.
    pub fn write_to_file(&self, path: &Path) -> Result<(), BatchError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path).map_err(|e| BatchError::io(path.display(), e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| BatchError::io(path.display(), e))?;
        Ok(())
    }
}

/// Reads the result table of `seed` under `outputs_dir` and writes its plot
/// spec under `outputs_dir/figures`. Returns the spec and where it was written.
pub fn export_plot_spec(outputs_dir: &Path, seed: u64) -> Result<(PlotSpec, PathBuf), BatchError> {
    let table = result_table_path(outputs_dir, seed);
    let rows = read_result_table(&table)?;

    let spec = PlotSpec::from_rows(seed, &rows, &image_path(outputs_dir, seed));
    info!("No. of networks: {}", spec.network_count());

    let out = spec_path(outputs_dir, seed);
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BatchError::io(parent.display(), e))?;
    }
    spec.write_to_file(&out)?;

    Ok((spec, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultTableWriter;

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow::new(30, "nets/dairy_network_1.network", 9),
            ResultRow::new(15, "nets/dairy_network_1.network", 4),
            ResultRow::new(15, "nets/dairy_network_0.network", 2),
            ResultRow::new(30, "nets/dairy_network_0.network", 5),
        ]
    }

    #[test]
    fn test_series_grouped_and_sorted() {
        let spec = PlotSpec::from_rows(3, &rows(), Path::new("fig.png"));

        assert_eq!(spec.network_count(), 2);
        assert_eq!(spec.x_ticks, vec![15, 30]);
        assert_eq!(spec.series[0].network, "nets/dairy_network_0.network");

        let second: Vec<(u32, usize)> = spec.series[1]
            .points
            .iter()
            .map(|p| (p.delta_t, p.reachable))
            .collect();
        assert_eq!(second, vec![(15, 4), (30, 9)]);
    }

    #[test]
    fn test_labels_and_reference() {
        let spec = PlotSpec::from_rows(12, &[], Path::new("fig.png"));

        assert_eq!(spec.title, "Seed = 12");
        assert_eq!(spec.reference.y, 979.0);
        assert_eq!(spec.reference.label, REFERENCE_LABEL);
        assert_eq!(spec.series_style.alpha, 0.05);
        assert_eq!(spec.network_count(), 0);
    }

    #[test]
    fn test_paths_keyed_by_seed() {
        let out = Path::new("outputs");

        assert_eq!(result_table_path(out, 5), out.join("reachable_map_seed_5.csv"));
        assert_eq!(image_path(out, 5), out.join("figures").join("reachability_seed5.png"));
        assert_eq!(spec_path(out, 5), out.join("figures").join("reachability_seed5.json"));
    }

    #[test]
    fn test_export_from_result_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = ResultTableWriter::create(&result_table_path(dir.path(), 8)).unwrap();
        for row in rows() {
            table.append(&row).unwrap();
        }
        drop(table);

        let (spec, written) = export_plot_spec(dir.path(), 8).unwrap();

        assert_eq!(written, spec_path(dir.path(), 8));
        let json = std::fs::read_to_string(&written).unwrap();
        let parsed: PlotSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
        assert!(parsed.image_path.ends_with("reachability_seed8.png"));
    }

    #[test]
    fn test_export_missing_table_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = export_plot_spec(dir.path(), 99).unwrap_err();

        assert!(matches!(err, BatchError::Io { .. }));
    }
}
