//! Result table: one CSV row per (Δt, network) pair.
//!
//! Rows are flushed as soon as they are appended so that a batch killed
//! half-way keeps every completed row on disk.

use crate::error::BatchError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Header of the result table.
pub const RESULT_COLUMNS: [&str; 3] = ["deltaT", "dairy_network", "no_of_reachable_nodes"];

/// A single result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Infectious period used for the run
    #[serde(rename = "deltaT")]
    pub delta_t: u32,

    /// Identifier (file path) of the network
    pub dairy_network: String,

    /// Premises reachable from the seed, seed included
    pub no_of_reachable_nodes: usize,
}

impl ResultRow {
    /// Creates a new row.
    pub fn new(delta_t: u32, dairy_network: impl Into<String>, no_of_reachable_nodes: usize) -> Self {
        Self {
            delta_t,
            dairy_network: dairy_network.into(),
            no_of_reachable_nodes,
        }
    }
}

/// Incremental writer for the result table.
pub struct ResultTableWriter<W: Write> {
    wtr: csv::Writer<W>,
    label: String,
    rows_written: usize,
}

impl<W: Write> ResultTableWriter<W> {
    /// Wraps `writer` and writes the header immediately.
    pub fn new(writer: W, label: impl Into<String>) -> Result<Self, BatchError> {
        let label = label.into();
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        wtr.write_record(RESULT_COLUMNS)
            .map_err(|e| BatchError::table(&label, e))?;
        wtr.flush().map_err(|e| BatchError::io(&label, e))?;

        Ok(Self {
            wtr,
            label,
            rows_written: 0,
        })
    }

    /// Appends one row and flushes it through to the underlying writer.
    pub fn append(&mut self, row: &ResultRow) -> Result<(), BatchError> {
        self.wtr
            .serialize(row)
            .map_err(|e| BatchError::table(&self.label, e))?;
        self.wtr.flush().map_err(|e| BatchError::io(&self.label, e))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Returns the number of data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Returns the label used in error messages (the file path for files).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> Result<W, BatchError> {
        let label = self.label;
        self.wtr
            .into_inner()
            .map_err(|e| BatchError::io(&label, e.into_error()))
    }
}

impl ResultTableWriter<File> {
    /// Creates (or truncates) the result table at `path`.
    pub fn create(path: &Path) -> Result<Self, BatchError> {
        let label = path.display().to_string();
        let file = File::create(path).map_err(|e| BatchError::io(&label, e))?;
        Self::new(file, label)
    }
}

/// Reads result rows from CSV text.
pub fn read_result_rows<R: Read>(reader: R, label: &str) -> Result<Vec<ResultRow>, BatchError> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .map(|row| row.map_err(|e| BatchError::table(label, e)))
        .collect()
}

/// Reads the result table at `path`.
pub fn read_result_table(path: &Path) -> Result<Vec<ResultRow>, BatchError> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|e| BatchError::io(&label, e))?;
    read_result_rows(BufReader::new(file), &label)
}
