//! Network sources: where batch runs get their contact records from.

use crate::error::EnvError;
use crate::types::ContactRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Columns every network file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["oPremId", "dPremId", "dayOfYear", "volume"];

/// Returns the file name of network instance `index`.
pub fn network_file_name(index: usize) -> String {
    format!("dairy_network_{}.network", index)
}

/// A collection of indexed network instances.
///
/// # Implementations
///
/// - **Filesystem**: `FsNetworkSource` - one TSV file per instance
/// - **In-memory**: `MemoryNetworkSource` - prepared record lists
pub trait NetworkSource {
    /// Returns the identifier recorded in result rows for network `index`.
    fn identifier(&self, index: usize) -> String;

    /// Loads every contact record of network `index`.
    ///
    /// A missing or malformed network is an error; there is no fallback.
    fn load(&self, index: usize) -> Result<Vec<ContactRecord>, EnvError>;
}

/// Reads tab-separated contact records.
///
/// `label` names the input in error messages. Extra columns are ignored;
/// a missing required column fails before any row is decoded.
pub fn read_contact_records<R: Read>(reader: R, label: &str) -> Result<Vec<ContactRecord>, EnvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| EnvError::parse(label, e))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EnvError::MissingColumn {
                path: label.to_string(),
                column,
            });
        }
    }

    rdr.deserialize()
        .map(|row| row.map_err(|e| EnvError::parse(label, e)))
        .collect()
}

/// Reads a network file from disk.
pub fn read_network_file(path: &Path) -> Result<Vec<ContactRecord>, EnvError> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|e| EnvError::io(&label, e))?;
    read_contact_records(BufReader::new(file), &label)
}

/// Writes contact records as a tab-separated network file body.
///
/// The header is always written, so an empty record list still
/// produces a readable file.
pub fn write_contact_records<W: Write>(
    writer: W,
    records: &[ContactRecord],
    label: &str,
) -> Result<(), EnvError> {
    let write_err = |source: csv::Error| EnvError::Write {
        path: label.to_string(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REQUIRED_COLUMNS).map_err(write_err)?;
    for record in records {
        wtr.serialize(record).map_err(write_err)?;
    }
    wtr.flush().map_err(|e| EnvError::io(label, e))?;
    Ok(())
}

/// Writes a network file to disk.
pub fn write_network_file(path: &Path, records: &[ContactRecord]) -> Result<(), EnvError> {
    let label = path.display().to_string();
    let file = File::create(path).map_err(|e| EnvError::io(&label, e))?;
    write_contact_records(BufWriter::new(file), records, &label)
}

/// Network instances stored as `dairy_network_{i}.network` in one directory.
#[derive(Debug, Clone)]
pub struct FsNetworkSource {
    dir: PathBuf,
}

impl FsNetworkSource {
    /// Creates a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the network files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of network instance `index`.
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(network_file_name(index))
    }
}

impl NetworkSource for FsNetworkSource {
    fn identifier(&self, index: usize) -> String {
        self.path(index).display().to_string()
    }

    fn load(&self, index: usize) -> Result<Vec<ContactRecord>, EnvError> {
        read_network_file(&self.path(index))
    }
}

/// Network instances held in memory, indexed by insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNetworkSource {
    networks: Vec<(String, Vec<ContactRecord>)>,
}

impl MemoryNetworkSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a network under the given identifier.
    pub fn with_network(mut self, identifier: impl Into<String>, records: Vec<ContactRecord>) -> Self {
        self.push(identifier, records);
        self
    }

    /// Appends a network under the given identifier.
    pub fn push(&mut self, identifier: impl Into<String>, records: Vec<ContactRecord>) {
        self.networks.push((identifier.into(), records));
    }

    /// Returns the number of stored networks.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Returns true if no network is stored.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl NetworkSource for MemoryNetworkSource {
    fn identifier(&self, index: usize) -> String {
        self.networks
            .get(index)
            .map(|(id, _)| id.clone())
            .unwrap_or_else(|| format!("memory_network_{}", index))
    }

    fn load(&self, index: usize) -> Result<Vec<ContactRecord>, EnvError> {
        self.networks
            .get(index)
            .map(|(_, records)| records.clone())
            .ok_or_else(|| EnvError::not_found(self.identifier(index)))
    }
}
