//! tempreach Environment Layer
//!
//! This crate keeps the reachability engine free of file handling. Everything
//! that touches the outside world when a batch runs goes through here:
//! - Shared identifiers (`PremisesId`, `Day`)
//! - The raw `ContactRecord` read from a network file
//! - Network loading behind the `NetworkSource` trait
//!
//! # Implementations
//!
//! - **Filesystem**: `FsNetworkSource` reads `dairy_network_{i}.network` TSV files
//! - **In-memory**: `MemoryNetworkSource` serves prepared records (tests, generators)
//!
//! # Example
//!
//! ```ignore
//! use tempreach_env::{FsNetworkSource, NetworkSource};
//!
//! let source = FsNetworkSource::new("data/networks");
//! let records = source.load(0)?;
//! println!("{}: {} contacts", source.identifier(0), records.len());
//! ```

mod types;
mod error;
mod source;

pub use types::{ContactRecord, Day, PremisesId};
pub use error::EnvError;
pub use source::{
    network_file_name, read_contact_records, read_network_file, write_contact_records,
    write_network_file, FsNetworkSource, MemoryNetworkSource, NetworkSource, REQUIRED_COLUMNS,
};
