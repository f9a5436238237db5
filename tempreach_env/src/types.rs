//! Common types shared by every tempreach crate.

use serde::{Deserialize, Serialize};

/// Simulated day (day of year in the source data).
pub type Day = i64;

/// Identifier of a premises (a node of the contact network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PremisesId(pub u64);

impl PremisesId {
    /// Returns the raw numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PremisesId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PremisesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One contact event as it appears in a network file.
///
/// Field names on the wire follow the network file header
/// (`oPremId`, `dPremId`, `dayOfYear`, `volume`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Premises the shipment left from
    #[serde(rename = "oPremId")]
    pub origin: PremisesId,

    /// Premises the shipment arrived at
    #[serde(rename = "dPremId")]
    pub destination: PremisesId,

    /// Day the contact occurred
    #[serde(rename = "dayOfYear")]
    pub day_of_year: Day,

    /// Shipment volume (carried through aggregation only); a blank cell is `None`
    pub volume: Option<f64>,
}

impl ContactRecord {
    /// Creates a new contact record.
    pub fn new(origin: u64, destination: u64, day_of_year: Day, volume: f64) -> Self {
        Self {
            origin: PremisesId(origin),
            destination: PremisesId(destination),
            day_of_year,
            volume: Some(volume),
        }
    }

    /// Creates a contact record whose volume cell was left blank.
    pub fn without_volume(origin: u64, destination: u64, day_of_year: Day) -> Self {
        Self {
            origin: PremisesId(origin),
            destination: PremisesId(destination),
            day_of_year,
            volume: None,
        }
    }
}
