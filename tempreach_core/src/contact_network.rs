//! The contact network - one realization, aggregated by day.
//!
//! Raw files can hold several shipments between the same pair of premises
//! on the same day. Reachability only cares whether a contact exists, so
//! those rows are folded into one `DailyContact` whose volume is the sum.
//! The folding happens once per network, not once per simulated Δt.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tempreach_env::{ContactRecord, Day, PremisesId};

/// All shipments from `origin` to `destination` on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyContact {
    pub origin: PremisesId,
    pub destination: PremisesId,

    /// Summed volume of the folded records
    pub volume: f64,
}

/// A time-stamped contact network indexed by day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    /// Identifier of the source (usually the network file path)
    id: String,

    /// Aggregated contacts per day, ordered by (origin, destination)
    days: BTreeMap<Day, Vec<DailyContact>>,

    /// Number of raw records folded into this network
    record_count: usize,
}

impl Network {
    /// Builds a network from raw contact records.
    ///
    /// Blank or NaN volumes count as zero in the sum; the contact itself is kept.
    pub fn from_records<I>(id: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        let mut grouped: BTreeMap<Day, BTreeMap<(PremisesId, PremisesId), f64>> = BTreeMap::new();
        let mut record_count = 0;

        for record in records {
            *grouped
                .entry(record.day_of_year)
                .or_default()
                .entry((record.origin, record.destination))
                .or_insert(0.0) += record.volume.filter(|v| !v.is_nan()).unwrap_or(0.0);
            record_count += 1;
        }

        let days = grouped
            .into_iter()
            .map(|(day, pairs)| {
                let contacts = pairs
                    .into_iter()
                    .map(|((origin, destination), volume)| DailyContact {
                        origin,
                        destination,
                        volume,
                    })
                    .collect();
                (day, contacts)
            })
            .collect();

        Self {
            id: id.into(),
            days,
            record_count,
        }
    }

    /// Returns the network identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the aggregated contacts of exactly `day`.
    ///
    /// A day without contacts yields an empty slice.
    pub fn contacts_on(&self, day: Day) -> &[DailyContact] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first and last day with contacts.
    pub fn day_span(&self) -> Option<(Day, Day)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }

    /// Returns the number of raw records this network was built from.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Returns the number of aggregated (day, origin, destination) contacts.
    pub fn contact_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_day_pairs_are_summed() {
        let network = Network::from_records(
            "net",
            vec![
                ContactRecord::new(1, 2, 3, 3.0),
                ContactRecord::new(1, 2, 3, 4.0),
                ContactRecord::new(1, 2, 4, 1.0),
            ],
        );

        let day3 = network.contacts_on(3);
        assert_eq!(day3.len(), 1);
        assert_relative_eq!(day3[0].volume, 7.0, epsilon = 1e-9);

        assert_eq!(network.record_count(), 3);
        assert_eq!(network.contact_count(), 2);
    }

    #[test]
    fn test_contacts_on_is_exact_day() {
        let network = Network::from_records("net", vec![ContactRecord::new(1, 2, 9, 1.0)]);

        assert!(network.contacts_on(8).is_empty());
        assert_eq!(network.contacts_on(9).len(), 1);
        assert!(network.contacts_on(10).is_empty());
    }

    #[test]
    fn test_contacts_are_ordered_within_day() {
        let network = Network::from_records(
            "net",
            vec![
                ContactRecord::new(5, 1, 2, 1.0),
                ContactRecord::new(1, 9, 2, 1.0),
                ContactRecord::new(1, 3, 2, 1.0),
            ],
        );

        let pairs: Vec<(u64, u64)> = network
            .contacts_on(2)
            .iter()
            .map(|c| (c.origin.as_u64(), c.destination.as_u64()))
            .collect();

        assert_eq!(pairs, vec![(1, 3), (1, 9), (5, 1)]);
    }

    #[test]
    fn test_day_span() {
        let network = Network::from_records(
            "net",
            vec![
                ContactRecord::new(1, 2, 40, 1.0),
                ContactRecord::new(2, 3, 12, 1.0),
            ],
        );

        assert_eq!(network.day_span(), Some((12, 40)));
        assert_eq!(network.id(), "net");
    }

    #[test]
    fn test_empty_network() {
        let network = Network::from_records("empty", Vec::new());

        assert_eq!(network.day_span(), None);
        assert_eq!(network.contact_count(), 0);
    }

    #[test]
    fn test_blank_and_nan_volumes_are_skipped_in_sum() {
        let network = Network::from_records(
            "net",
            vec![
                ContactRecord::new(1, 2, 3, 5.0),
                ContactRecord::without_volume(1, 2, 3),
                ContactRecord::new(1, 2, 3, f64::NAN),
                ContactRecord::without_volume(4, 5, 3),
            ],
        );

        let day3 = network.contacts_on(3);
        assert_eq!(day3.len(), 2);
        assert_relative_eq!(day3[0].volume, 5.0, epsilon = 1e-9);
        assert_relative_eq!(day3[1].volume, 0.0, epsilon = 1e-9);
        assert_eq!(network.record_count(), 4);
    }
}
