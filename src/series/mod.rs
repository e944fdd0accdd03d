//! Series registry
//!
//! A [`SeriesSet`] is the plain input object for alignment: named series of
//! records, registered up front and then handed to an
//! [`Aligner`](crate::Aligner). The aligner only ever reads it.
//!
//! ```rust
//! use interlace::record::Record;
//! use interlace::series::SeriesSet;
//!
//! let mut set = SeriesSet::new();
//! set.insert("temp", vec![Record::new().with("ts", 1).with("v", 20)]);
//! set.insert("humidity", vec![Record::new().with("ts", 2).with("v", 55)]);
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.names().collect::<Vec<_>>(), ["humidity", "temp"]);
//! ```

pub mod keyed;
pub mod range;

pub use keyed::{reindex, Indexed, KeyedEntry, KeyedSeries, KeyedSet};
pub use range::{first_key, key_range, last_key, KeyRange};

use crate::record::Record;
use std::collections::BTreeMap;

/// Named input series, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: BTreeMap<String, Vec<Record>>,
}

impl SeriesSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series, replacing any series already under `name`.
    ///
    /// Records are not inspected here; a record missing the key or value
    /// field only fails once alignment reads it.
    pub fn insert(&mut self, name: impl Into<String>, records: Vec<Record>) -> Option<Vec<Record>> {
        self.series.insert(name.into(), records)
    }

    /// Remove a series.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Record>> {
        self.series.remove(name)
    }

    /// Records registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Record]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Whether a series is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Registered series names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Iterate over `(name, records)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.series
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of registered series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<Record>)> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = (N, Vec<Record>)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<N: Into<String>> Extend<(N, Vec<Record>)> for SeriesSet {
    fn extend<I: IntoIterator<Item = (N, Vec<Record>)>>(&mut self, iter: I) {
        for (name, records) in iter {
            self.insert(name, records);
        }
    }
}
