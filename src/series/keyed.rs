//! Keyed view of a series set
//!
//! [`reindex`] turns each ordered series into a key -> entry lookup. The
//! result borrows from the [`SeriesSet`]; nothing in the registry changes, so
//! every alignment call can derive a fresh view.

use super::SeriesSet;
use crate::record::{Key, Record};
use crate::Result;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// What a keyed entry points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indexed<'a> {
    /// The whole record (no value field requested)
    Record(&'a Record),
    /// A single extracted field value
    Value(&'a Value),
}

impl<'a> Indexed<'a> {
    /// The record, for entries indexed without a value field.
    #[must_use]
    pub const fn record(&self) -> Option<&'a Record> {
        match self {
            Self::Record(r) => Some(r),
            Self::Value(_) => None,
        }
    }

    /// The extracted value, for entries indexed with a value field.
    #[must_use]
    pub const fn value(&self) -> Option<&'a Value> {
        match self {
            Self::Record(_) => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// One keyed entry plus the position of its source record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyedEntry<'a> {
    /// Index of the record in the original series
    pub position: usize,
    /// Record or extracted value
    pub item: Indexed<'a>,
}

impl<'a> KeyedEntry<'a> {
    /// Read `field` from a record entry. Value entries already hold the
    /// extracted field and return it as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`](crate::Error::MissingField) if the
    /// record lacks `field`.
    pub fn value_of(&self, series: &str, field: &str) -> Result<&'a Value> {
        match self.item {
            Indexed::Record(record) => record.require(series, self.position, field),
            Indexed::Value(value) => Ok(value),
        }
    }
}

/// Key -> entry lookup for one series. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct KeyedSeries<'a> {
    entries: FxHashMap<Key, KeyedEntry<'a>>,
}

impl<'a> KeyedSeries<'a> {
    /// Entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&KeyedEntry<'a>> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series had no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, entry)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &KeyedEntry<'a>)> {
        self.entries.iter()
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }
}

/// Keyed view of every series in a set, by series name.
#[derive(Debug, Clone, Default)]
pub struct KeyedSet<'a> {
    series: BTreeMap<&'a str, KeyedSeries<'a>>,
}

impl<'a> KeyedSet<'a> {
    /// Keyed series registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KeyedSeries<'a>> {
        self.series.get(name)
    }

    /// Iterate over `(name, keyed series)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &KeyedSeries<'a>)> {
        self.series.iter().map(|(name, keyed)| (*name, keyed))
    }

    /// Series names in order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.series.keys().copied()
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the view holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Index every series by `key_field`.
///
/// With `value_field = None` each entry borrows the whole record; with
/// `Some(field)` it borrows that field's value. When a series repeats a key,
/// the later record wins.
///
/// # Errors
///
/// - [`Error::MissingField`](crate::Error::MissingField) if a record lacks
///   `key_field` or the requested `value_field`
/// - [`Error::InvalidKey`](crate::Error::InvalidKey) if a key value is not
///   orderable
///
/// # Example
///
/// ```rust
/// use interlace::record::{Key, Record};
/// use interlace::series::{reindex, SeriesSet};
///
/// let mut set = SeriesSet::new();
/// set.insert("a", vec![
///     Record::new().with("ts", 1).with("v", "x"),
///     Record::new().with("ts", 1).with("v", "y"),
/// ]);
///
/// let keyed = reindex(&set, "ts", Some("v"))?;
/// let entry = keyed.get("a").unwrap().get(&Key::Int(1)).unwrap();
/// assert_eq!(entry.item.value(), Some(&serde_json::json!("y")));
/// # Ok::<(), interlace::Error>(())
/// ```
pub fn reindex<'a>(
    set: &'a SeriesSet,
    key_field: &str,
    value_field: Option<&str>,
) -> Result<KeyedSet<'a>> {
    let mut series = BTreeMap::new();

    for (name, records) in set.iter() {
        let mut entries =
            FxHashMap::with_capacity_and_hasher(records.len(), Default::default());

        for (position, record) in records.iter().enumerate() {
            let key = record.key(name, position, key_field)?;
            let item = match value_field {
                Some(field) => Indexed::Value(record.require(name, position, field)?),
                None => Indexed::Record(record),
            };
            entries.insert(key, KeyedEntry { position, item });
        }

        debug!(
            series = name,
            records = records.len(),
            keys = entries.len(),
            "reindexed series"
        );
        series.insert(name, KeyedSeries { entries });
    }

    Ok(KeyedSet { series })
}
