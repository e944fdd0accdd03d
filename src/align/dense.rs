//! Dense alignment: a row for every integer key in the shared range
//!
//! Memory grows with `last - first`, not with the number of observations,
//! so the row count is checked against [`AlignConfig::max_dense_rows`]
//! before anything is allocated.

use super::{AlignConfig, AlignedRow, AlignedTable, FillPolicy};
use crate::record::Key;
use crate::series::{key_range, reindex, KeyedSet, SeriesSet};
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, trace};

/// Per-series carry state while sweeping the range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Carry<'a> {
    /// No observation at or before the current key
    #[default]
    NotYetObserved,
    /// Most recent observation
    Observed(&'a Value),
}

impl Carry<'_> {
    /// The value to place in the current row.
    #[must_use]
    pub fn resolve(&self, fill: &FillPolicy) -> Value {
        match self {
            Self::NotYetObserved => fill.fill_value(),
            Self::Observed(value) => (*value).clone(),
        }
    }
}

/// Build one row per integer key in `[first_key, last_key]`.
///
/// Each series contributes its value at the key if observed there, else its
/// most recent earlier observation, else the configured
/// [`FillPolicy`] value. Every row holds every series.
///
/// # Errors
///
/// - range errors ([`Error::EmptySeries`], [`Error::NoSeries`], ...) from
///   [`key_range`]
/// - [`Error::MissingField`] if a record lacks `key_field` or `value_field`
/// - [`Error::NonContiguousKey`] if any key is not an integer
/// - [`Error::RangeTooLarge`] if the range exceeds
///   [`AlignConfig::max_dense_rows`]
///
/// # Example
///
/// ```rust
/// use interlace::align::{dense, AlignConfig};
/// use interlace::record::{Key, Record};
/// use interlace::series::SeriesSet;
/// use serde_json::json;
///
/// let mut set = SeriesSet::new();
/// set.insert("a", vec![Record::new().with("ts", 10).with("v", 1.5)]);
/// set.insert("b", vec![Record::new().with("ts", 12).with("v", 7)]);
///
/// let table = dense::generate_and_fill(&set, "ts", "v", &AlignConfig::default())?;
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.get(&Key::Int(11)).unwrap()["b"], json!(0));
/// assert_eq!(table.get(&Key::Int(12)).unwrap()["a"], json!(1.5));
/// # Ok::<(), interlace::Error>(())
/// ```
pub fn generate_and_fill(
    set: &SeriesSet,
    key_field: &str,
    value_field: &str,
    config: &AlignConfig,
) -> Result<AlignedTable> {
    let range = key_range(set, key_field)?;
    let keyed = reindex(set, key_field, Some(value_field))?;
    require_integer_keys(&keyed)?;

    let first = integer(&range.first)?;
    let last = integer(&range.last)?;
    let rows = (i128::from(last) - i128::from(first) + 1).max(0);

    if let Some(limit) = config.max_dense_rows {
        if rows > i128::from(limit) {
            return Err(Error::RangeTooLarge {
                rows: rows.unsigned_abs(),
                limit,
            });
        }
    }

    let mut carries: Vec<_> = keyed
        .iter()
        .map(|(name, series)| (name, series, Carry::NotYetObserved))
        .collect();

    let mut table = AlignedTable::new();
    for i in first..=last {
        let key = Key::Int(i);
        let mut row = AlignedRow::new();

        for (name, series, carry) in &mut carries {
            if let Some(value) = series.get(&key).and_then(|entry| entry.item.value()) {
                if *carry == Carry::NotYetObserved {
                    trace!(series = *name, key = i, "first observation");
                }
                *carry = Carry::Observed(value);
            }
            row.insert((*name).to_string(), carry.resolve(&config.fill));
        }

        table.insert(key, row);
    }

    debug!(
        first,
        last,
        rows = table.len(),
        series = carries.len(),
        "dense alignment done"
    );
    Ok(table)
}

fn require_integer_keys(keyed: &KeyedSet<'_>) -> Result<()> {
    for (name, series) in keyed.iter() {
        if let Some(key) = series.keys().find(|key| key.as_int().is_none()) {
            return Err(Error::NonContiguousKey {
                series: name.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn integer(key: &Key) -> Result<i64> {
    key.as_int().ok_or_else(|| Error::NonContiguousKey {
        series: String::new(),
        key: key.to_string(),
    })
}
