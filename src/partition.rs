//! Date partitioning of aligned tables
//!
//! [`day_break`] groups the rows of an [`AlignedTable`] by a bucket name
//! derived from each key. How a key maps to a bucket is up to the
//! [`Bucketer`], so the partitioner does not depend on one timestamp layout.
//!
//! ```rust
//! use interlace::align::{AlignedRow, AlignedTable};
//! use interlace::partition::{day_break, TruncateSuffix};
//! use interlace::record::Key;
//!
//! let table: AlignedTable = [
//!     (Key::from("2024-01-01 10:00:00"), AlignedRow::new()),
//!     (Key::from("2024-01-02 09:00:00"), AlignedRow::new()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let days = day_break(&table, &TruncateSuffix::TIME_OF_DAY)?;
//! assert_eq!(days.keys().collect::<Vec<_>>(), ["2024-01-01", "2024-01-02"]);
//! # Ok::<(), interlace::Error>(())
//! ```

use crate::align::AlignedTable;
use crate::record::Key;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maps a key to the name of the bucket its row belongs in.
pub trait Bucketer {
    /// Bucket name for `key`.
    ///
    /// # Errors
    ///
    /// Implementations fail when a key does not fit their layout.
    fn bucket(&self, key: &Key) -> Result<String>;
}

impl<F> Bucketer for F
where
    F: Fn(&Key) -> Result<String>,
{
    fn bucket(&self, key: &Key) -> Result<String> {
        self(key)
    }
}

/// Drops a fixed number of trailing characters from the key's text form.
///
/// Keys shorter than the suffix yield an empty bucket name; the layout is
/// not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateSuffix(pub usize);

impl TruncateSuffix {
    /// Strips `" HH:MM:SS"` from `"YYYY-MM-DD HH:MM:SS"` keys.
    pub const TIME_OF_DAY: Self = Self(9);
}

impl Bucketer for TruncateSuffix {
    fn bucket(&self, key: &Key) -> Result<String> {
        let text = key.to_string();
        let keep = text.chars().count().saturating_sub(self.0);
        Ok(text.chars().take(keep).collect())
    }
}

/// Parses text keys with a `chrono` format string and buckets by calendar
/// date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    /// `strftime`-style layout of the keys, including a time component
    pub format: String,
}

impl DateFormat {
    /// Bucketer for keys laid out as `format`.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Bucketer for DateFormat {
    fn bucket(&self, key: &Key) -> Result<String> {
        let parsed = key
            .as_text()
            .and_then(|text| NaiveDateTime::parse_from_str(text, &self.format).ok())
            .ok_or_else(|| Error::InvalidKey {
                series: String::new(),
                field: format!("timestamp ({})", self.format),
                value: key.to_string(),
            })?;
        Ok(parsed.date().format(DATE_FORMAT).to_string())
    }
}

/// Treats integer keys as Unix seconds and buckets by UTC calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnixDay;

impl Bucketer for UnixDay {
    fn bucket(&self, key: &Key) -> Result<String> {
        let instant = key
            .as_int()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| Error::InvalidKey {
                series: String::new(),
                field: "unix seconds".to_string(),
                value: key.to_string(),
            })?;
        Ok(instant.date_naive().format(DATE_FORMAT).to_string())
    }
}

/// Split `table` into sub-tables by bucket name. Rows are copied verbatim;
/// every key lands in exactly one bucket.
///
/// # Errors
///
/// Propagates the first bucketer failure.
pub fn day_break<B: Bucketer + ?Sized>(
    table: &AlignedTable,
    bucketer: &B,
) -> Result<BTreeMap<String, AlignedTable>> {
    let mut buckets: BTreeMap<String, AlignedTable> = BTreeMap::new();

    for (key, row) in table {
        let bucket = bucketer.bucket(key)?;
        if bucket.is_empty() {
            warn!(key = %key, "key produced an empty bucket name");
        }
        buckets
            .entry(bucket)
            .or_default()
            .insert(key.clone(), row.clone());
    }

    debug!(rows = table.len(), buckets = buckets.len(), "day break done");
    Ok(buckets)
}
