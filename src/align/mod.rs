//! Merge/fill engine
//!
//! Two ways to lay series onto a shared key axis:
//!
//! - [`sparse::generate`]: rows only at keys some series actually observed
//! - [`dense::generate_and_fill`]: a row for every integer key in the range
//!
//! Both carry the last observed value forward. Neither interpolates nor
//! fills backward.

pub mod dense;
pub mod sparse;

pub use dense::{generate_and_fill, Carry};
pub use sparse::generate;

use crate::partition::{self, Bucketer};
use crate::record::Key;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default bound on dense output rows (10M)
pub const DEFAULT_MAX_DENSE_ROWS: u64 = 10_000_000;

/// Value a dense row uses for a series that has not been observed yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FillPolicy {
    /// Integer zero
    #[default]
    Zero,
    /// JSON null
    Null,
    /// A caller-chosen value
    Value(Value),
}

impl FillPolicy {
    /// The value this policy fills with.
    #[must_use]
    pub fn fill_value(&self) -> Value {
        match self {
            Self::Zero => Value::from(0),
            Self::Null => Value::Null,
            Self::Value(v) => v.clone(),
        }
    }
}

/// What sparse fill does when a series has nothing to carry yet.
///
/// The first row is never back-filled under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparseGaps {
    /// Fail with [`Error::UnseededSeries`]
    #[default]
    Strict,
    /// Leave the series out of the row
    Omit,
}

/// Alignment settings.
///
/// ```rust
/// use interlace::align::{AlignConfig, FillPolicy, SparseGaps};
///
/// let config = AlignConfig::from_json(r#"{"fill": {"kind": "null"}, "sparse_gaps": "omit"}"#)?;
/// assert_eq!(config.fill, FillPolicy::Null);
/// assert_eq!(config.sparse_gaps, SparseGaps::Omit);
/// assert_eq!(config.max_dense_rows, Some(interlace::align::DEFAULT_MAX_DENSE_ROWS));
/// # Ok::<(), interlace::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Dense-mode value before a series' first observation
    pub fill: FillPolicy,
    /// Sparse-mode handling of series with nothing to carry
    pub sparse_gaps: SparseGaps,
    /// Upper bound on dense output rows; `None` disables the check
    pub max_dense_rows: Option<u64>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            fill: FillPolicy::Zero,
            sparse_gaps: SparseGaps::Strict,
            max_dense_rows: Some(DEFAULT_MAX_DENSE_ROWS),
        }
    }
}

impl AlignConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input and
    /// [`Error::InvalidConfig`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `max_dense_rows` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_dense_rows == Some(0) {
            return Err(Error::InvalidConfig(
                "max_dense_rows must be > 0 (use None to disable the bound)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Series name -> value as of one key.
pub type AlignedRow = BTreeMap<String, Value>;

/// Rows keyed and iterated in ascending key order.
///
/// Serializes as a JSON object from key to row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlignedTable {
    rows: BTreeMap<Key, AlignedRow>,
}

impl AlignedTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning the row it replaced.
    pub fn insert(&mut self, key: Key, row: AlignedRow) -> Option<AlignedRow> {
        self.rows.insert(key, row)
    }

    /// Row at `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&AlignedRow> {
        self.rows.get(key)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.keys()
    }

    /// Rows in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &AlignedRow)> {
        self.rows.iter()
    }

    /// Smallest key.
    #[must_use]
    pub fn first_key(&self) -> Option<&Key> {
        self.rows.keys().next()
    }

    /// Largest key.
    #[must_use]
    pub fn last_key(&self) -> Option<&Key> {
        self.rows.keys().next_back()
    }

    /// One series' column in key order, skipping rows where it is absent.
    #[must_use]
    pub fn series_values(&self, name: &str) -> Vec<(&Key, &Value)> {
        self.rows
            .iter()
            .filter_map(|(key, row)| row.get(name).map(|value| (key, value)))
            .collect()
    }

    /// Split rows into buckets, see [`partition::day_break`].
    ///
    /// # Errors
    ///
    /// Propagates bucketer failures.
    pub fn day_break<B: Bucketer + ?Sized>(&self, bucketer: &B) -> Result<BTreeMap<String, Self>> {
        partition::day_break(self, bucketer)
    }

    /// Render as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<Key, AlignedRow> {
        self.rows
    }
}

impl FromIterator<(Key, AlignedRow)> for AlignedTable {
    fn from_iter<I: IntoIterator<Item = (Key, AlignedRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AlignedTable {
    type Item = (Key, AlignedRow);
    type IntoIter = std::collections::btree_map::IntoIter<Key, AlignedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a AlignedTable {
    type Item = (&'a Key, &'a AlignedRow);
    type IntoIter = std::collections::btree_map::Iter<'a, Key, AlignedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
