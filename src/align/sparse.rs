//! Sparse alignment: rows at the union of observed keys

use super::{AlignConfig, AlignedRow, AlignedTable, SparseGaps};
use crate::record::Key;
use crate::series::{key_range, reindex, SeriesSet};
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Merge every series into one table keyed by the union of their keys,
/// carrying each series' last value into rows where it has no observation.
///
/// The first row is never back-filled: a series absent at the smallest key
/// is absent from that row. A later row that needs a series the previous row
/// also lacks is handled per [`AlignConfig::sparse_gaps`].
///
/// # Errors
///
/// - range errors ([`Error::EmptySeries`], [`Error::NoSeries`], ...) from
///   [`key_range`]
/// - [`Error::MissingField`] if a record lacks `key_field` or `value_field`
/// - [`Error::UnseededSeries`] under [`SparseGaps::Strict`]
///
/// # Example
///
/// ```rust
/// use interlace::align::{sparse, AlignConfig};
/// use interlace::record::{Key, Record};
/// use interlace::series::SeriesSet;
///
/// let mut set = SeriesSet::new();
/// set.insert("a", vec![
///     Record::new().with("ts", 1).with("v", "x"),
///     Record::new().with("ts", 3).with("v", "y"),
/// ]);
/// set.insert("b", vec![Record::new().with("ts", 2).with("v", "m")]);
///
/// let table = sparse::generate(&set, "ts", "v", &AlignConfig::default())?;
/// assert_eq!(table.len(), 3);
/// assert!(table.get(&Key::Int(1)).unwrap().get("b").is_none());
/// assert_eq!(table.get(&Key::Int(3)).unwrap()["b"], "m");
/// # Ok::<(), interlace::Error>(())
/// ```
pub fn generate(
    set: &SeriesSet,
    key_field: &str,
    value_field: &str,
    config: &AlignConfig,
) -> Result<AlignedTable> {
    let range = key_range(set, key_field)?;
    let keyed = reindex(set, key_field, None)?;

    let mut union: BTreeMap<Key, AlignedRow> = BTreeMap::new();
    for (name, series) in keyed.iter() {
        for (key, entry) in series.iter() {
            let value = entry.value_of(name, value_field)?;
            union
                .entry(key.clone())
                .or_default()
                .insert(name.to_string(), value.clone());
        }
    }

    let names: Vec<&str> = keyed.names().collect();
    let mut completed: Vec<(Key, AlignedRow)> = Vec::with_capacity(union.len());

    for (key, mut row) in union {
        if let Some((_, previous)) = completed.last() {
            for name in &names {
                if row.contains_key(*name) {
                    continue;
                }
                match previous.get(*name) {
                    Some(value) => {
                        row.insert((*name).to_string(), value.clone());
                    }
                    None => match config.sparse_gaps {
                        SparseGaps::Strict => {
                            return Err(Error::UnseededSeries {
                                series: (*name).to_string(),
                                key: key.to_string(),
                            });
                        }
                        SparseGaps::Omit => {
                            trace!(series = *name, key = %key, "nothing to carry yet");
                        }
                    },
                }
            }
        }
        completed.push((key, row));
    }

    debug!(
        first = %range.first,
        last = %range.last,
        rows = completed.len(),
        series = names.len(),
        "sparse alignment done"
    );
    Ok(completed.into_iter().collect())
}
