//! Shared key range across series
//!
//! The range is read off the ends of each series: records are assumed to be
//! sorted ascending by key, so only the first and last record are inspected.

use super::SeriesSet;
use crate::record::Key;
use crate::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Inclusive key range covered by a series set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRange {
    /// Smallest first key over all series
    pub first: Key,
    /// Largest last key over all series
    pub last: Key,
}

#[derive(Clone, Copy)]
enum End {
    First,
    Last,
}

/// Minimum of every series' first key.
///
/// # Errors
///
/// - [`Error::EmptySeries`] if a registered series has no records
/// - [`Error::MissingField`] if a first record lacks `key_field`
/// - [`Error::InvalidKey`] if the key value is not orderable
/// - [`Error::NoSeries`] if the set is empty
pub fn first_key(set: &SeriesSet, key_field: &str) -> Result<Key> {
    extreme(set, key_field, End::First)
}

/// Maximum of every series' last key.
///
/// # Errors
///
/// Same conditions as [`first_key`], checked on last records.
pub fn last_key(set: &SeriesSet, key_field: &str) -> Result<Key> {
    extreme(set, key_field, End::Last)
}

/// Both ends of the shared range.
///
/// # Errors
///
/// See [`first_key`].
pub fn key_range(set: &SeriesSet, key_field: &str) -> Result<KeyRange> {
    let range = KeyRange {
        first: first_key(set, key_field)?,
        last: last_key(set, key_field)?,
    };
    debug!(first = %range.first, last = %range.last, "key range");
    Ok(range)
}

fn extreme(set: &SeriesSet, key_field: &str, end: End) -> Result<Key> {
    let mut best: Option<Key> = None;

    for (name, records) in set.iter() {
        let (index, record) = match end {
            End::First => records.first().map(|r| (0, r)),
            End::Last => records.last().map(|r| (records.len() - 1, r)),
        }
        .ok_or_else(|| Error::EmptySeries {
            series: name.to_string(),
        })?;

        let key = record.key(name, index, key_field)?;
        best = Some(match (best, end) {
            (None, _) => key,
            (Some(current), End::First) => current.min(key),
            (Some(current), End::Last) => current.max(key),
        });
    }

    best.ok_or(Error::NoSeries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn series(keys: &[i64]) -> Vec<Record> {
        keys.iter().map(|k| Record::new().with("ts", *k)).collect()
    }

    #[test]
    fn test_first_and_last_across_series() {
        let set: SeriesSet = [("a", series(&[3, 5, 9])), ("b", series(&[1, 4])), ("c", series(&[6, 12]))]
            .into_iter()
            .collect();

        assert_eq!(first_key(&set, "ts").unwrap(), Key::Int(1));
        assert_eq!(last_key(&set, "ts").unwrap(), Key::Int(12));
    }

    #[test]
    fn test_only_ends_are_read() {
        // Middle record lacks the key field; range queries never touch it.
        let set: SeriesSet = [(
            "a",
            vec![Record::new().with("ts", 1), Record::new(), Record::new().with("ts", 3)],
        )]
        .into_iter()
        .collect();

        let range = key_range(&set, "ts").unwrap();
        assert_eq!(range.first, Key::Int(1));
        assert_eq!(range.last, Key::Int(3));
    }

    #[test]
    fn test_text_keys_compare_lexicographically() {
        let set: SeriesSet = [
            ("a", vec![Record::new().with("ts", "2024-01-02 00:00:00")]),
            ("b", vec![Record::new().with("ts", "2024-01-01 12:00:00")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(first_key(&set, "ts").unwrap(), Key::from("2024-01-01 12:00:00"));
        assert_eq!(last_key(&set, "ts").unwrap(), Key::from("2024-01-02 00:00:00"));
    }

    #[test]
    fn test_empty_series_fails() {
        let set: SeriesSet = [("a", series(&[1])), ("empty", vec![])].into_iter().collect();
        match first_key(&set, "ts") {
            Err(Error::EmptySeries { series }) => assert_eq!(series, "empty"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(last_key(&set, "ts"), Err(Error::EmptySeries { .. })));
    }

    #[test]
    fn test_missing_key_field_on_last_record() {
        let set: SeriesSet = [("a", vec![Record::new().with("ts", 1), Record::new().with("v", 2)])]
            .into_iter()
            .collect();

        assert!(first_key(&set, "ts").is_ok());
        match last_key(&set, "ts") {
            Err(Error::MissingField { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_series() {
        assert!(matches!(first_key(&SeriesSet::new(), "ts"), Err(Error::NoSeries)));
    }
}
