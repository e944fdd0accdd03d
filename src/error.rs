//! Error types for interlace
//!
//! Every failure is fatal to the call that triggered it: alignment is
//! all-or-nothing and never returns a partial table.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Interlace error types
#[derive(Error, Debug)]
pub enum Error {
    /// A record lacks the requested key or value field
    #[error("Series '{series}' record #{index} has no field '{field}'\nCheck the key/value field names passed to the aligner")]
    MissingField {
        /// Series the record belongs to
        series: String,
        /// Field that was looked up
        field: String,
        /// Position of the record within the series
        index: usize,
    },

    /// First/last key requested over a series with no records
    #[error("Series '{series}' is empty: first/last key is undefined")]
    EmptySeries {
        /// Name of the empty series
        series: String,
    },

    /// Dense fill needs integer keys
    #[error("Series '{series}' key {key} is not an integer\nDense fill steps the key range by 1; use sparse generation for other key types")]
    NonContiguousKey {
        /// Series holding the offending key
        series: String,
        /// The offending key, rendered
        key: String,
    },

    /// Key value cannot be ordered or bucketed
    #[error("Series '{series}' field '{field}' holds an unusable key: {value}")]
    InvalidKey {
        /// Series holding the key (empty when raised on a finished table)
        series: String,
        /// Field the key came from
        field: String,
        /// The key value, rendered
        value: String,
    },

    /// Sparse fill reached a series that has no earlier value to carry
    #[error("Series '{series}' has no value at or before key {key}\nRegister an observation at the first key or use SparseGaps::Omit")]
    UnseededSeries {
        /// Series without a carried value
        series: String,
        /// Key of the row that needed it
        key: String,
    },

    /// Dense range exceeds the configured row bound
    #[error("Dense range spans {rows} rows, over the limit of {limit}\nRaise AlignConfig::max_dense_rows or narrow the input")]
    RangeTooLarge {
        /// Rows the range would produce
        rows: u128,
        /// Configured maximum
        limit: u64,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Range query without registered series
    #[error("No series registered")]
    NoSeries,

    /// Record could not be built from input data
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
