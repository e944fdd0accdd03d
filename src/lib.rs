//! # Interlace: carry-forward alignment of irregular series
//!
//! Interlace lines up several independently sampled series on one shared
//! key axis (usually time). At every key of interest it answers "what is the
//! current value of each series?", carrying the last observation forward
//! where a series has nothing new.
//!
//! ## Two alignment modes
//!
//! - **Sparse** ([`Aligner::generate`]): one row per key observed in any
//!   series.
//! - **Dense** ([`Aligner::generate_and_fill`]): one row per integer key in
//!   `[first, last]`, series not yet observed take the configured fill value.
//!
//! Aligned tables can be split into per-day buckets with
//! [`partition::day_break`].
//!
//! ## Example Usage
//!
//! ```rust
//! use interlace::record::{Key, Record};
//! use interlace::series::SeriesSet;
//! use interlace::Aligner;
//! use serde_json::json;
//!
//! let mut series = SeriesSet::new();
//! series.insert("A", vec![
//!     Record::new().with("ts", 1).with("v", "x"),
//!     Record::new().with("ts", 3).with("v", "y"),
//! ]);
//! series.insert("B", vec![Record::new().with("ts", 2).with("v", "m")]);
//!
//! let aligner = Aligner::new(series);
//! let dense = aligner.generate_and_fill("ts", "v")?;
//!
//! assert_eq!(dense.len(), 3);
//! assert_eq!(dense.get(&Key::Int(1)).unwrap()["B"], json!(0));
//! assert_eq!(dense.get(&Key::Int(3)).unwrap()["B"], json!("m"));
//! # Ok::<(), interlace::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod align;
pub mod error;
pub mod partition;
pub mod record;
pub mod series;

pub use align::{AlignConfig, AlignedRow, AlignedTable, FillPolicy, SparseGaps};
pub use error::{Error, Result};
pub use record::{Key, Record};
pub use series::SeriesSet;

use series::{KeyRange, KeyedSet};

/// Aligns a fixed set of series.
///
/// Generation borrows the registered series and builds every intermediate
/// structure per call, so the same aligner can be queried any number of
/// times and always returns the same result.
#[derive(Debug, Clone)]
pub struct Aligner {
    series: SeriesSet,
    config: AlignConfig,
}

impl Aligner {
    /// Aligner with default configuration.
    #[must_use]
    pub fn new(series: SeriesSet) -> Self {
        Self {
            series,
            config: AlignConfig::default(),
        }
    }

    /// Create an aligner builder
    #[must_use]
    pub fn builder(series: SeriesSet) -> AlignerBuilder {
        AlignerBuilder {
            series,
            config: AlignConfig::default(),
        }
    }

    /// Registered series.
    #[must_use]
    pub const fn series(&self) -> &SeriesSet {
        &self.series
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Release the registered series.
    #[must_use]
    pub fn into_series(self) -> SeriesSet {
        self.series
    }

    /// Smallest first key over all series.
    ///
    /// # Errors
    ///
    /// See [`series::first_key`].
    pub fn first_key(&self, key_field: &str) -> Result<Key> {
        series::first_key(&self.series, key_field)
    }

    /// Largest last key over all series.
    ///
    /// # Errors
    ///
    /// See [`series::last_key`].
    pub fn last_key(&self, key_field: &str) -> Result<Key> {
        series::last_key(&self.series, key_field)
    }

    /// Both ends of the shared key range.
    ///
    /// # Errors
    ///
    /// See [`series::key_range`].
    pub fn key_range(&self, key_field: &str) -> Result<KeyRange> {
        series::key_range(&self.series, key_field)
    }

    /// Keyed view of every series.
    ///
    /// # Errors
    ///
    /// See [`series::reindex`].
    pub fn reindex(&self, key_field: &str, value_field: Option<&str>) -> Result<KeyedSet<'_>> {
        series::reindex(&self.series, key_field, value_field)
    }

    /// Sparse alignment over the union of observed keys.
    ///
    /// # Errors
    ///
    /// See [`align::sparse::generate`].
    pub fn generate(&self, key_field: &str, value_field: &str) -> Result<AlignedTable> {
        align::generate(&self.series, key_field, value_field, &self.config)
    }

    /// Dense alignment over every integer key in the shared range.
    ///
    /// # Errors
    ///
    /// See [`align::dense::generate_and_fill`].
    pub fn generate_and_fill(&self, key_field: &str, value_field: &str) -> Result<AlignedTable> {
        align::generate_and_fill(&self.series, key_field, value_field, &self.config)
    }
}

/// Aligner builder
#[derive(Debug, Clone)]
pub struct AlignerBuilder {
    series: SeriesSet,
    config: AlignConfig,
}

impl AlignerBuilder {
    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: AlignConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the dense-mode value for series not yet observed
    #[must_use]
    pub fn fill(mut self, fill: FillPolicy) -> Self {
        self.config.fill = fill;
        self
    }

    /// Set sparse-mode handling of series with nothing to carry
    #[must_use]
    pub fn sparse_gaps(mut self, gaps: SparseGaps) -> Self {
        self.config.sparse_gaps = gaps;
        self
    }

    /// Bound dense output to `rows` rows
    #[must_use]
    pub fn max_dense_rows(mut self, rows: u64) -> Self {
        self.config.max_dense_rows = Some(rows);
        self
    }

    /// Remove the dense row bound
    #[must_use]
    pub fn unbounded_dense_rows(mut self) -> Self {
        self.config.max_dense_rows = None;
        self
    }

    /// Build the aligner
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration fails
    /// [`AlignConfig::validate`].
    pub fn build(self) -> Result<Aligner> {
        self.config.validate()?;
        Ok(Aligner {
            series: self.series,
            config: self.config,
        })
    }
}
