//! Construction entry points for [`TimeSeries`].
//!
//! Purpose
//! -------
//! Turn raw observations into a validated (index, matrix, keys) triple:
//! - [`TimeSeries::from_irregular_samples`]: timestamped rows → irregular index.
//! - [`TimeSeries::from_uniform_samples`]: rows on a caller-supplied uniform index.
//! - [`TimeSeries::from_vectors`]: pre-aligned columns on any index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every row has exactly one value per key; every column has exactly one
//!   value per timestamp. Violations fail with `DimensionMismatch` before
//!   the matrix is returned.
//! - Samples are taken in the given order. Irregular timestamps must already
//!   be strictly increasing; they are validated, not sorted.
use std::sync::Arc;

use chrono_tz::Tz;
use ndarray::{Array1, Array2, ArrayView1};

use crate::{
    index::{DateTimeIndex, Timestamp, UniformIndex},
    series::{
        errors::{SeriesError, SeriesResult},
        timeseries::TimeSeries,
    },
};

impl<K> TimeSeries<K> {
    /// Build a series from `(timestamp, row)` samples on an irregular index
    /// rendered in `zone`.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if a row's width differs from
    ///   `keys.len()`.
    /// - `SeriesError::Index(UnsortedTimestamps | TimestampOverflow)` if the
    ///   timestamps are not strictly increasing or not representable.
    pub fn from_irregular_samples<I, R>(samples: I, keys: Vec<K>, zone: Tz) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = (Timestamp, R)>,
        R: AsRef<[f64]>,
    {
        let samples: Vec<(Timestamp, R)> = samples.into_iter().collect();
        let mut data = Array2::zeros((samples.len(), keys.len()));
        let mut stamps = Vec::with_capacity(samples.len());
        for (i, (ts, row)) in samples.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != keys.len() {
                return Err(SeriesError::DimensionMismatch {
                    what: "sample width vs keys",
                    expected: keys.len(),
                    actual: row.len(),
                });
            }
            data.row_mut(i).assign(&ArrayView1::from(row));
            stamps.push(*ts);
        }
        let index = DateTimeIndex::irregular(&stamps, zone)?;
        TimeSeries::new(index, data, keys)
    }

    /// Build a series from rows laid out on a uniform index.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if the row count differs from the
    ///   index size or a row's width differs from `keys.len()`.
    pub fn from_uniform_samples<R: AsRef<[f64]>>(
        rows: &[R], index: UniformIndex, keys: Vec<K>,
    ) -> SeriesResult<Self> {
        if rows.len() != index.size() {
            return Err(SeriesError::DimensionMismatch {
                what: "sample rows vs index size",
                expected: index.size(),
                actual: rows.len(),
            });
        }
        let mut data = Array2::zeros((rows.len(), keys.len()));
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != keys.len() {
                return Err(SeriesError::DimensionMismatch {
                    what: "sample width vs keys",
                    expected: keys.len(),
                    actual: row.len(),
                });
            }
            data.row_mut(i).assign(&ArrayView1::from(row));
        }
        TimeSeries::new(DateTimeIndex::Uniform(index), data, keys)
    }

    /// Build a series from one vector per key.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if the number of vectors differs
    ///   from `keys.len()` or a vector's length differs from the index size.
    pub fn from_vectors(
        columns: &[Array1<f64>], index: impl Into<Arc<DateTimeIndex>>, keys: Vec<K>,
    ) -> SeriesResult<Self> {
        let index = index.into();
        if columns.len() != keys.len() {
            return Err(SeriesError::DimensionMismatch {
                what: "vectors vs keys",
                expected: keys.len(),
                actual: columns.len(),
            });
        }
        let mut data = Array2::zeros((index.size(), columns.len()));
        for (j, column) in columns.iter().enumerate() {
            if column.len() != index.size() {
                return Err(SeriesError::DimensionMismatch {
                    what: "vector length vs index size",
                    expected: index.size(),
                    actual: column.len(),
                });
            }
            data.column_mut(j).assign(column);
        }
        TimeSeries::new(index, data, keys)
    }
}
