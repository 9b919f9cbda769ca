//! TimeSeries — keyed columns of `f64` observations on one date-time index.
//!
//! Purpose
//! -------
//! Bind a [`DateTimeIndex`], a dense `Array2<f64>` (rows = instants,
//! columns = series), and one key per column, and expose the feature
//! engineering transforms (lags, resampling, differences, quotients,
//! returns, slicing, union, gap filling) as methods returning new series.
//!
//! Key behaviors
//! -------------
//! - Every transform reads the receiver and returns a new [`TimeSeries`]
//!   with freshly allocated matrix data; nothing is mutated in place.
//! - Transforms that drop leading rows (lags, differences, quotients)
//!   derive the new index with `islice(k, n)` so the row count always
//!   matches the index size.
//! - Transforms that keep the timeline share the receiver's index through
//!   `Arc` instead of copying it.
//!
//! Invariants & assumptions
//! ------------------------
//! - `data.nrows() == index.size()` and `data.ncols() == keys.len()` for
//!   every value of this type; [`TimeSeries::new`] is the only way in.
//! - Keys need not be unique, except where a lookup is built from them
//!   (per-column lag configuration).
//!
//! Conventions
//! -----------
//! - Column order is preserved by every transform; lag blocks are emitted
//!   in input column order, each as (original?), lag 1, …, lag k.
//! - Each container transform emits one `tracing` debug event with the input
//!   and output shapes.
use std::{hash::Hash, ops::Range, sync::Arc};

use ndarray::{Array1, Array2, ArrayView1, Axis, s};
use tracing::debug;

use crate::{
    index::{DateTimeIndex, IndexError, Timestamp},
    series::{
        errors::{SeriesError, SeriesResult},
        options::{ColumnLag, LagSpec, ResampleOptions},
    },
    windowing::{
        fill::{FillMethod, fill},
        lag::lag_into,
        resample::{resample_column, resample_windows},
        transforms,
    },
};

/// `TimeSeries` — an index, a matrix, and one key per matrix column.
///
/// Fields
/// ------
/// - `index`: `Arc<DateTimeIndex>`
///   Row timestamps; shared with series derived without re-indexing.
/// - `data`: `Array2<f64>`
///   Observations, `index.size()` rows by `keys.len()` columns.
/// - `keys`: `Vec<K>`
///   Column labels, in column order.
///
/// Performance
/// -----------
/// - Column iteration yields views; transforms allocate exactly one output
///   matrix each.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K> {
    index: Arc<DateTimeIndex>,
    data: Array2<f64>,
    keys: Vec<K>,
}

impl<K> TimeSeries<K> {
    /// Bind an index, a matrix, and keys after checking their shapes.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if `data.nrows() != index.size()`
    ///   or `data.ncols() != keys.len()`.
    pub fn new(
        index: impl Into<Arc<DateTimeIndex>>, data: Array2<f64>, keys: Vec<K>,
    ) -> SeriesResult<Self> {
        let index = index.into();
        if data.nrows() != index.size() {
            return Err(SeriesError::DimensionMismatch {
                what: "matrix rows vs index size",
                expected: index.size(),
                actual: data.nrows(),
            });
        }
        if data.ncols() != keys.len() {
            return Err(SeriesError::DimensionMismatch {
                what: "keys vs matrix columns",
                expected: data.ncols(),
                actual: keys.len(),
            });
        }
        Ok(TimeSeries { index, data, keys })
    }

    pub fn index(&self) -> &DateTimeIndex {
        &self.index
    }

    /// Shared handle to the index, for building sibling series.
    pub fn shared_index(&self) -> Arc<DateTimeIndex> {
        Arc::clone(&self.index)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Number of rows (timestamps).
    pub fn n_instants(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (series).
    pub fn n_series(&self) -> usize {
        self.data.ncols()
    }

    pub fn into_parts(self) -> (Arc<DateTimeIndex>, Array2<f64>, Vec<K>) {
        (self.index, self.data, self.keys)
    }

    /// Column `position` as a view.
    pub fn column(&self, position: usize) -> SeriesResult<ArrayView1<'_, f64>> {
        if position >= self.n_series() {
            return Err(IndexError::IndexOutOfRange { position, len: self.n_series() }.into());
        }
        Ok(self.data.column(position))
    }

    /// Columns in order. Each call starts a fresh traversal.
    pub fn series(&self) -> impl ExactSizeIterator<Item = ArrayView1<'_, f64>> + '_ {
        self.data.axis_iter(Axis(1))
    }

    /// `(key, column)` pairs in column order. Each call starts a fresh
    /// traversal.
    pub fn keyed_series(&self) -> impl Iterator<Item = (&K, ArrayView1<'_, f64>)> + '_ {
        self.keys.iter().zip(self.data.axis_iter(Axis(1)))
    }

    /// First `(key, column)` pair.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::EmptyTimeSeries` if there are no columns.
    pub fn head(&self) -> SeriesResult<(&K, ArrayView1<'_, f64>)> {
        self.keyed_series().next().ok_or(SeriesError::EmptyTimeSeries)
    }

    /// Row-major view: one `(timestamp, row)` pair per instant.
    pub fn to_instants(&self) -> SeriesResult<Vec<(Timestamp, ArrayView1<'_, f64>)>> {
        let stamps = self.index.timestamps()?;
        Ok(stamps.into_iter().zip(self.data.axis_iter(Axis(0))).collect())
    }

    /// Lagged feature matrix.
    ///
    /// Parameters
    /// ----------
    /// - `spec`: [`LagSpec<K>`]
    ///   One depth for every column, or a per-key [`ColumnLag`] mapping.
    /// - `key_fn`: `Fn(&K, usize) -> U`
    ///   Derives the output key from an input key and lag order (0 for the
    ///   unshifted column). Called once per output column.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<TimeSeries<U>>`
    ///   `n - L` rows where `L` is the largest requested lag (clamped to
    ///   `n`); output row `r` is input instant `r + L`. Index is
    ///   `index.islice(L, n)`.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::NonUniformIndex` on an irregular index.
    /// - `SeriesError::MissingLagConfiguration { column }` if a key has no
    ///   entry in a per-column mapping. Checked before any output is built.
    pub fn lags<U, F>(&self, spec: &LagSpec<K>, key_fn: F) -> SeriesResult<TimeSeries<U>>
    where
        K: Eq + Hash,
        F: Fn(&K, usize) -> U,
    {
        if !self.index.is_uniform() {
            return Err(SeriesError::NonUniformIndex);
        }
        let plan: Vec<ColumnLag> = match spec {
            LagSpec::Uniform { max_lag, include_original } => {
                vec![ColumnLag::new(*include_original, *max_lag); self.n_series()]
            }
            LagSpec::PerColumn(lags) => self
                .keys
                .iter()
                .enumerate()
                .map(|(column, key)| {
                    lags.get(key).copied().ok_or(SeriesError::MissingLagConfiguration { column })
                })
                .collect::<SeriesResult<_>>()?,
        };

        let n = self.n_instants();
        let trim = plan.iter().map(|lag| lag.max_lag).max().unwrap_or(0).min(n);
        let width: usize = plan.iter().map(ColumnLag::width).sum();

        let mut data = Array2::zeros((n - trim, width));
        let mut keys = Vec::with_capacity(width);
        let mut offset = 0;
        for ((key, column), lag) in self.keyed_series().zip(&plan) {
            offset += lag_into(column, lag.max_lag, lag.keep_original, offset, data.view_mut())?;
            if lag.keep_original {
                keys.push(key_fn(key, 0));
            }
            keys.extend((1..=lag.max_lag).map(|order| key_fn(key, order)));
        }

        let index = self.index.islice(trim, n)?;
        debug!(rows_in = n, rows_out = n - trim, columns_in = self.n_series(), columns_out = width, "lags");
        TimeSeries::new(index, data, keys)
    }

    /// Apply `f` to every column, placing the results on `target`.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if an output column's length is
    ///   not `target.size()`.
    pub fn map_series<F>(&self, target: impl Into<Arc<DateTimeIndex>>, f: F) -> SeriesResult<Self>
    where
        K: Clone,
        F: Fn(ArrayView1<f64>) -> Array1<f64>,
    {
        let target = target.into();
        let data = stack_columns(target.size(), self.n_series(), self.series().map(f))?;
        TimeSeries::new(target, data, self.keys.clone())
    }

    /// Apply `f` to every `(key, column)` pair, keeping the receiver's index
    /// (shared, not copied).
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if an output column's length
    ///   differs from the index size.
    pub fn map_series_with_key<F>(&self, f: F) -> SeriesResult<Self>
    where
        K: Clone,
        F: Fn(&K, ArrayView1<f64>) -> Array1<f64>,
    {
        let columns = self.keyed_series().map(|(key, column)| f(key, column));
        let data = stack_columns(self.n_instants(), self.n_series(), columns)?;
        TimeSeries::new(self.shared_index(), data, self.keys.clone())
    }

    /// Resample every column onto `target`.
    ///
    /// Parameters
    /// ----------
    /// - `target`: the output index; its size is the output row count.
    /// - `aggregate`: `Fn(column, start, end) -> f64` reducing the non-empty
    ///   window `[start, end)` of a source column.
    /// - `options`: window boundary flags, see [`ResampleOptions`].
    ///
    /// Empty windows yield `NaN`. Keys and column order are unchanged.
    pub fn resample<A>(
        &self, target: impl Into<Arc<DateTimeIndex>>, aggregate: A, options: ResampleOptions,
    ) -> SeriesResult<Self>
    where
        K: Clone,
        A: Fn(ArrayView1<f64>, usize, usize) -> f64,
    {
        let target = target.into();
        let windows = resample_windows(&self.index, &target, options)?;
        debug!(
            rows_in = self.n_instants(),
            rows_out = target.size(),
            closed_right = options.closed_right,
            stamp_right = options.stamp_right,
            "resample"
        );
        self.map_series(target, |column| resample_column(column, &windows, &aggregate))
    }

    /// `x[i] - x[i - lag]` per column; index `islice(lag, n)`.
    pub fn differences(&self, lag: usize) -> SeriesResult<Self>
    where
        K: Clone,
    {
        debug!(lag, rows_in = self.n_instants(), "differences");
        self.map_tail(lag, |column| transforms::differences(column, lag))
    }

    /// First differences applied `rank` times; index `islice(rank, n)`.
    pub fn differences_at_rank(&self, rank: usize) -> SeriesResult<Self>
    where
        K: Clone,
    {
        debug!(rank, rows_in = self.n_instants(), "differences_at_rank");
        self.map_tail(rank, |column| transforms::differences_at_rank(column, rank))
    }

    /// `x[i] / x[i - lag]` per column; index `islice(lag, n)`.
    pub fn quotients(&self, lag: usize) -> SeriesResult<Self>
    where
        K: Clone,
    {
        debug!(lag, rows_in = self.n_instants(), "quotients");
        self.map_tail(lag, |column| transforms::quotients(column, lag))
    }

    /// Simple returns `x[i] / x[i - 1] - 1` per column; index `islice(1, n)`.
    pub fn price_to_returns(&self) -> SeriesResult<Self>
    where
        K: Clone,
    {
        debug!(rows_in = self.n_instants(), "price_to_returns");
        self.map_tail(1, transforms::price_to_returns)
    }

    /// Rows `[range.start, range.end)` with the matching sub-index.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::Index(InvalidRange)` unless `start <= end <= n`.
    pub fn slice(&self, range: Range<usize>) -> SeriesResult<Self>
    where
        K: Clone,
    {
        let index = self.index.slice(range.clone())?;
        let data = self.data.slice(s![range, ..]).to_owned();
        TimeSeries::new(index, data, self.keys.clone())
    }

    /// Rows whose timestamps lie in `[start, end]`.
    pub fn slice_between(&self, start: &Timestamp, end: &Timestamp) -> SeriesResult<Self>
    where
        K: Clone,
    {
        let range = self.index.range_between(start, end)?;
        self.slice(range)
    }

    /// Append one column and its key.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::DimensionMismatch` if `column.len() != n_instants()`.
    pub fn union(&self, column: ArrayView1<f64>, key: K) -> SeriesResult<Self>
    where
        K: Clone,
    {
        let (n, m) = self.data.dim();
        if column.len() != n {
            return Err(SeriesError::DimensionMismatch {
                what: "union column length vs index size",
                expected: n,
                actual: column.len(),
            });
        }
        let mut data = Array2::zeros((n, m + 1));
        data.slice_mut(s![.., ..m]).assign(&self.data);
        data.column_mut(m).assign(&column);
        let mut keys = self.keys.clone();
        keys.push(key);
        TimeSeries::new(self.shared_index(), data, keys)
    }

    /// Fill `NaN` gaps in every column; index and keys unchanged.
    pub fn fill(&self, method: FillMethod) -> SeriesResult<Self>
    where
        K: Clone,
    {
        debug!(?method, "fill");
        self.map_series_with_key(|_, column| fill(column, method))
    }

    /// Drop every row containing a `NaN` in any column. The result is on an
    /// irregular index over the surviving timestamps.
    pub fn remove_instants_with_nans(&self) -> SeriesResult<Self>
    where
        K: Clone,
    {
        let rows: Vec<usize> = self
            .data
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| !row.iter().any(|v| v.is_nan()))
            .map(|(i, _)| i)
            .collect();
        let index = self.index.select(&rows)?;
        let data = self.data.select(Axis(0), &rows);
        debug!(rows_in = self.n_instants(), rows_out = rows.len(), "remove_instants_with_nans");
        TimeSeries::new(index, data, self.keys.clone())
    }

    // Shared path for transforms that consume the first `k` rows.
    fn map_tail<F>(&self, k: usize, f: F) -> SeriesResult<Self>
    where
        K: Clone,
        F: Fn(ArrayView1<f64>) -> Array1<f64>,
    {
        let n = self.n_instants();
        let index = self.index.islice(k.min(n), n)?;
        self.map_series(index, f)
    }
}

// Assemble mapped columns into a fresh `rows × cols` matrix.
fn stack_columns<I>(rows: usize, cols: usize, columns: I) -> SeriesResult<Array2<f64>>
where
    I: Iterator<Item = Array1<f64>>,
{
    let mut data = Array2::zeros((rows, cols));
    for (j, column) in columns.enumerate() {
        if column.len() != rows {
            return Err(SeriesError::DimensionMismatch {
                what: "mapped column length vs index size",
                expected: rows,
                actual: column.len(),
            });
        }
        data.column_mut(j).assign(&column);
    }
    Ok(data)
}
