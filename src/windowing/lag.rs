//! Lag kernel: one column → the column plus its trimmed, shifted copies.
//!
//! Purpose
//! -------
//! Build lagged feature blocks for a single series so that every output row
//! carries a complete set of lags. All blocks written into one destination
//! share the same row alignment, which is what keeps a multi-column lag
//! matrix time-consistent.
//!
//! Key behaviors
//! -------------
//! - [`lag_into`] writes into a caller-owned destination block at a column
//!   offset. The number of destination rows fixes the trimming: with `n`
//!   input values and `r` destination rows, output row `i` corresponds to
//!   input position `i + (n - r)`.
//! - [`lag_matrix`] allocates the minimal trimmed matrix for one column.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output column 0 (when the original is kept) is `series[trim..n]`; lag
//!   order `j` is `series[trim - j..n - j]`, with `trim = n - rows >= max_lag`.
//! - `max_lag >= n` leaves zero output rows; `max_lag == 0` copies the
//!   unshifted column (or nothing when the original is not kept).
use ndarray::{Array2, ArrayView1, ArrayViewMut2, s};

use crate::series::errors::{SeriesError, SeriesResult};

/// Number of output columns produced for one input column.
pub fn lag_width(max_lag: usize, include_original: bool) -> usize {
    max_lag + usize::from(include_original)
}

/// Write `series` and its lags `1..=max_lag` into `dest` starting at column
/// `dest_offset`.
///
/// Parameters
/// ----------
/// - `series`: `ArrayView1<f64>`
///   Input column of length `n`.
/// - `max_lag`: `usize`
///   Deepest lag written.
/// - `include_original`: `bool`
///   Write the unshifted column before the lags.
/// - `dest_offset`: `usize`
///   First destination column.
/// - `dest`: `ArrayViewMut2<f64>`
///   Destination block. Its row count decides the trimming and must not
///   exceed `n - max_lag`.
///
/// Returns
/// -------
/// `SeriesResult<usize>`
///   Number of columns written (`max_lag + include_original`).
///
/// Errors
/// ------
/// - `SeriesError::DimensionMismatch` if the destination is too narrow for
///   the block or has more rows than the lag depth leaves available.
pub fn lag_into(
    series: ArrayView1<f64>, max_lag: usize, include_original: bool, dest_offset: usize,
    mut dest: ArrayViewMut2<f64>,
) -> SeriesResult<usize> {
    let n = series.len();
    let rows = dest.nrows();
    let width = lag_width(max_lag, include_original);

    if dest_offset + width > dest.ncols() {
        return Err(SeriesError::DimensionMismatch {
            what: "lag destination columns",
            expected: dest_offset + width,
            actual: dest.ncols(),
        });
    }
    if rows > 0 && rows + max_lag > n {
        return Err(SeriesError::DimensionMismatch {
            what: "lag destination rows",
            expected: n.saturating_sub(max_lag),
            actual: rows,
        });
    }
    if rows > 0 {
        let block = dest.slice_mut(s![.., dest_offset..dest_offset + width]);
        write_lags(series, max_lag, include_original, n - rows, block);
    }
    Ok(width)
}

/// Minimal trimmed lag matrix for one column: `n - max_lag` rows (or zero)
/// and `max_lag + include_original` columns.
pub fn lag_matrix(series: ArrayView1<f64>, max_lag: usize, include_original: bool) -> Array2<f64> {
    let rows = series.len().saturating_sub(max_lag);
    let mut out = Array2::zeros((rows, lag_width(max_lag, include_original)));
    if rows > 0 {
        write_lags(series, max_lag, include_original, max_lag, out.view_mut());
    }
    out
}

fn write_lags(
    series: ArrayView1<f64>, max_lag: usize, include_original: bool, trim: usize,
    mut block: ArrayViewMut2<f64>,
) {
    let n = series.len();
    let mut col = 0;
    if include_original {
        block.column_mut(col).assign(&series.slice(s![trim..]));
        col += 1;
    }
    for lag in 1..=max_lag {
        block.column_mut(col).assign(&series.slice(s![trim - lag..n - lag]));
        col += 1;
    }
}
