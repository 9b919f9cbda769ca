//! Resampling kernel: map a column on a source index onto a target index by
//! windowed aggregation.
//!
//! Purpose
//! -------
//! Partition the timeline into one window per target timestamp, collect the
//! source positions that fall into each window through ordered index
//! lookups, and reduce each window with a caller-supplied aggregate.
//!
//! Key behaviors
//! -------------
//! - [`resample_windows`] computes the `[start, end)` source-position range
//!   of every window once; it depends only on the two indexes and the
//!   boundary flags, so every column of a series reuses it.
//! - [`resample_column`] applies the aggregate per window; empty windows
//!   produce `NaN` without calling the aggregate.
//! - [`resample`] is the single-column entry point combining both.
//!
//! Window bounds
//! -------------
//! With target timestamps `t_0 < … < t_{m-1}`:
//! - `stamp_right = false`: window `i` spans `t_i .. t_{i+1}`.
//! - `stamp_right = true`: window `i` spans `t_{i-1} .. t_i`.
//! - The missing outer boundaries come from the source: window 0 of a
//!   right-stamped target begins at the first source timestamp, and the last
//!   window of a left-stamped target runs to the end of the source.
//! - `closed_right = true` gives `(b, e]`; otherwise `[b, e)`. Both apply to
//!   the source-derived lower bound too, so with `closed_right` the first
//!   source observation is outside window 0.
use std::ops::Range;

use ndarray::{Array1, ArrayView1};
use tracing::trace;

use crate::{
    index::{DateTimeIndex, Timestamp},
    series::{
        errors::{SeriesError, SeriesResult},
        options::ResampleOptions,
    },
};

/// Source-position range of every window, one per target timestamp.
///
/// Errors
/// ------
/// - `SeriesError::Index` if a lookup on either index fails.
pub fn resample_windows(
    source: &DateTimeIndex, target: &DateTimeIndex, options: ResampleOptions,
) -> SeriesResult<Vec<Range<usize>>> {
    let stamps = target.timestamps()?;
    let locate = |bound: &Timestamp| {
        if options.closed_right { source.loc_after(bound) } else { source.loc_at_or_after(bound) }
    };

    let source_start = if source.is_empty() { None } else { Some(source.first()?) };

    let mut windows = Vec::with_capacity(stamps.len());
    for (i, stamp) in stamps.iter().enumerate() {
        let (lower, upper) = if options.stamp_right {
            let lower = if i == 0 { source_start } else { Some(stamps[i - 1]) };
            (lower, Some(*stamp))
        } else {
            (Some(*stamp), stamps.get(i + 1).copied())
        };

        let start = match lower {
            Some(bound) => locate(&bound)?,
            None => 0,
        };
        let end = match upper {
            Some(bound) => locate(&bound)?,
            None => source.size(),
        };
        trace!(window = i, start, end, "resample window");
        windows.push(start..end.max(start));
    }
    Ok(windows)
}

/// Aggregate `series` over precomputed windows.
///
/// The aggregate receives the whole column and the `[start, end)` positions
/// of one non-empty window.
pub fn resample_column<A>(series: ArrayView1<f64>, windows: &[Range<usize>], aggregate: &A) -> Array1<f64>
where
    A: Fn(ArrayView1<f64>, usize, usize) -> f64,
{
    windows
        .iter()
        .map(|w| if w.is_empty() { f64::NAN } else { aggregate(series, w.start, w.end) })
        .collect()
}

/// Resample one column from `source` onto `target`.
///
/// Returns
/// -------
/// `SeriesResult<Array1<f64>>`
///   A column of length `target.size()`.
///
/// Errors
/// ------
/// - `SeriesError::DimensionMismatch` if `series.len() != source.size()`.
/// - `SeriesError::Index` if an index lookup fails.
pub fn resample<A>(
    series: ArrayView1<f64>, source: &DateTimeIndex, target: &DateTimeIndex, aggregate: A,
    options: ResampleOptions,
) -> SeriesResult<Array1<f64>>
where
    A: Fn(ArrayView1<f64>, usize, usize) -> f64,
{
    if series.len() != source.size() {
        return Err(SeriesError::DimensionMismatch {
            what: "resample source length",
            expected: source.size(),
            actual: series.len(),
        });
    }
    let windows = resample_windows(source, target, options)?;
    Ok(resample_column(series, &windows, &aggregate))
}
