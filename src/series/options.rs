//! Configuration values for lag construction and resampling.
//!
//! - [`LagSpec`] selects between one lag depth for every column and a
//!   per-key mapping of [`ColumnLag`] entries.
//! - [`ResampleOptions`] carries the window boundary flags.
//!
//! These are plain values; validation happens when a transform consumes them.
use std::{collections::HashMap, hash::Hash};

/// Lag depth and original-column policy for one input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLag {
    /// Emit the unshifted column before its lags.
    pub keep_original: bool,
    /// Emit lags `1..=max_lag`.
    pub max_lag: usize,
}

impl ColumnLag {
    pub fn new(keep_original: bool, max_lag: usize) -> Self {
        ColumnLag { keep_original, max_lag }
    }

    /// Entry that drops the column from the lagged output.
    pub fn drop_column() -> Self {
        ColumnLag { keep_original: false, max_lag: 0 }
    }

    /// Number of output columns this entry produces.
    pub fn width(&self) -> usize {
        self.max_lag + usize::from(self.keep_original)
    }
}

/// How [`TimeSeries::lags`](crate::series::TimeSeries::lags) lags each column.
///
/// Variants
/// --------
/// - `Uniform { max_lag, include_original }`
///   Every column gets lags `1..=max_lag`, preceded by the original when
///   `include_original` is set.
/// - `PerColumn(map)`
///   Each column looks up its key in `map`. All output rows are aligned to
///   the largest requested lag. A key missing from the map is an error;
///   use [`ColumnLag::drop_column`] to omit a column explicitly.
#[derive(Debug, Clone)]
pub enum LagSpec<K> {
    Uniform { max_lag: usize, include_original: bool },
    PerColumn(HashMap<K, ColumnLag>),
}

impl<K> LagSpec<K> {
    pub fn uniform(max_lag: usize, include_original: bool) -> Self {
        LagSpec::Uniform { max_lag, include_original }
    }

    pub fn per_column(lags: HashMap<K, ColumnLag>) -> Self {
        LagSpec::PerColumn(lags)
    }
}

// Map equality needs `K: Eq + Hash`, which a derive would not require.
impl<K: Eq + Hash> PartialEq for LagSpec<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                LagSpec::Uniform { max_lag: a, include_original: x },
                LagSpec::Uniform { max_lag: b, include_original: y },
            ) => a == b && x == y,
            (LagSpec::PerColumn(a), LagSpec::PerColumn(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Eq + Hash> Eq for LagSpec<K> {}

/// Window boundary flags for resampling.
///
/// Fields
/// ------
/// - `closed_right`: a source timestamp exactly on a boundary belongs to the
///   window on its left (`(b, e]`) instead of the right (`[b, e)`).
/// - `stamp_right`: each target timestamp marks the end of its window
///   instead of the start.
///
/// The default (`false`, `false`) gives windows `[t_i, t_{i+1})`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResampleOptions {
    pub closed_right: bool,
    pub stamp_right: bool,
}

impl ResampleOptions {
    pub fn new(closed_right: bool, stamp_right: bool) -> Self {
        ResampleOptions { closed_right, stamp_right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify lag configurations compare by content, including per-key maps.
    //
    // Given
    // -----
    // - Two per-column maps built in different insertion orders, a third
    //   with a different depth, and uniform configurations.
    //
    // Expect
    // ------
    // - Same entries compare equal regardless of order; different depth or
    //   variant compares unequal. `drop_column` has width 0.
    fn lag_specs_compare_by_content() {
        let a = LagSpec::per_column(HashMap::from([
            ("x", ColumnLag::new(true, 2)),
            ("y", ColumnLag::drop_column()),
        ]));
        let b = LagSpec::per_column(HashMap::from([
            ("y", ColumnLag::drop_column()),
            ("x", ColumnLag::new(true, 2)),
        ]));
        let c = LagSpec::per_column(HashMap::from([
            ("x", ColumnLag::new(true, 3)),
            ("y", ColumnLag::drop_column()),
        ]));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(LagSpec::<&str>::uniform(2, true), LagSpec::uniform(2, true));
        assert_ne!(LagSpec::<&str>::uniform(2, true), LagSpec::uniform(2, false));
        assert_ne!(a, LagSpec::uniform(2, true));
        assert_eq!(ColumnLag::drop_column().width(), 0);
        assert_eq!(ColumnLag::new(true, 2).width(), 3);
    }
}
