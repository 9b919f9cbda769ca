//! Order-n columnar transforms: differences, quotients, and returns.
//!
//! Each transform consumes one column of length `n` and returns a new column
//! of length `n - lag` whose element `i` pairs input positions `i + lag` and
//! `i`. Lags at or beyond `n` yield an empty column. Division follows IEEE
//! semantics: a zero denominator yields `±∞` or `NaN`, never an error.
use ndarray::{Array1, ArrayView1, s};

/// `x[i + lag] - x[i]` for every valid `i`.
pub fn differences(series: ArrayView1<f64>, lag: usize) -> Array1<f64> {
    let n = series.len();
    let lag = lag.min(n);
    &series.slice(s![lag..]) - &series.slice(s![..n - lag])
}

/// `differences(·, 1)` applied `rank` times; the result has `n - rank`
/// values (or none).
pub fn differences_at_rank(series: ArrayView1<f64>, rank: usize) -> Array1<f64> {
    let mut out = series.to_owned();
    for _ in 0..rank {
        if out.is_empty() {
            break;
        }
        out = differences(out.view(), 1);
    }
    out
}

/// `x[i + lag] / x[i]` for every valid `i`.
pub fn quotients(series: ArrayView1<f64>, lag: usize) -> Array1<f64> {
    let n = series.len();
    let lag = lag.min(n);
    &series.slice(s![lag..]) / &series.slice(s![..n - lag])
}

/// Simple periodic returns `x[i + 1] / x[i] - 1`.
pub fn price_to_returns(series: ArrayView1<f64>) -> Array1<f64> {
    quotients(series, 1) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The length law and element law of `differences`.
    // - Repeated differencing via `differences_at_rank`.
    // - IEEE behavior of `quotients` on zero denominators.
    // - Reconstruction of a series from its quotients and returns.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the length and element laws for several lags.
    //
    // Given
    // -----
    // - `x = [1, 4, 9, 16, 25]`, lags 0..=6.
    //
    // Expect
    // ------
    // - Length `max(n - k, 0)`; element `i` equals `x[i + k] - x[i]`.
    fn differences_follow_length_and_element_laws() {
        let x = array![1.0, 4.0, 9.0, 16.0, 25.0];

        for k in 0..=6 {
            let d = differences(x.view(), k);
            assert_eq!(d.len(), x.len().saturating_sub(k));
            for i in 0..d.len() {
                assert_eq!(d[i], x[i + k] - x[i]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that rank-2 differencing of a quadratic is constant.
    //
    // Given
    // -----
    // - `x = [1, 4, 9, 16, 25]` (squares).
    //
    // Expect
    // ------
    // - Rank 2 gives `[2, 2, 2]`; rank 9 gives an empty column.
    fn differences_at_rank_repeats_first_differences() {
        let x = array![1.0, 4.0, 9.0, 16.0, 25.0];

        assert_eq!(differences_at_rank(x.view(), 2), array![2.0, 2.0, 2.0]);
        assert!(differences_at_rank(x.view(), 9).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Ensure division by zero propagates as IEEE values.
    //
    // Given
    // -----
    // - `x = [0, 2, 0, 0]` with lag 1.
    //
    // Expect
    // ------
    // - `[+∞, 0, NaN]`.
    fn quotients_follow_ieee_division() {
        let q = quotients(array![0.0, 2.0, 0.0, 0.0].view(), 1);

        assert_eq!(q[0], f64::INFINITY);
        assert_eq!(q[1], 0.0);
        assert!(q[2].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Verify that cumulative products of quotients (and of 1 + returns)
    // reconstruct the series after its first element.
    //
    // Given
    // -----
    // - `x = [100, 102, 99.5, 101.25, 103]`.
    //
    // Expect
    // ------
    // - `x[0] · Π q[..=i] ≈ x[i + 1]` and likewise for `1 + r`.
    fn quotients_and_returns_round_trip_by_cumulative_product() {
        let x = array![100.0, 102.0, 99.5, 101.25, 103.0];
        let q = quotients(x.view(), 1);
        let r = price_to_returns(x.view());

        let mut level_q = x[0];
        let mut level_r = x[0];
        for i in 0..q.len() {
            level_q *= q[i];
            level_r *= 1.0 + r[i];
            assert_relative_eq!(level_q, x[i + 1], max_relative = 1e-12);
            assert_relative_eq!(level_r, x[i + 1], max_relative = 1e-12);
        }
    }
}
