//! Gap filling for columns containing `NaN` observations.
//!
//! - [`FillMethod`] names the policy.
//! - [`fill`] returns a new column; non-`NaN` values are never changed.
//!
//! Notes
//! -----
//! - `Previous` leaves leading gaps, `Next` leaves trailing gaps, and
//!   `Linear` leaves both, since there is nothing to carry or interpolate
//!   from. `Nearest` fills everything once any value is present.
//! - `Nearest` breaks ties toward the earlier observation.
use ndarray::{Array1, ArrayView1};

/// Policy for replacing `NaN` values in a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillMethod {
    /// Carry the last observed value forward.
    Previous,
    /// Carry the next observed value backward.
    Next,
    /// Use the positionally nearest observed value.
    Nearest,
    /// Interpolate linearly between the surrounding observed values.
    Linear,
    /// Replace with `0.0`.
    Zero,
    /// Replace with a constant.
    Value(f64),
}

/// Fill `NaN` values of `series` according to `method`.
pub fn fill(series: ArrayView1<f64>, method: FillMethod) -> Array1<f64> {
    let mut out = series.to_owned();
    match method {
        FillMethod::Zero => replace_nan(&mut out, 0.0),
        FillMethod::Value(value) => replace_nan(&mut out, value),
        FillMethod::Previous => {
            let mut last = f64::NAN;
            for v in out.iter_mut() {
                if v.is_nan() { *v = last } else { last = *v }
            }
        }
        FillMethod::Next => {
            let mut next = f64::NAN;
            for v in out.iter_mut().rev() {
                if v.is_nan() { *v = next } else { next = *v }
            }
        }
        FillMethod::Nearest | FillMethod::Linear => {
            let observed: Vec<usize> = (0..series.len()).filter(|&i| !series[i].is_nan()).collect();
            let (Some(&first), Some(&last)) = (observed.first(), observed.last()) else {
                return out;
            };
            for pair in observed.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                for i in a + 1..b {
                    out[i] = match method {
                        FillMethod::Linear => {
                            let w = (i - a) as f64 / (b - a) as f64;
                            series[a] + (series[b] - series[a]) * w
                        }
                        _ if i - a <= b - i => series[a],
                        _ => series[b],
                    };
                }
            }
            if method == FillMethod::Nearest {
                for i in 0..first {
                    out[i] = series[first];
                }
                for i in last + 1..series.len() {
                    out[i] = series[last];
                }
            }
        }
    }
    out
}

fn replace_nan(values: &mut Array1<f64>, replacement: f64) {
    values.mapv_inplace(|v| if v.is_nan() { replacement } else { v });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Each fill policy on a column with leading, interior, and trailing
    //   gaps.
    // - The all-NaN column.
    // -------------------------------------------------------------------------

    const N: f64 = f64::NAN;

    // Compares with NaN == NaN.
    fn assert_same(actual: &Array1<f64>, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.is_nan() && e.is_nan()) || a == e, "got {actual:?}, want {expected:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify each policy on `[NaN, 1, NaN, NaN, 4, NaN]`.
    //
    // Expect
    // ------
    // - Previous `[NaN, 1, 1, 1, 4, 4]`.
    // - Next     `[1, 1, 4, 4, 4, NaN]`.
    // - Nearest  `[1, 1, 1, 4, 4, 4]`.
    // - Linear   `[NaN, 1, 2, 3, 4, NaN]`.
    // - Zero     `[0, 1, 0, 0, 4, 0]`.
    // - Value(9) `[9, 1, 9, 9, 4, 9]`.
    fn each_policy_fills_as_documented() {
        let x = array![N, 1.0, N, N, 4.0, N];

        assert_same(&fill(x.view(), FillMethod::Previous), &[N, 1.0, 1.0, 1.0, 4.0, 4.0]);
        assert_same(&fill(x.view(), FillMethod::Next), &[1.0, 1.0, 4.0, 4.0, 4.0, N]);
        assert_same(&fill(x.view(), FillMethod::Nearest), &[1.0, 1.0, 1.0, 4.0, 4.0, 4.0]);
        assert_same(&fill(x.view(), FillMethod::Linear), &[N, 1.0, 2.0, 3.0, 4.0, N]);
        assert_same(&fill(x.view(), FillMethod::Zero), &[0.0, 1.0, 0.0, 0.0, 4.0, 0.0]);
        assert_same(&fill(x.view(), FillMethod::Value(9.0)), &[9.0, 1.0, 9.0, 9.0, 4.0, 9.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an all-NaN column is left untouched by value-carrying policies.
    //
    // Given
    // -----
    // - `[NaN, NaN]`.
    //
    // Expect
    // ------
    // - Nearest and Linear return `[NaN, NaN]`.
    fn all_nan_column_stays_nan_for_carrying_policies() {
        let x = array![N, N];

        assert_same(&fill(x.view(), FillMethod::Nearest), &[N, N]);
        assert_same(&fill(x.view(), FillMethod::Linear), &[N, N]);
    }
}
