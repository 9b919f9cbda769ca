//! utils — PyO3 extraction helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python inputs (numpy arrays, pandas frames, nested
//! sequences, zone names) into the typed values the core modules expect.
#[cfg(feature = "python-bindings")]
use chrono::TimeDelta;

#[cfg(feature = "python-bindings")]
use chrono_tz::{Tz, UTC};

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::index::Frequency;

/// Copy a 2-D float64 input into an owned `(instants, series)` matrix.
///
/// Accepts a `numpy.ndarray`, anything with a `to_numpy()` method (pandas
/// `DataFrame`), or a sequence of equal-length row sequences.
///
/// Errors
/// ------
/// - `TypeError` if the input is none of the above.
/// - `ValueError` if nested rows have different lengths.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let width = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().position(|row| row.len() != width) {
        return Err(PyValueError::new_err(format!(
            "row {bad} has {} values, expected {width}",
            rows[bad].len()
        )));
    }
    let n = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, width), flat)
        .map_err(|e| PyValueError::new_err(format!("invalid value matrix: {e}")))
}

/// IANA zone name to [`Tz`]; `None` means UTC.
#[cfg(feature = "python-bindings")]
pub fn parse_zone(name: Option<&str>) -> PyResult<Tz> {
    match name {
        None => Ok(UTC),
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| PyValueError::new_err(format!("unknown time zone {name:?}"))),
    }
}

/// Fixed step of `nanos` nanoseconds. Positivity is checked when the index
/// is built.
#[cfg(feature = "python-bindings")]
pub fn fixed_frequency(nanos: i64) -> Frequency {
    Frequency::Fixed(TimeDelta::nanoseconds(nanos))
}
