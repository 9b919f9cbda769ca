//! rust_multiseries — keyed multivariate time series with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the time-series container to Python via the `_rust_multiseries` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing `TimeSeries` class.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`index`, `series`, `windowing`) as the
//!   public crate surface.
//! - Define a `#[pyclass]` wrapper over `TimeSeries<String>` and the
//!   `#[pymodule]` initializer for the `_rust_multiseries` extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Python timestamps cross the boundary as `int64` nanoseconds since the
//!   Unix epoch, interpreted in the zone given by `tz` (UTC by default).
//!
//! Conventions
//! -----------
//! - Rows are instants and columns are series on both sides of the boundary;
//!   `values` is an `(n_instants, n_series)` float64 array.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`series::TimeSeries`] and the
//!   [`index`] types directly and can ignore the PyO3 items.
//! - `use rust_multiseries::series::prelude::*;` brings the everyday surface
//!   into scope.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   end-to-end pipeline test under `tests/`.

pub mod index;
pub mod series;
pub mod utils;
pub mod windowing;

#[cfg(feature = "python-bindings")]
use chrono::TimeZone;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray2, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    index::{DateTimeIndex, IrregularIndex, UniformIndex},
    series::{LagSpec, SeriesError, TimeSeries, lagged_string_key},
    utils::{extract_f64_matrix, fixed_frequency, parse_zone},
};

/// TimeSeries — Python-facing wrapper over `TimeSeries<String>`.
///
/// Purpose
/// -------
/// Let Python callers build a keyed series from numpy inputs and run the
/// index-aware transforms without re-implementing the bookkeeping in Python.
///
/// Key behaviors
/// -------------
/// - Construct from irregular nanosecond timestamps or from a uniform start
///   and fixed step.
/// - Every transform returns a new `TimeSeries`; the receiver is unchanged.
/// - Lag columns are named `lag{j}(key)`.
///
/// Fields
/// ------
/// - `inner`: [`TimeSeries<String>`]
///   The wrapped container.
///
/// Notes
/// -----
/// - Rust callers should use [`TimeSeries`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "TimeSeries", module = "rust_multiseries")]
pub struct PyTimeSeries {
    inner: TimeSeries<String>,
}

#[cfg(feature = "python-bindings")]
impl From<TimeSeries<String>> for PyTimeSeries {
    fn from(inner: TimeSeries<String>) -> Self {
        PyTimeSeries { inner }
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyTimeSeries {
    #[staticmethod]
    #[pyo3(
        signature = (timestamps_ns, values, keys, tz = None),
        text_signature = "(timestamps_ns, values, keys, /, tz=None)"
    )]
    pub fn from_irregular(
        timestamps_ns: Vec<i64>, values: &Bound<'_, PyAny>, keys: Vec<String>, tz: Option<&str>,
    ) -> PyResult<Self> {
        let zone = parse_zone(tz)?;
        let index = IrregularIndex::new(timestamps_ns, zone).map_err(SeriesError::from)?;
        let data = extract_f64_matrix(values)?;
        Ok(TimeSeries::new(DateTimeIndex::from(index), data, keys)?.into())
    }

    #[staticmethod]
    #[pyo3(
        signature = (start_ns, frequency_ns, values, keys, tz = None),
        text_signature = "(start_ns, frequency_ns, values, keys, /, tz=None)"
    )]
    pub fn from_uniform(
        start_ns: i64, frequency_ns: i64, values: &Bound<'_, PyAny>, keys: Vec<String>,
        tz: Option<&str>,
    ) -> PyResult<Self> {
        let zone = parse_zone(tz)?;
        let data = extract_f64_matrix(values)?;
        let start = zone.timestamp_nanos(start_ns);
        let index = UniformIndex::new(start, data.nrows(), fixed_frequency(frequency_ns))
            .map_err(SeriesError::from)?;
        Ok(TimeSeries::new(DateTimeIndex::from(index), data, keys)?.into())
    }

    #[pyo3(
        signature = (max_lag, include_original = true),
        text_signature = "(self, max_lag, /, include_original=True)"
    )]
    pub fn lags(&self, max_lag: usize, include_original: bool) -> PyResult<Self> {
        let spec = LagSpec::uniform(max_lag, include_original);
        Ok(self.inner.lags(&spec, lagged_string_key)?.into())
    }

    #[pyo3(signature = (lag = 1), text_signature = "(self, /, lag=1)")]
    pub fn differences(&self, lag: usize) -> PyResult<Self> {
        Ok(self.inner.differences(lag)?.into())
    }

    #[pyo3(signature = (lag = 1), text_signature = "(self, /, lag=1)")]
    pub fn quotients(&self, lag: usize) -> PyResult<Self> {
        Ok(self.inner.quotients(lag)?.into())
    }

    pub fn price2ret(&self) -> PyResult<Self> {
        Ok(self.inner.price_to_returns()?.into())
    }

    #[pyo3(text_signature = "(self, start, end)")]
    pub fn slice(&self, start: usize, end: usize) -> PyResult<Self> {
        Ok(self.inner.slice(start..end)?.into())
    }

    pub fn remove_instants_with_nans(&self) -> PyResult<Self> {
        Ok(self.inner.remove_instants_with_nans()?.into())
    }

    #[getter]
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys().to_vec()
    }

    #[getter]
    pub fn values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.data().to_pyarray(py)
    }

    #[getter]
    pub fn timestamps_ns(&self) -> PyResult<Vec<i64>> {
        let stamps = self.inner.index().timestamps().map_err(SeriesError::from)?;
        stamps
            .iter()
            .map(|ts| {
                ts.timestamp_nanos_opt().ok_or_else(|| {
                    PyValueError::new_err(format!("timestamp {ts} is outside the int64 range"))
                })
            })
            .collect()
    }

    pub fn __len__(&self) -> usize {
        self.inner.n_instants()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "TimeSeries(n_instants={}, keys={:?})",
            self.inner.n_instants(),
            self.inner.keys()
        )
    }
}

/// _rust_multiseries — PyO3 module initializer for the Python extension.
///
/// Registers the `TimeSeries` class. Invoked by Python when importing the
/// compiled extension; not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_multiseries<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyTimeSeries>()?;
    Ok(())
}
