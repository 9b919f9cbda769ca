//! series::errors — failure surface of the time-series container and its
//! transforms.
//!
//! Purpose
//! -------
//! Define [`SeriesError`] and [`SeriesResult`] for everything under
//! [`crate::series`] and [`crate::windowing`]. Every variant is a
//! precondition violation detected before a result is allocated; transforms
//! never leave partially written output behind.
//!
//! Conventions
//! -----------
//! - Floating-point edge cases (division by zero, empty resampling windows)
//!   are not errors; they surface as `NaN` / `±∞` in the output.
//! - Index failures are wrapped verbatim in [`SeriesError::Index`].
//! - With `python-bindings`, every variant maps to a Python `ValueError`
//!   carrying the `Display` text.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::index::errors::IndexError;

/// Result alias for series operations that may produce [`SeriesError`].
pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — container invariants and transform preconditions.
///
/// Variants
/// --------
/// - `Index(IndexError)`
///   An index lookup, slice, or construction failed.
/// - `DimensionMismatch { what, expected, actual }`
///   Matrix rows, index size, column count, and key count disagree. `what`
///   names the quantity that was checked.
/// - `EmptyTimeSeries`
///   An operation requiring at least one column ran on zero columns.
/// - `MissingLagConfiguration { column }`
///   A per-column lag mapping has no entry for the key of `column`.
/// - `NonUniformIndex`
///   Lag construction was requested on an irregular index.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    Index(IndexError),

    // ---- Shape invariants ----
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },
    EmptyTimeSeries,

    // ---- Lag preconditions ----
    MissingLagConfiguration { column: usize },
    NonUniformIndex,
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Index(err) => write!(f, "Index error: {err}"),
            // ---- Shape invariants ----
            SeriesError::DimensionMismatch { what, expected, actual } => {
                write!(f, "Dimension mismatch in {what}: expected {expected}, got {actual}.")
            }
            SeriesError::EmptyTimeSeries => {
                write!(f, "Time series has no columns.")
            }
            // ---- Lag preconditions ----
            SeriesError::MissingLagConfiguration { column } => {
                write!(f, "No lag configuration for the key of column {column}.")
            }
            SeriesError::NonUniformIndex => {
                write!(f, "Lags are only defined on a uniform date-time index.")
            }
        }
    }
}

impl From<IndexError> for SeriesError {
    fn from(err: IndexError) -> Self {
        SeriesError::Index(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SeriesError> for PyErr {
    fn from(err: SeriesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Wrapping of `IndexError` via `From` and `source()`.
    // - Payload embedding in `Display` messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<SeriesError> for PyErr` conversion, which needs the Python
    //   C API at link time.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that index failures are wrapped and exposed as the source.
    //
    // Given
    // -----
    // - `IndexError::IndexOutOfRange { position: 9, len: 3 }` converted via `?`.
    //
    // Expect
    // ------
    // - `SeriesError::Index(..)` whose `source()` is the original error.
    fn index_error_converts_and_is_source() {
        let inner = IndexError::IndexOutOfRange { position: 9, len: 3 };

        let err: SeriesError = inner.clone().into();

        assert_eq!(err, SeriesError::Index(inner.clone()));
        assert_eq!(err.source().map(|s| s.to_string()), Some(inner.to_string()));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `DimensionMismatch` names the checked quantity and both
    // counts.
    //
    // Given
    // -----
    // - `DimensionMismatch { what: "keys", expected: 3, actual: 2 }`.
    //
    // Expect
    // ------
    // - The message contains "keys", "3", and "2".
    fn dimension_mismatch_display_includes_payload() {
        let err = SeriesError::DimensionMismatch { what: "keys", expected: 3, actual: 2 };

        let msg = err.to_string();

        assert!(msg.contains("keys") && msg.contains('3') && msg.contains('2'), "Got: {msg}");
    }
}
