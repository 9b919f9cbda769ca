//! series — keyed multi-column time series and their feature transforms.
//!
//! Purpose
//! -------
//! Provide the [`TimeSeries`] container (index + matrix + keys), the option
//! types that configure its transforms, key derivation helpers for lagged
//! columns, and a unified error type for everything above the index layer.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] is immutable in practice: every transform returns a new
//!   value and leaves the receiver untouched.
//! - Construction helpers in [`builders`] assemble series from row samples or
//!   column vectors and check every shape before allocating the matrix.
//! - [`SeriesError`] wraps [`IndexError`](crate::index::IndexError) so index
//!   failures propagate through `?` unchanged.
//!
//! Conventions
//! -----------
//! - Rows are instants, columns are series; column order is preserved by
//!   every transform.
//! - Lag order `0` is the unshifted column in every key function.

pub mod builders;
pub mod errors;
pub mod keys;
pub mod options;
pub mod timeseries;

pub use self::errors::{SeriesError, SeriesResult};
pub use self::keys::{lagged_pair_key, lagged_string_key};
pub use self::options::{ColumnLag, LagSpec, ResampleOptions};
pub use self::timeseries::TimeSeries;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_multiseries::series::prelude::*;
//
// to import the container, its options, and the index types in one line.

pub mod prelude {
    pub use super::{
        ColumnLag, LagSpec, ResampleOptions, SeriesError, SeriesResult, TimeSeries,
        lagged_pair_key, lagged_string_key,
    };
    pub use crate::index::{DateTimeIndex, Frequency, IrregularIndex, Timestamp, UniformIndex};
    pub use crate::windowing::FillMethod;
}
