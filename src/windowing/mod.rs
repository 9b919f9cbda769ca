//! windowing — column kernels behind the time-series transforms.
//!
//! Purpose
//! -------
//! Hold the per-column algorithms that [`TimeSeries`](crate::series::TimeSeries)
//! composes: each kernel reads one `ArrayView1<f64>` and either writes into a
//! caller-owned block or returns a fresh column. Kernels know nothing about
//! keys; index bookkeeping stays in the container.
//!
//! Modules
//! -------
//! - [`lag`]: trimmed lag blocks with shared row alignment.
//! - [`resample`]: windowed aggregation onto a target index.
//! - [`transforms`]: differences, quotients, and returns.
//! - [`fill`]: NaN gap filling.

pub mod fill;
pub mod lag;
pub mod resample;
pub mod transforms;

pub use self::fill::{FillMethod, fill};
pub use self::lag::{lag_into, lag_matrix, lag_width};
pub use self::resample::{resample, resample_column, resample_windows};
pub use self::transforms::{differences, differences_at_rank, price_to_returns, quotients};
