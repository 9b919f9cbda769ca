//! index — date-time indexes for aligned multivariate series.
//!
//! Purpose
//! -------
//! Provide the ordered timestamp axis shared by every column of a
//! [`TimeSeries`](crate::series::TimeSeries): construction, positional and
//! time-based lookup, and slicing that yields an index whose size matches a
//! transformed matrix.
//!
//! Key behaviors
//! -------------
//! - [`DateTimeIndex`] dispatches between [`UniformIndex`] (start + step +
//!   count, O(1) lookups for fixed steps) and [`IrregularIndex`] (explicit
//!   instants, O(log n) lookups).
//! - [`Frequency`] supplies calendar arithmetic for uniform indexes.
//! - [`IndexError`] reports invalid ranges, unsorted input, and overflow.
//!
//! Conventions
//! -----------
//! - Timestamps are `chrono::DateTime<chrono_tz::Tz>`; comparisons are by
//!   instant, independent of zone.
//! - Positions are 0-based; slices are half-open `[start, end)`; time-based
//!   slices are closed `[start, end]`.

pub mod datetime_index;
pub mod errors;
pub mod frequency;
pub mod irregular;
pub mod uniform;

/// Timestamp type used by every index.
pub type Timestamp = chrono::DateTime<chrono_tz::Tz>;

pub use self::datetime_index::DateTimeIndex;
pub use self::errors::{IndexError, IndexResult};
pub use self::frequency::Frequency;
pub use self::irregular::IrregularIndex;
pub use self::uniform::UniformIndex;
