//! index::errors — failure surface of date-time index construction and lookup.
//!
//! Purpose
//! -------
//! Provide [`IndexError`] and the [`IndexResult`] alias used by every
//! routine in [`crate::index`]. Errors are raised before any derived index is
//! built, so a failing call never leaves a half-constructed index behind.
//!
//! Conventions
//! -----------
//! - Positions are 0-based and bounds are reported against the index size.
//! - Ranges are half-open `[start, end)`.
//! - Series-level code wraps these values in
//!   [`SeriesError::Index`](crate::series::errors::SeriesError::Index).

/// Result alias for index operations that may produce [`IndexError`].
pub type IndexResult<T> = Result<T, IndexError>;

/// IndexError — invalid construction parameters or out-of-range lookups.
///
/// Variants
/// --------
/// - `IndexOutOfRange { position, len }`
///   A position outside `[0, len)` was passed to a positional lookup.
/// - `InvalidRange { start, end, len }`
///   A positional slice violated `start <= end <= len`.
/// - `UnsortedTimestamps { position }`
///   The timestamp at `position` is not strictly greater than its
///   predecessor.
/// - `InvalidFrequency { reason }`
///   A frequency step is zero, negative, or not expressible in nanoseconds.
/// - `TimestampOverflow`
///   A timestamp falls outside the representable calendar range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    // ---- Positional lookup ----
    IndexOutOfRange { position: usize, len: usize },
    InvalidRange { start: usize, end: usize, len: usize },

    // ---- Construction ----
    UnsortedTimestamps { position: usize },
    InvalidFrequency { reason: &'static str },
    TimestampOverflow,
}

impl std::error::Error for IndexError {}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Positional lookup ----
            IndexError::IndexOutOfRange { position, len } => {
                write!(f, "Position {position} is out of range for an index of size {len}.")
            }
            IndexError::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "Invalid slice [{start}, {end}) for an index of size {len}; need start <= end <= size."
                )
            }
            // ---- Construction ----
            IndexError::UnsortedTimestamps { position } => {
                write!(
                    f,
                    "Timestamp at position {position} is not strictly greater than its predecessor."
                )
            }
            IndexError::InvalidFrequency { reason } => {
                write!(f, "Invalid frequency: {reason}")
            }
            IndexError::TimestampOverflow => {
                write!(f, "Timestamp falls outside the representable calendar range.")
            }
        }
    }
}
