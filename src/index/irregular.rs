//! Irregular date-time index: explicit, strictly increasing instants.
//!
//! Instants are stored as UTC nanoseconds since the Unix epoch together with
//! the zone used to render them as [`Timestamp`] values. Lookups are binary
//! searches over the stored instants; slicing copies the selected range.
use chrono::TimeZone;
use chrono_tz::Tz;

use crate::index::{
    Timestamp,
    errors::{IndexError, IndexResult},
};

/// `IrregularIndex` — sorted instants plus a display zone.
///
/// Invariants
/// ----------
/// - `instants` is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct IrregularIndex {
    instants: Vec<i64>,
    zone: Tz,
}

impl IrregularIndex {
    /// Construct an index from epoch nanoseconds.
    ///
    /// The caller is responsible for ordering; instants are validated, never
    /// re-sorted.
    ///
    /// Errors
    /// ------
    /// - `IndexError::UnsortedTimestamps { position }` for the first instant
    ///   that is not strictly greater than its predecessor.
    pub fn new(instants: Vec<i64>, zone: Tz) -> IndexResult<Self> {
        if let Some(position) = instants.windows(2).position(|w| w[1] <= w[0]) {
            return Err(IndexError::UnsortedTimestamps { position: position + 1 });
        }
        Ok(IrregularIndex { instants, zone })
    }

    /// Construct an index from timestamps, rendering them in `zone`.
    ///
    /// Errors
    /// ------
    /// - `IndexError::TimestampOverflow` if a timestamp lies outside the
    ///   nanosecond-representable range (roughly 1677..2262).
    /// - `IndexError::UnsortedTimestamps` as for [`IrregularIndex::new`].
    pub fn from_timestamps(timestamps: &[Timestamp], zone: Tz) -> IndexResult<Self> {
        let instants = timestamps
            .iter()
            .map(|ts| ts.timestamp_nanos_opt().ok_or(IndexError::TimestampOverflow))
            .collect::<IndexResult<Vec<i64>>>()?;
        Self::new(instants, zone)
    }

    pub fn size(&self) -> usize {
        self.instants.len()
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Raw epoch-nanosecond instants.
    pub fn instants(&self) -> &[i64] {
        &self.instants
    }

    /// Same instants rendered in another zone.
    pub fn at_zone(&self, zone: Tz) -> Self {
        IrregularIndex { instants: self.instants.clone(), zone }
    }

    pub fn timestamp_at(&self, position: usize) -> IndexResult<Timestamp> {
        self.instants
            .get(position)
            .map(|&ns| self.zone.timestamp_nanos(ns))
            .ok_or(IndexError::IndexOutOfRange { position, len: self.instants.len() })
    }

    /// Sub-index covering positions `[start, end)`; copies the range.
    pub fn islice(&self, start: usize, end: usize) -> IndexResult<Self> {
        if start > end || end > self.instants.len() {
            return Err(IndexError::InvalidRange { start, end, len: self.instants.len() });
        }
        Ok(IrregularIndex { instants: self.instants[start..end].to_vec(), zone: self.zone })
    }

    /// First position whose instant is `>= ts` (`size()` if none).
    pub fn loc_at_or_after(&self, ts: &Timestamp) -> usize {
        let target = saturating_nanos(ts);
        self.instants.partition_point(|&ns| ns < target)
    }

    /// First position whose instant is `> ts` (`size()` if none).
    pub fn loc_after(&self, ts: &Timestamp) -> usize {
        let target = saturating_nanos(ts);
        self.instants.partition_point(|&ns| ns <= target)
    }
}

/// Epoch nanoseconds of `ts`, saturating at the `i64` range for timestamps
/// too far from the epoch to represent.
pub(crate) fn saturating_nanos(ts: &Timestamp) -> i64 {
    ts.timestamp_nanos_opt().unwrap_or(if ts.timestamp() < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{Europe::London, UTC};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Rejection of unsorted / duplicate instants with the offending
    //   position.
    // - Binary-search bounds on irregular gaps.
    // - Range-copying `islice` and zone re-rendering.
    // -------------------------------------------------------------------------

    const SEC: i64 = 1_000_000_000;

    #[test]
    // Purpose
    // -------
    // Ensure duplicates and decreasing instants are rejected.
    //
    // Given
    // -----
    // - `[0, 5, 5]` and `[0, 10, 3]`.
    //
    // Expect
    // ------
    // - Both fail with `UnsortedTimestamps { position: 2 }`.
    fn new_rejects_non_increasing_instants() {
        assert_eq!(
            IrregularIndex::new(vec![0, 5, 5], UTC),
            Err(IndexError::UnsortedTimestamps { position: 2 })
        );
        assert_eq!(
            IrregularIndex::new(vec![0, 10, 3], UTC),
            Err(IndexError::UnsortedTimestamps { position: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify lower/upper bounds on an irregular grid.
    //
    // Given
    // -----
    // - Instants at 0s, 1s, 4s, 9s.
    //
    // Expect
    // ------
    // - 4s → at-or-after 2, after 3; 5s → both 3; 10s → both 4.
    fn bounds_follow_irregular_gaps() {
        let idx = IrregularIndex::new(vec![0, SEC, 4 * SEC, 9 * SEC], UTC).unwrap();
        let ts = |s: i64| UTC.timestamp_nanos(s * SEC);

        assert_eq!(idx.loc_at_or_after(&ts(4)), 2);
        assert_eq!(idx.loc_after(&ts(4)), 3);
        assert_eq!(idx.loc_at_or_after(&ts(5)), 3);
        assert_eq!(idx.loc_after(&ts(5)), 3);
        assert_eq!(idx.loc_at_or_after(&ts(10)), 4);
    }

    #[test]
    // Purpose
    // -------
    // Verify slicing copies the range and that re-zoning keeps instants.
    //
    // Given
    // -----
    // - Instants at 0s, 1s, 4s, 9s sliced to `[1, 3)`, then rendered in
    //   Europe/London.
    //
    // Expect
    // ------
    // - The slice holds `[1s, 4s]`; the rendered timestamp equals the UTC
    //   one as an instant.
    fn islice_and_at_zone_preserve_instants() {
        let idx = IrregularIndex::new(vec![0, SEC, 4 * SEC, 9 * SEC], UTC).unwrap();

        let sliced = idx.islice(1, 3).unwrap();
        assert_eq!(sliced.instants(), &[SEC, 4 * SEC]);

        let london = sliced.at_zone(London);
        assert_eq!(london.zone(), London);
        assert_eq!(london.timestamp_at(0).unwrap(), sliced.timestamp_at(0).unwrap());
        assert!(sliced.timestamp_at(2).is_err());
    }
}
