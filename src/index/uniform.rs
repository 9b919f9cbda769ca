//! Uniform date-time index: anchor instant + frequency + window of positions.
//!
//! Positions map to timestamps arithmetically
//! (`anchor + (offset + position) · step`),
//! so a uniform index never materializes its timestamps. For `Fixed`
//! frequencies lookups are O(1); calendar frequencies fall back to a binary
//! search over computed timestamps, which is O(log n) calls into
//! [`Frequency::advance`].
use chrono_tz::Tz;

use crate::index::{
    Timestamp,
    errors::{IndexError, IndexResult},
    frequency::Frequency,
    irregular::saturating_nanos,
};

/// `UniformIndex` — evenly spaced timestamps defined by an anchor, a step,
/// and a window of positions.
///
/// Fields
/// ------
/// - `anchor`: [`Timestamp`]
///   Origin of the step arithmetic. Its zone is the zone calendar steps move
///   in.
/// - `offset`: `usize`
///   Steps from `anchor` to position 0. Slicing moves this instead of the
///   anchor, so month-end clamping stays relative to the original origin.
/// - `frequency`: [`Frequency`]
///   Step between consecutive positions.
/// - `periods`: `usize`
///   Number of timestamps in the index.
///
/// Invariants
/// ----------
/// - `timestamp_at(p) == frequency.advance(anchor, offset + p)`.
/// - `frequency` passed [`Frequency::validate`], so timestamps are strictly
///   increasing.
/// - When `periods > 0`, the timestamp at `periods - 1` is representable.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformIndex {
    anchor: Timestamp,
    offset: usize,
    frequency: Frequency,
    periods: usize,
}

impl UniformIndex {
    /// Construct a uniform index of `periods` timestamps starting at `start`.
    ///
    /// Errors
    /// ------
    /// - `IndexError::InvalidFrequency` if the step is not strictly positive.
    /// - `IndexError::TimestampOverflow` if the last timestamp cannot be
    ///   represented.
    pub fn new(start: Timestamp, periods: usize, frequency: Frequency) -> IndexResult<Self> {
        frequency.validate()?;
        UniformIndex { anchor: start, offset: 0, frequency, periods }.checked()
    }

    pub fn anchor(&self) -> &Timestamp {
        &self.anchor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Timestamp at position 0 (defined even for an empty index).
    pub fn start(&self) -> IndexResult<Timestamp> {
        self.frequency.advance(&self.anchor, to_steps(self.offset)?)
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn size(&self) -> usize {
        self.periods
    }

    /// Same positions with the anchor rendered in `zone`.
    pub fn at_zone(&self, zone: Tz) -> IndexResult<Self> {
        UniformIndex { anchor: self.anchor.with_timezone(&zone), ..self.clone() }.checked()
    }

    /// Timestamp at `position`; fails with `IndexOutOfRange` past the end.
    pub fn timestamp_at(&self, position: usize) -> IndexResult<Timestamp> {
        if position >= self.periods {
            return Err(IndexError::IndexOutOfRange { position, len: self.periods });
        }
        self.frequency.advance(&self.anchor, self.steps_to(position)?)
    }

    /// Sub-index covering positions `[start, end)`. No timestamps are
    /// computed; only the offset and count change.
    pub fn islice(&self, start: usize, end: usize) -> IndexResult<Self> {
        if start > end || end > self.periods {
            return Err(IndexError::InvalidRange { start, end, len: self.periods });
        }
        Ok(UniformIndex { offset: self.offset + start, periods: end - start, ..self.clone() })
    }

    /// First position whose timestamp is `>= ts` (`size()` if none).
    pub fn loc_at_or_after(&self, ts: &Timestamp) -> IndexResult<usize> {
        if let Some((offset, step)) = self.fixed_offset(ts) {
            if offset <= 0 {
                return Ok(0);
            }
            let steps = (offset + step - 1) / step;
            return Ok(clamp_steps(steps, self.periods));
        }
        self.search(|candidate| candidate >= ts)
    }

    /// First position whose timestamp is `> ts` (`size()` if none).
    pub fn loc_after(&self, ts: &Timestamp) -> IndexResult<usize> {
        if let Some((offset, step)) = self.fixed_offset(ts) {
            if offset < 0 {
                return Ok(0);
            }
            return Ok(clamp_steps(offset / step + 1, self.periods));
        }
        self.search(|candidate| candidate > ts)
    }

    // Checks that the last position is representable.
    fn checked(self) -> IndexResult<Self> {
        if self.periods > 0 {
            self.frequency.advance(&self.anchor, self.steps_to(self.periods - 1)?)?;
        }
        Ok(self)
    }

    fn steps_to(&self, position: usize) -> IndexResult<i64> {
        to_steps(self.offset.checked_add(position).ok_or(IndexError::TimestampOverflow)?)
    }

    // Nanosecond offset of `ts` from position 0 and the step length,
    // available only for fixed frequencies with the anchor in the
    // nanosecond range.
    fn fixed_offset(&self, ts: &Timestamp) -> Option<(i128, i128)> {
        let step = i128::from(self.frequency.fixed_nanos()?);
        let anchor = i128::from(self.anchor.timestamp_nanos_opt()?);
        let start = anchor + step * i128::try_from(self.offset).ok()?;
        let target = ts.timestamp_nanos_opt().unwrap_or_else(|| saturating_nanos(ts));
        Some((i128::from(target) - start, step))
    }

    // Lower-bound binary search for the first position satisfying a
    // monotone predicate.
    fn search(&self, is_past: impl Fn(&Timestamp) -> bool) -> IndexResult<usize> {
        let (mut lo, mut hi) = (0usize, self.periods);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if is_past(&self.timestamp_at(mid)?) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Ok(lo)
    }
}

fn to_steps(position: usize) -> IndexResult<i64> {
    i64::try_from(position).map_err(|_| IndexError::TimestampOverflow)
}

fn clamp_steps(steps: i128, periods: usize) -> usize {
    usize::try_from(steps).map_or(periods, |s| s.min(periods))
}
