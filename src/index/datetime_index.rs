//! DateTimeIndex — the uniform/irregular index abstraction shared by every
//! time series.
//!
//! Purpose
//! -------
//! Present one ordered, strictly increasing sequence of timestamps regardless
//! of whether it is stored arithmetically ([`UniformIndex`]) or explicitly
//! ([`IrregularIndex`]). Series code only talks to this type.
//!
//! Key behaviors
//! -------------
//! - Positional access (`timestamp_at`), positional slicing (`islice`,
//!   `slice`) returning the same variant family.
//! - Ordered lookups by timestamp (`loc_at_or_after`, `loc_after`, `loc_of`)
//!   and time-range slicing (`slice_between`).
//! - Row selection (`select`) that always yields an irregular index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Indexes are immutable; derived indexes are new values. Series share an
//!   index through `Arc` when a transform leaves it unchanged.
//! - Whether an index is uniform is visible via [`DateTimeIndex::is_uniform`];
//!   lag construction checks it, positional transforms do not.
use std::ops::Range;

use chrono_tz::Tz;

use crate::index::{
    Timestamp,
    errors::{IndexError, IndexResult},
    frequency::Frequency,
    irregular::IrregularIndex,
    uniform::UniformIndex,
};

/// Ordered sequence of timestamps, stored uniformly or irregularly.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeIndex {
    Uniform(UniformIndex),
    Irregular(IrregularIndex),
}

impl DateTimeIndex {
    /// Uniform index of `periods` timestamps starting at `start`.
    pub fn uniform(start: Timestamp, periods: usize, frequency: Frequency) -> IndexResult<Self> {
        UniformIndex::new(start, periods, frequency).map(DateTimeIndex::Uniform)
    }

    /// Irregular index over caller-sorted timestamps rendered in `zone`.
    pub fn irregular(timestamps: &[Timestamp], zone: Tz) -> IndexResult<Self> {
        IrregularIndex::from_timestamps(timestamps, zone).map(DateTimeIndex::Irregular)
    }

    pub fn size(&self) -> usize {
        match self {
            DateTimeIndex::Uniform(idx) => idx.size(),
            DateTimeIndex::Irregular(idx) => idx.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, DateTimeIndex::Uniform(_))
    }

    /// Zone timestamps are rendered in.
    pub fn zone(&self) -> Tz {
        match self {
            DateTimeIndex::Uniform(idx) => idx.anchor().timezone(),
            DateTimeIndex::Irregular(idx) => idx.zone(),
        }
    }

    /// Same instants rendered in `zone`.
    ///
    /// For uniform indexes the anchor moves to `zone`, so calendar frequencies
    /// step in the new zone's wall clock afterwards.
    pub fn at_zone(&self, zone: Tz) -> IndexResult<Self> {
        match self {
            DateTimeIndex::Uniform(idx) => idx.at_zone(zone).map(DateTimeIndex::Uniform),
            DateTimeIndex::Irregular(idx) => Ok(DateTimeIndex::Irregular(idx.at_zone(zone))),
        }
    }

    /// Timestamp at `position`.
    ///
    /// Errors
    /// ------
    /// - `IndexError::IndexOutOfRange` if `position >= size()`.
    pub fn timestamp_at(&self, position: usize) -> IndexResult<Timestamp> {
        match self {
            DateTimeIndex::Uniform(idx) => idx.timestamp_at(position),
            DateTimeIndex::Irregular(idx) => idx.timestamp_at(position),
        }
    }

    pub fn first(&self) -> IndexResult<Timestamp> {
        self.timestamp_at(0)
    }

    pub fn last(&self) -> IndexResult<Timestamp> {
        match self.size() {
            0 => Err(IndexError::IndexOutOfRange { position: 0, len: 0 }),
            n => self.timestamp_at(n - 1),
        }
    }

    /// All timestamps in position order.
    pub fn timestamps(&self) -> IndexResult<Vec<Timestamp>> {
        (0..self.size()).map(|position| self.timestamp_at(position)).collect()
    }

    /// Sub-index over positions `[start, end)`, same variant.
    ///
    /// Errors
    /// ------
    /// - `IndexError::InvalidRange` unless `start <= end <= size()`.
    pub fn islice(&self, start: usize, end: usize) -> IndexResult<Self> {
        match self {
            DateTimeIndex::Uniform(idx) => idx.islice(start, end).map(DateTimeIndex::Uniform),
            DateTimeIndex::Irregular(idx) => idx.islice(start, end).map(DateTimeIndex::Irregular),
        }
    }

    /// [`DateTimeIndex::islice`] taking a `Range`.
    pub fn slice(&self, range: Range<usize>) -> IndexResult<Self> {
        self.islice(range.start, range.end)
    }

    /// First position whose timestamp is `>= ts` (`size()` if none).
    pub fn loc_at_or_after(&self, ts: &Timestamp) -> IndexResult<usize> {
        match self {
            DateTimeIndex::Uniform(idx) => idx.loc_at_or_after(ts),
            DateTimeIndex::Irregular(idx) => Ok(idx.loc_at_or_after(ts)),
        }
    }

    /// First position whose timestamp is `> ts` (`size()` if none).
    pub fn loc_after(&self, ts: &Timestamp) -> IndexResult<usize> {
        match self {
            DateTimeIndex::Uniform(idx) => idx.loc_after(ts),
            DateTimeIndex::Irregular(idx) => Ok(idx.loc_after(ts)),
        }
    }

    /// Position holding exactly `ts`, if any.
    pub fn loc_of(&self, ts: &Timestamp) -> IndexResult<Option<usize>> {
        let position = self.loc_at_or_after(ts)?;
        if position < self.size() && self.timestamp_at(position)? == *ts {
            Ok(Some(position))
        } else {
            Ok(None)
        }
    }

    /// Positions whose timestamps lie in the closed interval `[start, end]`.
    pub fn range_between(&self, start: &Timestamp, end: &Timestamp) -> IndexResult<Range<usize>> {
        let lo = self.loc_at_or_after(start)?;
        let hi = self.loc_after(end)?.max(lo);
        Ok(lo..hi)
    }

    /// Sub-index over the closed time interval `[start, end]`.
    pub fn slice_between(&self, start: &Timestamp, end: &Timestamp) -> IndexResult<Self> {
        self.slice(self.range_between(start, end)?)
    }

    /// Irregular index over the given ascending positions.
    ///
    /// Errors
    /// ------
    /// - `IndexError::IndexOutOfRange` for a position past the end.
    /// - `IndexError::UnsortedTimestamps` if positions are not ascending.
    pub fn select(&self, positions: &[usize]) -> IndexResult<Self> {
        let irregular = match self {
            DateTimeIndex::Irregular(idx) => {
                let instants = positions
                    .iter()
                    .map(|&position| {
                        idx.instants()
                            .get(position)
                            .copied()
                            .ok_or(IndexError::IndexOutOfRange { position, len: idx.size() })
                    })
                    .collect::<IndexResult<Vec<i64>>>()?;
                IrregularIndex::new(instants, idx.zone())?
            }
            DateTimeIndex::Uniform(idx) => {
                let timestamps = positions
                    .iter()
                    .map(|&position| idx.timestamp_at(position))
                    .collect::<IndexResult<Vec<Timestamp>>>()?;
                IrregularIndex::from_timestamps(&timestamps, self.zone())?
            }
        };
        Ok(DateTimeIndex::Irregular(irregular))
    }
}

impl From<UniformIndex> for DateTimeIndex {
    fn from(idx: UniformIndex) -> Self {
        DateTimeIndex::Uniform(idx)
    }
}

impl From<IrregularIndex> for DateTimeIndex {
    fn from(idx: IrregularIndex) -> Self {
        DateTimeIndex::Irregular(idx)
    }
}
