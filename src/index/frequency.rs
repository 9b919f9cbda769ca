//! Calendar arithmetic for uniform date-time indexes.
//!
//! - [`Frequency`] declares the step between consecutive timestamps of a
//!   [`UniformIndex`](crate::index::uniform::UniformIndex) and knows how to
//!   move a timestamp forward or backward by a whole number of steps.
//!
//! Notes
//! -----
//! - `Fixed` steps measure elapsed time and ignore wall-clock shifts; the
//!   calendar variants (`Days`, `BusinessDays`, `Months`, `Years`) move the
//!   local wall-clock date in the timestamp's zone and therefore follow DST.
//! - Month arithmetic clamps to the last day of the target month
//!   (Jan 31 + 1 month = Feb 28/29).
//! - A calendar step that lands on a wall-clock time skipped by a DST gap
//!   keeps the offset in force before the gap (02:30 becomes 03:30 on a
//!   spring-forward night). A step landing in a repeated hour takes the
//!   earlier of the two instants.
use chrono::{Datelike, Days, LocalResult, Months, NaiveDateTime, Offset, TimeDelta, TimeZone};

use crate::index::{
    Timestamp,
    errors::{IndexError, IndexResult},
};

/// Step between consecutive timestamps of a uniform index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Exact elapsed duration (e.g. 15 minutes, 1 hour).
    Fixed(TimeDelta),
    /// Whole calendar days in the index zone.
    Days(u32),
    /// Monday through Friday, skipping weekends.
    BusinessDays(u32),
    /// Whole calendar months.
    Months(u32),
    /// Whole calendar years.
    Years(u32),
}

impl Frequency {
    /// Reject steps that would not produce a strictly increasing sequence.
    ///
    /// Errors
    /// ------
    /// - `IndexError::InvalidFrequency` for zero or negative steps and for
    ///   fixed steps that do not fit in `i64` nanoseconds.
    pub fn validate(&self) -> IndexResult<()> {
        match self {
            Frequency::Fixed(step) => match step.num_nanoseconds() {
                Some(ns) if ns > 0 => Ok(()),
                Some(_) => Err(IndexError::InvalidFrequency { reason: "step must be positive." }),
                None => Err(IndexError::InvalidFrequency {
                    reason: "step must be expressible in nanoseconds.",
                }),
            },
            Frequency::Days(0)
            | Frequency::BusinessDays(0)
            | Frequency::Months(0)
            | Frequency::Years(0) => {
                Err(IndexError::InvalidFrequency { reason: "step count must be positive." })
            }
            _ => Ok(()),
        }
    }

    /// Step length in nanoseconds when the frequency is an exact duration.
    ///
    /// Calendar frequencies return `None`; their step length depends on the
    /// date being advanced.
    pub fn fixed_nanos(&self) -> Option<i64> {
        match self {
            Frequency::Fixed(step) => step.num_nanoseconds(),
            _ => None,
        }
    }

    /// Move `ts` by `periods` steps (negative values move backwards).
    ///
    /// Errors
    /// ------
    /// - `IndexError::TimestampOverflow` if the result leaves chrono's
    ///   representable range.
    pub fn advance(&self, ts: &Timestamp, periods: i64) -> IndexResult<Timestamp> {
        if periods == 0 {
            return Ok(*ts);
        }
        let moved = match *self {
            Frequency::Fixed(step) => {
                let step_ns = step.num_nanoseconds().ok_or(IndexError::TimestampOverflow)?;
                let total = step_ns.checked_mul(periods).ok_or(IndexError::TimestampOverflow)?;
                ts.checked_add_signed(TimeDelta::nanoseconds(total))
            }
            Frequency::Days(k) => shift_days(ts, i64::from(k).checked_mul(periods)),
            Frequency::BusinessDays(k) => {
                let steps = i64::from(k).checked_mul(periods);
                steps.and_then(|s| shift_days(ts, Some(business_day_offset(ts, s))))
            }
            Frequency::Months(k) => shift_months(ts, i64::from(k).checked_mul(periods)),
            Frequency::Years(k) => {
                shift_months(ts, i64::from(k).checked_mul(12).and_then(|m| m.checked_mul(periods)))
            }
        };
        moved.ok_or(IndexError::TimestampOverflow)
    }
}

fn shift_days(ts: &Timestamp, days: Option<i64>) -> Option<Timestamp> {
    let days = days?;
    let local = ts.naive_local();
    let moved = if days >= 0 {
        local.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        local.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    resolve_local(ts, moved?)
}

fn shift_months(ts: &Timestamp, months: Option<i64>) -> Option<Timestamp> {
    let months = months?;
    let count = u32::try_from(months.unsigned_abs()).ok()?;
    let local = ts.naive_local();
    let moved = if months >= 0 {
        local.checked_add_months(Months::new(count))
    } else {
        local.checked_sub_months(Months::new(count))
    };
    resolve_local(ts, moved?)
}

// Wall-clock time in the zone of `reference`. Gaps keep the pre-gap offset;
// overlaps take the earlier instant.
fn resolve_local(reference: &Timestamp, local: NaiveDateTime) -> Option<Timestamp> {
    let zone = reference.timezone();
    match zone.from_local_datetime(&local) {
        LocalResult::Single(ts) => Some(ts),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = local.checked_sub_signed(TimeDelta::days(1))?;
            let offset = zone.offset_from_local_datetime(&before).earliest()?.fix();
            let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            let utc = local.checked_sub_signed(shift)?;
            Some(zone.from_utc_datetime(&utc))
        }
    }
}

// Calendar-day offset for moving `steps` business days from `ts`. Weekend
// dates are measured from the preceding Friday.
fn business_day_offset(ts: &Timestamp, steps: i64) -> i64 {
    let weekday = i64::from(ts.weekday().num_days_from_monday());
    let base = weekday.min(4);
    let total = base + steps;
    total.div_euclid(5) * 7 + total.rem_euclid(5) - base - (weekday - base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};
    use chrono_tz::{America::New_York, UTC};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation of zero / negative steps.
    // - Forward and backward movement for fixed, daily, business-day, and
    //   monthly frequencies, including weekend and month-end edge cases.
    // - DST-aware calendar days versus elapsed fixed days.
    // -------------------------------------------------------------------------

    fn utc(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        UTC.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Ensure degenerate steps are rejected before any index is built.
    //
    // Given
    // -----
    // - `Fixed(0s)`, `Fixed(-1h)`, and `Months(0)`.
    //
    // Expect
    // ------
    // - Each returns `InvalidFrequency`; `Fixed(1h)` validates.
    fn validate_rejects_non_positive_steps() {
        assert!(matches!(
            Frequency::Fixed(TimeDelta::zero()).validate(),
            Err(IndexError::InvalidFrequency { .. })
        ));
        assert!(matches!(
            Frequency::Fixed(TimeDelta::hours(-1)).validate(),
            Err(IndexError::InvalidFrequency { .. })
        ));
        assert!(matches!(Frequency::Months(0).validate(), Err(IndexError::InvalidFrequency { .. })));
        assert!(Frequency::Fixed(TimeDelta::hours(1)).validate().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify fixed-step arithmetic in both directions.
    //
    // Given
    // -----
    // - `Fixed(2h)` applied to 2015-04-08 16:00 UTC with periods 3 and -2.
    //
    // Expect
    // ------
    // - 22:00 on the same day and 12:00 on the same day.
    fn fixed_step_moves_forward_and_backward() {
        let freq = Frequency::Fixed(TimeDelta::hours(2));
        let start = utc(2015, 4, 8, 16);

        assert_eq!(freq.advance(&start, 3).unwrap(), utc(2015, 4, 8, 22));
        assert_eq!(freq.advance(&start, -2).unwrap(), utc(2015, 4, 8, 12));
        assert_eq!(freq.fixed_nanos(), Some(2 * 3_600 * 1_000_000_000));
    }

    #[test]
    // Purpose
    // -------
    // Verify business-day stepping skips weekends from weekdays and from
    // weekend dates.
    //
    // Given
    // -----
    // - Friday 2015-04-10, Monday 2015-04-13, and Saturday 2015-04-11.
    //
    // Expect
    // ------
    // - Friday + 1 = Monday; Monday - 1 = Friday; Friday + 6 = Monday a week
    //   later; Saturday + 1 = Monday.
    fn business_days_skip_weekends() {
        let freq = Frequency::BusinessDays(1);
        let friday = utc(2015, 4, 10, 0);
        let monday = utc(2015, 4, 13, 0);
        let saturday = utc(2015, 4, 11, 0);
        assert_eq!(friday.weekday(), Weekday::Fri);

        assert_eq!(freq.advance(&friday, 1).unwrap(), monday);
        assert_eq!(freq.advance(&monday, -1).unwrap(), friday);
        assert_eq!(freq.advance(&friday, 6).unwrap(), utc(2015, 4, 20, 0));
        assert_eq!(freq.advance(&saturday, 1).unwrap(), monday);
    }

    #[test]
    // Purpose
    // -------
    // Verify month arithmetic clamps to the end of shorter months.
    //
    // Given
    // -----
    // - `Months(1)` applied to 2015-01-31.
    //
    // Expect
    // ------
    // - 2015-02-28, and `Years(1)` moves 2016-02-29 to 2017-02-28.
    fn months_clamp_to_month_end() {
        assert_eq!(Frequency::Months(1).advance(&utc(2015, 1, 31, 0), 1).unwrap(), utc(2015, 2, 28, 0));
        assert_eq!(Frequency::Years(1).advance(&utc(2016, 2, 29, 0), 1).unwrap(), utc(2017, 2, 28, 0));
    }

    #[test]
    // Purpose
    // -------
    // Distinguish calendar days from 24-hour fixed steps across a DST shift.
    //
    // Given
    // -----
    // - Midnight 2015-03-07 in America/New_York (DST starts 2015-03-08).
    //
    // Expect
    // ------
    // - `Days(2)` lands on midnight local time 2015-03-09.
    // - `Fixed(48h)` lands on 01:00 local time because one hour was skipped.
    fn calendar_days_follow_dst_but_fixed_days_do_not() {
        let start: Timestamp = New_York.with_ymd_and_hms(2015, 3, 7, 0, 0, 0).unwrap();
        let expected: Timestamp = New_York.with_ymd_and_hms(2015, 3, 9, 0, 0, 0).unwrap();

        assert_eq!(Frequency::Days(1).advance(&start, 2).unwrap(), expected);

        let fixed = Frequency::Fixed(TimeDelta::hours(24)).advance(&start, 2).unwrap();
        assert_eq!(fixed.hour(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Ensure calendar steps into a DST gap or overlap resolve to a real
    // instant instead of failing.
    //
    // Given
    // -----
    // - `Days(1)` from 2024-03-09 02:30 New York (02:30 on 03-10 does not
    //   exist).
    // - `Days(1)` from 2024-11-02 01:30 New York (01:30 on 11-03 repeats).
    //
    // Expect
    // ------
    // - The gap resolves to 03:30 EDT on 03-10; the next day is back at 02:30.
    // - The overlap resolves to the first 01:30 (EDT, UTC-4).
    fn calendar_steps_resolve_dst_gaps_and_overlaps() {
        let start: Timestamp = New_York.with_ymd_and_hms(2024, 3, 9, 2, 30, 0).unwrap();
        let freq = Frequency::Days(1);

        let gap = freq.advance(&start, 1).unwrap();
        assert_eq!(gap, New_York.with_ymd_and_hms(2024, 3, 10, 3, 30, 0).unwrap());
        assert_eq!(
            freq.advance(&start, 2).unwrap(),
            New_York.with_ymd_and_hms(2024, 3, 11, 2, 30, 0).unwrap()
        );

        let before_overlap: Timestamp = New_York.with_ymd_and_hms(2024, 11, 2, 1, 30, 0).unwrap();
        let overlap = freq.advance(&before_overlap, 1).unwrap();
        assert_eq!((overlap.hour(), overlap.minute()), (1, 30));
        assert_eq!(overlap.offset().fix().local_minus_utc(), -4 * 3_600);
    }
}
