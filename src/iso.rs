//! This module implements the internal ISO field records.
//!
//! The three main types of records are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! ## `IsoDate`
//!
//! An `IsoDate` represents the `[[ISOYear]]`, `[[ISOMonth]]`, and `[[ISODay]]`
//! of a date. Every constructor except `new_unchecked` validates the fields
//! against the calendar.
//!
//! ## `IsoTime`
//!
//! An `IsoTime` is the time-of-day with nanosecond precision.
//!
//! ## `IsoDateTime`
//!
//! An `IsoDateTime` is a combination of `IsoDate` and `IsoTime`. Arithmetic
//! on it is performed on "local nanoseconds", the nanoseconds since
//! 1970-01-01T00:00 read on the wall clock.

use alloc::format;

use tempora_provider::utils;

use crate::{
    calendar::{self, MAX_YEAR, MIN_YEAR},
    TemporalError, TemporalResult, NS_PER_DAY, NS_PER_SECOND,
};

fn out_of_range() -> TemporalError {
    TemporalError::range().with_message("result is outside of the supported date range")
}

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for the year, month and day of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct IsoDate {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
}

impl IsoDate {
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub(crate) fn try_new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        calendar::validate_date(year, month, day)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    pub(crate) fn from_epoch_day(epoch_day: i64) -> TemporalResult<Self> {
        let (year, month, day) = calendar::from_epoch_day(epoch_day)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    pub(crate) const fn to_epoch_day(&self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }

    /// The number of months since year 0, month 1.
    pub(crate) const fn proleptic_month(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub(crate) fn add_days(&self, days: i64) -> TemporalResult<Self> {
        if days == 0 {
            return Ok(*self);
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or_else(out_of_range)?;
        Self::from_epoch_day(epoch_day)
    }

    /// Adds months, clamping the day to the length of the resulting month.
    pub(crate) fn add_months(&self, months: i64) -> TemporalResult<Self> {
        if months == 0 {
            return Ok(*self);
        }
        let month_count = self
            .proleptic_month()
            .checked_add(months)
            .ok_or_else(out_of_range)?;
        let year = month_count.div_euclid(12);
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(out_of_range());
        }
        Ok(self.at_proleptic_month(month_count))
    }

    /// Moves to the proleptic month `month_count`, clamping the day. The
    /// month must lie within the supported year range.
    const fn at_proleptic_month(&self, month_count: i64) -> Self {
        let year = month_count.div_euclid(12) as i32;
        let month = month_count.rem_euclid(12) as u8 + 1;
        let days = calendar::days_in_month(year, month);
        let day = if self.day < days { self.day } else { days };
        Self::new_unchecked(year, month, day)
    }

    pub(crate) fn add_years(&self, years: i64) -> TemporalResult<Self> {
        self.add_months(years.checked_mul(12).ok_or_else(out_of_range)?)
    }

    /// Adds years, then months, then days.
    pub(crate) fn add_period(&self, years: i64, months: i64, days: i64) -> TemporalResult<Self> {
        self.add_years(years)?.add_months(months)?.add_days(days)
    }

    /// The whole months from `self` to `other`, truncated toward zero.
    pub(crate) const fn months_until(&self, other: &Self) -> i64 {
        let start = self.proleptic_month() * 32 + self.day as i64;
        let end = other.proleptic_month() * 32 + other.day as i64;
        (end - start) / 32
    }

    /// The whole months and the remaining days from `self` to `other`.
    ///
    /// Both values share the sign of the overall difference.
    pub(crate) const fn period_until(&self, other: &Self) -> (i64, i64) {
        let mut total_months = other.proleptic_month() - self.proleptic_month();
        let mut days = other.day as i64 - self.day as i64;
        if total_months > 0 && days < 0 {
            total_months -= 1;
            // The anchor lies between `self` and `other`.
            let anchor = self.at_proleptic_month(self.proleptic_month() + total_months);
            days = other.to_epoch_day() - anchor.to_epoch_day();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= calendar::days_in_month(other.year, other.month) as i64;
        }
        (total_months, days)
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record that contains the time-of-day fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct IsoTime {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) nanosecond: u32,
}

impl IsoTime {
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    pub(crate) fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> TemporalResult<Self> {
        let field = if hour > 23 {
            Some(("hour", u32::from(hour), 23))
        } else if minute > 59 {
            Some(("minute", u32::from(minute), 59))
        } else if second > 59 {
            Some(("second", u32::from(second), 59))
        } else if nanosecond > 999_999_999 {
            Some(("nanosecond", nanosecond, 999_999_999))
        } else {
            None
        };
        if let Some((name, value, max)) = field {
            return Err(TemporalError::invalid_time()
                .with_message(format!("{name} {value} is outside of the range 0..={max}")));
        }
        Ok(Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Creates a time from nanoseconds in `0..NS_PER_DAY`.
    pub(crate) const fn from_nanosecond_of_day(nanoseconds: i64) -> Self {
        let second_of_day = nanoseconds / NS_PER_SECOND;
        Self {
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day % 3600 / 60) as u8,
            second: (second_of_day % 60) as u8,
            nanosecond: (nanoseconds % NS_PER_SECOND) as u32,
        }
    }

    pub(crate) const fn to_second_of_day(&self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    pub(crate) const fn to_nanosecond_of_day(&self) -> i64 {
        self.to_second_of_day() * NS_PER_SECOND + self.nanosecond as i64
    }

    /// Adds nanoseconds and returns the days carried past midnight along
    /// with the new time.
    pub(crate) fn add_nanoseconds(&self, nanoseconds: i128) -> (i128, Self) {
        let total = i128::from(self.to_nanosecond_of_day()) + nanoseconds;
        let days = total.div_euclid(i128::from(NS_PER_DAY));
        let nanosecond_of_day = total.rem_euclid(i128::from(NS_PER_DAY)) as i64;
        (days, Self::from_nanosecond_of_day(nanosecond_of_day))
    }
}

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` internal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct IsoDateTime {
    pub(crate) date: IsoDate,
    pub(crate) time: IsoTime,
}

impl IsoDateTime {
    pub(crate) const fn new(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// The nanoseconds since 1970-01-01T00:00 on the wall clock.
    pub(crate) const fn to_local_nanoseconds(&self) -> i128 {
        self.date.to_epoch_day() as i128 * NS_PER_DAY as i128
            + self.time.to_nanosecond_of_day() as i128
    }

    /// The seconds since 1970-01-01T00:00 on the wall clock.
    pub(crate) const fn to_local_seconds(&self) -> i64 {
        self.date.to_epoch_day() * 86_400 + self.time.to_second_of_day()
    }

    pub(crate) fn from_local_nanoseconds(nanoseconds: i128) -> TemporalResult<Self> {
        let epoch_day = i64::try_from(nanoseconds.div_euclid(i128::from(NS_PER_DAY)))
            .map_err(|_| out_of_range())?;
        let nanosecond_of_day = nanoseconds.rem_euclid(i128::from(NS_PER_DAY)) as i64;
        Ok(Self::new(
            IsoDate::from_epoch_day(epoch_day)?,
            IsoTime::from_nanosecond_of_day(nanosecond_of_day),
        ))
    }

    pub(crate) fn add_nanoseconds(&self, nanoseconds: i128) -> TemporalResult<Self> {
        if nanoseconds == 0 {
            return Ok(*self);
        }
        let (days, time) = self.time.add_nanoseconds(nanoseconds);
        let days = i64::try_from(days).map_err(|_| out_of_range())?;
        Ok(Self::new(self.date.add_days(days)?, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arithmetic_clamps() {
        let jan_31 = IsoDate::new_unchecked(2014, 1, 31);
        assert_eq!(jan_31.add_months(1), Ok(IsoDate::new_unchecked(2014, 2, 28)));
        assert_eq!(jan_31.add_months(13), Ok(IsoDate::new_unchecked(2015, 2, 28)));
        assert_eq!(jan_31.add_months(-2), Ok(IsoDate::new_unchecked(2013, 11, 30)));
        let leap_day = IsoDate::new_unchecked(2016, 2, 29);
        assert_eq!(leap_day.add_years(1), Ok(IsoDate::new_unchecked(2017, 2, 28)));
        assert_eq!(leap_day.add_years(4), Ok(IsoDate::new_unchecked(2020, 2, 29)));
        assert!(IsoDate::new_unchecked(MAX_YEAR, 12, 1).add_months(1).is_err());
    }

    #[test]
    fn period_until() {
        let start = IsoDate::new_unchecked(2014, 4, 30);
        let end = IsoDate::new_unchecked(2015, 6, 2);
        assert_eq!(start.period_until(&end), (13, 3));
        assert_eq!(end.period_until(&start), (-13, -2));
        assert_eq!(start.months_until(&end), 13);
        assert_eq!(end.months_until(&start), -13);

        let start = IsoDate::new_unchecked(2014, 1, 31);
        let end = IsoDate::new_unchecked(2014, 3, 1);
        assert_eq!(start.period_until(&end), (1, 1));
        assert_eq!(start.months_until(&end), 1);
    }

    #[test]
    fn time_carry() {
        let time = IsoTime::new_unchecked(23, 30, 0, 0);
        let (days, result) = time.add_nanoseconds(3_600 * i128::from(NS_PER_SECOND));
        assert_eq!(days, 1);
        assert_eq!(result, IsoTime::new_unchecked(0, 30, 0, 0));

        let (days, result) = time.add_nanoseconds(-24 * 3_600 * i128::from(NS_PER_SECOND) - 1);
        assert_eq!(days, -1);
        assert_eq!(result, IsoTime::new_unchecked(23, 29, 59, 999_999_999));
    }

    #[test]
    fn invalid_time_fields() {
        assert!(IsoTime::try_new(24, 0, 0, 0).is_err());
        assert!(IsoTime::try_new(23, 60, 0, 0).is_err());
        assert!(IsoTime::try_new(23, 59, 60, 0).is_err());
        assert!(IsoTime::try_new(23, 59, 59, 1_000_000_000).is_err());
        assert!(IsoTime::try_new(23, 59, 59, 999_999_999).is_ok());
    }

    #[test]
    fn local_nanoseconds_round_trip() {
        let dt = IsoDateTime::new(
            IsoDate::new_unchecked(1969, 12, 31),
            IsoTime::new_unchecked(23, 59, 59, 1),
        );
        let ns = dt.to_local_nanoseconds();
        assert_eq!(ns, -999_999_999);
        assert_eq!(IsoDateTime::from_local_nanoseconds(ns), Ok(dt));
    }
}
