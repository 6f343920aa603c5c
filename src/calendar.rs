//! Proleptic Gregorian calendar math.
//!
//! Every date in `tempora` is validated here. The conversions between
//! fields and epoch days are the integer equations in
//! [`tempora_provider::utils`], counting days from 1970-01-01.

use alloc::format;
use core::fmt;

use tempora_provider::utils;

use crate::{TemporalError, TemporalResult};

/// The smallest supported year.
pub const MIN_YEAR: i32 = -999_999;
/// The largest supported year.
pub const MAX_YEAR: i32 = 999_999;

/// The epoch day of `MIN_YEAR-01-01`.
pub(crate) const MIN_EPOCH_DAY: i64 = utils::epoch_days_from_gregorian_date(MIN_YEAR, 1, 1);
/// The epoch day of `MAX_YEAR-12-31`.
pub(crate) const MAX_EPOCH_DAY: i64 = utils::epoch_days_from_gregorian_date(MAX_YEAR, 12, 31);

/// Returns whether `year` is a leap year: divisible by 4, and not by 100
/// unless also by 400.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    utils::is_leap(year)
}

/// Returns the number of days in `month` of `year`.
pub fn try_days_in_month(year: i32, month: u8) -> TemporalResult<u8> {
    if !(1..=12).contains(&month) {
        return Err(TemporalError::invalid_date()
            .with_message(format!("month {month} is outside of the range 1..=12")));
    }
    Ok(utils::iso_days_in_month(year, month))
}

/// Infallible variant for months that are already validated.
#[inline]
pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    utils::iso_days_in_month(year, month)
}

/// Returns the number of days in `year`.
#[inline]
#[must_use]
pub const fn days_in_year(year: i32) -> u16 {
    utils::days_in_year(year)
}

/// Checks that `year`, `month` and `day` name a date on the calendar.
pub fn validate_date(year: i32, month: u8, day: u8) -> TemporalResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TemporalError::invalid_date().with_message(format!(
            "year {year} is outside of the range {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    let days = try_days_in_month(year, month)?;
    if day == 0 || day > days {
        return Err(TemporalError::invalid_date().with_message(format!(
            "day {day} is invalid for {year}-{month:02}, which has {days} days"
        )));
    }
    Ok(())
}

/// Returns the days since 1970-01-01 of a valid date.
pub fn to_epoch_day(year: i32, month: u8, day: u8) -> TemporalResult<i64> {
    validate_date(year, month, day)?;
    Ok(utils::epoch_days_from_gregorian_date(year, month, day))
}

/// Returns the `(year, month, day)` of days since 1970-01-01.
pub fn from_epoch_day(epoch_day: i64) -> TemporalResult<(i32, u8, u8)> {
    if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
        return Err(TemporalError::range()
            .with_message(format!("epoch day {epoch_day} is outside of the supported range")));
    }
    Ok(utils::ymd_from_epoch_days(epoch_day))
}

/// Returns the day of the week of days since 1970-01-01.
#[must_use]
pub const fn day_of_week(epoch_day: i64) -> Weekday {
    match utils::weekday_from_epoch_days(epoch_day) {
        0 => Weekday::Sunday,
        1 => Weekday::Monday,
        2 => Weekday::Tuesday,
        3 => Weekday::Wednesday,
        4 => Weekday::Thursday,
        5 => Weekday::Friday,
        _ => Weekday::Saturday,
    }
}

/// A day of the week, numbered from Monday (1) to Sunday (7) as in
/// ISO-8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// The ISO-8601 number of the day, Monday is 1.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2014));
        assert!(is_leap_year(-4));
        assert_eq!(days_in_year(2016), 366);
        assert_eq!(days_in_year(2015), 365);
    }

    #[test]
    fn days_in_months() {
        assert_eq!(try_days_in_month(2016, 2), Ok(29));
        assert_eq!(try_days_in_month(2015, 2), Ok(28));
        assert_eq!(try_days_in_month(2015, 4), Ok(30));
        assert_eq!(try_days_in_month(2015, 12), Ok(31));
        assert_eq!(
            try_days_in_month(2015, 13).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidDate)
        );
    }

    #[test]
    fn invalid_dates() {
        for year in [1900, 2000, 2014, 2016] {
            let err = validate_date(year, 2, 30).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDate);
        }
        assert!(validate_date(2014, 0, 1).is_err());
        assert!(validate_date(2014, 1, 0).is_err());
        assert!(validate_date(2015, 2, 29).is_err());
        assert!(validate_date(MAX_YEAR + 1, 1, 1).is_err());
        assert!(validate_date(2016, 2, 29).is_ok());
    }

    #[test]
    fn epoch_day_round_trip() {
        assert_eq!(to_epoch_day(1970, 1, 1), Ok(0));
        assert_eq!(to_epoch_day(2014, 4, 30), Ok(16_190));
        for epoch_day in (-800_000..800_000).step_by(997) {
            let (y, m, d) = from_epoch_day(epoch_day).unwrap();
            assert_eq!(to_epoch_day(y, m, d), Ok(epoch_day));
        }
        let (y, m, d) = from_epoch_day(MIN_EPOCH_DAY).unwrap();
        assert_eq!((y, m, d), (MIN_YEAR, 1, 1));
        let (y, m, d) = from_epoch_day(MAX_EPOCH_DAY).unwrap();
        assert_eq!((y, m, d), (MAX_YEAR, 12, 31));
        assert!(from_epoch_day(MAX_EPOCH_DAY + 1).is_err());
    }

    #[test]
    fn weekdays() {
        assert_eq!(day_of_week(0), Weekday::Thursday);
        // 2014-04-28
        assert_eq!(day_of_week(16_188), Weekday::Monday);
        assert_eq!(day_of_week(-1), Weekday::Wednesday);
        assert_eq!(Weekday::Sunday.number(), 7);
    }
}
