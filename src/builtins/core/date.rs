//! This module implements `LocalDate` and any directly related algorithms.

use alloc::format;
use core::str::FromStr;

use writeable::Writeable;

use crate::{
    builtins::core::{checked_neg, LocalDateTime, LocalTime, Period},
    calendar::{self, Weekday},
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::Unit,
    parsers::{self, FormattableDate},
    TemporalError, TemporalResult,
};

/// A date without a time or zone, such as `2014-04-28`, on the proleptic
/// Gregorian calendar.
///
/// ```rust
/// use tempora::{LocalDate, Weekday};
///
/// let date = LocalDate::try_new(2014, 1, 31).unwrap();
/// let next = date.plus_months(1).unwrap();
/// assert_eq!(next.to_string(), "2014-02-28");
/// assert_eq!(next.day_of_week(), Weekday::Friday);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate {
    pub(crate) iso: IsoDate,
}

// ==== Private API ====

impl LocalDate {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }
}

// ==== Public API ====

impl LocalDate {
    /// Creates a date, failing with an `InvalidDate` error when the fields
    /// do not name a day on the calendar.
    pub fn try_new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        IsoDate::try_new(year, month, day).map(Self::new_unchecked)
    }

    /// Creates a date from days since 1970-01-01.
    pub fn from_epoch_day(epoch_day: i64) -> TemporalResult<Self> {
        IsoDate::from_epoch_day(epoch_day).map(Self::new_unchecked)
    }

    /// Parses a date from UTF-8 bytes.
    pub fn from_utf8(s: &[u8]) -> TemporalResult<Self> {
        let s = core::str::from_utf8(s)
            .map_err(|e| TemporalError::parse().with_message(format!("{e}")))?;
        Self::from_str(s)
    }

    /// Returns the days since 1970-01-01.
    #[inline]
    #[must_use]
    pub const fn to_epoch_day(&self) -> i64 {
        self.iso.to_epoch_day()
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.day
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> Weekday {
        calendar::day_of_week(self.to_epoch_day())
    }

    /// Returns the day of the year, 1 for January 1st.
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        let first = IsoDate::new_unchecked(self.iso.year, 1, 1);
        (self.to_epoch_day() - first.to_epoch_day()) as u16 + 1
    }

    #[inline]
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.iso.year)
    }

    #[inline]
    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        calendar::days_in_month(self.iso.year, self.iso.month)
    }

    #[inline]
    #[must_use]
    pub const fn days_in_year(&self) -> u16 {
        calendar::days_in_year(self.iso.year)
    }

    /// Returns this date with the year replaced. The day is not clamped.
    pub fn with_year(&self, year: i32) -> TemporalResult<Self> {
        Self::try_new(year, self.iso.month, self.iso.day)
    }

    /// Returns this date with the month replaced. The day is not clamped.
    pub fn with_month(&self, month: u8) -> TemporalResult<Self> {
        Self::try_new(self.iso.year, month, self.iso.day)
    }

    pub fn with_day(&self, day: u8) -> TemporalResult<Self> {
        Self::try_new(self.iso.year, self.iso.month, day)
    }

    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        self.iso.add_days(days).map(Self::new_unchecked)
    }

    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        let days = weeks.checked_mul(7).ok_or_else(|| {
            TemporalError::range().with_message(format!("{weeks} weeks overflow a day count"))
        })?;
        self.plus_days(days)
    }

    /// Adds months, clamping the day to the last day of the resulting
    /// month.
    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        self.iso.add_months(months).map(Self::new_unchecked)
    }

    /// Adds years, so February 29th becomes February 28th in a common year.
    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        self.iso.add_years(years).map(Self::new_unchecked)
    }

    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        self.plus_days(checked_neg(days)?)
    }

    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.plus_weeks(checked_neg(weeks)?)
    }

    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        self.plus_months(checked_neg(months)?)
    }

    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        self.plus_years(checked_neg(years)?)
    }

    /// Adds a period: years, then months, then days.
    pub fn plus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.iso
            .add_period(
                i64::from(period.years()),
                i64::from(period.months()),
                i64::from(period.days()),
            )
            .map(Self::new_unchecked)
    }

    /// Subtracts a period: years, then months, then days.
    pub fn minus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.iso
            .add_period(
                -i64::from(period.years()),
                -i64::from(period.months()),
                -i64::from(period.days()),
            )
            .map(Self::new_unchecked)
    }

    /// Returns the whole number of `unit` from this date until `other`,
    /// truncated toward zero.
    ///
    /// Only `Day`, `Week`, `Month` and `Year` are supported.
    pub fn until(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        let days = other.to_epoch_day() - self.to_epoch_day();
        match unit {
            Unit::Day => Ok(days),
            Unit::Week => Ok(days / 7),
            Unit::Month => Ok(self.iso.months_until(&other.iso)),
            Unit::Year => Ok(self.iso.months_until(&other.iso) / 12),
            _ => Err(TemporalError::range()
                .with_message(format!("Unsupported unit for a date: {unit}"))),
        }
    }

    /// Returns the period from this date until `other`.
    #[must_use]
    pub fn period_until(&self, other: &Self) -> Period {
        Period::between(self, other)
    }

    #[inline]
    #[must_use]
    pub const fn at_time(&self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::new(*self, time)
    }

    #[inline]
    #[must_use]
    pub const fn at_start_of_day(&self) -> LocalDateTime {
        LocalDateTime::new_unchecked(IsoDateTime::new(self.iso, IsoTime::new_unchecked(0, 0, 0, 0)))
    }

    pub(crate) fn to_formattable(self) -> FormattableDate {
        FormattableDate(self.iso.year, self.iso.month, self.iso.day)
    }
}

// ==== Trait impls ====

impl core::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable().write_to(f)
    }
}

impl FromStr for LocalDate {
    type Err = TemporalError;

    /// Parses `uuuu-MM-dd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_date(s).map(Self::new_unchecked)
    }
}
