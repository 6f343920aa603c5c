//! This module implements `LocalDateTime` and any directly related algorithms.

use alloc::format;
use core::str::FromStr;

use tempora_provider::provider::ZoneRulesProvider;
use writeable::Writeable;

use crate::{
    builtins::core::{
        checked_neg, Duration, LocalDate, LocalTime, OffsetDateTime, Period, ZoneId, ZoneOffset,
        ZonedDateTime,
    },
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{Disambiguation, Unit},
    parsers::{self, FormattableIxdtf, Precision},
    TemporalError, TemporalResult, NS_PER_SECOND,
};

/// A date and time of day without a zone, such as `2014-04-28T21:45:50`.
///
/// ```rust
/// use tempora::{LocalDateTime, Unit};
///
/// let start: LocalDateTime = "2014-04-15T09:20:30".parse().unwrap();
/// let end: LocalDateTime = "2015-06-18T11:45:50".parse().unwrap();
/// assert_eq!(start.until(&end, Unit::Month).unwrap(), 14);
/// assert_eq!(start.until(&end, Unit::Hour).unwrap(), 10_298);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    pub(crate) iso: IsoDateTime,
}

// ==== Private API ====

impl LocalDateTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDateTime) -> Self {
        Self { iso }
    }

    pub(crate) fn from_local_nanoseconds(nanoseconds: i128) -> TemporalResult<Self> {
        IsoDateTime::from_local_nanoseconds(nanoseconds).map(Self::new_unchecked)
    }

    /// Adds exact nanoseconds, carrying across days.
    pub(crate) fn add_nanoseconds(&self, nanoseconds: i128) -> TemporalResult<Self> {
        self.iso.add_nanoseconds(nanoseconds).map(Self::new_unchecked)
    }

    fn with_date(&self, date: IsoDate) -> Self {
        Self::new_unchecked(IsoDateTime::new(date, self.iso.time))
    }

    /// The difference in whole `unit`s, as computed by `until`.
    pub(crate) fn difference(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        if unit.is_date_unit() {
            let mut end = other.date();
            if end.iso > self.iso.date && other.iso.time < self.iso.time {
                end = end.minus_days(1)?;
            } else if end.iso < self.iso.date && other.iso.time > self.iso.time {
                end = end.plus_days(1)?;
            }
            return self.date().until(&end, unit);
        }
        let difference = other.iso.to_local_nanoseconds() - self.iso.to_local_nanoseconds();
        divide_by_unit(difference, unit)
    }

    pub(crate) fn to_formattable(self) -> FormattableIxdtf<'static> {
        FormattableIxdtf {
            date: Some(self.date().to_formattable()),
            time: Some(self.time().to_formattable(Precision::Auto)),
            offset: None,
            zone: None,
        }
    }
}

/// Divides nanoseconds into whole time units, truncating toward zero.
pub(crate) fn divide_by_unit(nanoseconds: i128, unit: Unit) -> TemporalResult<i64> {
    let unit_nanoseconds = match unit.as_nanoseconds() {
        Some(unit_nanoseconds) if unit.is_time_unit() => unit_nanoseconds,
        _ => {
            return Err(TemporalError::range()
                .with_message(format!("Unsupported unit for an exact difference: {unit}")))
        }
    };
    i64::try_from(nanoseconds / i128::from(unit_nanoseconds)).map_err(|_| {
        TemporalError::range().with_message(format!("Difference in {unit}s overflows"))
    })
}

// ==== Public API ====

impl LocalDateTime {
    #[inline]
    #[must_use]
    pub const fn new(date: LocalDate, time: LocalTime) -> Self {
        Self::new_unchecked(IsoDateTime::new(date.iso, time.iso))
    }

    /// Creates a date-time from its fields, validating each of them.
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> TemporalResult<Self> {
        let date = IsoDate::try_new(year, month, day)?;
        let time = IsoTime::try_new(hour, minute, second, nanosecond)?;
        Ok(Self::new_unchecked(IsoDateTime::new(date, time)))
    }

    /// Creates the local date-time of an instant, given as seconds since
    /// the epoch and nanoseconds, seen at `offset`.
    pub fn from_epoch_second(
        seconds: i64,
        nanosecond: u32,
        offset: ZoneOffset,
    ) -> TemporalResult<Self> {
        if i64::from(nanosecond) >= NS_PER_SECOND {
            return Err(TemporalError::invalid_time().with_message(format!(
                "nanosecond {nanosecond} is outside of the range 0..=999999999"
            )));
        }
        let local_seconds = i128::from(seconds) + i128::from(offset.total_seconds());
        Self::from_local_nanoseconds(
            local_seconds * i128::from(NS_PER_SECOND) + i128::from(nanosecond),
        )
    }

    /// Returns the seconds since the epoch of this date-time seen at
    /// `offset`.
    #[inline]
    #[must_use]
    pub const fn to_epoch_second(&self, offset: ZoneOffset) -> i64 {
        self.iso.to_local_seconds() - offset.total_seconds() as i64
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> LocalDate {
        LocalDate::new_unchecked(self.iso.date)
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> LocalTime {
        LocalTime::new_unchecked(self.iso.time)
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.date.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.date.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.date.day
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.time.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.iso.time.nanosecond
    }

    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        self.iso.date.add_years(years).map(|d| self.with_date(d))
    }

    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        self.iso.date.add_months(months).map(|d| self.with_date(d))
    }

    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.date().plus_weeks(weeks).map(|d| self.with_date(d.iso))
    }

    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        self.iso.date.add_days(days).map(|d| self.with_date(d))
    }

    pub fn plus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(i128::from(hours) * 3_600 * i128::from(NS_PER_SECOND))
    }

    pub fn plus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(i128::from(minutes) * 60 * i128::from(NS_PER_SECOND))
    }

    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(i128::from(seconds) * i128::from(NS_PER_SECOND))
    }

    pub fn plus_nanoseconds(&self, nanoseconds: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(i128::from(nanoseconds))
    }

    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        self.plus_years(checked_neg(years)?)
    }

    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        self.plus_months(checked_neg(months)?)
    }

    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.plus_weeks(checked_neg(weeks)?)
    }

    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        self.plus_days(checked_neg(days)?)
    }

    pub fn minus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(-i128::from(hours) * 3_600 * i128::from(NS_PER_SECOND))
    }

    pub fn minus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(-i128::from(minutes) * 60 * i128::from(NS_PER_SECOND))
    }

    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(-i128::from(seconds) * i128::from(NS_PER_SECOND))
    }

    pub fn minus_nanoseconds(&self, nanoseconds: i64) -> TemporalResult<Self> {
        self.add_nanoseconds(-i128::from(nanoseconds))
    }

    /// Adds a period to the date, leaving the time of day unchanged.
    pub fn plus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.date().plus_period(period).map(|d| self.with_date(d.iso))
    }

    pub fn minus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.date().minus_period(period).map(|d| self.with_date(d.iso))
    }

    /// Adds an exact duration, which may cross any date boundary.
    pub fn plus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        self.add_nanoseconds(duration.to_nanos())
    }

    pub fn minus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        self.add_nanoseconds(-duration.to_nanos())
    }

    /// Returns the whole number of `unit` from this date-time until
    /// `other`, truncated toward zero.
    ///
    /// For date units, an incomplete last day is not counted: from
    /// `2014-04-15T12:00` until `2014-04-16T11:00` is 0 days.
    pub fn until(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        self.difference(other, unit)
    }

    /// Returns the exact time from this date-time until `other`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        Duration::between(self, other)
    }

    /// Returns this date-time with every field finer than `unit` set to
    /// zero. Units larger than a day are an error.
    pub fn truncated_to(&self, unit: Unit) -> TemporalResult<Self> {
        let time = self.time().truncated_to(unit)?;
        Ok(Self::new(self.date(), time))
    }

    /// Combines this date-time with a fixed offset.
    #[inline]
    #[must_use]
    pub const fn at_offset(&self, offset: ZoneOffset) -> OffsetDateTime {
        OffsetDateTime::new(*self, offset)
    }

    /// Resolves this date-time in `zone` with the `Compatible` policy.
    pub fn at_zone_with_provider(
        &self,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZonedDateTime> {
        ZonedDateTime::try_new_with_provider(*self, zone, Disambiguation::Compatible, provider)
    }
}

// ==== Trait impls ====

impl core::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable().write_to(f)
    }
}

impl FromStr for LocalDateTime {
    type Err = TemporalError;

    /// Parses `uuuu-MM-dd'T'HH:mm[:ss[.fffffffff]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_date_time(s).map(Self::new_unchecked)
    }
}
