//! This module implements `LocalTime` and any directly related algorithms.

use alloc::format;
use core::str::FromStr;

use writeable::Writeable;

use crate::{
    builtins::core::Duration,
    iso::IsoTime,
    options::Unit,
    parsers::{self, FormattableTime, Precision},
    TemporalError, TemporalResult, NS_PER_DAY, NS_PER_SECOND,
};

/// A time of day without a date or zone, with nanosecond precision.
///
/// Arithmetic on a `LocalTime` is clock arithmetic: it wraps around
/// midnight.
///
/// ```rust
/// use tempora::LocalTime;
///
/// let time: LocalTime = "23:30".parse().unwrap();
/// assert_eq!(time.plus_hours(1).to_string(), "00:30");
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    pub(crate) iso: IsoTime,
}

// ==== Private API ====

impl LocalTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoTime) -> Self {
        Self { iso }
    }

    /// Adds nanoseconds, returning the days carried past midnight.
    pub(crate) fn add_nanoseconds_with_carry(&self, nanoseconds: i128) -> (i128, Self) {
        let (days, iso) = self.iso.add_nanoseconds(nanoseconds);
        (days, Self::new_unchecked(iso))
    }

    pub(crate) fn to_formattable(self, precision: Precision) -> FormattableTime {
        FormattableTime {
            hour: self.iso.hour,
            minute: self.iso.minute,
            second: self.iso.second,
            nanosecond: self.iso.nanosecond,
            precision,
        }
    }
}

// ==== Public API ====

impl LocalTime {
    /// `00:00`
    pub const MIDNIGHT: Self = Self::new_unchecked(IsoTime::new_unchecked(0, 0, 0, 0));
    /// `12:00`
    pub const NOON: Self = Self::new_unchecked(IsoTime::new_unchecked(12, 0, 0, 0));

    /// Creates a time, failing with an `InvalidTime` error when a field is
    /// out of range.
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> TemporalResult<Self> {
        IsoTime::try_new(hour, minute, second, nanosecond).map(Self::new_unchecked)
    }

    pub fn from_nanosecond_of_day(nanoseconds: i64) -> TemporalResult<Self> {
        if !(0..NS_PER_DAY).contains(&nanoseconds) {
            return Err(TemporalError::invalid_time().with_message(format!(
                "nanosecond of day {nanoseconds} is outside of the range 0..{NS_PER_DAY}"
            )));
        }
        Ok(Self::new_unchecked(IsoTime::from_nanosecond_of_day(
            nanoseconds,
        )))
    }

    pub fn from_second_of_day(seconds: i64) -> TemporalResult<Self> {
        let nanoseconds = seconds.checked_mul(NS_PER_SECOND).ok_or_else(|| {
            TemporalError::invalid_time()
                .with_message(format!("second of day {seconds} is out of range"))
        })?;
        Self::from_nanosecond_of_day(nanoseconds)
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.iso.nanosecond
    }

    #[inline]
    #[must_use]
    pub const fn to_second_of_day(&self) -> i64 {
        self.iso.to_second_of_day()
    }

    #[inline]
    #[must_use]
    pub const fn to_nanosecond_of_day(&self) -> i64 {
        self.iso.to_nanosecond_of_day()
    }

    #[must_use]
    pub fn plus_hours(&self, hours: i64) -> Self {
        self.plus_nanoseconds(i128::from(hours) * 3_600 * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        self.plus_nanoseconds(i128::from(minutes) * 60 * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        self.plus_nanoseconds(i128::from(seconds) * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn plus_nanoseconds(&self, nanoseconds: i128) -> Self {
        self.add_nanoseconds_with_carry(nanoseconds).1
    }

    #[must_use]
    pub fn minus_hours(&self, hours: i64) -> Self {
        self.plus_nanoseconds(-i128::from(hours) * 3_600 * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        self.plus_nanoseconds(-i128::from(minutes) * 60 * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn minus_seconds(&self, seconds: i64) -> Self {
        self.plus_nanoseconds(-i128::from(seconds) * i128::from(NS_PER_SECOND))
    }

    #[must_use]
    pub fn minus_nanoseconds(&self, nanoseconds: i128) -> Self {
        self.plus_nanoseconds(-nanoseconds)
    }

    /// Adds a duration, wrapping around midnight.
    #[must_use]
    pub fn plus_duration(&self, duration: &Duration) -> Self {
        self.plus_nanoseconds(duration.to_nanos())
    }

    /// Subtracts a duration, wrapping around midnight.
    #[must_use]
    pub fn minus_duration(&self, duration: &Duration) -> Self {
        self.plus_nanoseconds(-duration.to_nanos())
    }

    /// Returns the whole number of `unit` from this time until `other`,
    /// truncated toward zero. Only units of at most an hour are supported.
    pub fn until(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        let unit_nanoseconds = match unit.as_nanoseconds() {
            Some(nanoseconds) if unit.is_time_unit() => nanoseconds,
            _ => {
                return Err(TemporalError::range()
                    .with_message(format!("Unsupported unit for a time: {unit}")))
            }
        };
        Ok((other.to_nanosecond_of_day() - self.to_nanosecond_of_day()) / unit_nanoseconds)
    }

    /// Returns the exact time from this time until `other`, which is
    /// negative when `other` is earlier in the day.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        Duration::from_nanos(other.to_nanosecond_of_day() - self.to_nanosecond_of_day())
    }

    /// Returns this time with every field finer than `unit` set to zero.
    ///
    /// `Day` truncates to midnight. Larger units are an error.
    pub fn truncated_to(&self, unit: Unit) -> TemporalResult<Self> {
        let Some(unit_nanoseconds) = unit.as_nanoseconds() else {
            return Err(TemporalError::range()
                .with_message(format!("Unit is too large to truncate a time: {unit}")));
        };
        let nanoseconds = self.to_nanosecond_of_day();
        Ok(Self::new_unchecked(IsoTime::from_nanosecond_of_day(
            nanoseconds - nanoseconds % unit_nanoseconds,
        )))
    }
}

// ==== Trait impls ====

impl core::fmt::Display for LocalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable(Precision::Auto).write_to(f)
    }
}

impl FromStr for LocalTime {
    type Err = TemporalError;

    /// Parses `HH:mm[:ss[.fffffffff]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_time(s).map(Self::new_unchecked)
    }
}
