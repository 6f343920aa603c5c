//! This module implements `Duration`, an exact amount of elapsed time.

use alloc::format;
use core::str::FromStr;

use ixdtf::{
    parsers::IsoDurationParser,
    records::{Fraction, TimeDurationRecord},
};
use writeable::Writeable;

use crate::{
    builtins::core::LocalDateTime,
    parsers::FormattableDuration,
    Sign, TemporalError, TemporalResult, NS_PER_DAY, NS_PER_SECOND,
};

const NS_PER_MINUTE: i128 = 60 * NS_PER_SECOND as i128;
const NS_PER_HOUR: i128 = 60 * NS_PER_MINUTE;

fn overflow() -> TemporalError {
    TemporalError::range().with_message("Duration exceeds the supported range")
}

/// An exact amount of time, stored as seconds and a non-negative
/// nanosecond adjustment.
///
/// A `Duration` of -0.5 seconds is stored as -1 seconds and 500,000,000
/// nanoseconds, so the sign is always carried by the seconds.
///
/// ```rust
/// use tempora::Duration;
///
/// let duration: Duration = "PT49H5M5S".parse().unwrap();
/// assert_eq!(duration.to_days(), 2);
/// assert_eq!(duration.to_hours(), 49);
/// assert_eq!(duration.seconds(), 176_705);
/// assert_eq!(duration.to_string(), "PT49H5M5S");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
    nanoseconds: u32,
}

// ==== Constructors ====

impl Duration {
    /// A duration of zero length.
    pub const ZERO: Self = Self {
        seconds: 0,
        nanoseconds: 0,
    };

    /// Creates a duration from seconds and a nanosecond adjustment of any
    /// sign.
    pub fn new(seconds: i64, nano_adjustment: i64) -> TemporalResult<Self> {
        let seconds = seconds
            .checked_add(nano_adjustment.div_euclid(NS_PER_SECOND))
            .ok_or_else(overflow)?;
        Ok(Self {
            seconds,
            nanoseconds: nano_adjustment.rem_euclid(NS_PER_SECOND) as u32,
        })
    }

    pub(crate) fn from_total_nanoseconds(nanoseconds: i128) -> TemporalResult<Self> {
        let seconds = i64::try_from(nanoseconds.div_euclid(i128::from(NS_PER_SECOND)))
            .map_err(|_| overflow())?;
        Ok(Self {
            seconds,
            nanoseconds: nanoseconds.rem_euclid(i128::from(NS_PER_SECOND)) as u32,
        })
    }

    /// Creates a duration of 24 hour days.
    pub fn from_days(days: i64) -> TemporalResult<Self> {
        days.checked_mul(86_400)
            .map(Self::from_seconds)
            .ok_or_else(overflow)
    }

    pub fn from_hours(hours: i64) -> TemporalResult<Self> {
        hours
            .checked_mul(3_600)
            .map(Self::from_seconds)
            .ok_or_else(overflow)
    }

    pub fn from_minutes(minutes: i64) -> TemporalResult<Self> {
        minutes
            .checked_mul(60)
            .map(Self::from_seconds)
            .ok_or_else(overflow)
    }

    #[inline]
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanoseconds: millis.rem_euclid(1_000) as u32 * 1_000_000,
        }
    }

    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            seconds: nanos.div_euclid(NS_PER_SECOND),
            nanoseconds: nanos.rem_euclid(NS_PER_SECOND) as u32,
        }
    }

    /// Creates a duration from the difference of two supported date-times
    /// or instants, which always spans less than `i64::MAX` seconds.
    pub(crate) const fn from_bounded_nanoseconds(nanoseconds: i128) -> Self {
        Self {
            seconds: nanoseconds.div_euclid(NS_PER_SECOND as i128) as i64,
            nanoseconds: nanoseconds.rem_euclid(NS_PER_SECOND as i128) as u32,
        }
    }

    /// The exact time between two local date-times, negative when `end` is
    /// before `start`.
    #[must_use]
    pub fn between(start: &LocalDateTime, end: &LocalDateTime) -> Self {
        Self::from_bounded_nanoseconds(
            end.iso.to_local_nanoseconds() - start.iso.to_local_nanoseconds(),
        )
    }
}

// ==== Accessors and conversions ====

impl Duration {
    /// The whole seconds of this duration, rounded toward negative infinity.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// The nanosecond adjustment, always in `0..1_000_000_000`.
    #[inline]
    #[must_use]
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanoseconds
    }

    /// The total length in nanoseconds.
    #[inline]
    #[must_use]
    pub const fn to_nanos(&self) -> i128 {
        self.seconds as i128 * NS_PER_SECOND as i128 + self.nanoseconds as i128
    }

    /// The number of whole milliseconds, truncated toward zero.
    ///
    /// Seconds span all of `i64`, so unlike the coarser units the count of
    /// milliseconds may not fit in an `i64`.
    #[inline]
    #[must_use]
    pub const fn to_millis(&self) -> i128 {
        self.to_nanos() / 1_000_000
    }

    /// The number of whole minutes, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_minutes(&self) -> i64 {
        (self.to_nanos() / NS_PER_MINUTE) as i64
    }

    /// The number of whole hours, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_hours(&self) -> i64 {
        (self.to_nanos() / NS_PER_HOUR) as i64
    }

    /// The number of whole 24 hour days, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_days(&self) -> i64 {
        (self.to_nanos() / NS_PER_DAY as i128) as i64
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from_ordering(self.cmp(&Self::ZERO))
    }
}

// ==== Arithmetic ====

impl Duration {
    pub fn checked_add(&self, other: &Self) -> TemporalResult<Self> {
        Self::from_total_nanoseconds(self.to_nanos() + other.to_nanos())
    }

    pub fn checked_sub(&self, other: &Self) -> TemporalResult<Self> {
        Self::from_total_nanoseconds(self.to_nanos() - other.to_nanos())
    }

    /// Returns the duration with the opposite sign.
    pub fn negated(&self) -> TemporalResult<Self> {
        Self::from_total_nanoseconds(-self.to_nanos())
    }

    /// Returns the length of this duration as a positive duration.
    pub fn abs(&self) -> TemporalResult<Self> {
        if self.is_negative() {
            self.negated()
        } else {
            Ok(*self)
        }
    }

    /// Multiplies the duration by `scalar`.
    pub fn checked_mul(&self, scalar: i64) -> TemporalResult<Self> {
        let nanoseconds = self
            .to_nanos()
            .checked_mul(i128::from(scalar))
            .ok_or_else(overflow)?;
        Self::from_total_nanoseconds(nanoseconds)
    }
}

// ==== Formatting and parsing ====

impl Duration {
    pub(crate) fn to_formattable(self) -> FormattableDuration {
        let total = self.to_nanos();
        let sign = Sign::from_ordering(total.cmp(&0));
        let abs = total.unsigned_abs();
        let seconds = abs / NS_PER_SECOND as u128;
        FormattableDuration {
            sign,
            hours: (seconds / 3_600) as u64,
            minutes: (seconds % 3_600 / 60) as u8,
            seconds: (seconds % 60) as u8,
            nanoseconds: (abs % NS_PER_SECOND as u128) as u32,
        }
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable().write_to(f)
    }
}

impl FromStr for Duration {
    type Err = TemporalError;

    /// Parses `[-]PnDTnHnMn[.f]S`. Fractions are allowed on the smallest
    /// time component only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: &str| {
            TemporalError::parse()
                .with_message(format!("Text '{s}' could not be parsed: {reason}"))
        };
        let record = IsoDurationParser::from_str(s)
            .parse()
            .map_err(|e| parse_error(&format!("{e:?}")))?;
        let fraction_nanoseconds = |fraction: Option<Fraction>| match fraction {
            Some(fraction) => fraction
                .to_nanoseconds()
                .map(i128::from)
                .ok_or_else(|| parse_error("fraction exceeds nanosecond precision")),
            None => Ok(0),
        };

        let mut total: i128 = 0;
        if let Some(date) = record.date {
            if date.years != 0 || date.months != 0 || date.weeks != 0 {
                return Err(parse_error(
                    "years, months and weeks are not exact amounts of time",
                ));
            }
            total += i128::from(date.days) * i128::from(NS_PER_DAY);
        }

        total += match record.time {
            Some(TimeDurationRecord::Hours { hours, fraction }) => {
                let fraction = fraction_nanoseconds(fraction)?;
                i128::from(hours) * NS_PER_HOUR + fraction * 3_600
            }
            Some(TimeDurationRecord::Minutes {
                hours,
                minutes,
                fraction,
            }) => {
                let fraction = fraction_nanoseconds(fraction)?;
                i128::from(hours) * NS_PER_HOUR + i128::from(minutes) * NS_PER_MINUTE + fraction * 60
            }
            Some(TimeDurationRecord::Seconds {
                hours,
                minutes,
                seconds,
                fraction,
            }) => {
                let fraction = fraction_nanoseconds(fraction)?;
                i128::from(hours) * NS_PER_HOUR
                    + i128::from(minutes) * NS_PER_MINUTE
                    + i128::from(seconds) * i128::from(NS_PER_SECOND)
                    + fraction
            }
            None => 0,
        };

        let total = match record.sign as i8 {
            -1 => -total,
            _ => total,
        };
        Self::from_total_nanoseconds(total).map_err(|e| parse_error(e.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    fn local(text: &str) -> LocalDateTime {
        text.parse().unwrap()
    }

    #[test]
    fn between_local_date_times() {
        let duration = Duration::between(
            &local("2014-04-30T21:25:00"),
            &local("2014-05-02T22:30:05"),
        );
        assert_eq!(duration.to_days(), 2);
        assert_eq!(duration.to_hours(), 49);
        assert_eq!(duration.to_minutes(), 2_945);
        assert_eq!(duration.seconds(), 176_705);
        assert_eq!(duration.to_millis(), 176_705_000);
        assert_eq!(duration.to_string(), "PT49H5M5S");

        let back = Duration::between(
            &local("2014-05-02T22:30:05"),
            &local("2014-04-30T21:25:00"),
        );
        assert_eq!(back.to_hours(), -49);
        assert_eq!(back.to_string(), "-PT49H5M5S");
    }

    #[test]
    fn normalization() {
        let duration = Duration::new(0, -500_000_000).unwrap();
        assert_eq!(duration.seconds(), -1);
        assert_eq!(duration.subsec_nanos(), 500_000_000);
        assert_eq!(duration.to_millis(), -500);
        assert_eq!(duration.to_string(), "-PT0.5S");
        assert!(duration.is_negative());
        assert_eq!(duration.sign(), Sign::Negative);

        assert_eq!(Duration::from_millis(-1_500).to_nanos(), -1_500_000_000);
        assert_eq!(Duration::new(1, 2_000_000_001).unwrap().seconds(), 3);
        assert!(Duration::new(i64::MAX, NS_PER_SECOND).is_err());
        assert!(Duration::from_days(i64::MAX / 1_000).is_err());
    }

    #[test]
    fn arithmetic() {
        let hour = Duration::from_hours(1).unwrap();
        let half_second = Duration::from_millis(500);
        let sum = hour.checked_add(&half_second).unwrap();
        assert_eq!(sum.to_string(), "PT1H0.5S");
        assert_eq!(sum.checked_sub(&hour).unwrap(), half_second);
        assert_eq!(sum.negated().unwrap().abs().unwrap(), sum);
        assert_eq!(hour.checked_mul(3).unwrap().to_hours(), 3);
        assert!(Duration::ZERO.is_zero());
        assert_eq!(Duration::ZERO.sign(), Sign::Zero);
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert!(Duration::from_seconds(i64::MIN).negated().is_err());
    }

    #[test]
    fn parsing() {
        let duration: Duration = "PT1H5M5S".parse().unwrap();
        assert_eq!(duration.seconds(), 3_905);
        let duration: Duration = "-P2DT3H".parse().unwrap();
        assert_eq!(duration.to_hours(), -51);
        let duration: Duration = "PT0.25H".parse().unwrap();
        assert_eq!(duration.to_minutes(), 15);
        let duration: Duration = "PT1.000000001S".parse().unwrap();
        assert_eq!(duration.subsec_nanos(), 1);

        for text in ["P1Y", "P1M", "P1W", "PT", "1H", "P1DT"] {
            assert_eq!(
                text.parse::<Duration>().map_err(|e| e.kind()),
                Err(ErrorKind::Parse),
                "{text}"
            );
        }
    }

    #[test]
    fn fractions_beyond_nanoseconds() {
        for text in ["PT1.0000000001S", "PT0.1234567891S", "PT0.0000000001M", "-PT1.1234567890H"] {
            let err = text.parse::<Duration>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
            assert!(err.message().contains("nanosecond precision"), "{text}");
        }
        let duration: Duration = "PT0.123456789S".parse().unwrap();
        assert_eq!(duration.subsec_nanos(), 123_456_789);
    }

    #[test]
    fn millis_beyond_i64() {
        let longest = Duration::from_seconds(i64::MAX);
        assert_eq!(longest.to_millis(), i128::from(i64::MAX) * 1_000);
        assert_eq!(longest.to_days(), i64::MAX / 86_400);
        assert_eq!(
            Duration::from_seconds(i64::MIN).to_millis(),
            i128::from(i64::MIN) * 1_000
        );
    }
}
