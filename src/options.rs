//! Options that configure how an operation is completed.

use core::{fmt, str::FromStr};

use crate::{NS_PER_DAY, NS_PER_SECOND};

/// A unit of time, used to measure differences and to truncate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// The `Nanosecond` unit
    Nanosecond,
    /// The `Microsecond` unit
    Microsecond,
    /// The `Millisecond` unit
    Millisecond,
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Year` unit
    Year,
}

impl Unit {
    /// Returns the nanosecond length of a unit of at most a day, treating a
    /// day as exactly 24 hours.
    #[must_use]
    pub const fn as_nanoseconds(&self) -> Option<i64> {
        match self {
            Self::Year | Self::Month | Self::Week => None,
            Self::Day => Some(NS_PER_DAY),
            Self::Hour => Some(3600 * NS_PER_SECOND),
            Self::Minute => Some(60 * NS_PER_SECOND),
            Self::Second => Some(NS_PER_SECOND),
            Self::Millisecond => Some(1_000_000),
            Self::Microsecond => Some(1_000),
            Self::Nanosecond => Some(1),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_calendar_unit(&self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week)
    }

    /// Returns whether this unit is measured on the date, i.e. a day or larger.
    #[inline]
    #[must_use]
    pub const fn is_date_unit(&self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week | Self::Day)
    }

    #[inline]
    #[must_use]
    pub const fn is_time_unit(&self) -> bool {
        matches!(
            self,
            Self::Hour | Self::Minute | Self::Second | Self::Millisecond | Self::Microsecond | Self::Nanosecond
        )
    }
}

/// A parsing error for `Unit`
#[derive(Debug, Clone, Copy)]
pub struct ParseUnitError;

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Unit")
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "microsecond" | "microseconds" => Ok(Self::Microsecond),
            "nanosecond" | "nanoseconds" => Ok(Self::Nanosecond),
            _ => Err(ParseUnitError),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
        .fmt(f)
    }
}

/// How a local date-time maps onto the time-line when a zone's rules give
/// it zero or two offsets.
///
/// In an overlap (the clocks are set back) a local time occurs twice. In a
/// gap (the clocks are set forward) a local time does not occur at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disambiguation {
    /// In an overlap, use the offset of the earlier instant. In a gap,
    /// shift the local time forward by the length of the gap and use the
    /// offset after it.
    #[default]
    Compatible,
    /// In an overlap, use the offset of the earlier instant. In a gap,
    /// shift the local time backward by the length of the gap and use the
    /// offset before it.
    Earlier,
    /// In an overlap, use the offset of the later instant. In a gap, behave
    /// as `Compatible`.
    Later,
    /// Fail in both cases.
    Reject,
}

/// A parsing error on `Disambiguation` options.
#[derive(Debug, Clone, Copy)]
pub struct ParseDisambiguationError;

impl fmt::Display for ParseDisambiguationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid disambiguation value")
    }
}

impl FromStr for Disambiguation {
    type Err = ParseDisambiguationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compatible" => Ok(Self::Compatible),
            "earlier" => Ok(Self::Earlier),
            "later" => Ok(Self::Later),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseDisambiguationError),
        }
    }
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => "compatible",
            Self::Earlier => "earlier",
            Self::Later => "later",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn unit_strings() {
        for unit in [
            Unit::Year,
            Unit::Month,
            Unit::Week,
            Unit::Day,
            Unit::Hour,
            Unit::Minute,
            Unit::Second,
            Unit::Millisecond,
            Unit::Microsecond,
            Unit::Nanosecond,
        ] {
            assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!("minutes".parse::<Unit>().unwrap(), Unit::Minute);
        assert!("fortnight".parse::<Unit>().is_err());
    }

    #[test]
    fn unit_classes() {
        assert!(Unit::Week.is_calendar_unit());
        assert!(Unit::Day.is_date_unit());
        assert!(!Unit::Day.is_time_unit());
        assert!(Unit::Hour.is_time_unit());
        assert_eq!(Unit::Minute.as_nanoseconds(), Some(60_000_000_000));
        assert_eq!(Unit::Month.as_nanoseconds(), None);
        assert!(Unit::Year > Unit::Day);
    }

    #[test]
    fn disambiguation_default() {
        assert_eq!(Disambiguation::default(), Disambiguation::Compatible);
        assert_eq!("reject".parse::<Disambiguation>().unwrap(), Disambiguation::Reject);
    }
}
