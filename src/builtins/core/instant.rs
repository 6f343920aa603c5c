//! An implementation of `Instant`, a point on the UTC time-line.

use alloc::format;
use core::str::FromStr;

use tempora_provider::utils;
use writeable::Writeable;

use crate::{
    builtins::core::{Duration, LocalDateTime, LocalTime, OffsetDateTime, ZoneOffset},
    calendar::{MAX_EPOCH_DAY, MIN_EPOCH_DAY},
    iso::IsoTime,
    parsers::{self, FormattableDate, FormattableIxdtf, FormattableOffset, Precision},
    TemporalError, TemporalResult, NS_PER_DAY, NS_PER_SECOND,
};

/// The first nanosecond of an instant. One day of slack on either side of
/// the local range lets any local date-time be read at any offset.
const MIN_EPOCH_NANOSECONDS: i128 = (MIN_EPOCH_DAY as i128 - 1) * NS_PER_DAY as i128;
/// The last nanosecond of an instant.
const MAX_EPOCH_NANOSECONDS: i128 = (MAX_EPOCH_DAY as i128 + 2) * NS_PER_DAY as i128 - 1;

/// A point on the time-line, counted in nanoseconds from
/// 1970-01-01T00:00Z.
///
/// ```rust
/// use tempora::Instant;
///
/// let instant = Instant::from_epoch_milliseconds(1_398_735_950_500).unwrap();
/// assert_eq!(instant.epoch_seconds(), 1_398_735_950);
/// assert_eq!(instant.subsec_nanos(), 500_000_000);
/// assert_eq!(instant.to_string(), "2014-04-29T01:45:50.5Z");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    epoch_nanoseconds: i128,
}

// ==== Private API ====

impl Instant {
    /// Creates an instant from nanoseconds known to be in range.
    #[inline]
    pub(crate) const fn from_epoch_nanoseconds_unchecked(epoch_nanoseconds: i128) -> Self {
        debug_assert!(
            epoch_nanoseconds >= MIN_EPOCH_NANOSECONDS
                && epoch_nanoseconds <= MAX_EPOCH_NANOSECONDS
        );
        Self { epoch_nanoseconds }
    }

    /// The instant at which `local` is seen at `offset`.
    pub(crate) const fn from_local(local: &LocalDateTime, offset: ZoneOffset) -> Self {
        let nanoseconds = local.iso.to_local_nanoseconds()
            - offset.total_seconds() as i128 * NS_PER_SECOND as i128;
        Self::from_epoch_nanoseconds_unchecked(nanoseconds)
    }

    /// The local date-time of this instant seen at `offset`.
    pub(crate) fn to_local(self, offset: ZoneOffset) -> TemporalResult<LocalDateTime> {
        LocalDateTime::from_local_nanoseconds(
            self.epoch_nanoseconds + i128::from(offset.total_seconds()) * i128::from(NS_PER_SECOND),
        )
    }
}

// ==== Public API ====

impl Instant {
    /// 1970-01-01T00:00Z
    pub const EPOCH: Self = Self {
        epoch_nanoseconds: 0,
    };

    pub fn try_from_epoch_nanoseconds(epoch_nanoseconds: i128) -> TemporalResult<Self> {
        if !(MIN_EPOCH_NANOSECONDS..=MAX_EPOCH_NANOSECONDS).contains(&epoch_nanoseconds) {
            return Err(TemporalError::range().with_message(format!(
                "{epoch_nanoseconds} epoch nanoseconds is outside of the supported range"
            )));
        }
        Ok(Self { epoch_nanoseconds })
    }

    pub fn from_epoch_seconds(epoch_seconds: i64) -> TemporalResult<Self> {
        Self::try_from_epoch_nanoseconds(i128::from(epoch_seconds) * i128::from(NS_PER_SECOND))
    }

    pub fn from_epoch_milliseconds(epoch_milliseconds: i64) -> TemporalResult<Self> {
        Self::try_from_epoch_nanoseconds(i128::from(epoch_milliseconds) * 1_000_000)
    }

    #[inline]
    #[must_use]
    pub const fn epoch_nanoseconds(&self) -> i128 {
        self.epoch_nanoseconds
    }

    /// The whole seconds since the epoch, rounded toward negative infinity.
    #[inline]
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        self.epoch_nanoseconds.div_euclid(NS_PER_SECOND as i128) as i64
    }

    /// The whole milliseconds since the epoch, rounded toward negative
    /// infinity.
    #[inline]
    #[must_use]
    pub const fn epoch_milliseconds(&self) -> i64 {
        self.epoch_nanoseconds.div_euclid(1_000_000) as i64
    }

    /// The nanoseconds past `epoch_seconds`.
    #[inline]
    #[must_use]
    pub const fn subsec_nanos(&self) -> u32 {
        self.epoch_nanoseconds.rem_euclid(NS_PER_SECOND as i128) as u32
    }

    pub fn plus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        Self::try_from_epoch_nanoseconds(self.epoch_nanoseconds + duration.to_nanos())
    }

    pub fn minus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        Self::try_from_epoch_nanoseconds(self.epoch_nanoseconds - duration.to_nanos())
    }

    /// Returns the exact time from this instant until `other`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        Duration::from_bounded_nanoseconds(other.epoch_nanoseconds - self.epoch_nanoseconds)
    }

    /// Combines this instant with an offset.
    pub fn at_offset(&self, offset: ZoneOffset) -> TemporalResult<OffsetDateTime> {
        OffsetDateTime::from_instant(*self, offset)
    }

    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

// ==== Trait impls ====

impl core::fmt::Display for Instant {
    /// Writes the instant in UTC, always including seconds.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let epoch_day = self.epoch_nanoseconds.div_euclid(NS_PER_DAY as i128) as i64;
        let nanosecond_of_day = self.epoch_nanoseconds.rem_euclid(NS_PER_DAY as i128) as i64;
        let (year, month, day) = utils::ymd_from_epoch_days(epoch_day);
        let time = LocalTime::new_unchecked(IsoTime::from_nanosecond_of_day(nanosecond_of_day));
        FormattableIxdtf {
            date: Some(FormattableDate(year, month, day)),
            time: Some(time.to_formattable(Precision::Second)),
            offset: Some(FormattableOffset::from_seconds(0)),
            zone: None,
        }
        .write_to(f)
    }
}

impl FromStr for Instant {
    type Err = TemporalError;

    /// Parses a date-time with an offset, such as `2014-04-28T21:45:50Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iso, offset, zone) = parsers::parse_offset_date_time(s)?;
        if zone.is_some() {
            return Err(TemporalError::parse()
                .with_message(format!("Text '{s}' could not be parsed: unexpected zone")));
        }
        let offset = ZoneOffset::from_total_seconds(offset)?;
        Ok(Self::from_local(&LocalDateTime::new_unchecked(iso), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    #[test]
    fn epoch_accessors() {
        let instant = Instant::from_epoch_milliseconds(-1).unwrap();
        assert_eq!(instant.epoch_seconds(), -1);
        assert_eq!(instant.epoch_milliseconds(), -1);
        assert_eq!(instant.subsec_nanos(), 999_000_000);
        assert_eq!(instant.to_string(), "1969-12-31T23:59:59.999Z");
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00Z");
        assert_eq!(
            Instant::from_epoch_seconds(i64::MAX).map_err(|e| e.kind()),
            Err(ErrorKind::Range)
        );
        let last = Instant::try_from_epoch_nanoseconds(MAX_EPOCH_NANOSECONDS).unwrap();
        assert_eq!(last.to_string(), "+1000000-01-01T23:59:59.999999999Z");
        assert!(last.to_local(ZoneOffset::UTC).is_err());
    }

    #[test]
    fn arithmetic() {
        let start: Instant = "2014-04-28T21:45:50-04:00".parse().unwrap();
        assert_eq!(start.to_string(), "2014-04-29T01:45:50Z");
        let later = start.plus_duration(&Duration::from_hours(2).unwrap()).unwrap();
        assert_eq!(later.to_string(), "2014-04-29T03:45:50Z");
        assert_eq!(start.duration_until(&later).to_hours(), 2);
        assert_eq!(later.duration_until(&start).to_hours(), -2);
        assert_eq!(later.minus_duration(&Duration::from_hours(2).unwrap()), Ok(start));
        assert!(start.is_before(&later));
        assert!(later.is_after(&start));
        assert_eq!(start.plus_duration(&Duration::ZERO), Ok(start));
    }

    #[test]
    fn parsing() {
        assert_eq!(
            "2014-04-28T21:45:50Z".parse::<Instant>().unwrap().epoch_seconds(),
            1_398_721_550
        );
        for text in ["2014-04-28T21:45:50", "2014-04-28", "2014-04-28T21:45Z[Europe/Paris]"] {
            assert_eq!(
                text.parse::<Instant>().map_err(|e| e.kind()),
                Err(ErrorKind::Parse),
                "{text}"
            );
        }
    }
}
