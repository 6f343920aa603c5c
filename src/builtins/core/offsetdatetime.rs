//! This module implements `OffsetDateTime`, a local date-time at a fixed
//! offset.

use alloc::format;
use core::{cmp::Ordering, str::FromStr};

use tempora_provider::provider::ZoneRulesProvider;
use writeable::Writeable;

use crate::{
    builtins::core::{
        Duration, Instant, LocalDate, LocalDateTime, LocalTime, Period, ZoneId, ZoneOffset,
        ZonedDateTime,
    },
    options::Unit,
    parsers, TemporalError, TemporalResult,
};

/// A date-time with a fixed offset from UTC, such as
/// `2014-04-28T21:45:50-04:00`.
///
/// The offset is never re-resolved: arithmetic works on the local
/// date-time and keeps the offset as is.
///
/// ```rust
/// use tempora::{Duration, OffsetDateTime, ZoneOffset};
///
/// let start: OffsetDateTime = "2014-04-28T21:45:50-04:00".parse().unwrap();
/// let utc = start.with_offset_same_instant(ZoneOffset::UTC).unwrap();
/// assert_eq!(utc.to_string(), "2014-04-29T01:45:50Z");
/// assert!(start.is_equal(&utc));
/// assert_ne!(start, utc);
///
/// let later = start.plus_duration(&Duration::from_hours(3).unwrap()).unwrap();
/// assert_eq!(later.to_string(), "2014-04-29T00:45:50-04:00");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    local: LocalDateTime,
    offset: ZoneOffset,
}

impl OffsetDateTime {
    #[inline]
    #[must_use]
    pub const fn new(local: LocalDateTime, offset: ZoneOffset) -> Self {
        Self { local, offset }
    }

    /// Creates an offset date-time from its fields, validating each of them.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        offset: ZoneOffset,
    ) -> TemporalResult<Self> {
        let local = LocalDateTime::try_new(year, month, day, hour, minute, second, nanosecond)?;
        Ok(Self::new(local, offset))
    }

    /// The date-time of `instant` seen at `offset`.
    pub fn from_instant(instant: Instant, offset: ZoneOffset) -> TemporalResult<Self> {
        Ok(Self::new(instant.to_local(offset)?, offset))
    }

    #[inline]
    #[must_use]
    pub const fn local_date_time(&self) -> LocalDateTime {
        self.local
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> LocalDate {
        self.local.date()
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> LocalTime {
        self.local.time()
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    #[inline]
    #[must_use]
    pub const fn to_instant(&self) -> Instant {
        Instant::from_local(&self.local, self.offset)
    }

    #[inline]
    #[must_use]
    pub const fn to_epoch_second(&self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    /// Returns the same instant seen at `offset`.
    pub fn with_offset_same_instant(&self, offset: ZoneOffset) -> TemporalResult<Self> {
        Self::from_instant(self.to_instant(), offset)
    }

    /// Returns the same local date-time at `offset`, a different instant
    /// unless the offsets are equal.
    #[inline]
    #[must_use]
    pub const fn with_offset_same_local(&self, offset: ZoneOffset) -> Self {
        Self::new(self.local, offset)
    }

    pub fn plus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        Ok(Self::new(self.local.plus_duration(duration)?, self.offset))
    }

    pub fn minus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        Ok(Self::new(self.local.minus_duration(duration)?, self.offset))
    }

    pub fn plus_period(&self, period: &Period) -> TemporalResult<Self> {
        Ok(Self::new(self.local.plus_period(period)?, self.offset))
    }

    pub fn minus_period(&self, period: &Period) -> TemporalResult<Self> {
        Ok(Self::new(self.local.minus_period(period)?, self.offset))
    }

    /// Returns the whole number of `unit` until `other`, truncated toward
    /// zero.
    ///
    /// `other` is first moved to this offset, so date units count the
    /// calendar days seen at this offset.
    pub fn until(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        let end = other.to_instant().to_local(self.offset)?;
        self.local.difference(&end, unit)
    }

    /// Returns the exact time from this date-time until `other`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        self.to_instant().duration_until(&other.to_instant())
    }

    /// Truncates the local date-time, keeping the offset.
    pub fn truncated_to(&self, unit: Unit) -> TemporalResult<Self> {
        Ok(Self::new(self.local.truncated_to(unit)?, self.offset))
    }

    /// Resolves the instant of this date-time in `zone`.
    pub fn at_zone_same_instant_with_provider(
        &self,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZonedDateTime> {
        ZonedDateTime::from_instant_with_provider(self.to_instant(), zone, provider)
    }

    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.to_instant() < other.to_instant()
    }

    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.to_instant() > other.to_instant()
    }

    /// Whether both are the same instant, whatever their offsets.
    #[inline]
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self.to_instant() == other.to_instant()
    }
}

// ==== Trait impls ====

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDateTime {
    /// Orders by instant, then by local date-time.
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_instant()
            .cmp(&other.to_instant())
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl core::fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut formattable = self.local.to_formattable();
        formattable.offset = Some(self.offset.to_formattable());
        formattable.write_to(f)
    }
}

impl FromStr for OffsetDateTime {
    type Err = TemporalError;

    /// Parses `<date>T<time><offset>`, such as `2014-04-28T21:45:50-04:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iso, offset, zone) = parsers::parse_offset_date_time(s)?;
        if zone.is_some() {
            return Err(TemporalError::parse()
                .with_message(format!("Text '{s}' could not be parsed: unexpected zone")));
        }
        Ok(Self::new(
            LocalDateTime::new_unchecked(iso),
            ZoneOffset::from_total_seconds(offset)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    fn at(text: &str) -> OffsetDateTime {
        text.parse().unwrap()
    }

    #[test]
    fn text() {
        for text in [
            "2014-04-28T21:45:50-04:00",
            "2014-04-28T21:45Z",
            "2014-04-28T21:45:50.123+05:30",
        ] {
            assert_eq!(at(text).to_string(), text);
        }
        for text in [
            "2014-04-28T21:45:50",
            "2014-04-28",
            "2014-04-28T21:45:50-04:00[America/New_York]",
        ] {
            assert_eq!(
                text.parse::<OffsetDateTime>().map_err(|e| e.kind()),
                Err(ErrorKind::Parse),
                "{text}"
            );
        }
    }

    #[test]
    fn instants_and_ordering() {
        let new_york = at("2014-04-28T21:45:50-04:00");
        let paris = at("2014-04-28T21:45:50+02:00");
        assert!(paris.is_before(&new_york));
        assert!(new_york.is_after(&paris));
        assert_eq!(new_york.to_epoch_second(), 1_398_735_950);
        assert_eq!(new_york.duration_until(&paris).to_hours(), -6);

        let same = new_york.with_offset_same_instant(ZoneOffset::UTC).unwrap();
        assert!(same.is_equal(&new_york));
        // Equal instants order by local date-time.
        assert!(new_york < same);

        let shifted = new_york.with_offset_same_local(ZoneOffset::UTC);
        assert_eq!(shifted.to_string(), "2014-04-28T21:45:50Z");
        assert!(shifted.is_before(&new_york));
    }

    #[test]
    fn arithmetic() {
        let start = at("2014-04-30T21:25:10-04:00");
        assert_eq!(
            start.plus_period(&Period::of(1, 2, 3)).unwrap().to_string(),
            "2015-07-03T21:25:10-04:00"
        );
        assert_eq!(
            start.minus_duration(&"PT1H5M5S".parse().unwrap()).unwrap().to_string(),
            "2014-04-30T20:20:05-04:00"
        );
        assert_eq!(start.plus_duration(&Duration::ZERO), Ok(start));
        assert_eq!(
            start.truncated_to(Unit::Hour).unwrap().to_string(),
            "2014-04-30T21:00-04:00"
        );
    }

    #[test]
    fn until_converts_offsets() {
        let start = at("2014-04-28T21:00-04:00");
        // 2014-04-29T03:00-04:00, the next calendar day at -04:00
        let end = at("2014-04-29T09:00+02:00");
        assert_eq!(start.until(&end, Unit::Hour), Ok(6));
        assert_eq!(start.until(&end, Unit::Day), Ok(0));
        assert_eq!(
            start.until(&at("2014-04-29T23:00-02:00"), Unit::Day),
            Ok(1)
        );
    }
}
