//! This module implements `ZonedDateTime`, a date-time in a zone whose
//! offset follows the zone's rules.

use alloc::format;
use core::cmp::Ordering;

use tempora_provider::provider::ZoneRulesProvider;
use writeable::Writeable;

use crate::{
    builtins::core::{
        checked_neg, datetime::divide_by_unit, zone::LocalOffsets, Duration, Instant, LocalDate,
        LocalDateTime, LocalTime, OffsetDateTime, Period, ZoneId, ZoneOffset,
    },
    calendar::Weekday,
    options::{Disambiguation, Unit},
    parsers::{self, FormattableIxdtf, FormattableZoneId},
    TemporalError, TemporalResult,
};

/// A date-time in a time zone, such as
/// `2014-04-28T21:45:50-04:00[America/New_York]`.
///
/// A `ZonedDateTime` holds the local date-time, the offset in effect for it
/// and the zone. The offset is always one the zone's rules allow for the
/// local date-time.
///
/// Arithmetic comes in two flavours. Durations and time units move along
/// the instant time-line, so adding 24 hours across a change to daylight
/// saving time lands on a different wall-clock hour. Periods and date
/// units move along the local time-line and keep the offset when it is
/// still valid.
///
/// ```rust
/// use tempora::{provider::TzdbProvider, Disambiguation, LocalDateTime, ZoneId, ZonedDateTime};
///
/// let provider = TzdbProvider::default();
/// let zone = ZoneId::try_from_str_with_provider("America/New_York", &provider).unwrap();
/// let local: LocalDateTime = "2017-03-11T12:00".parse().unwrap();
/// let start =
///     ZonedDateTime::try_new_with_provider(local, zone, Disambiguation::Compatible, &provider)
///         .unwrap();
///
/// let next_day = start.plus_days_with_provider(1, &provider).unwrap();
/// assert_eq!(next_day.to_string(), "2017-03-12T12:00-04:00[America/New_York]");
///
/// let day_later = start.plus_hours_with_provider(24, &provider).unwrap();
/// assert_eq!(day_later.to_string(), "2017-03-12T13:00-04:00[America/New_York]");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    local: LocalDateTime,
    offset: ZoneOffset,
    zone: ZoneId,
}

// ==== Private API ====

impl ZonedDateTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(
        local: LocalDateTime,
        offset: ZoneOffset,
        zone: ZoneId,
    ) -> Self {
        Self {
            local,
            offset,
            zone,
        }
    }

    /// Resolves `local` in `zone`, keeping `preferred` at an overlap.
    pub(crate) fn resolve_with_provider(
        local: LocalDateTime,
        zone: ZoneId,
        preferred: ZoneOffset,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let offsets = zone.rules().local_offsets_with_provider(&local, provider)?;
        let (local, offset) =
            offsets.resolve_preferring(&local, preferred, Disambiguation::Compatible)?;
        Ok(Self::new_unchecked(local, offset, zone))
    }

    /// Moves to `local` in the same zone, keeping the current offset when it
    /// is still valid.
    fn with_local_with_provider(
        &self,
        local: LocalDateTime,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        Self::resolve_with_provider(local, self.zone.clone(), self.offset, provider)
    }

    /// Moves to `instant` in the same zone.
    fn with_instant_with_provider(
        &self,
        instant: Instant,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        Self::from_instant_with_provider(instant, self.zone.clone(), provider)
    }
}

// ==== Public API ====

impl ZonedDateTime {
    /// Resolves `local` in `zone`, using `disambiguation` when the local
    /// date-time falls in a gap or an overlap.
    pub fn try_new_with_provider(
        local: LocalDateTime,
        zone: ZoneId,
        disambiguation: Disambiguation,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let offsets = zone.rules().local_offsets_with_provider(&local, provider)?;
        let (local, offset) = offsets.resolve(&local, disambiguation)?;
        Ok(Self::new_unchecked(local, offset, zone))
    }

    /// Creates a zoned date-time from all three parts, failing with an
    /// `InvalidOffsetError` when `offset` is not valid for `local` in
    /// `zone`.
    pub fn of_strict_with_provider(
        local: LocalDateTime,
        offset: ZoneOffset,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        if !zone
            .rules()
            .is_valid_offset_with_provider(&local, offset, provider)?
        {
            return Err(TemporalError::invalid_offset().with_message(format!(
                "Offset {offset} is not valid for {local} in {zone}"
            )));
        }
        Ok(Self::new_unchecked(local, offset, zone))
    }

    /// The date-time of `instant` in `zone`.
    pub fn from_instant_with_provider(
        instant: Instant,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let offset = zone
            .rules()
            .offset_at_instant_with_provider(&instant, provider)?;
        Ok(Self::new_unchecked(instant.to_local(offset)?, offset, zone))
    }

    /// Parses `<date>T<time><offset>[<zone>]`.
    ///
    /// Without a zone annotation the zone is the fixed offset. With one,
    /// the offset must be valid for the local date-time in that zone.
    pub fn from_str_with_provider(
        source: &str,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let (iso, offset, zone) = parsers::parse_offset_date_time(source)?;
        let offset = ZoneOffset::from_total_seconds(offset)?;
        let zone = match zone {
            Some(text) => ZoneId::try_from_str_with_provider(text, provider)?,
            None => ZoneId::Fixed(offset),
        };
        Self::of_strict_with_provider(LocalDateTime::new_unchecked(iso), offset, zone, provider)
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
    pub const fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.local.year()
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.local.month()
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.local.day()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> Weekday {
        self.local.date().day_of_week()
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.local.hour()
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.local.minute()
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.local.second()
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.local.nanosecond()
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

    /// Drops the zone, keeping the local date-time and offset.
    #[inline]
    #[must_use]
    pub const fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.local, self.offset)
    }

    /// Replaces the zone with the current offset as a fixed zone.
    #[must_use]
    pub fn with_fixed_offset_zone(&self) -> Self {
        Self::new_unchecked(self.local, self.offset, ZoneId::Fixed(self.offset))
    }

    /// Compares the instants of two zoned date-times, ignoring their zones.
    #[inline]
    #[must_use]
    pub fn compare_instant(&self, other: &Self) -> Ordering {
        self.to_instant().cmp(&other.to_instant())
    }

    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.compare_instant(other).is_lt()
    }

    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.compare_instant(other).is_gt()
    }

    /// Whether both are the same instant, whatever their zones.
    #[inline]
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self.compare_instant(other).is_eq()
    }

    // ==== Instant time-line arithmetic ====

    pub fn plus_duration_with_provider(
        &self,
        duration: &Duration,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let instant = self.to_instant().plus_duration(duration)?;
        self.with_instant_with_provider(instant, provider)
    }

    pub fn minus_duration_with_provider(
        &self,
        duration: &Duration,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let instant = self.to_instant().minus_duration(duration)?;
        self.with_instant_with_provider(instant, provider)
    }

    pub fn plus_hours_with_provider(
        &self,
        hours: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_duration_with_provider(&Duration::from_hours(hours)?, provider)
    }

    pub fn plus_minutes_with_provider(
        &self,
        minutes: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_duration_with_provider(&Duration::from_minutes(minutes)?, provider)
    }

    pub fn plus_seconds_with_provider(
        &self,
        seconds: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_duration_with_provider(&Duration::from_seconds(seconds), provider)
    }

    pub fn plus_nanoseconds_with_provider(
        &self,
        nanoseconds: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_duration_with_provider(&Duration::from_nanos(nanoseconds), provider)
    }

    pub fn minus_hours_with_provider(
        &self,
        hours: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_hours_with_provider(checked_neg(hours)?, provider)
    }

    pub fn minus_minutes_with_provider(
        &self,
        minutes: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_minutes_with_provider(checked_neg(minutes)?, provider)
    }

    pub fn minus_seconds_with_provider(
        &self,
        seconds: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_seconds_with_provider(checked_neg(seconds)?, provider)
    }

    pub fn minus_nanoseconds_with_provider(
        &self,
        nanoseconds: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.plus_nanoseconds_with_provider(checked_neg(nanoseconds)?, provider)
    }

    // ==== Local time-line arithmetic ====

    pub fn plus_period_with_provider(
        &self,
        period: &Period,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.plus_period(period)?, provider)
    }

    pub fn minus_period_with_provider(
        &self,
        period: &Period,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.minus_period(period)?, provider)
    }

    pub fn plus_days_with_provider(
        &self,
        days: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.plus_days(days)?, provider)
    }

    pub fn plus_weeks_with_provider(
        &self,
        weeks: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.plus_weeks(weeks)?, provider)
    }

    pub fn plus_months_with_provider(
        &self,
        months: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.plus_months(months)?, provider)
    }

    pub fn plus_years_with_provider(
        &self,
        years: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.plus_years(years)?, provider)
    }

    pub fn minus_days_with_provider(
        &self,
        days: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.minus_days(days)?, provider)
    }

    pub fn minus_weeks_with_provider(
        &self,
        weeks: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.minus_weeks(weeks)?, provider)
    }

    pub fn minus_months_with_provider(
        &self,
        months: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.minus_months(months)?, provider)
    }

    pub fn minus_years_with_provider(
        &self,
        years: i64,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.minus_years(years)?, provider)
    }

    // ==== Zone and offset adjustments ====

    /// The same instant in another zone.
    pub fn with_zone_same_instant_with_provider(
        &self,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        Self::from_instant_with_provider(self.to_instant(), zone, provider)
    }

    /// The same local date-time in another zone, keeping the offset if the
    /// new zone allows it.
    pub fn with_zone_same_local_with_provider(
        &self,
        zone: ZoneId,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        Self::resolve_with_provider(self.local, zone, self.offset, provider)
    }

    /// At an overlap, switches to the offset of the earlier instant.
    /// Otherwise returns the same value.
    pub fn with_earlier_offset_at_overlap_with_provider(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let offsets = self
            .zone
            .rules()
            .local_offsets_with_provider(&self.local, provider)?;
        let offset = match offsets {
            LocalOffsets::Overlap { earlier, .. } => earlier,
            _ => self.offset,
        };
        Ok(Self::new_unchecked(self.local, offset, self.zone.clone()))
    }

    /// At an overlap, switches to the offset of the later instant.
    /// Otherwise returns the same value.
    pub fn with_later_offset_at_overlap_with_provider(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        let offsets = self
            .zone
            .rules()
            .local_offsets_with_provider(&self.local, provider)?;
        let offset = match offsets {
            LocalOffsets::Overlap { later, .. } => later,
            _ => self.offset,
        };
        Ok(Self::new_unchecked(self.local, offset, self.zone.clone()))
    }

    /// Truncates the local date-time and resolves it again in this zone.
    pub fn truncated_to_with_provider(
        &self,
        unit: Unit,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        self.with_local_with_provider(self.local.truncated_to(unit)?, provider)
    }

    /// Returns the whole number of `unit` until `other`, truncated toward
    /// zero.
    ///
    /// Date units are counted on the local time-line after moving `other`
    /// into this zone. Time units are counted on the instant time-line.
    pub fn until_with_provider(
        &self,
        other: &Self,
        unit: Unit,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<i64> {
        let end = other.to_instant();
        if unit.is_date_unit() {
            let offset = self
                .zone
                .rules()
                .offset_at_instant_with_provider(&end, provider)?;
            return self.local.difference(&end.to_local(offset)?, unit);
        }
        divide_by_unit(
            end.epoch_nanoseconds() - self.to_instant().epoch_nanoseconds(),
            unit,
        )
    }

    /// Returns the exact time from this date-time until `other`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        self.to_instant().duration_until(&other.to_instant())
    }
}

// ==== Trait impls ====

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedDateTime {
    /// Orders by instant, then by local date-time, then by zone identifier.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_instant(other)
            .then_with(|| self.local.cmp(&other.local))
            .then_with(|| self.zone.cmp(&other.zone))
    }
}

impl core::fmt::Display for ZonedDateTime {
    /// Writes the local date-time and offset, followed by the zone in
    /// brackets unless it is a fixed offset.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let local = self.local.to_formattable();
        let zone = match &self.zone {
            ZoneId::Named(name) => Some(FormattableZoneId(name)),
            ZoneId::Fixed(_) => None,
        };
        FormattableIxdtf {
            date: local.date,
            time: local.time,
            offset: Some(self.offset.to_formattable()),
            zone,
        }
        .write_to(f)
    }
}
