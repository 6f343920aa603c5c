use core::str::FromStr;

use super::with_tz_provider;
use crate::{
    options::{Disambiguation, Unit},
    Duration, Instant, LocalDateTime, Period, TemporalError, TemporalResult,
    ZoneId, ZonedDateTime,
};

/// The following [`ZonedDateTime`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl ZonedDateTime {
    /// Resolves `local` in `zone` with the `Compatible` policy.
    pub fn of(local: LocalDateTime, zone: ZoneId) -> TemporalResult<Self> {
        with_tz_provider(|provider| {
            Self::try_new_with_provider(local, zone, Disambiguation::Compatible, provider)
        })
    }

    pub fn from_instant(instant: Instant, zone: ZoneId) -> TemporalResult<Self> {
        with_tz_provider(|provider| Self::from_instant_with_provider(instant, zone, provider))
    }

    pub fn plus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_duration_with_provider(duration, provider))
    }

    pub fn plus_period(&self, period: &Period) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_period_with_provider(period, provider))
    }

    pub fn plus_hours(&self, hours: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_hours_with_provider(hours, provider))
    }

    pub fn plus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_minutes_with_provider(minutes, provider))
    }

    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_seconds_with_provider(seconds, provider))
    }

    pub fn plus_nanoseconds(&self, nanoseconds: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_nanoseconds_with_provider(nanoseconds, provider))
    }

    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_days_with_provider(days, provider))
    }

    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_weeks_with_provider(weeks, provider))
    }

    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_months_with_provider(months, provider))
    }

    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.plus_years_with_provider(years, provider))
    }

    pub fn minus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_duration_with_provider(duration, provider))
    }

    pub fn minus_period(&self, period: &Period) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_period_with_provider(period, provider))
    }

    pub fn minus_hours(&self, hours: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_hours_with_provider(hours, provider))
    }

    pub fn minus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_minutes_with_provider(minutes, provider))
    }

    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_seconds_with_provider(seconds, provider))
    }

    pub fn minus_nanoseconds(&self, nanoseconds: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_nanoseconds_with_provider(nanoseconds, provider))
    }

    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_days_with_provider(days, provider))
    }

    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_weeks_with_provider(weeks, provider))
    }

    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_months_with_provider(months, provider))
    }

    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.minus_years_with_provider(years, provider))
    }

    pub fn with_zone_same_instant(&self, zone: ZoneId) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.with_zone_same_instant_with_provider(zone, provider))
    }

    pub fn with_zone_same_local(&self, zone: ZoneId) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.with_zone_same_local_with_provider(zone, provider))
    }

    pub fn with_earlier_offset_at_overlap(&self) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.with_earlier_offset_at_overlap_with_provider(provider))
    }

    pub fn with_later_offset_at_overlap(&self) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.with_later_offset_at_overlap_with_provider(provider))
    }

    pub fn truncated_to(&self, unit: Unit) -> TemporalResult<Self> {
        with_tz_provider(|provider| self.truncated_to_with_provider(unit, provider))
    }

    pub fn until(&self, other: &Self, unit: Unit) -> TemporalResult<i64> {
        with_tz_provider(|provider| self.until_with_provider(other, unit, provider))
    }
}

impl FromStr for ZonedDateTime {
    type Err = TemporalError;

    /// Parses `<date>T<time><offset>[<zone>]` against the compiled time
    /// zone database.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        with_tz_provider(|provider| Self::from_str_with_provider(s, provider))
    }
}
