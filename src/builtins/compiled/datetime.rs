use super::with_tz_provider;
use crate::{LocalDateTime, OffsetDateTime, TemporalResult, ZoneId, ZonedDateTime};

/// The following [`LocalDateTime`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl LocalDateTime {
    /// Resolves this date-time in `zone` with the `Compatible` policy.
    pub fn at_zone(&self, zone: ZoneId) -> TemporalResult<ZonedDateTime> {
        with_tz_provider(|provider| self.at_zone_with_provider(zone, provider))
    }
}

/// The following [`OffsetDateTime`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl OffsetDateTime {
    pub fn at_zone_same_instant(&self, zone: ZoneId) -> TemporalResult<ZonedDateTime> {
        with_tz_provider(|provider| self.at_zone_same_instant_with_provider(zone, provider))
    }
}
