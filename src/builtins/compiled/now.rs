use super::with_tz_provider;
use crate::{
    host::HostHooks, LocalDate, LocalDateTime, LocalTime, Now, TemporalResult, ZoneId,
    ZonedDateTime,
};

/// The following [`Now`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl<H: HostHooks> Now<H> {
    pub fn zone_id(&self) -> TemporalResult<ZoneId> {
        with_tz_provider(|provider| self.zone_id_with_provider(provider))
    }

    pub fn zoned_date_time(&self, zone: Option<ZoneId>) -> TemporalResult<ZonedDateTime> {
        with_tz_provider(|provider| self.zoned_date_time_with_provider(zone, provider))
    }

    pub fn local_date_time(&self, zone: Option<ZoneId>) -> TemporalResult<LocalDateTime> {
        with_tz_provider(|provider| self.local_date_time_with_provider(zone, provider))
    }

    pub fn local_date(&self, zone: Option<ZoneId>) -> TemporalResult<LocalDate> {
        with_tz_provider(|provider| self.local_date_with_provider(zone, provider))
    }

    pub fn local_time(&self, zone: Option<ZoneId>) -> TemporalResult<LocalTime> {
        with_tz_provider(|provider| self.local_time_with_provider(zone, provider))
    }
}
