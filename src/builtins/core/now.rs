//! The `Now` component, reading the current time from host hooks.

use tempora_provider::provider::ZoneRulesProvider;

use crate::{
    builtins::core::{Instant, LocalDate, LocalDateTime, LocalTime, ZoneId, ZonedDateTime},
    host::HostHooks,
    TemporalResult,
};

/// Access to the current time of a host.
///
/// Each method resolves the zone before reading the clock, so a slow zone
/// lookup cannot make the reported time stale.
///
/// ```rust
/// use tempora::{provider::provider::UtcOnlyProvider, Instant, Now};
///
/// // `()` is a host frozen at the epoch in UTC.
/// let now = Now::new(());
/// assert_eq!(now.instant().unwrap(), Instant::EPOCH);
///
/// let zoned = now.zoned_date_time_with_provider(None, &UtcOnlyProvider).unwrap();
/// assert_eq!(zoned.to_string(), "1970-01-01T00:00Z");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    pub const fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// The current instant.
    pub fn instant(&self) -> TemporalResult<Instant> {
        self.host_hooks.get_system_instant()
    }

    /// The current milliseconds since 1970-01-01T00:00Z.
    pub fn epoch_milliseconds(&self) -> TemporalResult<i64> {
        self.instant().map(|instant| instant.epoch_milliseconds())
    }

    /// The zone of the host.
    pub fn zone_id_with_provider(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZoneId> {
        self.host_hooks.get_system_zone_id(provider)
    }

    /// The current date-time in `zone`, or in the host's zone when `zone`
    /// is `None`.
    pub fn zoned_date_time_with_provider(
        &self,
        zone: Option<ZoneId>,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZonedDateTime> {
        let zone = match zone {
            Some(zone) => zone,
            None => self.zone_id_with_provider(provider)?,
        };
        let instant = self.instant()?;
        ZonedDateTime::from_instant_with_provider(instant, zone, provider)
    }

    pub fn local_date_time_with_provider(
        &self,
        zone: Option<ZoneId>,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<LocalDateTime> {
        self.zoned_date_time_with_provider(zone, provider)
            .map(|zoned| zoned.local_date_time())
    }

    pub fn local_date_with_provider(
        &self,
        zone: Option<ZoneId>,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<LocalDate> {
        self.local_date_time_with_provider(zone, provider)
            .map(|local| local.date())
    }

    pub fn local_time_with_provider(
        &self,
        zone: Option<ZoneId>,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<LocalTime> {
        self.local_date_time_with_provider(zone, provider)
            .map(|local| local.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostClock, HostTimeZone};
    use alloc::string::ToString;
    use tempora_provider::TzdbProvider;

    /// A host frozen at 2014-04-29T01:45:50.5Z in New York.
    struct FrozenHost;

    impl HostClock for FrozenHost {
        fn get_host_instant(&self) -> TemporalResult<Instant> {
            Instant::from_epoch_milliseconds(1_398_735_950_500)
        }
    }

    impl HostTimeZone for FrozenHost {
        fn get_host_zone_id(
            &self,
            provider: &(impl ZoneRulesProvider + ?Sized),
        ) -> TemporalResult<ZoneId> {
            ZoneId::try_from_str_with_provider("America/New_York", provider)
        }
    }

    impl HostHooks for FrozenHost {}

    #[test]
    fn frozen_host() {
        let provider = &TzdbProvider::default();
        let now = Now::new(FrozenHost);
        assert_eq!(now.epoch_milliseconds(), Ok(1_398_735_950_500));
        assert_eq!(
            now.zone_id_with_provider(provider).unwrap().to_string(),
            "America/New_York"
        );
        assert_eq!(
            now.zoned_date_time_with_provider(None, provider)
                .unwrap()
                .to_string(),
            "2014-04-28T21:45:50.5-04:00[America/New_York]"
        );
        assert_eq!(
            now.local_date_with_provider(None, provider)
                .unwrap()
                .to_string(),
            "2014-04-28"
        );

        let paris = ZoneId::try_from_str_with_provider("Europe/Paris", provider).unwrap();
        assert_eq!(
            now.local_date_time_with_provider(Some(paris.clone()), provider)
                .unwrap()
                .to_string(),
            "2014-04-29T03:45:50.5"
        );
        assert_eq!(
            now.local_time_with_provider(Some(paris), provider)
                .unwrap()
                .to_string(),
            "03:45:50.5"
        );
    }

    #[test]
    fn epoch_host() {
        let provider = &TzdbProvider::default();
        let now = Now::new(());
        assert_eq!(now.instant(), Ok(Instant::EPOCH));
        assert_eq!(
            now.local_date_time_with_provider(None, provider)
                .unwrap()
                .to_string(),
            "1970-01-01T00:00"
        );
    }
}
