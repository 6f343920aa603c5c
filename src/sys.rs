//! Host hooks backed by the system clock and the system time zone.

use tempora_provider::provider::ZoneRulesProvider;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::{Instant, Now, TemporalError, TemporalResult, ZoneId, ZoneOffset};

/// Entry points for reading the current time of the host system.
pub struct SystemClock;

impl SystemClock {
    /// Get a `Now` object with a [`SystemHost`], which will use the host
    /// system's time zone as a fallback.
    pub const fn local_now() -> Now<SystemHost> {
        Now::new(SystemHost)
    }

    /// Get a `Now` object with a [`UtcSystemHost`], which will use UTC as a
    /// fallback.
    pub const fn utc_now() -> Now<UtcSystemHost> {
        Now::new(UtcSystemHost)
    }
}

/// A host system implementation that returns the current time with the
/// system time zone as fallback.
///
/// This implementation is backed by [`web_time::SystemTime`] and
/// [`iana_time_zone`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostHooks for SystemHost {}

impl HostClock for SystemHost {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        get_system_instant()
    }
}

impl HostTimeZone for SystemHost {
    fn get_host_zone_id(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZoneId> {
        get_system_zone_id(provider)
    }
}

/// A host system implementation that returns the current time with UTC as
/// fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcSystemHost;

impl HostHooks for UtcSystemHost {}

impl HostClock for UtcSystemHost {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        get_system_instant()
    }
}

impl HostTimeZone for UtcSystemHost {
    fn get_host_zone_id(&self, _: &(impl ZoneRulesProvider + ?Sized)) -> TemporalResult<ZoneId> {
        Ok(ZoneId::Fixed(ZoneOffset::UTC))
    }
}

impl ZoneId {
    /// The time zone of the host system.
    pub fn system_default_with_provider(
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        get_system_zone_id(provider)
    }
}

#[inline]
pub(crate) fn get_system_zone_id(
    provider: &(impl ZoneRulesProvider + ?Sized),
) -> TemporalResult<ZoneId> {
    iana_time_zone::get_timezone()
        .map(|s| ZoneId::try_from_str_with_provider(&s, provider))
        .map_err(|_| TemporalError::general("Error fetching system time zone"))?
}

/// Returns the system time as an `Instant`.
pub(crate) fn get_system_instant() -> TemporalResult<Instant> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TemporalError::general("Error fetching system time"))?;
    let nanoseconds = i128::try_from(elapsed.as_nanos())
        .map_err(|_| TemporalError::general("Error fetching system time"))?;
    Instant::try_from_epoch_nanoseconds(nanoseconds)
}
