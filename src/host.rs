//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API.

use tempora_provider::provider::ZoneRulesProvider;

use crate::{Instant, TemporalResult, ZoneId, ZoneOffset};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    fn get_host_instant(&self) -> TemporalResult<Instant>;
}

/// The `HostTimeZone` trait defines the host's time zone.
pub trait HostTimeZone {
    fn get_host_zone_id(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZoneId>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_instant(&self) -> TemporalResult<Instant> {
        self.get_host_instant()
    }

    fn get_system_zone_id(
        &self,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZoneId> {
        self.get_host_zone_id(provider)
    }
}

// A host frozen at the epoch in UTC.

impl HostClock for () {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        Ok(Instant::EPOCH)
    }
}

impl HostTimeZone for () {
    fn get_host_zone_id(&self, _: &(impl ZoneRulesProvider + ?Sized)) -> TemporalResult<ZoneId> {
        Ok(ZoneId::Fixed(ZoneOffset::UTC))
    }
}

impl HostHooks for () {}
