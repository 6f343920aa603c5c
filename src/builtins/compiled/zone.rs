use alloc::{string::String, vec::Vec};
use core::str::FromStr;

use super::with_tz_provider;
use crate::{
    builtins::core::zone::{LocalOffsets, ZoneOffsetTransition, ZoneRules},
    Instant, LocalDateTime, TemporalError, TemporalResult, ZoneId, ZoneOffset,
};

/// The following [`ZoneId`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl ZoneId {
    /// Parses a zone identifier against the compiled time zone database.
    pub fn try_from_str(source: &str) -> TemporalResult<Self> {
        with_tz_provider(|provider| Self::try_from_str_with_provider(source, provider))
    }

    /// All region identifiers of the compiled time zone database.
    pub fn available_zone_ids() -> TemporalResult<Vec<String>> {
        with_tz_provider(|provider| Self::available_zone_ids_with_provider(provider))
    }

    /// The time zone of the host system.
    #[cfg(feature = "sys")]
    pub fn system_default() -> TemporalResult<Self> {
        with_tz_provider(|provider| Self::system_default_with_provider(provider))
    }
}

impl FromStr for ZoneId {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}

/// The following [`ZoneRules`] methods are feature gated behind the
/// `compiled_data` feature flag.
impl ZoneRules<'_> {
    pub fn offset_at_instant(&self, instant: &Instant) -> TemporalResult<ZoneOffset> {
        with_tz_provider(|provider| self.offset_at_instant_with_provider(instant, provider))
    }

    pub fn local_offsets(&self, local: &LocalDateTime) -> TemporalResult<LocalOffsets> {
        with_tz_provider(|provider| self.local_offsets_with_provider(local, provider))
    }

    pub fn is_valid_offset(
        &self,
        local: &LocalDateTime,
        offset: ZoneOffset,
    ) -> TemporalResult<bool> {
        with_tz_provider(|provider| self.is_valid_offset_with_provider(local, offset, provider))
    }

    pub fn next_transition(
        &self,
        instant: &Instant,
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        with_tz_provider(|provider| self.next_transition_with_provider(instant, provider))
    }

    pub fn previous_transition(
        &self,
        instant: &Instant,
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        with_tz_provider(|provider| self.previous_transition_with_provider(instant, provider))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ZoneId, ZoneOffset};

    #[test]
    fn compiled_zone_ids() {
        let zone: ZoneId = "europe/paris".parse().unwrap();
        assert_eq!(zone, ZoneId::Named("Europe/Paris".into()));
        assert_eq!(
            ZoneId::try_from_str("-05:00"),
            Ok(ZoneId::Fixed(ZoneOffset::from_hours(-5).unwrap()))
        );
        let ids = ZoneId::available_zone_ids().unwrap();
        assert!(ids.iter().any(|id| id == "America/New_York"));
    }
}
