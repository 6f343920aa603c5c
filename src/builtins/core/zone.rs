//! This module implements `ZoneId`, its `ZoneRules` and the records those
//! rules produce.

use alloc::string::{String, ToString};
use alloc::{format, vec::Vec};

use tempora_provider::provider::{
    LocalTimeRecordResult, TransitionDirection, UtcOffsetSeconds, ZoneRulesProvider,
    ZoneTransition,
};
use writeable::Writeable;

use crate::{
    builtins::core::{Duration, Instant, LocalDateTime, ZoneOffset},
    options::Disambiguation,
    parsers::{parse_zone_text, ZoneText},
    temporal_assert, TemporalError, TemporalResult, NS_PER_SECOND,
};

/// A time zone: either a region whose offsets follow the rules of the time
/// zone database, or a single fixed offset.
///
/// Region identifiers are stored in the provider's canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// An IANA identifier, such as `America/New_York`.
    Named(String),
    /// A zone that is always at one offset.
    Fixed(ZoneOffset),
}

impl ZoneId {
    /// Parses a zone identifier, resolving names against `provider`.
    ///
    /// Offsets such as `+02:00` or `Z` become fixed zones. Unknown names
    /// are an `UnknownZoneError`.
    pub fn try_from_str_with_provider(
        source: &str,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Self> {
        match parse_zone_text(source)? {
            ZoneText::Offset(seconds) => ZoneOffset::from_total_seconds(seconds).map(Self::Fixed),
            ZoneText::Name(name) => Ok(Self::Named(provider.normalize_identifier(name)?)),
        }
    }

    /// All region identifiers known to `provider`.
    pub fn available_zone_ids_with_provider(
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Vec<String>> {
        Ok(provider.available_identifiers()?)
    }

    /// Returns the identifier of this zone, the offset text for a fixed
    /// zone.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::Fixed(offset) => offset.to_string(),
        }
    }

    /// The rules of this zone.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> ZoneRules<'_> {
        ZoneRules { zone: self }
    }
}

impl From<ZoneOffset> for ZoneId {
    fn from(value: ZoneOffset) -> Self {
        Self::Fixed(value)
    }
}

impl PartialOrd for ZoneId {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneId {
    /// Orders zones by their identifier text.
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a.cmp(b),
            _ => self.identifier().cmp(&other.identifier()),
        }
    }
}

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Fixed(offset) => offset.to_formattable().write_to(f),
        }
    }
}

fn to_zone_offset(offset: UtcOffsetSeconds) -> TemporalResult<ZoneOffset> {
    let seconds = i32::try_from(offset.0).map_err(|_| {
        TemporalError::invalid_offset()
            .with_message(format!("Provider offset {} is out of range", offset.0))
    })?;
    ZoneOffset::from_total_seconds(seconds)
}

// ==== ZoneRules ====

/// The offset rules of a [`ZoneId`], evaluated against a provider.
///
/// ```rust
/// use tempora::{provider::provider::UtcOnlyProvider, Instant, ZoneId, ZoneOffset};
///
/// let provider = UtcOnlyProvider;
/// let zone = ZoneId::try_from_str_with_provider("UTC", &provider).unwrap();
/// let offset = zone
///     .rules()
///     .offset_at_instant_with_provider(&Instant::EPOCH, &provider)
///     .unwrap();
/// assert_eq!(offset, ZoneOffset::UTC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRules<'a> {
    zone: &'a ZoneId,
}

impl ZoneRules<'_> {
    #[inline]
    #[must_use]
    pub const fn zone(&self) -> &ZoneId {
        self.zone
    }

    /// Whether the offset never changes.
    #[inline]
    #[must_use]
    pub const fn is_fixed_offset(&self) -> bool {
        matches!(self.zone, ZoneId::Fixed(_))
    }

    /// The offset in effect at `instant`.
    pub fn offset_at_instant_with_provider(
        &self,
        instant: &Instant,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<ZoneOffset> {
        match self.zone {
            ZoneId::Fixed(offset) => Ok(*offset),
            ZoneId::Named(name) => {
                let info = provider.offset_for_epoch_seconds(name, instant.epoch_seconds())?;
                to_zone_offset(info.offset)
            }
        }
    }

    /// The offsets at which `local` exists in this zone.
    pub fn local_offsets_with_provider(
        &self,
        local: &LocalDateTime,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<LocalOffsets> {
        let name = match self.zone {
            ZoneId::Fixed(offset) => return Ok(LocalOffsets::Single(*offset)),
            ZoneId::Named(name) => name,
        };
        let offsets = match provider.local_time_records(name, local.iso.to_local_seconds())? {
            LocalTimeRecordResult::Single(offset) => LocalOffsets::Single(to_zone_offset(offset)?),
            LocalTimeRecordResult::Empty(gap) => LocalOffsets::Gap {
                before: to_zone_offset(gap.offset_before)?,
                after: to_zone_offset(gap.offset_after)?,
            },
            LocalTimeRecordResult::Ambiguous { first, second } => LocalOffsets::Overlap {
                earlier: to_zone_offset(first)?,
                later: to_zone_offset(second)?,
            },
        };
        Ok(offsets)
    }

    /// Whether `offset` is one of the offsets at which `local` exists.
    pub fn is_valid_offset_with_provider(
        &self,
        local: &LocalDateTime,
        offset: ZoneOffset,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<bool> {
        Ok(self
            .local_offsets_with_provider(local, provider)?
            .is_valid(offset))
    }

    /// The first offset change after `instant`, if any.
    pub fn next_transition_with_provider(
        &self,
        instant: &Instant,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        self.transition(instant.epoch_seconds(), TransitionDirection::Next, provider)
    }

    /// The last offset change before `instant`, if any.
    pub fn previous_transition_with_provider(
        &self,
        instant: &Instant,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        // Transitions fall on whole seconds, so one at the floored second
        // is still before an instant with a fraction.
        let seconds = if instant.subsec_nanos() > 0 {
            instant.epoch_seconds() + 1
        } else {
            instant.epoch_seconds()
        };
        self.transition(seconds, TransitionDirection::Previous, provider)
    }

    fn transition(
        &self,
        epoch_seconds: i64,
        direction: TransitionDirection,
        provider: &(impl ZoneRulesProvider + ?Sized),
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        let ZoneId::Named(name) = self.zone else {
            return Ok(None);
        };
        provider
            .transition(name, epoch_seconds, direction)?
            .map(ZoneOffsetTransition::try_from)
            .transpose()
    }
}

// ==== LocalOffsets ====

/// The offsets at which a local date-time exists in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOffsets {
    /// The local date-time occurs exactly once.
    Single(ZoneOffset),
    /// The local date-time is skipped as the clocks are set forward.
    Gap {
        before: ZoneOffset,
        after: ZoneOffset,
    },
    /// The local date-time occurs twice as the clocks are set back.
    Overlap {
        /// The offset of the earlier instant, which is the larger offset.
        earlier: ZoneOffset,
        later: ZoneOffset,
    },
}

impl LocalOffsets {
    /// Whether `offset` is valid for the local date-time.
    #[must_use]
    pub fn is_valid(&self, offset: ZoneOffset) -> bool {
        match self {
            Self::Single(single) => *single == offset,
            Self::Gap { .. } => false,
            Self::Overlap { earlier, later } => *earlier == offset || *later == offset,
        }
    }

    /// Picks the local date-time and offset for `local` according to
    /// `disambiguation`.
    ///
    /// The local date-time only changes in a gap, where it is shifted by
    /// the length of the gap.
    pub fn resolve(
        &self,
        local: &LocalDateTime,
        disambiguation: Disambiguation,
    ) -> TemporalResult<(LocalDateTime, ZoneOffset)> {
        match *self {
            Self::Single(offset) => Ok((*local, offset)),
            Self::Overlap { earlier, later } => {
                let offset = match disambiguation {
                    Disambiguation::Compatible | Disambiguation::Earlier => earlier,
                    Disambiguation::Later => later,
                    Disambiguation::Reject => {
                        return Err(TemporalError::range().with_message(format!(
                            "{local} is ambiguous, occurring at both {earlier} and {later}"
                        )))
                    }
                };
                #[cfg(feature = "log")]
                log::debug!("{local} falls in an overlap, resolved with {disambiguation} to {offset}");
                Ok((*local, offset))
            }
            Self::Gap { before, after } => {
                let gap = i128::from(after.total_seconds() - before.total_seconds())
                    * i128::from(NS_PER_SECOND);
                let resolved = match disambiguation {
                    Disambiguation::Compatible | Disambiguation::Later => {
                        (local.add_nanoseconds(gap)?, after)
                    }
                    Disambiguation::Earlier => (local.add_nanoseconds(-gap)?, before),
                    Disambiguation::Reject => {
                        return Err(TemporalError::range().with_message(format!(
                            "{local} does not exist, the offset changes from {before} to {after}"
                        )))
                    }
                };
                #[cfg(feature = "log")]
                log::debug!(
                    "{local} falls in a gap, resolved with {disambiguation} to {}{}",
                    resolved.0,
                    resolved.1
                );
                Ok(resolved)
            }
        }
    }

    /// Like `resolve`, but keeps `preferred` when it is one of the two
    /// offsets of an overlap.
    pub(crate) fn resolve_preferring(
        &self,
        local: &LocalDateTime,
        preferred: ZoneOffset,
        disambiguation: Disambiguation,
    ) -> TemporalResult<(LocalDateTime, ZoneOffset)> {
        match self {
            Self::Overlap { .. } if self.is_valid(preferred) => Ok((*local, preferred)),
            _ => self.resolve(local, disambiguation),
        }
    }
}

// ==== ZoneOffsetTransition ====

/// A change of a zone's offset at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransition {
    instant: Instant,
    offset_before: ZoneOffset,
    offset_after: ZoneOffset,
}

impl TryFrom<ZoneTransition> for ZoneOffsetTransition {
    type Error = TemporalError;

    fn try_from(value: ZoneTransition) -> Result<Self, Self::Error> {
        temporal_assert!(
            value.offset_before != value.offset_after,
            "transition at {} does not change the offset",
            value.epoch_seconds
        );
        Ok(Self {
            instant: Instant::from_epoch_seconds(value.epoch_seconds)?,
            offset_before: to_zone_offset(value.offset_before)?,
            offset_after: to_zone_offset(value.offset_after)?,
        })
    }
}

impl ZoneOffsetTransition {
    /// The instant at which `offset_after` takes effect.
    #[inline]
    #[must_use]
    pub const fn instant(&self) -> Instant {
        self.instant
    }

    #[inline]
    #[must_use]
    pub const fn offset_before(&self) -> ZoneOffset {
        self.offset_before
    }

    #[inline]
    #[must_use]
    pub const fn offset_after(&self) -> ZoneOffset {
        self.offset_after
    }

    /// Whether local time jumps forward, skipping a range of local times.
    #[inline]
    #[must_use]
    pub const fn is_gap(&self) -> bool {
        self.offset_after.total_seconds() > self.offset_before.total_seconds()
    }

    /// Whether local time is set back, repeating a range of local times.
    #[inline]
    #[must_use]
    pub const fn is_overlap(&self) -> bool {
        self.offset_after.total_seconds() < self.offset_before.total_seconds()
    }

    /// The length of the gap or overlap, negative for an overlap.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_seconds(
            self.offset_after.total_seconds() as i64 - self.offset_before.total_seconds() as i64,
        )
    }

    /// The local date-time just before the transition, as seen with the
    /// old offset.
    pub fn local_date_time_before(&self) -> TemporalResult<LocalDateTime> {
        self.instant.to_local(self.offset_before)
    }

    /// The local date-time at the transition, as seen with the new offset.
    pub fn local_date_time_after(&self) -> TemporalResult<LocalDateTime> {
        self.instant.to_local(self.offset_after)
    }
}

impl core::fmt::Display for ZoneOffsetTransition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = if self.is_gap() { "Gap" } else { "Overlap" };
        write!(
            f,
            "Transition[{kind} at {} from {} to {}]",
            self.instant, self.offset_before, self.offset_after
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempora_provider::{provider::UtcOnlyProvider, TzdbProvider};

    fn local(text: &str) -> LocalDateTime {
        text.parse().unwrap()
    }

    fn offset(hours: i32) -> ZoneOffset {
        ZoneOffset::from_hours(hours).unwrap()
    }

    #[test]
    fn parse_zone_ids() {
        let provider = TzdbProvider::default();
        let zone = ZoneId::try_from_str_with_provider("America/New_York", &provider).unwrap();
        assert_eq!(zone, ZoneId::Named("America/New_York".into()));
        assert_eq!(zone.to_string(), "America/New_York");

        let fixed = ZoneId::try_from_str_with_provider("+02:00", &provider).unwrap();
        assert_eq!(fixed, ZoneId::Fixed(offset(2)));
        assert_eq!(fixed.identifier(), "+02:00");
        assert!(fixed.rules().is_fixed_offset());

        assert_eq!(
            ZoneId::try_from_str_with_provider("Z", &provider),
            Ok(ZoneId::Fixed(ZoneOffset::UTC))
        );
        assert_eq!(
            ZoneId::try_from_str_with_provider("Mars/Olympus_Mons", &provider)
                .map_err(|e| e.kind()),
            Err(ErrorKind::UnknownZone)
        );
        assert_eq!(
            ZoneId::try_from_str_with_provider("+19:00", &provider).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidOffset)
        );
        assert_eq!(
            ZoneId::try_from_str_with_provider("", &provider).map_err(|e| e.kind()),
            Err(ErrorKind::Parse)
        );
    }

    #[test]
    fn available_ids() {
        let ids = ZoneId::available_zone_ids_with_provider(&UtcOnlyProvider).unwrap();
        assert_eq!(ids, ["UTC"]);
    }

    #[test]
    fn offsets_at_instants() {
        let provider = TzdbProvider::default();
        let zone = ZoneId::try_from_str_with_provider("America/New_York", &provider).unwrap();
        let rules = zone.rules();
        let summer = Instant::from_epoch_seconds(1_398_721_550).unwrap();
        assert_eq!(
            rules.offset_at_instant_with_provider(&summer, &provider),
            Ok(offset(-4))
        );
        let winter = Instant::from_epoch_seconds(1_388_534_400).unwrap();
        assert_eq!(
            rules.offset_at_instant_with_provider(&winter, &provider),
            Ok(offset(-5))
        );
    }

    #[test]
    fn gaps_and_overlaps() {
        let provider = TzdbProvider::default();
        let zone = ZoneId::try_from_str_with_provider("America/New_York", &provider).unwrap();
        let rules = zone.rules();

        let skipped = local("2017-03-12T02:30");
        let gap = rules.local_offsets_with_provider(&skipped, &provider).unwrap();
        assert_eq!(
            gap,
            LocalOffsets::Gap {
                before: offset(-5),
                after: offset(-4)
            }
        );
        assert!(!gap.is_valid(offset(-5)));
        assert_eq!(
            gap.resolve(&skipped, Disambiguation::Compatible),
            Ok((local("2017-03-12T03:30"), offset(-4)))
        );
        assert_eq!(
            gap.resolve(&skipped, Disambiguation::Earlier),
            Ok((local("2017-03-12T01:30"), offset(-5)))
        );
        assert_eq!(
            gap.resolve(&skipped, Disambiguation::Reject).map_err(|e| e.kind()),
            Err(ErrorKind::Range)
        );

        let repeated = local("2017-11-05T01:30");
        let overlap = rules.local_offsets_with_provider(&repeated, &provider).unwrap();
        assert_eq!(
            overlap,
            LocalOffsets::Overlap {
                earlier: offset(-4),
                later: offset(-5)
            }
        );
        assert_eq!(
            overlap.resolve(&repeated, Disambiguation::Compatible),
            Ok((repeated, offset(-4)))
        );
        assert_eq!(
            overlap.resolve(&repeated, Disambiguation::Later),
            Ok((repeated, offset(-5)))
        );
        assert_eq!(
            overlap.resolve_preferring(&repeated, offset(-5), Disambiguation::Compatible),
            Ok((repeated, offset(-5)))
        );
        assert!(rules
            .is_valid_offset_with_provider(&repeated, offset(-5), &provider)
            .unwrap());
        assert!(!rules
            .is_valid_offset_with_provider(&local("2017-06-01T12:00"), offset(-5), &provider)
            .unwrap());
    }

    #[test]
    fn transitions() {
        let provider = TzdbProvider::default();
        let zone = ZoneId::try_from_str_with_provider("America/New_York", &provider).unwrap();
        let rules = zone.rules();
        // 2017-01-01T00:00Z
        let start = Instant::from_epoch_seconds(1_483_228_800).unwrap();

        let next = rules
            .next_transition_with_provider(&start, &provider)
            .unwrap()
            .unwrap();
        assert!(next.is_gap());
        assert_eq!(next.instant().to_string(), "2017-03-12T07:00:00Z");
        assert_eq!(next.duration(), Duration::from_seconds(3600));
        assert_eq!(next.local_date_time_before(), Ok(local("2017-03-12T02:00")));
        assert_eq!(next.local_date_time_after(), Ok(local("2017-03-12T03:00")));

        let previous = rules
            .previous_transition_with_provider(&next.instant(), &provider)
            .unwrap()
            .unwrap();
        assert!(previous.is_overlap());
        assert_eq!(previous.instant().to_string(), "2016-11-06T06:00:00Z");

        let just_after = next
            .instant()
            .plus_duration(&Duration::from_nanos(1))
            .unwrap();
        assert_eq!(
            rules.previous_transition_with_provider(&just_after, &provider),
            Ok(Some(next))
        );

        let fixed = ZoneId::Fixed(offset(1));
        assert_eq!(
            fixed.rules().next_transition_with_provider(&start, &provider),
            Ok(None)
        );
    }

    #[test]
    fn ordering() {
        let paris = ZoneId::Named("Europe/Paris".into());
        let new_york = ZoneId::Named("America/New_York".into());
        assert!(new_york < paris);
        assert!(ZoneId::Fixed(offset(1)) < paris);
    }
}
