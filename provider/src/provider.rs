//! The `ZoneRulesProvider` trait.

use alloc::string::String;
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::ZoneProviderError;

pub type ZoneProviderResult<T> = Result<T, ZoneProviderError>;

/// The largest offset from UTC, 18 hours, in seconds.
pub const MAX_OFFSET_SECONDS: i64 = 18 * 3600;

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to UTC to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffsetSeconds(pub i64);

/// The offsets in effect on either side of a gap.
///
/// A local time inside a gap has no valid offset. Knowing the offsets
/// before and after lets a caller shift the local time across the gap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GapEntryOffsets {
    pub offset_before: UtcOffsetSeconds,
    pub offset_after: UtcOffsetSeconds,
}

impl GapEntryOffsets {
    /// The length of the gap in seconds.
    pub fn gap_seconds(&self) -> i64 {
        self.offset_after.0 - self.offset_before.0
    }
}

/// The `LocalTimeRecordResult` represents the result of searching for the
/// offsets of a local time, i.e. epoch seconds without an offset applied.
///
/// The search may find no offset (the local time falls in a gap) or two
/// offsets (the local time is repeated in an overlap). For `Ambiguous`,
/// `first` is the offset giving the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimeRecordResult {
    Empty(GapEntryOffsets),
    Single(UtcOffsetSeconds),
    Ambiguous {
        first: UtcOffsetSeconds,
        second: UtcOffsetSeconds,
    },
}

impl From<UtcOffsetSeconds> for LocalTimeRecordResult {
    fn from(value: UtcOffsetSeconds) -> Self {
        Self::Single(value)
    }
}

/// `TimeZoneTransitionInfo` represents the offset in effect at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneTransitionInfo {
    /// The epoch seconds of the transition that put `offset` in effect, if any.
    pub transition_epoch: Option<i64>,
    /// The time zone offset in seconds.
    pub offset: UtcOffsetSeconds,
}

/// A change of offset at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTransition {
    /// The epoch seconds at which `offset_after` takes effect.
    pub epoch_seconds: i64,
    pub offset_before: UtcOffsetSeconds,
    pub offset_after: UtcOffsetSeconds,
}

impl ZoneTransition {
    /// Whether local time jumps forward at this transition.
    pub fn is_gap(&self) -> bool {
        self.offset_after > self.offset_before
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy)]
pub struct ParseDirectionError;

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid direction.")
    }
}

impl FromStr for TransitionDirection {
    type Err = ParseDirectionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            _ => Err(ParseDirectionError),
        }
    }
}

impl fmt::Display for TransitionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
        .fmt(f)
    }
}

/// The `ZoneRulesProvider` trait provides the methods a provider must
/// implement in order to source time zone rules from its data.
///
/// Providers are read-only. Methods take `&self`, and any caching is an
/// implementation detail of the provider.
pub trait ZoneRulesProvider {
    /// Returns the provider's spelling of `identifier`, or an
    /// `UnknownIdentifier` error.
    fn normalize_identifier(&self, identifier: &str) -> ZoneProviderResult<String>;

    /// All identifiers this provider can resolve.
    fn available_identifiers(&self) -> ZoneProviderResult<Vec<String>>;

    /// The offset in effect at `epoch_seconds`.
    fn offset_for_epoch_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> ZoneProviderResult<TimeZoneTransitionInfo>;

    /// The closest offset change strictly after (or before) `epoch_seconds`.
    fn transition(
        &self,
        identifier: &str,
        epoch_seconds: i64,
        direction: TransitionDirection,
    ) -> ZoneProviderResult<Option<ZoneTransition>>;

    /// The valid offsets for a local time expressed as epoch seconds
    /// without an offset applied.
    ///
    /// The default implementation walks every transition within
    /// [`MAX_OFFSET_SECONDS`] of the local time, since any instant showing
    /// that local time lies in this window, and keeps the offsets in
    /// effect there that map back onto the local time.
    fn local_time_records(
        &self,
        identifier: &str,
        local_seconds: i64,
    ) -> ZoneProviderResult<LocalTimeRecordResult> {
        let window_start = local_seconds - MAX_OFFSET_SECONDS;
        let window_end = local_seconds + MAX_OFFSET_SECONDS;

        let mut transitions = Vec::new();
        let mut cursor = window_start;
        while let Some(transition) =
            self.transition(identifier, cursor, TransitionDirection::Next)?
        {
            if transition.epoch_seconds > window_end {
                break;
            }
            if transition.epoch_seconds <= cursor {
                return Err(ZoneProviderError::Assert(
                    "next transition did not move forward",
                ));
            }
            cursor = transition.epoch_seconds;
            transitions.push(transition);
        }

        let mut candidates = Vec::with_capacity(transitions.len() + 1);
        candidates.push(
            self.offset_for_epoch_seconds(identifier, window_start)?
                .offset,
        );
        candidates.extend(transitions.iter().map(|t| t.offset_after));
        candidates.sort_unstable();
        candidates.dedup();

        let mut valid = Vec::with_capacity(candidates.len());
        for offset in candidates {
            let found = self
                .offset_for_epoch_seconds(identifier, local_seconds - offset.0)?
                .offset;
            if found == offset {
                valid.push(offset);
            }
        }

        let result = match valid.as_slice() {
            [] => {
                let gap = transitions
                    .iter()
                    .find(|t| {
                        t.epoch_seconds + t.offset_before.0 <= local_seconds
                            && local_seconds < t.epoch_seconds + t.offset_after.0
                    })
                    .ok_or(ZoneProviderError::Assert(
                        "local time has no offset outside of a gap",
                    ))?;
                LocalTimeRecordResult::Empty(GapEntryOffsets {
                    offset_before: gap.offset_before,
                    offset_after: gap.offset_after,
                })
            }
            [offset] => LocalTimeRecordResult::Single(*offset),
            // Sorted ascending, so the largest offset gives the earliest
            // instant.
            [latest, .., earliest] => LocalTimeRecordResult::Ambiguous {
                first: *earliest,
                second: *latest,
            },
        };
        Ok(result)
    }
}

/// A provider that only knows the `UTC` zone.
///
/// Useful when no time zone data is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcOnlyProvider;

impl UtcOnlyProvider {
    fn check(identifier: &str) -> ZoneProviderResult<()> {
        if identifier.eq_ignore_ascii_case("UTC") {
            return Ok(());
        }
        Err(ZoneProviderError::UnknownIdentifier(identifier.into()))
    }
}

impl ZoneRulesProvider for UtcOnlyProvider {
    fn normalize_identifier(&self, identifier: &str) -> ZoneProviderResult<String> {
        Self::check(identifier)?;
        Ok("UTC".into())
    }

    fn available_identifiers(&self) -> ZoneProviderResult<Vec<String>> {
        Ok(alloc::vec!["UTC".into()])
    }

    fn offset_for_epoch_seconds(
        &self,
        identifier: &str,
        _: i64,
    ) -> ZoneProviderResult<TimeZoneTransitionInfo> {
        Self::check(identifier)?;
        Ok(TimeZoneTransitionInfo {
            transition_epoch: None,
            offset: UtcOffsetSeconds(0),
        })
    }

    fn transition(
        &self,
        identifier: &str,
        _: i64,
        _: TransitionDirection,
    ) -> ZoneProviderResult<Option<ZoneTransition>> {
        Self::check(identifier)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A zone starting at `initial` seconds of offset, changing to the
    /// offset of each `(epoch_seconds, offset)` pair in turn.
    struct Scripted {
        initial: i64,
        changes: &'static [(i64, i64)],
    }

    impl Scripted {
        fn offset_at(&self, epoch_seconds: i64) -> i64 {
            self.changes
                .iter()
                .take_while(|(at, _)| *at <= epoch_seconds)
                .last()
                .map_or(self.initial, |(_, offset)| *offset)
        }
    }

    impl ZoneRulesProvider for Scripted {
        fn normalize_identifier(&self, identifier: &str) -> ZoneProviderResult<String> {
            Ok(identifier.into())
        }

        fn available_identifiers(&self) -> ZoneProviderResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn offset_for_epoch_seconds(
            &self,
            _: &str,
            epoch_seconds: i64,
        ) -> ZoneProviderResult<TimeZoneTransitionInfo> {
            Ok(TimeZoneTransitionInfo {
                transition_epoch: None,
                offset: UtcOffsetSeconds(self.offset_at(epoch_seconds)),
            })
        }

        fn transition(
            &self,
            _: &str,
            epoch_seconds: i64,
            direction: TransitionDirection,
        ) -> ZoneProviderResult<Option<ZoneTransition>> {
            let at = match direction {
                TransitionDirection::Next => self
                    .changes
                    .iter()
                    .map(|(at, _)| *at)
                    .find(|at| *at > epoch_seconds),
                TransitionDirection::Previous => self
                    .changes
                    .iter()
                    .map(|(at, _)| *at)
                    .filter(|at| *at < epoch_seconds)
                    .last(),
            };
            Ok(at.map(|at| ZoneTransition {
                epoch_seconds: at,
                offset_before: UtcOffsetSeconds(self.offset_at(at - 1)),
                offset_after: UtcOffsetSeconds(self.offset_at(at)),
            }))
        }
    }

    /// +01:00, moving to +02:00 at epoch second 1000 and back at epoch
    /// second 1_000_000.
    const TWO_TRANSITIONS: Scripted = Scripted {
        initial: 3600,
        changes: &[(1000, 7200), (1_000_000, 3600)],
    };

    #[test]
    fn default_local_time_records() {
        let provider = TWO_TRANSITIONS;
        // Local times in [4600, 8200) are skipped.
        let gap = provider.local_time_records("x", 4700).unwrap();
        assert_eq!(
            gap,
            LocalTimeRecordResult::Empty(GapEntryOffsets {
                offset_before: UtcOffsetSeconds(3600),
                offset_after: UtcOffsetSeconds(7200),
            })
        );

        // Local times in [1_003_600, 1_007_200) are repeated.
        let overlap = provider.local_time_records("x", 1_007_100).unwrap();
        assert_eq!(
            overlap,
            LocalTimeRecordResult::Ambiguous {
                first: UtcOffsetSeconds(7200),
                second: UtcOffsetSeconds(3600),
            }
        );

        let single = provider.local_time_records("x", 200_000).unwrap();
        assert_eq!(single, LocalTimeRecordResult::Single(UtcOffsetSeconds(7200)));
        let single = provider.local_time_records("x", 2_000_000).unwrap();
        assert_eq!(single, LocalTimeRecordResult::Single(UtcOffsetSeconds(3600)));
    }

    #[test]
    fn transitions_hours_apart() {
        // +01:00, +05:00 for four hours from epoch second 100_000, then
        // +01:00 again.
        let provider = Scripted {
            initial: 3600,
            changes: &[(100_000, 18_000), (114_400, 3600)],
        };

        // Skipped: local [103_600, 118_000).
        assert_eq!(
            provider.local_time_records("x", 110_000).unwrap(),
            LocalTimeRecordResult::Empty(GapEntryOffsets {
                offset_before: UtcOffsetSeconds(3600),
                offset_after: UtcOffsetSeconds(18_000),
            })
        );
        // Repeated: local [118_000, 132_400).
        assert_eq!(
            provider.local_time_records("x", 120_000).unwrap(),
            LocalTimeRecordResult::Ambiguous {
                first: UtcOffsetSeconds(18_000),
                second: UtcOffsetSeconds(3600),
            }
        );
        assert_eq!(
            provider.local_time_records("x", 140_000).unwrap(),
            LocalTimeRecordResult::Single(UtcOffsetSeconds(3600))
        );
        assert_eq!(
            provider.local_time_records("x", 100_000).unwrap(),
            LocalTimeRecordResult::Single(UtcOffsetSeconds(3600))
        );
    }

    #[test]
    fn utc_only() {
        let provider = UtcOnlyProvider;
        assert_eq!(provider.normalize_identifier("utc").unwrap(), "UTC");
        assert!(matches!(
            provider.normalize_identifier("Europe/Paris"),
            Err(ZoneProviderError::UnknownIdentifier(_))
        ));
        assert_eq!(
            provider.local_time_records("UTC", 0).unwrap(),
            LocalTimeRecordResult::Single(UtcOffsetSeconds(0))
        );
    }
}
