//! A compact representation of TZif data.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536] and the [tzdata manual][tzif-manual]. Parsing is done
//! by the `tzif` [crate][tzif-crate]. This module keeps only what offset
//! resolution needs: the version 2+ data block (64-bit transition times),
//! the local time type offsets, and the footer as a [`PosixRule`].
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-manual]: https://man7.org/linux/man-pages/man5/tzfile.5.html
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use alloc::string::ToString;
use alloc::vec::Vec;
use std::path::Path;

use combine::Parser;
use tzif::data::{
    posix::{PosixTzString, TransitionDate, TransitionDay},
    tzif::TzifData,
};

use crate::{
    posix::{DstRule, PosixRule, RuleDay, TransitionRule},
    provider::{TimeZoneTransitionInfo, TransitionDirection, UtcOffsetSeconds, ZoneTransition},
    ZoneProviderError,
};

/// `LocalTimeRecord` represents a local time type of the data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeRecord {
    /// Whether the local time record is a Daylight Savings Time.
    pub is_dst: bool,
    /// The time zone offset in seconds.
    pub offset: UtcOffsetSeconds,
}

#[derive(Debug, Clone)]
pub struct Tzif {
    transition_times: Vec<i64>,
    transition_types: Vec<usize>,
    local_time_types: Vec<LocalTimeRecord>,
    footer: Option<PosixRule>,
}

impl TryFrom<TzifData> for Tzif {
    type Error = ZoneProviderError;

    fn try_from(value: TzifData) -> Result<Self, Self::Error> {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;
        // Version 1 files only carry the 32-bit block.
        let block = data_block2.unwrap_or(data_block1);

        let local_time_types: Vec<LocalTimeRecord> = block
            .local_time_type_records
            .iter()
            .map(|record| LocalTimeRecord {
                is_dst: record.is_dst,
                offset: UtcOffsetSeconds(record.utoff.0),
            })
            .collect();

        if local_time_types.is_empty() {
            return Err(ZoneProviderError::InvalidData(
                "TZif data has no local time types".into(),
            ));
        }
        if block.transition_times.len() != block.transition_types.len()
            || block
                .transition_types
                .iter()
                .any(|idx| *idx >= local_time_types.len())
        {
            return Err(ZoneProviderError::InvalidData(
                "TZif transition types do not match the local time types".into(),
            ));
        }

        Ok(Self {
            transition_times: block.transition_times.iter().map(|t| t.0).collect(),
            transition_types: block.transition_types,
            local_time_types,
            footer: footer.as_ref().map(PosixRule::from),
        })
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> Result<Self, ZoneProviderError> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(ZoneProviderError::InvalidData("Illformed Tzif data.".into()));
        };
        Self::try_from(parse_result)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ZoneProviderError> {
        let data = tzif::parse_tzif_file(path.as_ref())
            .map_err(|e| ZoneProviderError::InvalidData(e.to_string()))?;
        Self::try_from(data)
    }

    pub fn posix_rule(&self) -> Option<&PosixRule> {
        self.footer.as_ref()
    }

    /// The offset of time type 0, used for instants before the first
    /// transition.
    fn initial_offset(&self) -> UtcOffsetSeconds {
        self.local_time_types
            .first()
            .map(|r| r.offset)
            .unwrap_or_default()
    }

    /// The offset that takes effect at transition `idx`.
    fn offset_after(&self, idx: usize) -> UtcOffsetSeconds {
        self.transition_types
            .get(idx)
            .and_then(|ty| self.local_time_types.get(*ty))
            .map_or(self.initial_offset(), |r| r.offset)
    }

    /// The offset in effect before transition `idx`.
    fn offset_before(&self, idx: usize) -> UtcOffsetSeconds {
        match idx.checked_sub(1) {
            Some(previous) => self.offset_after(previous),
            None => self.initial_offset(),
        }
    }

    fn table_transition(&self, idx: usize) -> Option<ZoneTransition> {
        let epoch_seconds = *self.transition_times.get(idx)?;
        Some(ZoneTransition {
            epoch_seconds,
            offset_before: self.offset_before(idx),
            offset_after: self.offset_after(idx),
        })
    }

    /// Resolves the offset in effect at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> TimeZoneTransitionInfo {
        // Number of transitions at or before the instant.
        let idx = self.transition_times.partition_point(|t| *t <= epoch_seconds);
        let last = self.transition_times.last().copied();

        match (idx, last) {
            // <https://datatracker.ietf.org/doc/html/rfc8536#section-3.2>
            // If there are no transitions, local time for all timestamps is specified by the TZ
            // string in the footer if present and nonempty; otherwise, it is
            // specified by time type 0.
            (_, None) => match &self.footer {
                Some(rule) => rule.offset_at(epoch_seconds),
                None => TimeZoneTransitionInfo {
                    transition_epoch: None,
                    offset: self.initial_offset(),
                },
            },
            (0, Some(_)) => TimeZoneTransitionInfo {
                transition_epoch: None,
                offset: self.initial_offset(),
            },
            // Beyond the last transition, the footer describes local time.
            (idx, Some(last)) if idx == self.transition_times.len() => match &self.footer {
                Some(rule) => {
                    let info = rule.offset_at(epoch_seconds);
                    TimeZoneTransitionInfo {
                        transition_epoch: Some(info.transition_epoch.map_or(last, |t| t.max(last))),
                        offset: info.offset,
                    }
                }
                None => TimeZoneTransitionInfo {
                    transition_epoch: Some(last),
                    offset: self.offset_after(idx - 1),
                },
            },
            (idx, Some(_)) => TimeZoneTransitionInfo {
                transition_epoch: self.transition_times.get(idx - 1).copied(),
                offset: self.offset_after(idx - 1),
            },
        }
    }

    /// Returns the closest offset change strictly after or before
    /// `epoch_seconds`, skipping transitions that only change the
    /// abbreviation or the DST flag.
    pub fn transition(
        &self,
        epoch_seconds: i64,
        direction: TransitionDirection,
    ) -> Option<ZoneTransition> {
        let last = self.transition_times.last().copied();
        match direction {
            TransitionDirection::Next => {
                let start = self.transition_times.partition_point(|t| *t <= epoch_seconds);
                let table = (start..self.transition_times.len())
                    .filter_map(|idx| self.table_transition(idx))
                    .find(|t| t.offset_before != t.offset_after);
                if table.is_some() {
                    return table;
                }
                let rule = self.footer.as_ref()?;
                let from = last.map_or(epoch_seconds, |last| last.max(epoch_seconds));
                rule.transition(from, TransitionDirection::Next)
            }
            TransitionDirection::Previous => {
                if let Some(rule) = &self.footer {
                    let from_rule = rule.transition(epoch_seconds, TransitionDirection::Previous);
                    if let Some(t) = from_rule {
                        if last.is_none_or(|last| t.epoch_seconds > last) {
                            return Some(t);
                        }
                    }
                }
                let end = self.transition_times.partition_point(|t| *t < epoch_seconds);
                (0..end)
                    .rev()
                    .filter_map(|idx| self.table_transition(idx))
                    .find(|t| t.offset_before != t.offset_after)
            }
        }
    }
}

impl From<&PosixTzString> for PosixRule {
    fn from(value: &PosixTzString) -> Self {
        // The POSIX tz string stores offsets as negative offsets;
        // i.e. "seconds that must be added to reach UTC"
        let std_offset = UtcOffsetSeconds(-value.std_info.offset.0);
        let dst = value.dst_info.as_ref().map(|dst| DstRule {
            offset: UtcOffsetSeconds(-dst.variant_info.offset.0),
            start: TransitionRule::from(&dst.start_date),
            end: TransitionRule::from(&dst.end_date),
        });
        Self { std_offset, dst }
    }
}

impl From<&TransitionDate> for TransitionRule {
    fn from(value: &TransitionDate) -> Self {
        let day = match value.day {
            TransitionDay::NoLeap(day) => RuleDay::JulianNoLeap(day),
            TransitionDay::WithLeap(day) => RuleDay::Julian(day),
            TransitionDay::Mwd(month, week, weekday) => RuleDay::MonthWeekDay {
                month: u8::try_from(month).unwrap_or(0),
                week: u8::try_from(week).unwrap_or(0),
                weekday: u8::try_from(weekday).unwrap_or(0),
            },
        };
        Self {
            day,
            time: value.time.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    fn date_time_to_seconds(date: (i32, u8, u8), time: (u8, u8, u8)) -> i64 {
        let time_in_seconds = i64::from(time.0) * 3600 + i64::from(time.1) * 60 + i64::from(time.2);
        let epoch_days = utils::epoch_days_from_gregorian_date(date.0, date.1, date.2);
        time_in_seconds + (epoch_days * 86_400)
    }

    fn bundled(identifier: &str) -> Tzif {
        let (_, data) = jiff_tzdb::get(identifier).unwrap();
        Tzif::from_bytes(data).unwrap()
    }

    #[test]
    fn new_york_offsets() {
        let new_york = bundled("America/New_York");
        // 2014-04-29T01:45:50Z is 2014-04-28T21:45:50-04:00
        let seconds = date_time_to_seconds((2014, 4, 29), (1, 45, 50));
        assert_eq!(new_york.offset_at(seconds).offset, UtcOffsetSeconds(-14400));

        let seconds = date_time_to_seconds((2014, 1, 15), (12, 0, 0));
        assert_eq!(new_york.offset_at(seconds).offset, UtcOffsetSeconds(-18000));
    }

    #[test]
    fn exactly_at_transition() {
        let new_york = bundled("America/New_York");
        // 2017-03-12T07:00:00Z
        let transition = date_time_to_seconds((2017, 3, 12), (7, 0, 0));
        let info = new_york.offset_at(transition);
        assert_eq!(info.offset, UtcOffsetSeconds(-14400));
        assert_eq!(info.transition_epoch, Some(transition));

        let before = new_york.offset_at(transition - 1);
        assert_eq!(before.offset, UtcOffsetSeconds(-18000));
    }

    #[test]
    fn next_and_previous_transition() {
        let new_york = bundled("America/New_York");
        let seconds = date_time_to_seconds((2014, 4, 29), (1, 45, 50));

        let next = new_york
            .transition(seconds, TransitionDirection::Next)
            .unwrap();
        // 2014-11-02T06:00:00Z
        assert_eq!(
            next.epoch_seconds,
            date_time_to_seconds((2014, 11, 2), (6, 0, 0))
        );
        assert_eq!(next.offset_before, UtcOffsetSeconds(-14400));
        assert_eq!(next.offset_after, UtcOffsetSeconds(-18000));

        let previous = new_york
            .transition(seconds, TransitionDirection::Previous)
            .unwrap();
        // 2014-03-09T07:00:00Z
        assert_eq!(
            previous.epoch_seconds,
            date_time_to_seconds((2014, 3, 9), (7, 0, 0))
        );
        assert!(previous.is_gap());
    }

    #[test]
    fn mwd_transition_epoch() {
        let berlin = bundled("Europe/Berlin");
        let start_seconds = date_time_to_seconds((2028, 3, 30), (6, 0, 0));
        assert_eq!(
            berlin.offset_at(start_seconds).transition_epoch,
            // Sun, Mar 26 at 2:00 am
            Some(1837645200)
        );

        let end_seconds = date_time_to_seconds((2028, 10, 29), (6, 0, 0));
        assert_eq!(
            berlin.offset_at(end_seconds).transition_epoch,
            // Sun, Oct 29 at 3:00 am
            Some(1856394000)
        );
    }

    #[test]
    fn before_first_transition() {
        let new_york = bundled("America/New_York");
        let seconds = date_time_to_seconds((1880, 11, 5), (1, 30, 0));
        let info = new_york.offset_at(seconds);
        assert_eq!(info.transition_epoch, None);
        // Local mean time, -4:56:02
        assert_eq!(info.offset, UtcOffsetSeconds(-17762));
    }

    #[test]
    fn fixed_zone() {
        let utc = bundled("UTC");
        assert_eq!(utc.offset_at(0).offset, UtcOffsetSeconds(0));
        assert_eq!(utc.transition(0, TransitionDirection::Next), None);
    }
}
