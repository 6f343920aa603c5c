//! Evaluation of POSIX TZ strings.
//!
//! A TZif footer holds a POSIX TZ string that describes the offsets in
//! effect after the last transition listed in the data block, e.g.
//! `EST5EDT,M3.2.0,M11.1.0`. Compiled data that only lists the transitions
//! up to the last rule change depends on this rule for every later
//! instant.
//!
//! For more information, see the [POSIX tz string docs](https://sourceware.org/glibc/manual/2.40/html_node/Proleptic-TZ.html)

use crate::provider::{TimeZoneTransitionInfo, TransitionDirection, UtcOffsetSeconds, ZoneTransition};
use crate::utils;

/// The day of the year on which a rule transition happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleDay {
    /// `Jn`: day `1..=365`, February 29th is never counted.
    JulianNoLeap(u16),
    /// `n`: zero-based day `0..=365`, February 29th is counted.
    Julian(u16),
    /// `Mm.w.d`: weekday `d` (0 = Sunday) of week `w` of month `m`, where
    /// week 5 means the last such weekday of the month.
    MonthWeekDay { month: u8, week: u8, weekday: u8 },
}

/// A rule transition: a day of the year and a local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub day: RuleDay,
    /// Seconds after local midnight, in the offset in effect before the
    /// transition. May be negative or exceed a day.
    pub time: i64,
}

impl TransitionRule {
    /// The epoch seconds of this transition in `year`.
    pub fn epoch_seconds_for_year(&self, year: i32, offset_before: UtcOffsetSeconds) -> i64 {
        let epoch_days = match self.day {
            RuleDay::JulianNoLeap(day) => {
                let leap_adjustment = i64::from(utils::is_leap(year) && day > 59);
                utils::epoch_days_from_gregorian_date(year, 1, 1) + i64::from(day) - 1
                    + leap_adjustment
            }
            RuleDay::Julian(day) => utils::epoch_days_from_gregorian_date(year, 1, 1) + i64::from(day),
            RuleDay::MonthWeekDay {
                month,
                week,
                weekday,
            } => {
                let first_of_month = utils::epoch_days_from_gregorian_date(year, month, 1);
                let first_weekday = utils::weekday_from_epoch_days(first_of_month);
                let days_in_month = i64::from(utils::iso_days_in_month(year, month));

                // Zero-based day of month of the first matching weekday.
                let mut day_of_month = (i64::from(weekday) - i64::from(first_weekday)).rem_euclid(7)
                    + 7 * i64::from(week.saturating_sub(1));
                // Week 5 means "the last one", which may be the fourth.
                while day_of_month >= days_in_month {
                    day_of_month -= 7;
                }
                first_of_month + day_of_month
            }
        };

        // The rule time is local, so remove the offset in effect before it.
        epoch_days * utils::SECONDS_PER_DAY + self.time - offset_before.0
    }
}

/// The daylight saving part of a POSIX TZ string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRule {
    pub offset: UtcOffsetSeconds,
    pub start: TransitionRule,
    pub end: TransitionRule,
}

/// A parsed POSIX TZ string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosixRule {
    pub std_offset: UtcOffsetSeconds,
    pub dst: Option<DstRule>,
}

impl PosixRule {
    /// The two transitions of `year`, in rule order (DST start, DST end).
    fn transitions_for_year(&self, dst: &DstRule, year: i32) -> [ZoneTransition; 2] {
        [
            ZoneTransition {
                epoch_seconds: dst.start.epoch_seconds_for_year(year, self.std_offset),
                offset_before: self.std_offset,
                offset_after: dst.offset,
            },
            ZoneTransition {
                epoch_seconds: dst.end.epoch_seconds_for_year(year, dst.offset),
                offset_before: dst.offset,
                offset_after: self.std_offset,
            },
        ]
    }

    /// The transitions of the years surrounding `epoch_seconds`, sorted.
    ///
    /// Looking at the neighbouring years covers rules whose daylight saving
    /// period spans the new year (southern hemisphere zones) as well as
    /// instants close to January 1st.
    fn surrounding_transitions(&self, dst: &DstRule, epoch_seconds: i64) -> [ZoneTransition; 6] {
        let (year, _, _) =
            utils::ymd_from_epoch_days(utils::epoch_seconds_to_epoch_days(epoch_seconds));
        let [a, b] = self.transitions_for_year(dst, year - 1);
        let [c, d] = self.transitions_for_year(dst, year);
        let [e, f] = self.transitions_for_year(dst, year + 1);
        let mut transitions = [a, b, c, d, e, f];
        transitions.sort_unstable_by_key(|t| t.epoch_seconds);
        transitions
    }

    /// The offset in effect at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> TimeZoneTransitionInfo {
        let Some(dst) = &self.dst else {
            // Regardless of the time, there is one variant and we can return it.
            return TimeZoneTransitionInfo {
                transition_epoch: None,
                offset: self.std_offset,
            };
        };

        let transitions = self.surrounding_transitions(dst, epoch_seconds);
        match transitions
            .iter()
            .rev()
            .find(|t| t.epoch_seconds <= epoch_seconds)
        {
            Some(t) => TimeZoneTransitionInfo {
                transition_epoch: Some(t.epoch_seconds),
                offset: t.offset_after,
            },
            // Unreachable in practice: last year's transitions precede the instant.
            None => TimeZoneTransitionInfo {
                transition_epoch: None,
                offset: self.std_offset,
            },
        }
    }

    /// The closest rule transition strictly after or before `epoch_seconds`.
    pub fn transition(
        &self,
        epoch_seconds: i64,
        direction: TransitionDirection,
    ) -> Option<ZoneTransition> {
        let dst = self.dst.as_ref()?;
        let transitions = self.surrounding_transitions(dst, epoch_seconds);
        match direction {
            TransitionDirection::Next => transitions
                .into_iter()
                .find(|t| t.epoch_seconds > epoch_seconds),
            TransitionDirection::Previous => transitions
                .into_iter()
                .rev()
                .find(|t| t.epoch_seconds < epoch_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // EST5EDT,M3.2.0,M11.1.0
    const NEW_YORK: PosixRule = PosixRule {
        std_offset: UtcOffsetSeconds(-5 * 3600),
        dst: Some(DstRule {
            offset: UtcOffsetSeconds(-4 * 3600),
            start: TransitionRule {
                day: RuleDay::MonthWeekDay {
                    month: 3,
                    week: 2,
                    weekday: 0,
                },
                time: 7200,
            },
            end: TransitionRule {
                day: RuleDay::MonthWeekDay {
                    month: 11,
                    week: 1,
                    weekday: 0,
                },
                time: 7200,
            },
        }),
    };

    // AEST-10AEDT,M10.1.0,M4.1.0/3
    const SYDNEY: PosixRule = PosixRule {
        std_offset: UtcOffsetSeconds(10 * 3600),
        dst: Some(DstRule {
            offset: UtcOffsetSeconds(11 * 3600),
            start: TransitionRule {
                day: RuleDay::MonthWeekDay {
                    month: 10,
                    week: 1,
                    weekday: 0,
                },
                time: 7200,
            },
            end: TransitionRule {
                day: RuleDay::MonthWeekDay {
                    month: 4,
                    week: 1,
                    weekday: 0,
                },
                time: 10800,
            },
        }),
    };

    fn epoch_seconds(year: i32, month: u8, day: u8, hour: i64) -> i64 {
        utils::epoch_days_from_gregorian_date(year, month, day) * utils::SECONDS_PER_DAY
            + hour * 3600
    }

    #[test]
    fn new_york_2017_transitions() {
        let dst = NEW_YORK.dst.unwrap();
        let [start, end] = NEW_YORK.transitions_for_year(&dst, 2017);
        // 2017-03-12T02:00-05:00 and 2017-11-05T02:00-04:00
        assert_eq!(start.epoch_seconds, epoch_seconds(2017, 3, 12, 7));
        assert_eq!(end.epoch_seconds, epoch_seconds(2017, 11, 5, 6));
        assert!(start.is_gap());
        assert!(!end.is_gap());
    }

    #[test]
    fn new_york_offsets() {
        let april = NEW_YORK.offset_at(epoch_seconds(2014, 4, 29, 1));
        assert_eq!(april.offset, UtcOffsetSeconds(-4 * 3600));
        assert_eq!(april.transition_epoch, Some(epoch_seconds(2014, 3, 9, 7)));

        let january = NEW_YORK.offset_at(epoch_seconds(2014, 1, 1, 0));
        assert_eq!(january.offset, UtcOffsetSeconds(-5 * 3600));
        assert_eq!(january.transition_epoch, Some(epoch_seconds(2013, 11, 3, 6)));
    }

    #[test]
    fn sydney_spans_new_year() {
        let january = SYDNEY.offset_at(epoch_seconds(2018, 1, 15, 0));
        assert_eq!(january.offset, UtcOffsetSeconds(11 * 3600));
        let july = SYDNEY.offset_at(epoch_seconds(2018, 7, 15, 0));
        assert_eq!(july.offset, UtcOffsetSeconds(10 * 3600));

        // 2018-04-01T03:00+11:00 is 2018-03-31T16:00Z
        let next = SYDNEY
            .transition(epoch_seconds(2018, 1, 15, 0), TransitionDirection::Next)
            .unwrap();
        assert_eq!(next.epoch_seconds, epoch_seconds(2018, 3, 31, 16));
        assert_eq!(next.offset_after, UtcOffsetSeconds(10 * 3600));
    }

    #[test]
    fn last_weekday_of_month() {
        // CET-1CEST,M3.5.0,M10.5.0/3: the last Sunday of March 2014 was the 30th.
        let rule = TransitionRule {
            day: RuleDay::MonthWeekDay {
                month: 3,
                week: 5,
                weekday: 0,
            },
            time: 7200,
        };
        assert_eq!(
            rule.epoch_seconds_for_year(2014, UtcOffsetSeconds(3600)),
            epoch_seconds(2014, 3, 30, 1)
        );
    }

    #[test]
    fn julian_days() {
        let no_leap = TransitionRule {
            day: RuleDay::JulianNoLeap(60),
            time: 0,
        };
        // J60 is always March 1st.
        assert_eq!(
            no_leap.epoch_seconds_for_year(2016, UtcOffsetSeconds(0)),
            epoch_seconds(2016, 3, 1, 0)
        );
        let with_leap = TransitionRule {
            day: RuleDay::Julian(59),
            time: 0,
        };
        assert_eq!(
            with_leap.epoch_seconds_for_year(2016, UtcOffsetSeconds(0)),
            epoch_seconds(2016, 2, 29, 0)
        );
    }

    #[test]
    fn no_dst() {
        let rule = PosixRule {
            std_offset: UtcOffsetSeconds(9 * 3600),
            dst: None,
        };
        assert_eq!(rule.offset_at(0).offset, UtcOffsetSeconds(9 * 3600));
        assert_eq!(rule.transition(0, TransitionDirection::Next), None);
    }
}
