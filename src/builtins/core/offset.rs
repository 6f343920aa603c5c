//! This module implements `ZoneOffset`.

use alloc::format;
use core::str::FromStr;

use writeable::Writeable;

use crate::{
    parsers::{parse_offset_str, FormattableOffset},
    TemporalError, TemporalResult,
};

const MAX_SECONDS: i32 = 18 * 3_600;

/// A fixed difference from UTC, in seconds, within ±18 hours.
///
/// Offsets order by their total seconds, so `-05:00` is less than `+01:00`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneOffset {
    seconds: i32,
}

impl ZoneOffset {
    /// The offset of UTC, `Z`.
    pub const UTC: Self = Self { seconds: 0 };
    /// The smallest offset, `-18:00`.
    pub const MIN: Self = Self {
        seconds: -MAX_SECONDS,
    };
    /// The largest offset, `+18:00`.
    pub const MAX: Self = Self {
        seconds: MAX_SECONDS,
    };

    pub fn from_total_seconds(seconds: i32) -> TemporalResult<Self> {
        if !(-MAX_SECONDS..=MAX_SECONDS).contains(&seconds) {
            return Err(TemporalError::invalid_offset().with_message(format!(
                "offset of {seconds} seconds is outside of the range -18:00..=+18:00"
            )));
        }
        Ok(Self { seconds })
    }

    pub fn from_hours(hours: i32) -> TemporalResult<Self> {
        Self::from_hours_minutes_seconds(hours, 0, 0)
    }

    pub fn from_hours_minutes(hours: i32, minutes: i32) -> TemporalResult<Self> {
        Self::from_hours_minutes_seconds(hours, minutes, 0)
    }

    /// Creates an offset from its components, which must all share the
    /// same sign.
    pub fn from_hours_minutes_seconds(
        hours: i32,
        minutes: i32,
        seconds: i32,
    ) -> TemporalResult<Self> {
        if !(-18..=18).contains(&hours) {
            return Err(TemporalError::invalid_offset().with_message(format!(
                "offset hours {hours} are outside of the range -18..=18"
            )));
        }
        if !(-59..=59).contains(&minutes) || !(-59..=59).contains(&seconds) {
            return Err(TemporalError::invalid_offset()
                .with_message("offset minutes and seconds must be within -59..=59"));
        }
        let signs = [hours.signum(), minutes.signum(), seconds.signum()];
        if signs.contains(&1) && signs.contains(&-1) {
            return Err(TemporalError::invalid_offset().with_message(format!(
                "offset components {hours}, {minutes} and {seconds} do not share a sign"
            )));
        }
        Self::from_total_seconds(hours * 3_600 + minutes * 60 + seconds)
    }

    #[inline]
    #[must_use]
    pub const fn total_seconds(&self) -> i32 {
        self.seconds
    }

    pub(crate) fn to_formattable(self) -> FormattableOffset {
        FormattableOffset::from_seconds(self.seconds)
    }
}

impl core::fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable().write_to(f)
    }
}

impl FromStr for ZoneOffset {
    type Err = TemporalError;

    /// Parses `Z`, `±HH`, `±HH:MM`, `±HHMM`, `±HH:MM:SS` or `±HHMMSS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = parse_offset_str(s).map_err(|e| {
            TemporalError::parse()
                .with_message(format!("Text '{s}' could not be parsed: {}", e.message()))
        })?;
        Self::from_total_seconds(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    #[test]
    fn components() {
        assert_eq!(
            ZoneOffset::from_hours_minutes(5, 30).unwrap().total_seconds(),
            19_800
        );
        assert_eq!(
            ZoneOffset::from_hours_minutes_seconds(-1, -30, -15)
                .unwrap()
                .total_seconds(),
            -5_415
        );
        assert_eq!(
            ZoneOffset::from_hours_minutes(0, -30).unwrap().to_string(),
            "-00:30"
        );
        for err in [
            ZoneOffset::from_hours_minutes(1, -30),
            ZoneOffset::from_hours(19),
            ZoneOffset::from_hours_minutes(18, 1),
            ZoneOffset::from_hours_minutes(1, 60),
            ZoneOffset::from_total_seconds(MAX_SECONDS + 1),
        ] {
            assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::InvalidOffset));
        }
        assert_eq!(ZoneOffset::from_hours(18), Ok(ZoneOffset::MAX));
        assert_eq!(ZoneOffset::from_hours(-18), Ok(ZoneOffset::MIN));
    }

    #[test]
    fn text() {
        assert_eq!(ZoneOffset::UTC.to_string(), "Z");
        assert_eq!(ZoneOffset::from_hours(-4).unwrap().to_string(), "-04:00");
        assert_eq!(
            ZoneOffset::from_total_seconds(3_661).unwrap().to_string(),
            "+01:01:01"
        );
        for (text, seconds) in [
            ("Z", 0),
            ("+02", 7_200),
            ("+0530", 19_800),
            ("-04:00", -14_400),
            ("+01:01:01", 3_661),
        ] {
            assert_eq!(text.parse::<ZoneOffset>().unwrap().total_seconds(), seconds);
        }
        assert_eq!(
            "+5".parse::<ZoneOffset>().map_err(|e| e.kind()),
            Err(ErrorKind::Parse)
        );
        assert_eq!(
            "+19:00".parse::<ZoneOffset>().map_err(|e| e.kind()),
            Err(ErrorKind::InvalidOffset)
        );
    }

    #[test]
    fn ordering() {
        let west = ZoneOffset::from_hours(-5).unwrap();
        let east = ZoneOffset::from_hours(1).unwrap();
        assert!(west < ZoneOffset::UTC);
        assert!(ZoneOffset::UTC < east);
        assert_eq!(ZoneOffset::default(), ZoneOffset::UTC);
    }
}
